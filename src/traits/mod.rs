pub mod chat_backend;

pub use chat_backend::ChatBackend;
