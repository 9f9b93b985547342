pub mod config;
pub mod errors;
pub mod implementations;
pub mod models;
pub mod traits;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{ConfigError, GeneratorConfig};
pub use errors::{GenError, GenResult};
pub use implementations::generator::ArtifactGenerator;
pub use implementations::llm::OpenAiClient;
pub use implementations::writer::ArtifactWriter;
pub use models::artifact::ArtifactKind;
pub use models::generation::{GenerationMetadata, GenerationResult, RequestMode};
pub use traits::ChatBackend;
