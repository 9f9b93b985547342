pub mod generator;
pub mod llm;
pub mod writer;
