pub mod llm;
pub mod session;
