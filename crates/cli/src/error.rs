use dirq_compiler::CompileError;
use dirq_syntax::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the query: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Failed to compile the query: {0}")]
    Compile(#[from] CompileError),

    #[error("Failed to deserialize the options file as JSON: {0}")]
    OptionsDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Query check failed")]
    CheckFailed,
}
