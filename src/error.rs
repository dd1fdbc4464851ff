use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BenchError {
    #[error("The path {0} not exist")]
    PathNotExist(String),

    #[error("The path {0} is not a file")]
    NotAFile(String),

    #[error("Self test failed: {0}")]
    SelfTest(String),

    #[error("Load config failed: {0}")]
    Config(String),
}
