use thiserror::Error;

/// Failure of the external narrative generator. Always fatal for the
/// analysis that triggered it.
#[derive(Error, Debug)]
pub enum GenerationFailure {
    #[error("narrative generator call failed: {0}")]
    Call(String),

    #[error("narrative generator returned an empty response")]
    Empty,

    #[error("failed to parse narrative response: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("evidence snapshot error: {0}")]
    Evidence(String),

    #[error("no narrative generator configured; set [narrative] command or pass --generator")]
    GeneratorNotConfigured,

    #[error("chat message cannot be empty")]
    EmptyChatMessage,

    #[error("history entry not found: {0}")]
    HistoryEntryNotFound(String),

    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScoreError>;
