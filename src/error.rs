use thiserror::Error;

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("passage has no words")]
    EmptyPassage,

    #[error("word delay must be between 1 and {max} ms, got {0} ms", max = crate::config::MAX_WORD_DELAY_MS)]
    InvalidPacing(u64),

    #[error("failed to read lesson config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse lesson config: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    #[error("environment variable {name} is not a valid number: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("page is missing element '{0}'")]
    MissingElement(String),
}
