/// Crate-wide result alias.
pub type TweenlineResult<T> = Result<T, TweenlineError>;

/// Error taxonomy shared by outline parsing, tween compilation and the timeline.
#[derive(thiserror::Error, Debug)]
pub enum TweenlineError {
    /// Invalid user-provided values (spec shape, step values, selectors).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed outline data (unknown command, too few numbers).
    #[error("outline error: {0}")]
    Outline(String),

    /// Timeline configuration that cannot be honored (for example managed state without a provider).
    #[error("config error: {0}")]
    Config(String),

    /// A single property failed to compile into tween records.
    #[error("compile error: {0}")]
    Compile(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TweenlineError {
    /// Build a [`TweenlineError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TweenlineError::Outline`].
    pub fn outline(msg: impl Into<String>) -> Self {
        Self::Outline(msg.into())
    }

    /// Build a [`TweenlineError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TweenlineError::Compile`].
    pub fn compile(msg: impl Into<String>) -> Self {
        Self::Compile(msg.into())
    }

    /// Build a [`TweenlineError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TweenlineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
