//! Error types for moodtrip

/// Result type alias using moodtrip's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for moodtrip operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Lexicon loading or lookup errors
    #[error("lexicon error: {0}")]
    Lexicon(String),

    /// Corpus reading or lexicon building errors
    #[error("corpus error: {0}")]
    Corpus(String),

    /// Trip catalog errors
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller violated the input contract (e.g. no text)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Filesystem/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration parse errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new lexicon error
    pub fn lexicon(msg: impl Into<String>) -> Self {
        Self::Lexicon(msg.into())
    }

    /// Create a new corpus error
    pub fn corpus(msg: impl Into<String>) -> Self {
        Self::Corpus(msg.into())
    }

    /// Create a new catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new input contract error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
