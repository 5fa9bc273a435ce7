use thiserror::Error;

/// Top-level error type for cryptenv.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// The key or payload could not be obtained from its source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{0} is not set")]
    NotFound(String),

    #[error("{name} is malformed: {reason}")]
    Malformed { name: String, reason: String },
}

/// Text or structured data could not be converted.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("invalid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid payload structure: {0}")]
    Structure(#[from] serde_json::Error),

    #[error("invalid .env line {line}: {reason}")]
    Dotenv { line: usize, reason: String },

    #[error("invalid entry {name:?}: {reason}")]
    Entry { name: String, reason: String },
}

/// Envelope encryption or decryption failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CipherError {
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("envelope too short: {0} bytes")]
    EnvelopeTooShort(usize),

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    Misaligned(usize),

    #[error("bad padding after decryption (wrong key or corrupted payload)")]
    Padding,
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    ReadFile(std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
