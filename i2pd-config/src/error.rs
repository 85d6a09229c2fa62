use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for option '{key}': {value}")]
    InvalidValue { key: String, value: String },

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
