use thiserror::Error;

use crate::keys::{CryptoKeyType, SigningKeyType};

/// Errors raised while reading private keys files.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Key data truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Unknown signing key type: {0}")]
    UnknownSigningKeyType(u16),

    #[error("Unknown crypto key type: {0}")]
    UnknownCryptoKeyType(u16),

    #[error("Invalid {what} length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported certificate type: {0}")]
    UnsupportedCertificate(u8),

    #[error("Signing key type mismatch: requested {requested}, found {found}")]
    SigningTypeMismatch {
        requested: SigningKeyType,
        found: SigningKeyType,
    },

    #[error("Crypto key type mismatch: requested {requested}, found {found}")]
    CryptoTypeMismatch {
        requested: CryptoKeyType,
        found: CryptoKeyType,
    },
}

/// Errors raised by the host router.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Configuration error: {0}")]
    Config(#[from] i2pd_config::ConfigError),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Router is not initialized")]
    NotInitialized,

    #[error("Router is not running")]
    NotRunning,

    #[error("Router is already running")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, RouterError>;
