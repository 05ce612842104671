/// Core parsing and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
