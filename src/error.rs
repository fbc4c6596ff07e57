use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nonce verification has failed")]
    NonceVerification,
    #[error("no SecurionPay API key is configured")]
    MissingCredential,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("order store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
