use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid address {address}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },
    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("{0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("smtp server did not accept the connection test")]
    ConnectionRejected,
    #[error("{0}")]
    Transport(String),
}
