use thiserror::Error;

/// Errors produced by the protocol engine, the bus/transport abstractions, and the scanners.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Insufficient data. Expected {0} bytes.")]
    InsufficientData(usize),

    #[error("Incorrect Message Length Or Invalid Format")]
    IncorrectMessageLengthOrInvalidFormat,

    #[error("Invalid diagnostic session type: {0:#04x}")]
    InvalidSessionType(u8),

    #[error("Invalid ECU reset type: {0:#04x}")]
    InvalidResetType(u8),

    #[error("Invalid security access level: {0:#04x}")]
    InvalidSecurityLevel(u8),

    #[error("{field} must be {constraint}, got {value}")]
    InvalidArgument {
        field: &'static str,
        constraint: &'static str,
        value: String,
    },

    /// The transport produced no message within the requested wait window. Not a transport
    /// failure: the caller decides whether to retry.
    #[error("no response received within {0:?}")]
    NoResponse(std::time::Duration),

    /// A scan or capture loop observed its cancellation token set.
    #[error("cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
