use thiserror::Error;

/// Errors raised while parsing user supplied scan parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("unit identifier {0} is outside the Modbus range 1-247")]
    UnitOutOfRange(u16),

    #[error("invalid unit identifier '{0}'")]
    InvalidUnit(String),

    #[error("unknown transport method '{0}'")]
    UnknownMethod(String),

    #[error("'{0}' is not a serial transport method")]
    NotSerial(String),

    #[error("'{0}' is not a network transport method")]
    NotNetwork(String),

    #[error("invalid baud rate '{0}'")]
    InvalidRate(String),

    #[error("invalid blacklist entry '{0}'")]
    InvalidBlacklist(String),
}
