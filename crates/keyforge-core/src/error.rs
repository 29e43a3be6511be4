//! Error taxonomy shared by engine operations and workflows.
//!
//! Boundary transport failures are caught at the call site and converted to
//! [`KeyforgeError::Boundary`]; nothing propagates a raw driver fault out of
//! the engine. Validation failures never reach the boundary at all.

use thiserror::Error;

pub type KeyforgeResult<T> = Result<T, KeyforgeError>;

#[derive(Debug, Error)]
pub enum KeyforgeError {
    /// No confirmed device connection; the operation was not attempted.
    #[error("device not connected")]
    NotConnected,

    /// Another engine operation is still in flight.
    #[error("another device operation is in flight")]
    Busy,

    /// A local precondition failed before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// An operator-supplied field could not be normalized.
    #[error("invalid configuration value: {0}")]
    InvalidField(String),

    /// The engine configuration file is malformed or out of range.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// The command boundary rejected a request; message is passed through.
    #[error("device rejected request: {0}")]
    Boundary(String),

    /// The minimum-PIN-length update applied but the follow-up PIN change
    /// failed, leaving the device constraint ahead of the stored PIN.
    #[error(
        "minimum PIN length is already updated on the device, but the PIN \
         change failed: {0}. Re-run the PIN change with a PIN that meets the \
         new minimum."
    )]
    PinOutOfSync(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
