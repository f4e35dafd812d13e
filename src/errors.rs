use std::time::Duration;

/// All error types that can occur when talking to an Elgato light.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize a request body to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// The address and port do not form a usable request URI.
    #[error("invalid device address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The fixture could not be reached or dropped the connection.
    #[error("connection to {target} failed during {action}: {reason}")]
    Connection {
        target: String,
        action: String,
        reason: String,
    },

    /// The fixture did not answer within the configured timeout.
    #[error("request to {target} timed out after {timeout:?}")]
    Timeout { target: String, timeout: Duration },

    /// The fixture answered with something other than the expected body.
    #[error("unexpected response from {endpoint}: {reason}")]
    Protocol { endpoint: String, reason: String },
}

/// Coarse classification of an [`Error`].
///
/// Callers use this to decide between retrying, falling back to a
/// [`crate::SimulatedLight`], or surfacing an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The device is unreachable, timed out, or the address is unusable.
    Connection,
    /// The device answered, but not in the expected shape.
    Protocol,
}

impl Error {
    /// Create a new connection error
    pub fn connection(target: &str, action: &str, reason: impl ToString) -> Self {
        Error::Connection {
            target: target.to_string(),
            action: action.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new protocol error
    pub fn protocol(endpoint: &str, reason: impl ToString) -> Self {
        Error::Protocol {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a new invalid address error
    pub fn invalid_address(address: &str, reason: impl ToString) -> Self {
        Error::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAddress { .. } | Error::Connection { .. } | Error::Timeout { .. } => {
                ErrorKind::Connection
            }
            Error::JsonDump(_) | Error::Protocol { .. } => ErrorKind::Protocol,
        }
    }

    pub fn is_connection(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
