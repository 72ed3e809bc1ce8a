use std::fmt::{self, Display, Formatter};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached.
    Connect,
    /// The backend answered with a non-success status.
    Status,
    /// The backend answered, but the payload was not a valid reply.
    Malformed,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Connect => write!(f, "Connection failed"),
            ErrorKind::Status => write!(f, "Unexpected status"),
            ErrorKind::Malformed => write!(f, "Malformed reply"),
            ErrorKind::Other => write!(f, "Transport error"),
        }
    }
}
