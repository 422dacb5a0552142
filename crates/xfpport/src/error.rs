use xfpport_device::DeviceError;
use xfpport_frame::FrameError;
use xfpport_term::TermError;

/// Why a single command was answered with `error`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The handler could not decode its arguments.
    #[error("bad arguments: {0}")]
    Args(#[from] TermError),

    /// The backend refused the access.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Failures that end the serving loop.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No further request could be read.
    #[error("request read failed: {0}")]
    Read(#[source] FrameError),

    /// The request's version marker, tuple header or command atom is malformed.
    #[error("malformed request header: {0}")]
    Header(#[from] TermError),

    /// A response could not be delivered.
    #[error("response write failed: {0}")]
    Write(#[source] FrameError),
}

impl ServerError {
    /// True when the host closed our input between requests.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::Read(FrameError::ConnectionClosed))
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_clean_close_is_end_of_input() {
        assert!(ServerError::Read(FrameError::ConnectionClosed).is_end_of_input());
        assert!(!ServerError::Read(FrameError::Truncated {
            expected: 4,
            received: 1
        })
        .is_end_of_input());
        assert!(!ServerError::Header(TermError::EmptyTuple).is_end_of_input());
    }

    #[test]
    fn command_errors_wrap_their_cause() {
        let err = CommandError::from(DeviceError::PinOutOfRange(9));
        assert_eq!(err.to_string(), "device error: pin 9 out of range (max 6)");
    }
}
