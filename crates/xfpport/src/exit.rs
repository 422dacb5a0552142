use xfpport::frame::FrameError;
use xfpport::ServerError;

/// Input ended, cleanly or mid-frame, or the input buffer could not be allocated.
pub const FAILURE: i32 = 1;
/// A request's version marker, tuple header or command atom was malformed.
pub const BAD_HEADER: i32 = 4;
/// Reading or writing the port streams failed.
pub const LOOP_ABORTED: i32 = 10;

pub fn frame_error_code(err: &FrameError) -> i32 {
    match err {
        FrameError::ConnectionClosed | FrameError::Truncated { .. } | FrameError::Alloc(_) => {
            FAILURE
        }
        FrameError::PayloadTooLarge { .. } => BAD_HEADER,
        FrameError::Io(_) => LOOP_ABORTED,
    }
}

pub fn server_error_code(err: &ServerError) -> i32 {
    match err {
        ServerError::Read(err) => frame_error_code(err),
        ServerError::Header(_) => BAD_HEADER,
        ServerError::Write(_) => LOOP_ABORTED,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use xfpport::term::TermError;

    use super::*;

    #[test]
    fn end_of_input_is_failure() {
        let closed = ServerError::Read(FrameError::ConnectionClosed);
        let truncated = ServerError::Read(FrameError::Truncated {
            expected: 10,
            received: 3,
        });
        assert_eq!(server_error_code(&closed), FAILURE);
        assert_eq!(server_error_code(&truncated), FAILURE);
    }

    #[test]
    fn allocation_failure_is_failure() {
        let err = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        assert_eq!(frame_error_code(&FrameError::Alloc(err)), FAILURE);
    }

    #[test]
    fn malformed_headers_are_bad_header() {
        let header = ServerError::Header(TermError::VersionMismatch(0x82));
        let oversized = ServerError::Read(FrameError::PayloadTooLarge { size: 9, max: 4 });
        assert_eq!(server_error_code(&header), BAD_HEADER);
        assert_eq!(server_error_code(&oversized), BAD_HEADER);
    }

    #[test]
    fn stream_errors_abort_the_loop() {
        let read = ServerError::Read(FrameError::Io(io::Error::from(io::ErrorKind::Other)));
        let write = ServerError::Write(FrameError::Io(io::Error::from(
            io::ErrorKind::BrokenPipe,
        )));
        assert_eq!(server_error_code(&read), LOOP_ABORTED);
        assert_eq!(server_error_code(&write), LOOP_ABORTED);
    }
}
