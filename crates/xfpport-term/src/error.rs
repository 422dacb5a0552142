/// Errors that can occur while decoding or encoding terms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    /// The payload ended before the term at `position` was complete.
    #[error("payload truncated at byte {0}")]
    Truncated(usize),

    /// The leading version marker is not the one this codec speaks.
    #[error("version marker {0}, expected 131")]
    VersionMismatch(u8),

    /// A tag that cannot start the expected kind of term.
    #[error("expected {expected} at byte {position}, found tag {found}")]
    UnexpectedTag {
        expected: &'static str,
        found: u8,
        position: usize,
    },

    /// A tuple of the wrong size.
    #[error("expected tuple of arity {expected}, found {found}")]
    UnexpectedArity { expected: usize, found: usize },

    /// A request tuple with no command atom.
    #[error("request tuple is empty")]
    EmptyTuple,

    /// Atom longer than the format permits.
    #[error("atom of {0} characters exceeds the 255 character limit")]
    AtomTooLong(usize),

    /// UTF-8 atom whose bytes are not valid UTF-8.
    #[error("atom text is not valid UTF-8")]
    InvalidAtom,

    /// Response status atom other than `ok` or `error`.
    #[error("unknown status atom '{0}'")]
    UnknownStatus(String),

    /// Negative integer where an unsigned one was expected.
    #[error("negative integer where an unsigned value was expected")]
    NegativeInteger,

    /// Integer too wide for 32 bits.
    #[error("integer does not fit in 32 bits")]
    IntegerOverflow,
}

pub type Result<T> = std::result::Result<T, TermError>;
