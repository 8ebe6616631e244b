//! Contains the Error and Result types shared by every operation.

use crate::TagType;

/// The operation that was running when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Encode,
    Decode,
    Parse,
    New,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Op::Encode => "encode",
            Op::Decode => "decode",
            Op::Parse => "parse",
            Op::New => "new",
        })
    }
}

/// What went wrong.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The reader or writer failed. Short reads show up here as
    /// [`std::io::ErrorKind::UnexpectedEof`], malformed lengths and strings as
    /// [`std::io::ErrorKind::InvalidData`].
    Io(std::io::Error),

    /// A type byte did not name a tag, or a tag type was used where it is not
    /// allowed, such as `End` for a payload or a list mixing element types.
    InvalidTagType(u8),

    /// SNBT text did not match the grammar. `pos` is a byte offset into the
    /// text after insignificant whitespace has been removed.
    InvalidSnbt { pos: usize, msg: String },

    /// A decoded tag was not of the type the caller asked for.
    DecodeMismatch { expected: TagType, found: TagType },
}

/// Any failure from this crate, along with the operation that raised it.
#[derive(Debug)]
pub struct Error {
    op: Op,
    kind: ErrorKind,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(op: Op, kind: ErrorKind) -> Self {
        Self { op, kind }
    }

    /// Get the operation that failed.
    pub fn op(&self) -> Op {
        self.op
    }

    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn is_invalid_tag_type(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidTagType(_))
    }

    pub fn is_invalid_snbt(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidSnbt { .. })
    }

    /// For use with `map_err`, attaches the operation to an internal error.
    pub(crate) fn with_op(op: Op) -> impl Fn(ErrorKind) -> Error {
        move |kind| Error::new(op, kind)
    }
}

impl ErrorKind {
    pub(crate) fn invalid_data(msg: impl Into<String>) -> Self {
        ErrorKind::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            msg.into(),
        ))
    }

    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        ErrorKind::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            msg.into(),
        ))
    }

    pub(crate) fn snbt(pos: usize, msg: impl Into<String>) -> Self {
        ErrorKind::InvalidSnbt {
            pos,
            msg: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorKind {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Io(e) => write!(f, "io error: {}", e),
            ErrorKind::InvalidTagType(t) => write!(f, "invalid nbt tag type: {}", t),
            ErrorKind::InvalidSnbt { pos, msg } => write!(f, "invalid snbt at {}: {}", pos, msg),
            ErrorKind::DecodeMismatch { expected, found } => {
                write!(f, "expected {} tag, found {}", expected, found)
            }
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.op, self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}
