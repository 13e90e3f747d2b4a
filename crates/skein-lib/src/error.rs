//! Compile-time diagnostics.
//!
//! Parsing is the only fallible stage: a failed match at some position is
//! an ordinary "no match", never an error. Each diagnostic carries the
//! byte offset into the pattern where the problem was detected.

/// A pattern that failed to compile, with the offending byte offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// What went wrong while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of pattern")]
    UnexpectedEnd,

    #[error("expected `{0}`")]
    Expected(char),

    #[error("set element expected")]
    SetElementExpected,

    #[error("unsupported escape `\\{0}`")]
    UnsupportedEscape(char),

    #[error("unsupported escape `\\{0}` in character class")]
    UnsupportedClassEscape(char),

    #[error("back reference `\\{0}` not allowed in character class")]
    BackRefInClass(u32),

    #[error("incorrect hex escape `{0}`")]
    IncorrectHex(String),

    #[error("incorrect oct escape `{0}`")]
    IncorrectOct(String),

    #[error("incorrect unicode escape `{0}`")]
    IncorrectUnicode(String),

    #[error("`}}` before `{{`")]
    CloseBraceBeforeOpen,

    #[error("quantifier bound must be numeric")]
    NonNumericBound,

    #[error("quantifier bounds out of order")]
    BoundsOutOfOrder,

    #[error("unknown unicode class `{0}`")]
    UnknownUnicodeClass(String),

    #[error("unexpected `{0}`")]
    Unexpected(String),

    #[error("pattern nested too deeply")]
    NestedTooDeeply,
}
