use thiserror::Error;

/// Structural errors raised by the codec engine.
///
/// "Not enough bytes yet" is deliberately absent: that condition is flow
/// control, reported as [`Progress::Incomplete`](crate::Progress), not an
/// error. Everything here is fatal to the current parsing session or a
/// misuse of `emit`; callers should start a fresh session rather than
/// continue after one of these.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A value of the wrong shape was handed to `emit`.
    #[error("expected a {expected} value, got a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A record emitted against a struct layout lacks a declared field.
    #[error("record is missing field `{0}`")]
    MissingField(String),

    /// A list emitted against a sequence layout has the wrong arity.
    #[error("sequence has {expected} members but {found} values were supplied")]
    LengthMismatch { expected: usize, found: usize },

    /// An integer does not fit its declared wire width.
    #[error("value {value} does not fit a {width}-byte integer (signed: {signed})")]
    ValueOutOfRange {
        value: i64,
        width: usize,
        signed: bool,
    },

    /// A translate node's conversion function rejected the value.
    #[error("translation failed: {0}")]
    Translate(String),

    /// The operation is not implemented for this node kind.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}
