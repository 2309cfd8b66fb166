//! Error types for binding flag assignments onto records.
//!
//! [`BindError`] is what a bind call returns. The coercion and slice-index
//! failures it wraps are exposed as their own types so callers can inspect
//! the cause through [`std::error::Error::source`].

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Failures raised by a bind call.
///
/// Every variant aborts the call. The destination may be partially populated
/// when a [`PathParse`](BindError::PathParse) or [`Parse`](BindError::Parse)
/// error is returned and should be discarded.
#[derive(Debug, Error)]
pub enum BindError {
    /// The caller handed the engine something that is not a record.
    #[error("programming error: {0}")]
    Programming(String),

    /// A `short` annotation is not exactly one character long.
    #[error("short flag '{short}' on field '{field}' must be exactly one character")]
    ShortFlagDeclaration { field: String, short: String },

    /// A flag key addressing a slice element carries an unusable index.
    #[error("flag '{key}' has an invalid slice index: {source}")]
    PathParse {
        struct_path: String,
        key: String,
        #[source]
        source: SliceIndexError,
    },

    /// A matched flag value could not be coerced into its field.
    #[error("flag '{flag}' failed to parse because {source}")]
    Parse {
        struct_path: String,
        flag: String,
        #[source]
        source: CoercionError,
    },
}

impl BindError {
    /// Structural path of the field being bound, when known.
    pub fn struct_path(&self) -> Option<&str> {
        match self {
            Self::PathParse { struct_path, .. } | Self::Parse { struct_path, .. } => {
                Some(struct_path)
            }
            Self::Programming(_) | Self::ShortFlagDeclaration { .. } => None,
        }
    }
}

/// Why the index inside `name[...]` was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceIndexError {
    /// Not a non-negative integer, or out of the representable range.
    #[error("{0}")]
    Invalid(#[from] ParseIntError),

    /// Valid number, but the inferred length would exceed the configured limit.
    #[error("index {index} exceeds the maximum slice length of {limit}")]
    ExceedsLimit { index: usize, limit: usize },
}

/// Failures converting a raw flag value into a typed field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("'{0}' is not a valid boolean")]
    InvalidBool(String),

    #[error("{0}")]
    InvalidInt(#[from] ParseIntError),

    #[error("{0}")]
    InvalidFloat(#[from] ParseFloatError),

    #[error("expected exactly one character, got '{0}'")]
    InvalidChar(String),

    #[error("'{0}' is not a valid duration")]
    InvalidDuration(String),

    #[error("no setter registered for {0}")]
    Unsupported(&'static str),

    #[error("{0}")]
    Custom(String),
}

/// Convenience alias for results with [`BindError`].
pub type Result<T> = std::result::Result<T, BindError>;
