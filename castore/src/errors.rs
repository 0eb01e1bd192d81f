use thiserror::Error;

/// Errors returned by the object model, the tree builder, the diff engine and
/// the services they talk to.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// A referenced object, commit, ref or working state does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A path could not be walked, usually because a segment that needs to
    /// be a tree is a blob.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A ref moved between being read and being updated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// An object was associated with a repository it doesn't belong to.
    #[error("identity mismatch: {0}")]
    IdentityMismatch(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("internal storage error: {0}")]
    StorageError(String),
}

impl Error {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while validating a tree received in its wire form.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidateTreeError {
    /// Elements are not in sorted order
    #[error("{0:?} is not sorted")]
    WrongSorting(String),
    /// Multiple elements with the same name encountered
    #[error("{0:?} is a duplicate name")]
    DuplicateName(String),
    /// Invalid name encountered
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    /// Invalid child digest length
    #[error("invalid digest length {1} for {0:?}")]
    InvalidDigestLen(String, usize),
    /// Unknown entry kind
    #[error("unknown entry kind {1} for {0:?}")]
    InvalidKind(String, i32),
}

impl From<ValidateTreeError> for Error {
    fn from(value: ValidateTreeError) -> Self {
        Error::InvalidRequest(value.to_string())
    }
}

impl From<crate::digests::Error> for Error {
    fn from(value: crate::digests::Error) -> Self {
        Error::InvalidRequest(value.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(value: url::ParseError) -> Self {
        Error::StorageError(format!("unable to parse url: {}", value))
    }
}
