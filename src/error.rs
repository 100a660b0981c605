use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::object::ParseIdError;

/// Describes the potential error conditions that might arise from relic
/// repository and object-store operations.
///
/// Every variant is terminal for the operation that raised it; nothing is
/// retried internally. A caller that sees `MalformedObject`,
/// `CorruptObject`, or `MalformedMetadata` should treat the object graph
/// as untrustworthy and abort the higher-level operation.
#[derive(Debug, Error)]
pub enum Error {
    /// No object exists in the store under the given ID.
    #[error("object {0} not found")]
    ObjectNotFound(String),

    /// An object's frame header is inconsistent with its payload.
    #[error("malformed object: {0}")]
    MalformedObject(String),

    /// A frame declared a type tag outside {blob, tree, commit, tag}.
    #[error("unknown object type `{0}`")]
    UnknownObjectType(String),

    /// A stored object could not be decompressed.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// A commit or tag payload violates the header+message grammar.
    #[error("malformed metadata: {0}")]
    MalformedMetadata(String),

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    /// No repository marker was found in the start directory or any parent.
    #[error("no repository found in `{}` or any parent directory", .0.display())]
    RepositoryNotFound(PathBuf),

    /// `init` was asked to create a repository where one already exists.
    #[error("`{}` already contains a repository", .0.display())]
    RepositoryExists(PathBuf),

    /// `open` was given a directory without a repository marker.
    #[error("`{}` is not a repository", .0.display())]
    NotARepository(PathBuf),

    /// The repository exists but its config file is missing.
    #[error("repository config file `{}` is missing", .0.display())]
    MissingConfig(PathBuf),

    /// The repository declares a format version this crate does not read.
    #[error("unsupported repository format version `{0}`")]
    UnsupportedFormatVersion(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for relic operations.
pub type Result<T> = std::result::Result<T, Error>;
