use runpack_core::{CodecError, IdentifierError};
use thiserror::Error;

/// Errors raised while adding content to a pack.
#[derive(Debug, Error)]
pub enum PackError {
    /// An intermediate path segment is already a resource.
    #[error("path conflict: `{path}` is a resource and cannot hold children")]
    PathConflict {
        /// Path of the resource that blocked the insert.
        path: String,
    },
    /// Insert requested with no path segments.
    #[error("cannot insert a resource at an empty path")]
    EmptyPath,
    /// The codec rejected the value; nothing was written.
    #[error("failed to encode `{path}`: {source}")]
    Encoding {
        /// Target path of the document.
        path: String,
        /// Codec failure.
        #[source]
        source: CodecError,
    },
    /// A stored document could not be parsed back.
    #[error("failed to decode `{path}`: {source}")]
    Decoding {
        /// Path of the stored document.
        path: String,
        /// Codec failure.
        #[source]
        source: CodecError,
    },
    /// Reading the bytes of a stored resource failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path of the stored resource.
        path: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// A derived identifier was invalid.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    /// A recipe that should unlock through an advancement has no criteria.
    #[error("no way of obtaining recipe {recipe}")]
    MissingUnlockCriterion {
        /// Recipe identifier.
        recipe: String,
    },
}

/// Join segments the way they appear in a pack archive.
pub(crate) fn display_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}
