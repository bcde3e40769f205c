use thiserror::Error;

/// Hard failures: the whole operation is meaningless and nothing was produced.
///
/// Expected no-op outcomes (too few solid pixels, seeds or islands) are not
/// errors; they are reported through [`crate::Outcome::Unaffected`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ShatterError {
    #[error("pixel source unreadable: {0}")]
    SourceUnreadable(String),

    #[error("pixel source is empty")]
    EmptySource,

    #[error("outline ring needs at least 3 vertices, got {vertices}")]
    MalformedRing { vertices: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
