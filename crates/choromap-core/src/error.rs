use crate::scope::Scope;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported boundary scope: {scope}")]
    UnsupportedScope { scope: String },

    #[error("Boundary fetch failed ({scope}): {message}")]
    BoundaryFetch { scope: Scope, message: String },

    #[error("boundary parse failed for {path}: {message}")]
    BoundaryParse { path: String, message: String },

    #[error("Boundary collection for {scope} contains no usable features")]
    EmptyCollection { scope: Scope },
}
