use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::geom;

/// Result type for grove operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A requested canvas rectangle does not fit inside its parent.
    #[error("boundary exceeded: {0}")]
    BoundaryExceeded(String),
    /// A canvas or node could not be constructed.
    #[error("construction: {0}")]
    Construction(String),
    /// A widget refused to give up focus while the tree required it to.
    #[error("focus protocol violation: {0}")]
    FocusProtocol(String),
    /// Input that is not text was handed to a text measurement.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Invalid use of the tree API.
    #[error("invalid: {0}")]
    Invalid(String),
    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
    /// The terminal backend failed.
    #[error("terminal: {0}")]
    Terminal(String),
    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Terminal(e.to_string())
    }
}
