use std::{error, fmt, result};

use crate::{Point, Rect};

/// Geometry error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A point that had to lie inside a rectangle did not.
    Outside {
        /// The offending point.
        point: Point,
        /// The rectangle it missed.
        rect: Rect,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outside { point, rect } => write!(
                f,
                "({}, {}) lies outside {}x{} at ({}, {})",
                point.x, point.y, rect.w, rect.h, rect.tl.x, rect.tl.y
            ),
        }
    }
}

impl error::Error for Error {}

/// Result type for geometry operations.
pub type Result<T> = result::Result<T, Error>;
