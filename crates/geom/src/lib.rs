//! Geometry primitives used across grove.
//!
//! Positions are signed so that content can be placed partially above or to
//! the left of its canvas; sizes are always unsigned.

#![warn(missing_docs)]

/// Error types for geometry operations.
mod error;
/// Width/height size type.
mod expanse;
/// Border insets.
mod insets;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use error::{Error, Result};
pub use expanse::Expanse;
pub use insets::Insets;
pub use point::Point;
pub use rect::Rect;
