use super::{Expanse, Point};

/// Border thickness on each side of a rectangle.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Insets {
    /// Rows taken at the top.
    pub top: u32,
    /// Columns taken at the right.
    pub right: u32,
    /// Rows taken at the bottom.
    pub bottom: u32,
    /// Columns taken at the left.
    pub left: u32,
}

impl Insets {
    /// Construct insets from explicit sides, in CSS order.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same thickness on every side.
    pub const fn uniform(n: u32) -> Self {
        Self::new(n, n, n, n)
    }

    /// Offset of the interior relative to the outer origin.
    pub fn origin(&self) -> Point {
        Point::new(self.left as i32, self.top as i32)
    }

    /// Shrink an outer size to the interior size, saturating at zero.
    pub fn shrink(&self, outer: Expanse) -> Expanse {
        Expanse {
            w: outer.w.saturating_sub(self.left + self.right),
            h: outer.h.saturating_sub(self.top + self.bottom),
        }
    }
}
