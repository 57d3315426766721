use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
/// This is useful when we want to deal with `Rect`s abstractly, or when we want
/// to mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in columns.
    pub w: u32,
    /// Height in rows.
    pub h: u32,
}

impl Expanse {
    /// Construct a new expanse.
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The area of this expanse.
    pub fn area(&self) -> u32 {
        self.w * self.h
    }

    /// Is either dimension zero?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this Size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// The space left over after moving the origin to `p`. Coordinates past
    /// either edge leave zero in that dimension.
    pub fn remaining(&self, p: Point) -> Self {
        let rem = |total: u32, off: i32| -> u32 {
            if off <= 0 {
                total
            } else {
                total.saturating_sub(off as u32)
            }
        };
        Self {
            w: rem(self.w, p.x),
            h: rem(self.h, p.y),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn remaining() -> Result<()> {
        let e = Expanse::new(10, 5);
        assert_eq!(e.remaining(Point::new(3, 1)), Expanse::new(7, 4));
        assert_eq!(e.remaining(Point::new(12, 9)), Expanse::new(0, 0));
        assert_eq!(e.remaining(Point::new(-2, 0)), e);
        assert!(e.contains(&Expanse::new(10, 5)));
        assert!(!e.contains(&Expanse::new(11, 1)));
        Ok(())
    }
}
