use std::{fmt, rc::Rc};

use crate::geom::{Expanse, Insets, Point};

/// Maps the space a parent offers to a position within it.
pub type Locator = Rc<dyn Fn(Expanse) -> Point>;

/// Maps the space a parent offers to a node's own size.
pub type Sizer = Rc<dyn Fn(Expanse) -> Expanse>;

/// Where a node sits inside its parent and how big it is.
///
/// Layout is data attached to a node, evaluated against the space the
/// parent offers every time the tree is laid out. A node without a sizer
/// falls back to its widget's `measure`; if that also declines, the node has
/// no size of its own and draws directly onto its parent's canvas.
#[derive(Clone)]
pub struct Layout {
    /// Position function.
    locator: Locator,
    /// Optional size function.
    sizer: Option<Sizer>,
    /// Space reserved on each edge for decoration. Children are placed
    /// inside it.
    border: Insets,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            locator: Rc::new(|_| Point::zero()),
            sizer: None,
            border: Insets::default(),
        }
    }
}

impl fmt::Debug for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("sized", &self.sizer.is_some())
            .field("border", &self.border)
            .finish()
    }
}

impl Layout {
    /// Top-left of the parent, unsized.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fixed position.
    pub fn at(x: i32, y: i32) -> Self {
        Self::default().locate(move |_| Point::new(x, y))
    }

    /// Fill the whole parent.
    pub fn fill() -> Self {
        Self::default().sized(|avail| avail)
    }

    /// Position computed from the parent's size.
    pub fn locate(mut self, f: impl Fn(Expanse) -> Point + 'static) -> Self {
        self.locator = Rc::new(f);
        self
    }

    /// Size computed from the parent's size.
    pub fn sized(mut self, f: impl Fn(Expanse) -> Expanse + 'static) -> Self {
        self.sizer = Some(Rc::new(f));
        self
    }

    /// A fixed size.
    pub fn size(self, w: u32, h: u32) -> Self {
        self.sized(move |_| Expanse::new(w, h))
    }

    /// Reserve a border.
    pub fn border(mut self, border: Insets) -> Self {
        self.border = border;
        self
    }

    /// Evaluate the locator.
    pub fn position_in(&self, avail: Expanse) -> Point {
        (self.locator)(avail)
    }

    /// Evaluate the sizer, if there is one.
    pub fn size_in(&self, avail: Expanse) -> Option<Expanse> {
        self.sizer.as_ref().map(|f| f(avail))
    }

    /// The reserved border.
    pub fn insets(&self) -> Insets {
        self.border
    }
}
