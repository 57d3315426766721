//! Canvases: offset, size-bounded views onto the [`Screen`].

use crate::{
    error::{Error, Result},
    geom::{Expanse, Point, Rect},
    screen::Screen,
    style::Style,
    width,
};

/// How `draw_text` breaks long lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Only explicit line breaks start a new row; the rest is clipped.
    #[default]
    None,
    /// Wrap at the canvas's right edge.
    Canvas,
    /// Wrap at a fixed number of columns.
    Width(usize),
}

/// A rectangle of the screen with its own coordinate space.
///
/// `origin` and `size` are absolute. `offset` is added to every position
/// drawn on the canvas and to the position of every canvas derived from it,
/// so a chain of [`Canvas::sub_canvas`] calls accumulates offsets. A canvas
/// is a plain value: deriving or drawing never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Canvas {
    /// Absolute top-left.
    origin: Point,
    /// Absolute size.
    size: Expanse,
    /// Offset applied to drawing and derived canvases.
    offset: Point,
}

impl Canvas {
    /// Construct a canvas from its parts.
    pub fn new(origin: Point, size: Expanse, offset: Point) -> Self {
        Self {
            origin,
            size,
            offset,
        }
    }

    /// A canvas covering a whole screen of the given size.
    pub fn root(size: Expanse) -> Self {
        Self::new(Point::zero(), size, Point::zero())
    }

    /// Absolute top-left.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Size in cells.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// The offset applied to drawing.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Absolute screen rectangle.
    pub fn rect(&self) -> Rect {
        Rect::at(self.origin, self.size)
    }

    /// Derive a nested canvas at `at` (relative to this canvas, after its
    /// offset). A zero dimension in `size` takes whatever space remains in
    /// that direction. `child_offset` becomes the new canvas's offset.
    ///
    /// Fails with [`Error::BoundaryExceeded`] if the rectangle does not fit in
    /// this canvas.
    pub fn sub_canvas(&self, at: Point, size: Expanse, child_offset: Point) -> Result<Self> {
        let start = self.offset + at;
        let fits_origin = start.x >= 0
            && start.y >= 0
            && start.x as u32 <= self.size.w
            && start.y as u32 <= self.size.h;
        if !fits_origin {
            return Err(Error::BoundaryExceeded(format!(
                "sub-canvas origin {start:?} outside {:?}",
                self.size
            )));
        }
        let avail = self.size.remaining(start);
        let size = Expanse::new(
            if size.w == 0 { avail.w } else { size.w },
            if size.h == 0 { avail.h } else { size.h },
        );
        if !avail.contains(&size) {
            return Err(Error::BoundaryExceeded(format!(
                "sub-canvas {size:?} at {start:?} exceeds {:?}",
                self.size
            )));
        }
        Ok(Self::new(self.origin + start, size, child_offset))
    }

    /// Draw text with its first character at `at`, returning the pen position
    /// after the last character. The pen advances by the full width of the
    /// text even where it is clipped away.
    ///
    /// Rows at or below the bottom edge, or above the top edge, are dropped.
    /// Columns outside the canvas are clipped.
    pub fn draw_text(
        &self,
        screen: &mut Screen,
        text: &str,
        at: Point,
        wrap: Wrap,
        style: Style,
    ) -> Point {
        let pos = self.offset + at;
        let cols = self.size.w as i64;
        let limit = match wrap {
            Wrap::None => None,
            Wrap::Canvas => Some((cols - pos.x as i64).max(1) as usize),
            Wrap::Width(n) => Some(n.max(1)),
        };
        let lines = width::wrap(text, limit);
        let last = lines.last().map_or(0, |l| width::width(l));
        let pen = at.shift(last as i32, lines.len().saturating_sub(1) as i32);

        if (pos.x as i64) >= cols {
            return pen;
        }
        for (i, line) in lines.iter().enumerate() {
            let y = pos.y.saturating_add(i as i32);
            if y < 0 {
                continue;
            }
            if y as u32 >= self.size.h {
                break;
            }
            let visible = if pos.x < 0 {
                width::slice(line, pos.x.unsigned_abs() as usize, Some(cols as usize))
            } else {
                width::slice(line, 0, Some((cols - pos.x as i64) as usize))
            };
            if visible.is_empty() {
                continue;
            }
            screen.put(self.origin.shift(pos.x.max(0), y), &visible, style);
        }
        pen
    }

    /// Outline the canvas.
    pub fn draw_border(&self, screen: &mut Screen, style: Style) {
        screen.border(self.rect(), style);
    }

    /// Blank the canvas.
    pub fn clear(&self, screen: &mut Screen, style: Style) {
        screen.clear(self.rect(), style);
    }

    /// Request the hardware cursor at `at` in this canvas's coordinates.
    pub fn set_cursor(&self, screen: &mut Screen, at: Point) {
        screen.request_cursor(self.origin + self.offset + at);
    }

    /// Withdraw the cursor request.
    pub fn clear_cursor(&self, screen: &mut Screen) {
        screen.clear_cursor();
    }
}

/// A canvas bound to the screen: what widgets draw with.
pub struct Render<'a> {
    /// Target canvas.
    canvas: Canvas,
    /// Shared screen.
    screen: &'a mut Screen,
}

impl<'a> Render<'a> {
    /// Bind a canvas to a screen.
    pub fn new(canvas: Canvas, screen: &'a mut Screen) -> Self {
        Self { canvas, screen }
    }

    /// The underlying canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Size of the canvas.
    pub fn size(&self) -> Expanse {
        self.canvas.size()
    }

    /// Draw unwrapped text.
    pub fn text(&mut self, at: impl Into<Point>, text: &str, style: Style) -> Point {
        self.canvas
            .draw_text(self.screen, text, at.into(), Wrap::None, style)
    }

    /// Draw text with an explicit wrap mode.
    pub fn text_wrapped(
        &mut self,
        at: impl Into<Point>,
        text: &str,
        wrap: Wrap,
        style: Style,
    ) -> Point {
        self.canvas.draw_text(self.screen, text, at.into(), wrap, style)
    }

    /// Outline the canvas.
    pub fn border(&mut self, style: Style) {
        self.canvas.draw_border(self.screen, style);
    }

    /// Blank the canvas.
    pub fn clear(&mut self, style: Style) {
        self.canvas.clear(self.screen, style);
    }

    /// Request the hardware cursor.
    pub fn set_cursor(&mut self, at: impl Into<Point>) {
        self.canvas.set_cursor(self.screen, at.into());
    }

    /// Withdraw the cursor request.
    pub fn clear_cursor(&mut self) {
        self.canvas.clear_cursor(self.screen);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::backend::test::{TestBuf, TestTerminal};

    fn screen(w: u32, h: u32) -> Result<(Arc<Mutex<TestBuf>>, Screen)> {
        let (buf, term) = TestTerminal::create(Expanse::new(w, h));
        Ok((buf, Screen::new(Box::new(term))?))
    }

    #[test]
    fn sub_canvas_composes_offsets() -> Result<()> {
        let root = Canvas::root(Expanse::new(20, 10));
        let a = root.sub_canvas(Point::new(2, 1), Expanse::new(10, 5), Point::new(1, 1))?;
        assert_eq!(a.rect(), Rect::new(2, 1, 10, 5));
        let b = a.sub_canvas(Point::new(2, 0), Expanse::new(0, 0), Point::zero())?;
        assert_eq!(b.origin(), Point::new(5, 2));
        assert_eq!(b.size(), Expanse::new(7, 4));
        Ok(())
    }

    #[test]
    fn sub_canvas_overflow() -> Result<()> {
        let root = Canvas::root(Expanse::new(10, 4));
        let before = root;
        let r = root.sub_canvas(Point::new(6, 0), Expanse::new(5, 1), Point::zero());
        assert!(matches!(r, Err(Error::BoundaryExceeded(_))));
        assert!(matches!(
            root.sub_canvas(Point::new(-1, 0), Expanse::new(1, 1), Point::zero()),
            Err(Error::BoundaryExceeded(_))
        ));
        assert_eq!(root, before);
        assert_eq!(
            root.sub_canvas(Point::new(6, 0), Expanse::new(4, 4), Point::zero())?
                .size(),
            Expanse::new(4, 4)
        );
        Ok(())
    }

    #[test]
    fn draw_text_clips_and_advances() -> Result<()> {
        let (buf, mut s) = screen(10, 3)?;
        let c = Canvas::root(Expanse::new(10, 3)).sub_canvas(
            Point::new(2, 1),
            Expanse::new(4, 2),
            Point::zero(),
        )?;
        let pen = c.draw_text(&mut s, "abcdef", Point::zero(), Wrap::None, Style::default());
        assert_eq!(pen, Point::new(6, 0));
        let pen = c.draw_text(&mut s, "xyz", Point::new(-2, 1), Wrap::None, Style::default());
        assert_eq!(pen, Point::new(1, 1));
        let pen = c.draw_text(&mut s, "hidden", Point::new(0, 2), Wrap::None, Style::default());
        assert_eq!(pen, Point::new(6, 2));
        let b = buf.lock().unwrap();
        assert_eq!(b.lines(), vec!["", "  abcd", "  z"]);
        Ok(())
    }

    #[test]
    fn draw_text_wraps_at_canvas() -> Result<()> {
        let (buf, mut s) = screen(6, 4)?;
        let c = Canvas::new(Point::new(1, 0), Expanse::new(4, 3), Point::new(0, 1));
        let pen = c.draw_text(&mut s, "abcdefghijk", Point::zero(), Wrap::Canvas, Style::default());
        // Third row is past the canvas bottom once the offset applies.
        assert_eq!(pen, Point::new(3, 2));
        let b = buf.lock().unwrap();
        assert_eq!(b.lines(), vec!["", " abcd", " efgh", ""]);
        Ok(())
    }

    #[test]
    fn wide_char_clipped_on_the_left() -> Result<()> {
        let (buf, mut s) = screen(4, 1)?;
        let c = Canvas::root(Expanse::new(4, 1));
        c.draw_text(&mut s, "界ab", Point::new(-1, 0), Wrap::None, Style::default());
        assert_eq!(buf.lock().unwrap().lines(), vec![" ab"]);
        Ok(())
    }
}
