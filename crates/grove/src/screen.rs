//! The shared screen that every canvas draws onto.

use std::{collections::HashMap, time::Duration};

use crate::{
    backend::Terminal,
    error::Result,
    event::Input,
    geom::{Expanse, Point, Rect},
    style::{Color, PairId, Style},
};

/// Owns the terminal handle along with the state that is global to a
/// terminal: the color-pair table, the cached screen size and the hardware
/// cursor request.
///
/// Drawing methods never fail. A write that the terminal rejects, typically
/// because it raced a resize, is logged and dropped; the relayout that
/// follows every resize repaints the screen.
#[derive(Debug)]
pub struct Screen {
    /// Terminal handle.
    term: Box<dyn Terminal>,
    /// Registered color pairs.
    pairs: HashMap<(Color, Color), PairId>,
    /// Screen size as of the last refresh.
    size: Expanse,
    /// Cursor position requested during the last draw.
    cursor: Option<Point>,
}

impl Screen {
    /// Wrap a terminal, registering every palette combination with it.
    pub fn new(mut term: Box<dyn Terminal>) -> Result<Self> {
        let mut pairs = HashMap::new();
        for (_, fg, bg) in PairId::all() {
            pairs.insert((fg, bg), term.register_color_pair(fg, bg)?);
        }
        let size = term.size()?;
        Ok(Self {
            term,
            pairs,
            size,
            cursor: None,
        })
    }

    /// Screen size as of the last [`Screen::refresh_size`].
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Re-read the screen size from the terminal.
    pub fn refresh_size(&mut self) -> Result<Expanse> {
        self.size = self.term.size()?;
        Ok(self.size)
    }

    /// The pair registered for a color combination. Unregistered combinations
    /// draw with the default pair.
    pub fn pair(&self, fg: Color, bg: Color) -> PairId {
        self.pairs.get(&(fg, bg)).copied().unwrap_or_default()
    }

    /// Write a run of text at an absolute position.
    pub fn put(&mut self, at: Point, text: &str, style: Style) {
        let pair = self.pair(style.fg, style.bg);
        if let Err(e) = self.term.write_run(at, text, style.attrs, pair) {
            tracing::debug!("dropped write at {at:?}: {e}");
        }
    }

    /// Outline a rectangle.
    pub fn border(&mut self, rect: Rect, style: Style) {
        let pair = self.pair(style.fg, style.bg);
        if let Err(e) = self.term.draw_border(rect, pair) {
            tracing::debug!("dropped border {rect:?}: {e}");
        }
    }

    /// Blank a rectangle.
    pub fn clear(&mut self, rect: Rect, style: Style) {
        let pair = self.pair(style.fg, style.bg);
        if let Err(e) = self.term.clear_rect(rect, pair) {
            tracing::debug!("dropped clear {rect:?}: {e}");
        }
    }

    /// Ask for the hardware cursor at an absolute position.
    pub fn request_cursor(&mut self, at: Point) {
        self.cursor = Some(at);
    }

    /// Withdraw any cursor request.
    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// The pending cursor request.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Show the cursor at the requested cell if it is on screen, hide it
    /// otherwise.
    pub fn apply_cursor(&mut self) {
        let res = match self.cursor {
            Some(p) if self.size.rect().contains_point(p) => self.term.set_cursor(p),
            _ => self.term.hide_cursor(),
        };
        if let Err(e) = res {
            tracing::debug!("cursor update failed: {e}");
        }
    }

    /// Push buffered output to the terminal.
    pub fn flush(&mut self) -> Result<()> {
        self.term.flush()
    }

    /// Wait for input.
    pub fn poll(&mut self, timeout: Duration) -> Result<Input> {
        self.term.poll_event(timeout)
    }

    /// Take over the terminal.
    pub fn start(&mut self) -> Result<()> {
        self.term.start()
    }

    /// Release the terminal.
    pub fn stop(&mut self) -> Result<()> {
        self.term.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test::TestTerminal;

    #[test]
    fn registers_palette_and_tracks_cursor() -> Result<()> {
        let (buf, term) = TestTerminal::create(Expanse::new(10, 2));
        let mut s = Screen::new(Box::new(term))?;
        assert_eq!(buf.lock().unwrap().pairs, 17 * 17 - 1);
        assert_eq!(s.pair(Color::Default, Color::Default), PairId(0));
        assert_eq!(s.pair(Color::Red, Color::Blue), PairId::of(Color::Red, Color::Blue));

        s.request_cursor(Point::new(3, 1));
        s.apply_cursor();
        assert_eq!(buf.lock().unwrap().cursor, Some(Point::new(3, 1)));
        s.request_cursor(Point::new(10, 1));
        s.apply_cursor();
        assert_eq!(buf.lock().unwrap().cursor, None);
        Ok(())
    }
}
