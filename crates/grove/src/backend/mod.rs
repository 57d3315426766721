//! The boundary with the terminal. Everything grove knows about the outside
//! world goes through [`Terminal`].

/// Crossterm backend implementation.
pub mod crossterm;
/// In-memory backend for tests.
pub mod test;

use std::{fmt::Debug, time::Duration};

use crate::{
    error::Result,
    event::Input,
    geom::{Expanse, Point, Rect},
    style::{AttrSet, Color, PairId},
};

/// A character-cell terminal. All coordinates are absolute screen cells.
///
/// Implementations should clip writes that land outside the screen rather
/// than fail, but callers tolerate failures during drawing regardless.
pub trait Terminal: Debug {
    /// Take over the terminal: raw mode, alternate screen, mouse capture.
    fn start(&mut self) -> Result<()>;

    /// Release the terminal and restore its previous state.
    fn stop(&mut self) -> Result<()>;

    /// Block for the next input for at most `timeout`. Returns
    /// [`Input::None`] if nothing arrived in time.
    fn poll_event(&mut self, timeout: Duration) -> Result<Input>;

    /// Current screen size.
    fn size(&self) -> Result<Expanse>;

    /// Write a run of text starting at `at`.
    fn write_run(&mut self, at: Point, text: &str, attrs: AttrSet, pair: PairId) -> Result<()>;

    /// Draw a single-line box around the edge of `rect`.
    fn draw_border(&mut self, rect: Rect, pair: PairId) -> Result<()>;

    /// Fill `rect` with blanks.
    fn clear_rect(&mut self, rect: Rect, pair: PairId) -> Result<()>;

    /// Make a foreground/background combination available for drawing.
    fn register_color_pair(&mut self, fg: Color, bg: Color) -> Result<PairId>;

    /// Show the hardware cursor at `at`.
    fn set_cursor(&mut self, at: Point) -> Result<()>;

    /// Hide the hardware cursor.
    fn hide_cursor(&mut self) -> Result<()>;

    /// Push any buffered output to the terminal.
    fn flush(&mut self) -> Result<()>;
}
