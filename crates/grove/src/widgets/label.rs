//! Static text.

use crate::{
    core::Context,
    geom::Point,
    style::Style,
    widget::Widget,
    width,
};

/// A single run of text drawn at the node's position.
///
/// Labels have no size of their own and draw directly onto their parent's
/// canvas. A status label draws on the last row of that canvas instead.
#[derive(Debug, Default)]
pub struct Label {
    /// Current text.
    text: String,
    /// Draw on the bottom row.
    status: bool,
    /// Text style.
    style: Style,
    /// Width of the last run drawn, blanked before the next one.
    drawn: usize,
}

impl Label {
    /// A label showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// An empty label pinned to the bottom row.
    pub fn status() -> Self {
        Self {
            status: true,
            ..Default::default()
        }
    }

    /// Build with a style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, blanking the previous run and drawing the new one
    /// straight away.
    pub fn set_text(&mut self, ctx: &mut dyn Context, text: impl Into<String>) {
        self.text = text.into();
        if let Some(mut r) = ctx.render() {
            let at = self.anchor(r.size().h);
            r.text(at, &" ".repeat(self.drawn), self.style);
        }
        self.draw(ctx);
    }

    /// Where the run starts on a canvas `rows` high.
    fn anchor(&self, rows: u32) -> Point {
        if self.status {
            Point::new(0, rows.saturating_sub(1) as i32)
        } else {
            Point::zero()
        }
    }

    /// Paint the text.
    fn draw(&mut self, ctx: &mut dyn Context) {
        if let Some(mut r) = ctx.render() {
            let at = self.anchor(r.size().h);
            r.text(at, &self.text, self.style);
            self.drawn = width::width(&self.text);
        }
    }
}

impl Widget for Label {
    fn on_draw(&mut self, ctx: &mut dyn Context) {
        self.draw(ctx);
    }
}
