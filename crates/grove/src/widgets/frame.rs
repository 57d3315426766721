//! A bordered wrapper.

use crate::{
    core::{Context, NodeKind},
    geom::{Expanse, Insets},
    style::Style,
    widget::{FocusResponse, Widget},
};

/// Wraps a single child in a one-cell border. The frame clears its area and
/// paints the border before the child draws inside it.
#[derive(Debug, Default)]
pub struct Frame {
    /// Border and fill style.
    style: Style,
}

impl Frame {
    /// A frame with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Frame {
    fn kind(&self) -> NodeKind {
        NodeKind::Wrapper
    }

    fn measure(&self, avail: Expanse) -> Option<Expanse> {
        Some(avail)
    }

    fn insets(&self) -> Insets {
        Insets::uniform(1)
    }

    fn on_draw(&mut self, ctx: &mut dyn Context) {
        if let Some(mut r) = ctx.render() {
            r.clear(self.style);
            r.border(self.style);
        }
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Accept
    }
}
