//! The root container of a screen.

use crate::{
    core::{Context, NodeKind},
    event::key::{Key, KeyCode},
    geom::Expanse,
    widget::{EventOutcome, FocusResponse, Widget},
};

/// The root of a screenful of widgets. The window keeps a stack of
/// interfaces and routes events to the top one.
///
/// Tab moves focus to the next focusable widget. By default traversal wraps
/// back to the first widget after the last.
#[derive(Debug)]
pub struct Interface {
    /// Wrap Tab traversal.
    wrap: bool,
}

impl Default for Interface {
    fn default() -> Self {
        Self::new()
    }
}

impl Interface {
    /// An interface with wrapping Tab traversal.
    pub fn new() -> Self {
        Self { wrap: true }
    }

    /// Build with or without Tab traversal wrapping.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

impl Widget for Interface {
    fn kind(&self) -> NodeKind {
        NodeKind::Container
    }

    fn measure(&self, avail: Expanse) -> Option<Expanse> {
        Some(avail)
    }

    fn on_key(&mut self, ctx: &mut dyn Context, key: Key) -> EventOutcome {
        if key == KeyCode::Tab {
            ctx.focus_next(self.wrap);
            return EventOutcome::Handle;
        }
        EventOutcome::Ignore
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Accept
    }
}
