//! A plain container.

use crate::{
    core::{Context, NodeKind},
    geom::Expanse,
    widget::{FocusResponse, Widget},
};

/// Groups children without drawing anything itself. A panel fills the space
/// its parent offers unless its layout says otherwise.
#[derive(Debug, Default)]
pub struct Panel;

impl Panel {
    /// A new panel.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Panel {
    fn kind(&self) -> NodeKind {
        NodeKind::Container
    }

    fn measure(&self, avail: Expanse) -> Option<Expanse> {
        Some(avail)
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Accept
    }
}
