//! A debugging widget that logs input.

use crate::{
    core::Context,
    event::{
        key::{Key, KeyCode},
        mouse::MouseEvent,
    },
    geom::Point,
    widget::{EventOutcome, FocusResponse, Widget},
};

/// Logs every key and mouse event it sees through the window logger and
/// never consumes anything.
#[derive(Debug, Default)]
pub struct KeyLog;

impl KeyLog {
    /// A new key logger.
    pub fn new() -> Self {
        Self
    }
}

/// Format a key for the log.
fn describe(key: Key) -> String {
    match key.key {
        KeyCode::Char(c) => format!("Key pressed: {key:?}, ord: {}", c as u32),
        _ => format!("Key pressed: {key:?}"),
    }
}

impl Widget for KeyLog {
    fn on_key(&mut self, ctx: &mut dyn Context, key: Key) -> EventOutcome {
        ctx.log(&describe(key));
        EventOutcome::Ignore
    }

    fn on_mouse(&mut self, ctx: &mut dyn Context, at: Point, event: MouseEvent) -> EventOutcome {
        ctx.log(&format!("Mouse: ({}, {}), {:?}", at.x, at.y, event.action));
        EventOutcome::Ignore
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Accept
    }
}
