//! Mouse buttons, actions and located mouse events.
use crate::{event::key, geom::Point};

/// Mouse button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// No button (for move/scroll).
    None,
}

/// Mouse action kinds.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button press.
    Down,
    /// Button release.
    Up,
    /// Mouse drag with button held.
    Drag,
    /// Mouse moved without button.
    Moved,
    /// Scroll wheel down.
    ScrollDown,
    /// Scroll wheel up.
    ScrollUp,
}

impl Action {
    /// Is this a button-driven action?
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Down | Self::Up | Self::Drag)
    }
}

/// A mouse input event. The location is in screen space when it leaves the
/// backend; containers rewrite it into each child's local space as they route
/// it downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Mouse action type.
    pub action: Action,
    /// Mouse button.
    pub button: Button,
    /// Keyboard modifiers.
    pub modifiers: key::Mods,
    /// Cursor location.
    pub location: Point,
}

impl MouseEvent {
    /// A left-button event with no modifiers.
    pub fn left(action: Action, location: impl Into<Point>) -> Self {
        Self {
            action,
            button: if action.is_button() {
                Button::Left
            } else {
                Button::None
            },
            modifiers: key::Mods::NONE,
            location: location.into(),
        }
    }

    /// The same event at a different location.
    pub fn at(&self, location: Point) -> Self {
        Self { location, ..*self }
    }
}

impl PartialEq<Action> for MouseEvent {
    fn eq(&self, o: &Action) -> bool {
        self.action == *o
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Result, event::mouse::*};

    #[test]
    fn left_events() -> Result<()> {
        let m = MouseEvent::left(Action::Down, (3, 4));
        assert_eq!(m.button, Button::Left);
        assert_eq!(m, Action::Down);
        assert_ne!(m, Action::Up);
        assert_eq!(MouseEvent::left(Action::ScrollUp, (0, 0)).button, Button::None);
        assert_eq!(m.at(Point::new(1, 1)).location, Point::new(1, 1));
        assert_eq!(m.at(Point::new(1, 1)).action, Action::Down);
        Ok(())
    }
}
