//! Input events delivered by a terminal backend.

/// Keyboard input.
pub mod key;
/// Mouse input.
pub mod mouse;

use key::{Key, KeyCode};
use mouse::MouseEvent;

/// One unit of input read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A keystroke.
    Key(Key),
    /// A mouse action, located in screen coordinates.
    Mouse(MouseEvent),
    /// The terminal changed size. Query the backend for the new size.
    Resize,
    /// The read timed out without input.
    None,
}

impl Input {
    /// Fold the different spellings of the return key into `KeyCode::Enter`.
    /// Terminals variously deliver carriage return or line feed.
    pub fn normalize(self) -> Self {
        match self {
            Self::Key(k) if matches!(k.key, KeyCode::Char('\r' | '\n')) => Self::Key(Key {
                mods: k.mods,
                key: KeyCode::Enter,
            }),
            other => other,
        }
    }
}

impl From<Key> for Input {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

impl From<MouseEvent> for Input {
    fn from(m: MouseEvent) -> Self {
        Self::Mouse(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn carriage_return_is_enter() -> Result<()> {
        assert_eq!(
            Input::Key('\r'.into()).normalize(),
            Input::Key(KeyCode::Enter.into())
        );
        assert_eq!(
            Input::Key(key::Mods::CTRL + '\n').normalize(),
            Input::Key(key::Mods::CTRL + KeyCode::Enter)
        );
        assert_eq!(Input::Key('x'.into()).normalize(), Input::Key('x'.into()));
        assert_eq!(Input::None.normalize(), Input::None);
        Ok(())
    }
}
