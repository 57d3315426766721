//! Stock widgets.

/// Clickable button.
pub mod button;
/// Bordered wrapper.
pub mod frame;
/// Root container.
pub mod interface;
/// Input logger for debugging.
pub mod keylog;
/// Static text.
pub mod label;
/// Plain container.
pub mod panel;
/// Multi-line text editor.
pub mod text;

pub use button::Button;
pub use frame::Frame;
pub use interface::Interface;
pub use keylog::KeyLog;
pub use label::Label;
pub use panel::Panel;
pub use text::TextWidget;
