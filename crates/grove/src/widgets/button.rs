//! A clickable, focusable button.

use crate::{
    core::{Context, NodeId},
    event::{
        key::Key,
        mouse::{Action, MouseEvent},
    },
    geom::{Expanse, Point},
    style::{Color, Style},
    widget::{EventOutcome, FocusResponse, Widget},
    width,
};

/// Activation callback.
type OnPress = Box<dyn FnMut(&mut dyn Context)>;

/// A one-row button showing a padded label.
///
/// A mouse press focuses the button; releasing it while the button still
/// holds focus activates it and gives focus back. Any of the shortcut keys
/// activate it while it is focused.
pub struct Button {
    /// Label text.
    label: String,
    /// Blank columns on each side of the label.
    padding: usize,
    /// Shortcut keys.
    keys: Vec<Key>,
    /// Activation callback.
    on_press: Option<OnPress>,
    /// Style when unfocused.
    normal: Style,
    /// Style when focused.
    focused: Style,
    /// Activation count.
    presses: usize,
}

impl Button {
    /// A button with one column of padding on each side.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            padding: 1,
            keys: vec![],
            on_press: None,
            normal: Style::default(),
            focused: Style::new(Color::Cyan, Color::Default),
            presses: 0,
        }
    }

    /// Build with different padding.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Build with shortcut keys.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }

    /// Build with an activation callback.
    pub fn on_press(mut self, f: impl FnMut(&mut dyn Context) + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Build with the styles used when unfocused and focused.
    pub fn with_styles(mut self, normal: Style, focused: Style) -> Self {
        self.normal = normal;
        self.focused = focused;
        self
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many times the button has been activated.
    pub fn presses(&self) -> usize {
        self.presses
    }

    /// Run the activation callback.
    fn press(&mut self, ctx: &mut dyn Context) {
        self.presses += 1;
        if let Some(f) = self.on_press.as_mut() {
            f(ctx);
        }
    }

    /// Paint the padded label.
    fn draw(&self, ctx: &mut dyn Context) {
        let style = if ctx.has_local_focus() {
            self.focused
        } else {
            self.normal
        };
        let pad = " ".repeat(self.padding);
        if let Some(mut r) = ctx.render() {
            r.text(Point::zero(), &format!("{pad}{}{pad}", self.label), style);
        }
    }
}

impl Widget for Button {
    fn measure(&self, _avail: Expanse) -> Option<Expanse> {
        let w = width::width(&self.label) + 2 * self.padding;
        Some(Expanse::new(w as u32, 1))
    }

    fn on_draw(&mut self, ctx: &mut dyn Context) {
        self.draw(ctx);
    }

    fn on_key(&mut self, ctx: &mut dyn Context, key: Key) -> EventOutcome {
        if self.keys.contains(&key) {
            self.press(ctx);
            return EventOutcome::Handle;
        }
        EventOutcome::Ignore
    }

    fn on_mouse(&mut self, ctx: &mut dyn Context, _at: Point, event: MouseEvent) -> EventOutcome {
        match event.action {
            Action::Down => {
                ctx.request_focus();
                EventOutcome::Handle
            }
            Action::Up if ctx.has_local_focus() => {
                self.press(ctx);
                ctx.release_focus();
                EventOutcome::Handle
            }
            _ => EventOutcome::Ignore,
        }
    }

    fn on_focused(&mut self, _ctx: &mut dyn Context) -> FocusResponse {
        FocusResponse::Accept
    }

    fn on_unfocused(&mut self, _ctx: &mut dyn Context, _next: Option<NodeId>) -> FocusResponse {
        FocusResponse::Accept
    }
}
