use std::{cell::Cell, rc::Rc};

use grove::{
    Layout, NodeId, Window,
    error::Result,
    event::key::KeyCode,
    geom::{Expanse, Point},
    style::{Color, Style},
    widgets::{Button, Frame, Interface, Label, TextWidget},
};

use crate::logview::LogView;

/// Text the editor starts with.
const WELCOME: &str = "Type here. 文字 are two\ncolumns wide.\n\nTab moves focus, Esc quits.";

/// Handles to the parts of the gallery interface.
#[derive(Debug, Clone)]
pub struct Gallery {
    /// The interface root.
    pub root: NodeId,
    /// The framed text editor.
    pub editor: NodeId,
    /// The quit button.
    pub quit_button: NodeId,
    /// The status line.
    pub status: NodeId,
    /// Set once the user asks to leave.
    pub quit: Rc<Cell<bool>>,
}

impl Gallery {
    /// Build the gallery on `window`, lay it out and focus the editor.
    ///
    /// The left half holds a framed editor, the right half shows the window
    /// log above a quit button, and the bottom row is a status line.
    pub fn install(window: Window, wrap: bool) -> Result<(Window, Self)> {
        let log = LogView::new().with_style(Style::new(Color::Green, Color::Default));
        let mut window = window.with_logger(log.sink());
        let quit = Rc::new(Cell::new(false));

        let root = window.create_interface(Interface::new().with_wrap(wrap));
        let frame = window.add(
            root,
            Frame::new(),
            Layout::new().sized(|a| Expanse::new(a.w / 2, a.h.saturating_sub(1))),
        )?;
        let editor = window.add(frame, TextWidget::new().with_text(WELCOME), Layout::new())?;
        window.add(
            root,
            log,
            Layout::new()
                .locate(|a| Point::new((a.w / 2) as i32 + 1, 0))
                .sized(|a| Expanse::new((a.w - a.w / 2).saturating_sub(1), a.h.saturating_sub(2))),
        )?;
        let flag = quit.clone();
        let quit_button = window.add(
            root,
            Button::new("quit").on_press(move |ctx| {
                ctx.log("quit pressed");
                flag.set(true);
            }),
            Layout::new().locate(|a| Point::new((a.w / 2) as i32 + 1, a.h as i32 - 2)),
        )?;
        let status = window.add(
            root,
            Label::status().with_style(Style::new(Color::Black, Color::White)),
            Layout::new(),
        )?;

        let flag = quit.clone();
        window.on_key(move |k| {
            if *k == KeyCode::Esc {
                flag.set(true);
                return true;
            }
            false
        });

        window.set_interface(root)?;
        window.layout()?;
        window.with_widget::<Label, _>(status, |l, ctx| {
            l.set_text(ctx, " grove gallery: Tab to move, Esc to quit");
        })?;
        window.focus(editor)?;
        window.log("gallery ready");

        Ok((
            window,
            Self {
                root,
                editor,
                quit_button,
                status,
                quit,
            },
        ))
    }

    /// Keep serving until the user quits.
    pub fn running(&self) -> bool {
        !self.quit.get()
    }
}
