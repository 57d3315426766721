use std::{cell::Cell, rc::Rc};

use grove::{
    Layout, NodeId, Window,
    error::Result,
    widgets::{Interface, KeyLog},
};

use crate::logview::LogView;

/// Handles to the key logger interface.
#[derive(Debug, Clone)]
pub struct KeyLogger {
    /// The interface root.
    pub root: NodeId,
    /// The focused logging widget.
    pub keylog: NodeId,
    /// Set by `q`.
    pub quit: Rc<Cell<bool>>,
}

impl KeyLogger {
    /// Fill the window with the log view and focus a key logger beneath it.
    pub fn install(window: Window) -> Result<(Window, Self)> {
        let log = LogView::new();
        let mut window = window.with_logger(log.sink());
        let quit = Rc::new(Cell::new(false));

        let root = window.create_interface(Interface::new());
        window.add(root, log, Layout::fill())?;
        let keylog = window.add(root, KeyLog::new(), Layout::new())?;

        let flag = quit.clone();
        window.on_key(move |k| {
            if *k == 'q' {
                flag.set(true);
                return true;
            }
            false
        });

        window.set_interface(root)?;
        window.layout()?;
        window.focus_first(root)?;
        window.log("press q to quit, Tab to resume logging after a click");
        Ok((window, Self { root, keylog, quit }))
    }

    /// Keep serving until `q` is pressed.
    pub fn running(&self) -> bool {
        !self.quit.get()
    }
}
