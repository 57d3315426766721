//! Grove: a retained-mode widget toolkit for character-cell terminals.
//!
//! Applications build a tree of widgets inside a [`Window`]. The window
//! reads input from a [`Terminal`](backend::Terminal), routes it through the
//! tree, and renders each widget onto a [`Canvas`] that carries its own
//! coordinate offset and clipping bounds.
//!
//! # Module Organization
//!
//! - [`core`] - The node tree, layout, event routing and focus
//! - [`widget`] - The [`Widget`] trait implemented by everything in the tree
//! - [`widgets`] - Stock widgets: text editor, buttons, labels, frames
//! - [`canvas`] - Offset, clipped drawing surfaces
//! - [`width`] - Display-column arithmetic for wide characters
//! - [`window`] - The event loop

#![warn(missing_docs)]

pub use geom;

pub mod backend;
pub mod canvas;
pub mod core;
pub mod error;
pub mod event;
pub mod screen;
pub mod style;
pub mod timer;
pub mod widget;
pub mod widgets;
pub mod width;
pub mod window;

pub use canvas::{Canvas, Render, Wrap};
pub use crate::core::{Context, FocusManager, Layout, NodeId, NodeKind, NodeName, Tree};
pub use error::{Error, Result};
pub use timer::Timer;
pub use widget::{EventOutcome, FocusResponse, Widget};
pub use window::{LoopState, Window, WindowOptions};
