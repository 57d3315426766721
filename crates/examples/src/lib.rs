//! Demo interfaces built on grove.

/// Editor, log and quit button side by side.
pub mod gallery;
/// Log every key and mouse action.
pub mod keylog;
/// File logging for the demo binaries.
pub mod logging;
/// A scrolling view over the window log.
pub mod logview;

#[cfg(test)]
mod tests;
