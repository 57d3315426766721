use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use grove::{Window, WindowOptions, backend::crossterm::{CrosstermTerminal, runloop}};
use grove_examples::{gallery::Gallery, logging};

/// A framed editor, the window log and a quit button.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Write tracing output to this file
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Refresh period in milliseconds
    #[clap(short, long, default_value_t = 20)]
    refresh: u64,

    /// Stop Tab traversal at the last widget instead of wrapping
    #[clap(long)]
    no_wrap: bool,
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        logging::init(path, tracing::Level::DEBUG)?;
    }
    let options = WindowOptions {
        refresh_period: Duration::from_millis(args.refresh),
        ..Default::default()
    };
    let window = Window::with_options(CrosstermTerminal::new(), options)?;
    let (window, gallery) = Gallery::install(window, !args.no_wrap)?;
    runloop(window, move |_| gallery.running())?;
    Ok(())
}
