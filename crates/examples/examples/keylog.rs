use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use grove::{Window, backend::crossterm::{CrosstermTerminal, runloop}};
use grove_examples::{keylog::KeyLogger, logging};

/// Print every key and mouse action the terminal delivers.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Write tracing output to this file
    #[clap(short, long)]
    log: Option<PathBuf>,
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        logging::init(path, tracing::Level::TRACE)?;
    }
    let (window, logger) = KeyLogger::install(Window::new(CrosstermTerminal::new())?)?;
    runloop(window, move |_| logger.running())?;
    Ok(())
}
