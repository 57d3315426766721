use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing::Level;

/// Send `tracing` output to a file. The terminal belongs to the interface,
/// so nothing can be written to stdout or stderr while a demo runs.
pub fn init(path: &Path, level: Level) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .with_line_number(true)
        .compact()
        .init();
    tracing::info!("logging to {}", path.display());
    Ok(())
}
