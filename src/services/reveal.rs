//! File-browser reveal collaborator.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::process::Command;

/// Opens a path in the host file browser.
pub trait Revealer {
    fn reveal(&self, path: &Utf8Path) -> Result<()>;
}

/// Reveals paths with the platform file manager. A file path opens its
/// containing folder.
pub struct SystemRevealer;

impl Revealer for SystemRevealer {
    fn reveal(&self, path: &Utf8Path) -> Result<()> {
        let target = if path.is_file() {
            path.parent().unwrap_or(path)
        } else {
            path
        };

        tracing::info!("Revealing {} in file browser", target);

        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("explorer");
            c.arg(target.as_str());
            c
        } else if cfg!(target_os = "macos") {
            let mut c = Command::new("open");
            c.arg(target.as_str());
            c
        } else {
            let mut c = Command::new("xdg-open");
            c.arg(target.as_str());
            c
        };

        // Fire and forget; the file browser outlives us.
        cmd.spawn()
            .with_context(|| format!("Failed to open file browser for {}", target))?;
        Ok(())
    }
}
