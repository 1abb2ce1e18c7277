pub mod html;
pub mod index;
pub mod markdown;
pub mod sitemap;

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::changelog::Discovery;
use crate::error::Result;

/// A skipped source document as it appears in command reports.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedReport {
    pub file: String,
    pub reason: String,
}

impl SkippedReport {
    pub fn from_discovery(discovery: &Discovery) -> Vec<Self> {
        discovery
            .skipped
            .iter()
            .map(|s| Self {
                file: s.file.clone(),
                reason: s.reason.to_string(),
            })
            .collect()
    }
}

/// Replace `path` with `contents` in one step.
///
/// The data goes to a temporary file next to the target which is then
/// renamed over it, so readers never observe a partially written file.
/// An existing target keeps its permissions; a new one gets `0644`.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    if let Some(permissions) = output_permissions(path) {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

// Temp files start out owner-only (0600).
#[cfg(unix)]
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => Some(std::fs::Permissions::from_mode(0o644)),
    }
}

#[cfg(not(unix))]
fn output_permissions(path: &Path) -> Option<std::fs::Permissions> {
    std::fs::metadata(path).ok().map(|meta| meta.permissions())
}
