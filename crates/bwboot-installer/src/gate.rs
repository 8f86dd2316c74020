use std::fs;

use crate::layout::ClientLayout;

/// Version currently recorded on disk, or None when the marker is missing,
/// unreadable, or not valid UTF-8. None always means "install again"; this
/// returns Option, not Result, so no refactor can turn an unreadable marker
/// into a hard failure.
fn installed_version(layout: &ClientLayout) -> Option<String> {
    let raw = fs::read_to_string(layout.version_file()).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

/// Decides whether the archive path has work to do. Versions are opaque
/// tags; anything but an exact match means reinstall.
pub fn needs_install(layout: &ClientLayout, required_version: &str) -> bool {
    if !layout.binary_path().exists() {
        return true;
    }
    match installed_version(layout) {
        Some(installed) => installed != required_version,
        None => true,
    }
}
