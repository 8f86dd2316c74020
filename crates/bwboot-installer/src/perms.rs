use anyhow::Result;
use bwboot_core::Os;
use std::path::Path;

/// Sets the installed binary to owner read+write+execute and nothing else.
/// Runs after every successful archive-path check, not just after installs:
/// a binary dropped into place by other means may be missing its execute
/// bit. No-op for Windows targets.
pub fn normalize_permissions(binary: &Path, os: Os) -> Result<()> {
    if os == Os::Windows {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use anyhow::Context;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(binary)
            .with_context(|| format!("failed to inspect {}", binary.display()))?
            .permissions();
        permissions.set_mode(0o700);
        fs::set_permissions(binary, permissions)
            .with_context(|| format!("failed to set permissions on {}", binary.display()))?;
    }

    #[cfg(not(unix))]
    {
        let _ = binary;
    }

    Ok(())
}
