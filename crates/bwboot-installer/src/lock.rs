use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::layout::ClientLayout;

/// Advisory guard around the fetch+install critical section. Two
/// invocations sharing an install dir would otherwise race on the binary
/// and the version marker; the second claim fails instead.
///
/// The lock is a `create_new` file holding the claimant's pid. A crashed
/// process can leave it behind; recovery is deleting the file.
#[derive(Debug)]
pub struct InstallLock {
    path: PathBuf,
}

impl InstallLock {
    pub fn claim(layout: &ClientLayout) -> Result<Self> {
        let path = layout.lock_path();
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                let holder = fs::read_to_string(&path).ok();
                let detail = holder
                    .as_deref()
                    .map(str::trim)
                    .filter(|pid| !pid.is_empty())
                    .map(|pid| format!(" (held by pid {pid})"))
                    .unwrap_or_default();
                return Err(anyhow!(
                    "another bootstrap is already installing into {}{detail}; \
                     remove {} if that process is gone",
                    layout.install_dir().display(),
                    path.display()
                ));
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to claim install lock {}", path.display()));
            }
        };

        file.write_all(format!("{}\n", std::process::id()).as_bytes())
            .with_context(|| format!("failed to write install lock {}", path.display()))?;

        Ok(Self { path })
    }
}

impl Drop for InstallLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
