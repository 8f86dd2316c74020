use anyhow::{Context, Result};
use bwboot_core::Os;
use std::fs;
use std::path::{Path, PathBuf};

/// Every on-disk location the bootstrap owns, derived from one root
/// directory plus the OS the binary name depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLayout {
    root: PathBuf,
    os: Os,
}

impl ClientLayout {
    pub fn new(root: impl Into<PathBuf>, os: Os) -> Self {
        Self {
            root: root.into(),
            os,
        }
    }

    pub fn install_dir(&self) -> &Path {
        &self.root
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn version_file(&self) -> PathBuf {
        self.root.join("version")
    }

    pub fn binary_path(&self) -> PathBuf {
        self.root.join(self.os.client_file_name())
    }

    pub fn staging_path(&self) -> PathBuf {
        self.root
            .join(format!("{}.part", self.os.client_file_name()))
    }

    pub fn archive_path(&self, stamp: &str) -> PathBuf {
        self.root.join(format!("{stamp}-bw.zip"))
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".install-lock")
    }

    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create {}", self.root.display()))?;
        Ok(())
    }
}

pub fn default_install_dir() -> Result<PathBuf> {
    if cfg!(windows) {
        let app_data = std::env::var("LOCALAPPDATA")
            .context("LOCALAPPDATA is not set; cannot resolve Windows install dir")?;
        return Ok(PathBuf::from(app_data).join("Bwboot"));
    }

    let home = std::env::var("HOME").context("HOME is not set; cannot resolve install dir")?;
    Ok(PathBuf::from(home).join(".bwboot"))
}
