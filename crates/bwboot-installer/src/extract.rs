use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bwboot_core::{BootstrapError, CancelToken, ReleaseSpec};
use tracing::{info, warn};

use crate::layout::ClientLayout;
use crate::stream::CancelWriter;

/// Archive seam: stream one named entry out of a zip-like container into
/// `dest`. `Ok(false)` means the container holds no entry with that name.
pub trait EntryUnpacker {
    fn unpack_entry(&self, archive: &Path, entry: &str, dest: &mut dyn Write) -> Result<bool>;
}

pub struct ZipUnpacker;

impl EntryUnpacker for ZipUnpacker {
    fn unpack_entry(&self, archive: &Path, entry: &str, dest: &mut dyn Write) -> Result<bool> {
        let file = fs::File::open(archive)
            .with_context(|| format!("failed to open {}", archive.display()))?;
        let mut zip = zip::ZipArchive::new(file)
            .with_context(|| format!("failed to read archive {}", archive.display()))?;
        let mut entry_file = match zip.by_name(entry) {
            Ok(entry_file) => entry_file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(false),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read '{entry}' from {}", archive.display())
                });
            }
        };
        io::copy(&mut entry_file, dest)
            .with_context(|| format!("failed to stream '{entry}' from {}", archive.display()))?;
        Ok(true)
    }
}

/// Extracts the client executable from the downloaded archive and records
/// its version. Write order is fixed: staged binary, rename into place,
/// then the marker. An interruption anywhere in between leaves the layout
/// reading as "needs install", never as falsely current.
pub fn install_from_archive(
    unpacker: &dyn EntryUnpacker,
    layout: &ClientLayout,
    archive_path: &Path,
    release: &ReleaseSpec,
    token: &CancelToken,
) -> Result<()> {
    token.ensure_active()?;
    info!("extracting Bitwarden CLI client");

    let entry = layout.os().client_file_name();
    let staging = layout.staging_path();
    match stage_entry(unpacker, archive_path, entry, &staging, token) {
        Ok(true) => {}
        Ok(false) => {
            let _ = fs::remove_file(&staging);
            return Err(BootstrapError::ArchiveEntryMissing {
                entry: entry.to_string(),
            }
            .into());
        }
        Err(err) => {
            let _ = fs::remove_file(&staging);
            if token.is_cancelled() {
                return Err(BootstrapError::Cancelled.into());
            }
            return Err(err);
        }
    }

    let binary = layout.binary_path();
    fs::rename(&staging, &binary)
        .with_context(|| format!("failed to move staged client into {}", binary.display()))?;

    if let Err(err) = fs::remove_file(archive_path) {
        warn!(
            "failed to delete temporary archive {}: {err}",
            archive_path.display()
        );
    }

    let marker = layout.version_file();
    fs::write(&marker, release.version)
        .with_context(|| format!("failed to write version marker {}", marker.display()))?;

    info!(version = release.version, "Bitwarden CLI client installed");
    Ok(())
}

// The staged file is synced before the caller renames it, so the marker can
// never get ahead of the binary it describes.
fn stage_entry(
    unpacker: &dyn EntryUnpacker,
    archive: &Path,
    entry: &str,
    staging: &Path,
    token: &CancelToken,
) -> Result<bool> {
    let file = fs::File::create(staging)
        .with_context(|| format!("failed to create {}", staging.display()))?;
    let mut dest = CancelWriter::new(file, token);
    let found = unpacker.unpack_entry(archive, entry, &mut dest)?;
    let file = dest.into_inner();
    if found {
        file.sync_all()
            .with_context(|| format!("failed to flush {}", staging.display()))?;
    }
    Ok(found)
}
