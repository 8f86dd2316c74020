mod extract;
mod fetch;
mod gate;
mod layout;
mod lock;
mod npm;
mod perms;
mod stream;

pub use extract::{install_from_archive, EntryUnpacker, ZipUnpacker};
pub use fetch::{download_archive, HttpTransport, ReqwestTransport};
pub use gate::needs_install;
pub use layout::{default_install_dir, ClientLayout};
pub use lock::InstallLock;
pub use npm::{install_via_npm, CommandRunner, ProcessOutput, SystemRunner};
pub use perms::normalize_permissions;

use std::path::Path;

use anyhow::Result;
use bwboot_core::{plan_for, CancelToken, InstallPlan, PlatformTarget, ReleaseSpec};
use tracing::info;

/// Guarantees a runnable Bitwarden CLI client for the host platform,
/// downloading and installing one into `install_dir` when the recorded
/// version is absent or stale. Fails with `UnsupportedPlatform` on any OS
/// outside linux/macos/windows.
pub fn ensure_client(
    install_dir: &Path,
    transport: &dyn HttpTransport,
    unpacker: &dyn EntryUnpacker,
    runner: &dyn CommandRunner,
    token: &CancelToken,
) -> Result<()> {
    let target = PlatformTarget::resolve_host()?;
    ensure_client_for_target(target, install_dir, transport, unpacker, runner, token)
}

/// Same as [`ensure_client`] with the default capability implementations
/// wired in, for hosts that have nothing to inject.
pub fn ensure_client_with_defaults(install_dir: &Path, token: &CancelToken) -> Result<()> {
    let transport = ReqwestTransport::new()?;
    ensure_client(install_dir, &transport, &ZipUnpacker, &SystemRunner, token)
}

/// The full acquisition state machine, with the platform passed in so every
/// branch stays drivable without faking the build host. Linux/arm64 routes
/// to the npm strategy and touches nothing under `install_dir`; everything
/// else runs the gate → fetch → extract → permissions pipeline.
pub fn ensure_client_for_target(
    target: PlatformTarget,
    install_dir: &Path,
    transport: &dyn HttpTransport,
    unpacker: &dyn EntryUnpacker,
    runner: &dyn CommandRunner,
    token: &CancelToken,
) -> Result<()> {
    match plan_for(target) {
        InstallPlan::PackageManager => npm::install_via_npm(runner),
        InstallPlan::Archive(release) => {
            let layout = ClientLayout::new(install_dir, target.os);
            ensure_from_archive(&layout, &release, transport, unpacker, token)
        }
    }
}

fn ensure_from_archive(
    layout: &ClientLayout,
    release: &ReleaseSpec,
    transport: &dyn HttpTransport,
    unpacker: &dyn EntryUnpacker,
    token: &CancelToken,
) -> Result<()> {
    info!("checking for Bitwarden CLI client");
    layout.ensure_dir()?;

    if gate::needs_install(layout, release.version) {
        token.ensure_active()?;
        let _lock = lock::InstallLock::claim(layout)?;
        let archive = fetch::download_archive(transport, release.download_url, layout, token)?;
        extract::install_from_archive(unpacker, layout, &archive, release, token)?;
    } else {
        info!("up-to-date Bitwarden CLI client found, skipping download");
    }

    perms::normalize_permissions(&layout.binary_path(), layout.os())
}
