use crate::platform::{Arch, Os, PlatformTarget};

/// One pinned upstream release of the Bitwarden CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseSpec {
    pub version: &'static str,
    pub download_url: &'static str,
}

/// How the client gets onto this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPlan {
    /// Download the release archive and extract the executable.
    Archive(ReleaseSpec),
    /// Delegate to a global npm install; no local version tracking.
    PackageManager,
}

// Windows is pinned behind macOS/Linux on purpose; the skew is upstream's,
// not ours. Keep the three rows independent.
const WINDOWS_RELEASE: ReleaseSpec = ReleaseSpec {
    version: "v2024.2.1",
    download_url:
        "https://github.com/bitwarden/clients/releases/download/cli-v2024.2.1/bw-windows-2024.2.1.zip",
};

const MACOS_RELEASE: ReleaseSpec = ReleaseSpec {
    version: "v2024.7.2",
    download_url:
        "https://github.com/bitwarden/clients/releases/download/cli-v2024.7.2/bw-macos-2024.7.2.zip",
};

const LINUX_RELEASE: ReleaseSpec = ReleaseSpec {
    version: "v2024.7.2",
    download_url:
        "https://github.com/bitwarden/clients/releases/download/cli-v2024.7.2/bw-linux-2024.7.2.zip",
};

/// Routes a resolved target to its installation strategy. Linux on arm64 is
/// the one special case: upstream publishes no arm64 archive, so that
/// combination installs through npm instead.
pub fn plan_for(target: PlatformTarget) -> InstallPlan {
    match (target.os, target.arch) {
        (Os::Linux, Arch::Arm64) => InstallPlan::PackageManager,
        (Os::Linux, _) => InstallPlan::Archive(LINUX_RELEASE),
        (Os::MacOs, _) => InstallPlan::Archive(MACOS_RELEASE),
        (Os::Windows, _) => InstallPlan::Archive(WINDOWS_RELEASE),
    }
}
