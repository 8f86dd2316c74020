use crate::error::BootstrapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl Os {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }

    /// File name of the installed client executable for this OS.
    pub fn client_file_name(self) -> &'static str {
        match self {
            Self::Windows => "bw.exe",
            Self::Linux | Self::MacOs => "bw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X64,
    Arm64,
    Other,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X64 => "x64",
            Self::Arm64 => "arm64",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformTarget {
    pub os: Os,
    pub arch: Arch,
}

impl PlatformTarget {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Resolves the build host into a supported target. Any OS outside
    /// linux/macos/windows is fatal; an unrecognized architecture is not.
    pub fn resolve_host() -> Result<Self, BootstrapError> {
        let os = match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            other => {
                return Err(BootstrapError::UnsupportedPlatform {
                    os: other.to_string(),
                    arch: std::env::consts::ARCH.to_string(),
                });
            }
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => Arch::X64,
            "aarch64" => Arch::Arm64,
            _ => Arch::Other,
        };
        Ok(Self { os, arch })
    }
}
