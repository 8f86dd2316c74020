use thiserror::Error;

/// Failure conditions that callers may need to tell apart. Everything else
/// travels as plain `anyhow` context.
///
/// A missing or unreadable version marker is deliberately absent here: it is
/// policy (reinstall), not an error.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The host OS is not one the release catalog knows about.
    #[error("unsupported platform: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// The transport could not complete the request at all.
    #[error("failed to reach {url}")]
    Transport {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// The server answered, but not with the archive.
    #[error("download of {url} failed with status {status}")]
    Download { url: String, status: u16 },

    /// The archive downloaded fine but does not contain the executable.
    #[error("entry '{entry}' not found in downloaded archive")]
    ArchiveEntryMissing { entry: String },

    /// The package-manager install exited nonzero.
    #[error("npm install failed (exit code {code:?}): {stderr}")]
    AlternateInstall { code: Option<i32>, stderr: String },

    /// The caller's cancellation signal fired.
    #[error("operation cancelled")]
    Cancelled,
}
