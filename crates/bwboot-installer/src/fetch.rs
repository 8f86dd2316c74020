use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use bwboot_core::{BootstrapError, CancelToken};
use tracing::{info, warn};

use crate::layout::ClientLayout;
use crate::stream::copy_cancellable;

const RETRY_LIMIT: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// The one thing the bootstrap needs from HTTP: GET a URL, get back a byte
/// stream. Implementations surface failures as `BootstrapError::Transport`
/// (could not complete the request) or `BootstrapError::Download` (server
/// answered with a non-success status).
pub trait HttpTransport {
    fn get(&self, url: &str) -> Result<Box<dyn Read>>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("bwboot")
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Box<dyn Read>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| BootstrapError::Transport {
                url: url.to_string(),
                source: err.into(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(BootstrapError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        Ok(Box::new(response))
    }
}

/// Streams the release archive to a uniquely named file inside the install
/// dir and returns its path. The payload is copied chunk by chunk, never
/// held in memory whole. A failed or cancelled download removes the partial
/// file best-effort before surfacing the error.
pub fn download_archive(
    transport: &dyn HttpTransport,
    url: &str,
    layout: &ClientLayout,
    token: &CancelToken,
) -> Result<PathBuf> {
    info!(url, "downloading Bitwarden CLI client");

    let mut attempt = 0u32;
    let mut body = loop {
        token.ensure_active()?;
        match transport.get(url) {
            Ok(body) => break body,
            Err(err) if attempt < RETRY_LIMIT && is_retryable(&err) => {
                attempt += 1;
                warn!(url, attempt, "download attempt failed, retrying: {err:#}");
                std::thread::sleep(RETRY_BACKOFF * attempt);
            }
            Err(err) => return Err(err),
        }
    };

    let archive_path = layout.archive_path(&unique_stamp()?);
    let mut file = fs::File::create(&archive_path)
        .with_context(|| format!("failed to create {}", archive_path.display()))?;
    let copied = copy_cancellable(body.as_mut(), &mut file, token);
    drop(file);
    if let Err(err) = copied {
        let _ = fs::remove_file(&archive_path);
        return Err(err.context(format!(
            "failed to stream download to {}",
            archive_path.display()
        )));
    }

    Ok(archive_path)
}

// Connection failures and server-side errors are worth another try; a 4xx
// means the pinned URL itself is wrong and retrying cannot fix it.
fn is_retryable(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<BootstrapError>() {
        Some(BootstrapError::Transport { .. }) => true,
        Some(BootstrapError::Download { status, .. }) => *status >= 500,
        _ => false,
    }
}

fn unique_stamp() -> Result<String> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(format!("{}-{}", now.as_nanos(), std::process::id()))
}
