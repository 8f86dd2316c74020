use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use bwboot_core::BootstrapError;
use tracing::{debug, info, warn};

const NPM_PACKAGE: &str = "@bitwarden/cli";
const NPM_CACHE_DIR: &str = "/.npm";
// Container uid:gid the npm cache must belong to for the global install to
// work in the sandboxed arm64 images this path exists for.
const NPM_CACHE_OWNER: &str = "99:100";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Process seam: run a program to completion and capture what it said.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ProcessOutput>;
}

pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .with_context(|| format!("{program} failed to start"))?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Linux/arm64 path: upstream ships no archive for it, so the client is
/// installed globally through npm. No version marker is written; npm owns
/// the up-to-date question for this install, and re-running is idempotent.
pub fn install_via_npm(runner: &dyn CommandRunner) -> Result<()> {
    info!("installing Bitwarden CLI client through npm");

    repair_cache_ownership(runner, Path::new(NPM_CACHE_DIR));

    let output = runner.run("npm", &["install", "-g", NPM_PACKAGE])?;
    if !output.success() {
        return Err(BootstrapError::AlternateInstall {
            code: output.code,
            stderr: output.stderr,
        }
        .into());
    }

    debug!(stdout = %output.stdout.trim(), "npm install output");
    info!("Bitwarden CLI client installed through npm");
    Ok(())
}

// Best-effort: a sandboxed container often mounts the npm cache owned by
// root, which makes the global install fail. The chown may itself fail
// (not root, read-only fs); npm gets its chance either way.
pub(crate) fn repair_cache_ownership(runner: &dyn CommandRunner, cache_dir: &Path) {
    if !cache_dir.exists() {
        return;
    }

    let cache = cache_dir.display().to_string();
    match runner.run("chown", &["-R", NPM_CACHE_OWNER, &cache]) {
        Ok(output) if output.success() => {}
        Ok(output) => {
            warn!(stderr = %output.stderr.trim(), "could not fix npm cache ownership");
        }
        Err(err) => {
            warn!("could not fix npm cache ownership: {err:#}");
        }
    }
}
