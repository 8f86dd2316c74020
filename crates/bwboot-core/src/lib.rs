mod cancel;
mod error;
mod platform;
mod release;

pub use cancel::CancelToken;
pub use error::BootstrapError;
pub use platform::{Arch, Os, PlatformTarget};
pub use release::{plan_for, InstallPlan, ReleaseSpec};

#[cfg(test)]
mod tests;
