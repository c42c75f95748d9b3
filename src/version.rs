//! Version reporting.

use std::fmt::Write;

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

/// `kcsi version X.Y.Z`
pub fn version_info() -> String {
    format!("{} version {}", NAME, VERSION)
}

/// Multi-line report. `kubectl` is the client version, or the reason it
/// could not be determined.
pub fn detailed_version(kubectl: Result<&str, &str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", DESCRIPTION, NAME);
    let _ = writeln!(out, "Version: {}", VERSION);
    let _ = writeln!(
        out,
        "OS/Arch: {}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    match kubectl {
        Ok(v) => {
            let _ = writeln!(out, "kubectl: {}", v);
        }
        Err(reason) => {
            let _ = writeln!(out, "kubectl: unavailable ({})", reason);
        }
    }
    let _ = write!(out, "Repository: {}", REPOSITORY);
    out
}
