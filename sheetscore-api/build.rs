//! Stamps the binary with its source revision and build time
//!
//! Exposed to the crate as `SHEETSCORE_REVISION`, `SHEETSCORE_BUILT_AT` and
//! `SHEETSCORE_PROFILE`; the startup banner and `GET /health` report them.

use std::path::Path;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// `git describe` output, e.g. `3f2a9c1e` or `3f2a9c1e-dirty`
fn revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Rebuild when HEAD moves; outside a checkout only build.rs itself counts
fn watch_git_head() {
    let Ok(output) = Command::new("git").args(["rev-parse", "--git-dir"]).output() else {
        return;
    };
    if !output.status.success() {
        return;
    }
    let Ok(git_dir) = String::from_utf8(output.stdout) else {
        return;
    };
    let head = Path::new(git_dir.trim()).join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    watch_git_head();

    let revision = revision().unwrap_or_else(|| UNKNOWN.to_string());
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string());

    println!("cargo:rustc-env=SHEETSCORE_REVISION={}", revision);
    println!("cargo:rustc-env=SHEETSCORE_BUILT_AT={}", built_at);
    println!("cargo:rustc-env=SHEETSCORE_PROFILE={}", profile);
}
