//! Stamps the binary with build identification
//!
//! `main.rs` reads `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` via `env!`
//! and logs them at startup.

use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    emit("GIT_HASH", &git_short_hash().unwrap_or_else(|| UNKNOWN.into()));
    emit("BUILD_TIMESTAMP", &build_timestamp());
    emit("BUILD_PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.into()));

    // Rerun when HEAD moves or sources change
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=src");
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

/// Eight-character commit hash, `None` outside a git checkout
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_owned()).filter(|h| !h.is_empty())
}

/// UTC, RFC 3339 at second precision
fn build_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
