//! Stamps the `nowplay` binary with the commit it was built from
//!
//! Sets `NOWPLAY_GIT_HASH` (8-char short hash, `-dirty` when the tree has
//! local changes, `unknown` outside a checkout) and `NOWPLAY_BUILD_TIMESTAMP`
//! (UTC, RFC 3339). The profile comes from `cfg!(debug_assertions)` at
//! runtime, see `startup::build_id`.

use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    let git_hash = match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .map(|s| !s.is_empty())
                .unwrap_or(false);
            if dirty {
                format!("{}-dirty", hash)
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    };

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    println!("cargo:rustc-env=NOWPLAY_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=NOWPLAY_BUILD_TIMESTAMP={}", build_timestamp);

    // Re-stamp on commit or checkout, not on every source edit
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/index");
}
