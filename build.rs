//! Generates `build_info.rs`: commit, build date and the enabled cargo
//! features, for `--version` and the log header.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let commit = env::var("FLAPPY3D_COMMIT").unwrap_or_else(|_| git_short_hash());
    let date = env::var("FLAPPY3D_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());
    let features = enabled_features();

    let constants = [
        ("BUILD_COMMIT", commit.as_str()),
        ("BUILD_DATE", date.as_str()),
        ("BUILD_FEATURES", features.as_str()),
    ];
    let source: String = constants
        .iter()
        .map(|(name, value)| format!("pub const {}: &str = {:?};\n", name, value))
        .collect();

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("build_info.rs"), source)
        .expect("OUT_DIR is writable");

    watch_git_head();
    println!("cargo:rerun-if-env-changed=FLAPPY3D_COMMIT");
    println!("cargo:rerun-if-env-changed=FLAPPY3D_BUILD_DATE");
}

/// Seven-character hash of HEAD, or "unknown" outside a git checkout.
fn git_short_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Comma-separated optional features, e.g. "sound", or "" for none.
fn enabled_features() -> String {
    let mut features: Vec<String> = env::vars()
        .filter_map(|(key, _)| key.strip_prefix("CARGO_FEATURE_").map(str::to_string))
        .filter(|name| name != "DEFAULT")
        .map(|name| name.to_lowercase().replace('_', "-"))
        .collect();
    features.sort();
    features.join(",")
}

/// Rebuild when HEAD moves: HEAD itself changes on checkout, the branch ref
/// on commit.
fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Ok(head) = fs::read_to_string(".git/HEAD") {
        if let Some(reference) = head.trim().strip_prefix("ref: ") {
            println!("cargo:rerun-if-changed=.git/{}", reference);
        }
    }
}
