//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version string shown by `--version`, e.g.
/// `flappy3d 0.1.0 (2026-01-31 1a2b3c4) [sound]`.
pub fn version_string() -> String {
    let mut version = format!(
        "flappy3d {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if !BUILD_FEATURES.is_empty() {
        version.push_str(&format!(" [{}]", BUILD_FEATURES));
    }
    version
}
