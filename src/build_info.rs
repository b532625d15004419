//! Version details baked in by build.rs.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line version string for `--version`.
pub fn version_line() -> String {
    format!("blazing-runner {} ({} {})", VERSION, BUILD_DATE, BUILD_COMMIT)
}
