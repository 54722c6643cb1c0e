//! Bakes the release version into `$OUT_DIR/version.rs`.
//!
//! `GLOBKIT_BUILD_VERSION` overrides the package version so packaged
//! builds can carry their release tag.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=GLOBKIT_BUILD_VERSION");

    let version = env::var("GLOBKIT_BUILD_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .unwrap_or_else(|| "0.1.0-dev".to_string());

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    let generated = format!(
        "pub const VERSION: &str = {version:?};\n\
         pub const VERSION_CSTR: &[u8] = concat!({version:?}, \"\\0\").as_bytes();\n"
    );
    fs::write(out_dir.join("version.rs"), generated).expect("failed to write version.rs");
}
