//! Build script for RolodexGen.
//!
//! The default asset bundle under `assets/` is embedded into the binary using
//! rust-embed. This script makes sure edits to the bundle trigger a rebuild and
//! warns early when a file the generator treats as required is missing.

use std::path::Path;

/// Assets the package generator refuses to build without.
const REQUIRED_ASSETS: &[&str] = &[
    "BUILD_INSTRUCTIONS.txt",
    "Dockerfile",
    "README.md",
    "www/styles.css",
];

fn main() {
    println!("cargo:rerun-if-changed=assets");

    let assets_dir = Path::new("assets");
    if !assets_dir.exists() {
        println!("cargo:warning=assets directory not found, embedded bundle will be empty");
        return;
    }

    for name in REQUIRED_ASSETS {
        if !assets_dir.join(name).exists() {
            println!("cargo:warning=Required asset missing from bundle: assets/{name}");
        }
    }
}
