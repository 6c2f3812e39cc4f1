//! Static asset sources and the asset classification table.
//!
//! Static assets are opaque files copied into the archive. Which ones the
//! generator cannot do without is decided by [`ASSET_MANIFEST`], never by
//! control flow.

use anyhow::{Context, Result};
use rust_embed::Embed;
use std::fmt;
use std::path::{Path, PathBuf};

/// Whether a missing asset aborts generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Failure aborts the whole generation
    Required,
    /// Failure is logged and the file is left out
    Optional,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// How an asset's bytes reach the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Copied byte for byte
    Passthrough,
    /// Base stylesheet; colour tokens are replaced before archiving
    StylesheetTemplate,
}

/// One row of the asset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    /// Path within the asset source
    pub source: &'static str,
    /// Path within the archive
    pub archive_path: &'static str,
    /// Copy or transform
    pub kind: AssetKind,
    /// Abort or skip on failure
    pub requirement: Requirement,
}

impl AssetSpec {
    const fn passthrough(path: &'static str, requirement: Requirement) -> Self {
        Self {
            source: path,
            archive_path: path,
            kind: AssetKind::Passthrough,
            requirement,
        }
    }
}

/// Every static asset the archive can contain, in archive order.
pub const ASSET_MANIFEST: &[AssetSpec] = &[
    AssetSpec::passthrough("BUILD_INSTRUCTIONS.txt", Requirement::Required),
    AssetSpec::passthrough("Dockerfile", Requirement::Required),
    AssetSpec::passthrough("README.md", Requirement::Required),
    AssetSpec {
        source: "www/styles.css",
        archive_path: "www/styles.css",
        kind: AssetKind::StylesheetTemplate,
        requirement: Requirement::Required,
    },
    AssetSpec::passthrough("www/manifest.json", Requirement::Optional),
    AssetSpec::passthrough("www/service-worker.js", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-72x72.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-96x96.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-128x128.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-144x144.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-152x152.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-192x192.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-384x384.png", Requirement::Optional),
    AssetSpec::passthrough("www/icons/icon-512x512.png", Requirement::Optional),
];

/// Supplies static asset bytes by relative path.
pub trait AssetSource: Send + Sync {
    /// Fetches the asset at `path`.
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// The default bundle compiled into the binary from `assets/`.
#[derive(Embed)]
#[folder = "assets"]
struct Bundle;

/// Asset source backed by the embedded default bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl AssetSource for EmbeddedAssets {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        Bundle::get(path)
            .map(|file| file.data.into_owned())
            .with_context(|| format!("Asset not found in embedded bundle: {path}"))
    }

    fn describe(&self) -> String {
        "embedded bundle".to_string()
    }
}

/// Asset source reading from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        if !is_safe_relative_path(path) {
            anyhow::bail!("Refusing to read asset outside the asset directory: {path}");
        }

        let full_path = self.root.join(path);
        std::fs::read(&full_path)
            .with_context(|| format!("Failed to read asset: {}", full_path.display()))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Rejects absolute paths and parent-directory components.
#[must_use]
pub fn is_safe_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.starts_with('\\')
        && !path.contains("..")
        && !path.contains(':')
}
