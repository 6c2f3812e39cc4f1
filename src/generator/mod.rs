//! Package generation: app source, derived stylesheet and zip archive.
//!
//! [`generate`] is deterministic for a fixed [`GenerationConfig`] and asset
//! source. Static assets are fetched concurrently; optional ones may fail
//! without aborting, required ones may not (see [`assets::ASSET_MANIFEST`]).

pub mod app;
pub mod archive;
pub mod assets;
pub mod escape;
pub mod stylesheet;
pub mod template;

use std::thread;

use sha2::{Digest, Sha256};

use crate::models::{is_valid_hex, ConfigError, GenerationConfig};

pub use app::{
    archive_file_name, artifact_file_name, artifact_stem, render_app, ARCHIVE_APP_ENTRY,
};
pub use archive::ArchiveBuilder;
pub use assets::{
    AssetKind, AssetSource, AssetSpec, DirAssetSource, EmbeddedAssets, Requirement,
    ASSET_MANIFEST,
};
pub use escape::{escape_r_string, r_string};
pub use stylesheet::{render_stylesheet, PLACEHOLDER_TOKENS};
pub use template::TemplateError;

/// Errors that abort generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The configuration violates an invariant.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The app template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// A required static asset could not be fetched.
    #[error("Required asset '{path}' could not be fetched: {reason}")]
    RequiredAsset {
        /// Asset path
        path: String,
        /// Underlying failure
        reason: String,
    },
    /// The base stylesheet is not UTF-8.
    #[error("Stylesheet template '{0}' is not valid UTF-8")]
    StylesheetEncoding(String),
    /// Writing the zip failed.
    #[error("Failed to build archive: {0}")]
    Archive(String),
}

/// Everything produced by one generation.
#[derive(Debug, Clone)]
pub struct Package {
    /// Standalone artifact file name (`<stem>_app.R`)
    pub app_file_name: String,
    /// Rendered app source
    pub app_source: String,
    /// Derived stylesheet
    pub stylesheet: String,
    /// Archive file name (`<stem>_app.zip`)
    pub archive_file_name: String,
    /// Zip bytes
    pub archive: Vec<u8>,
    /// Archive entries in write order
    pub entries: Vec<String>,
    /// Optional assets that were left out
    pub skipped: Vec<String>,
}

impl Package {
    /// Hex SHA-256 of the app source.
    #[must_use]
    pub fn app_digest(&self) -> String {
        sha256_hex(self.app_source.as_bytes())
    }

    /// Hex SHA-256 of the stylesheet.
    #[must_use]
    pub fn stylesheet_digest(&self) -> String {
        sha256_hex(self.stylesheet.as_bytes())
    }
}

/// Lower-case hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Validates `config` and renders the standalone app source only.
pub fn generate_app(config: &GenerationConfig) -> Result<(String, String), GenerateError> {
    config.validate()?;
    let source = render_app(config)?;
    Ok((artifact_file_name(config.display_title()), source))
}

/// Generates the full package for `config` using static assets from `assets`.
pub fn generate(
    config: &GenerationConfig,
    assets: &dyn AssetSource,
) -> Result<Package, GenerateError> {
    config.validate()?;

    for (name, value) in config.style.entries() {
        if !is_valid_hex(value) {
            tracing::warn!(color = name, value, "Colour is not a 6-digit hex value; using it as-is");
        }
    }

    tracing::info!(
        title = config.display_title(),
        source = %assets.describe(),
        "Generating package"
    );

    let app_source = render_app(config)?;
    let fetched = fetch_all(assets);

    let mut builder = ArchiveBuilder::new();
    builder
        .add_file(ARCHIVE_APP_ENTRY, app_source.as_bytes())
        .map_err(GenerateError::Archive)?;

    let mut stylesheet = String::new();
    let mut skipped = Vec::new();

    for (spec, result) in ASSET_MANIFEST.iter().zip(fetched) {
        let bytes = match (result, spec.requirement) {
            (Ok(bytes), _) => bytes,
            (Err(e), Requirement::Required) => {
                tracing::error!(asset = spec.source, "Required asset unavailable: {e:#}");
                return Err(GenerateError::RequiredAsset {
                    path: spec.source.to_string(),
                    reason: format!("{e:#}"),
                });
            }
            (Err(e), Requirement::Optional) => {
                tracing::warn!(asset = spec.source, "Skipping optional asset: {e:#}");
                skipped.push(spec.archive_path.to_string());
                continue;
            }
        };

        match spec.kind {
            AssetKind::Passthrough => builder
                .add_file(spec.archive_path, &bytes)
                .map_err(GenerateError::Archive)?,
            AssetKind::StylesheetTemplate => {
                let base = String::from_utf8(bytes)
                    .map_err(|_| GenerateError::StylesheetEncoding(spec.source.to_string()))?;
                stylesheet = render_stylesheet(&base, &config.style);
                builder
                    .add_file(spec.archive_path, stylesheet.as_bytes())
                    .map_err(GenerateError::Archive)?;
            }
        }
    }

    let (archive, entries) = builder.finish().map_err(GenerateError::Archive)?;

    tracing::info!(
        entries = entries.len(),
        skipped = skipped.len(),
        bytes = archive.len(),
        "Package generated"
    );

    Ok(Package {
        app_file_name: artifact_file_name(config.display_title()),
        app_source,
        stylesheet,
        archive_file_name: archive_file_name(config.display_title()),
        archive,
        entries,
        skipped,
    })
}

/// Fetches every manifest asset concurrently and returns results in
/// manifest order once all fetches have settled.
fn fetch_all(assets: &dyn AssetSource) -> Vec<anyhow::Result<Vec<u8>>> {
    thread::scope(|scope| {
        let handles: Vec<_> = ASSET_MANIFEST
            .iter()
            .map(|spec| scope.spawn(move || assets.fetch(spec.source)))
            .collect();

        handles
            .into_iter()
            .zip(ASSET_MANIFEST)
            .map(|(handle, spec)| {
                handle.join().unwrap_or_else(|_| {
                    Err(anyhow::anyhow!("Fetch of {} panicked", spec.source))
                })
            })
            .collect()
    })
}
