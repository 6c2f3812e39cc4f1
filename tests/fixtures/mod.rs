//! Shared test fixtures for E2E CLI and API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use rolodexgen::models::{ContentBlock, FieldRole, GenerationConfig, StyleConfig};
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Comma-separated resource list with a quoted field containing a comma.
pub const ACME_CSV: &str = "Name,Type,Phone\n\"Acme, Inc\",Food,555-1234\n";

/// Tab-separated resource list with every role-worthy column.
pub const DIRECTORY_TSV: &str = "Name\tCategory\tWebsite\tPhone\tAddress\tHours\tAbout\n\
Food Bank\tFood\thttps://food.example\t555-0100\t1 Main St\t9-5\tFree groceries\n\
Clinic\tHealth\thttps://clinic.example\t555-0101\t2 Oak Ave\t8-6\tWalk-in care\n\
\t\t\t\t\t\t\n\
Library\tEducation\thttps://lib.example\t555-0102\t3 Elm Rd\t10-8\tBooks and Wi-Fi\n";

/// Minimal config: title mapped, everything else default.
pub fn minimal_config(title: &str) -> GenerationConfig {
    GenerationConfig::new(title).with_role(FieldRole::Title, Some("Name".to_string()))
}

/// Config exercising every role, two blocks and custom colours.
pub fn full_config() -> GenerationConfig {
    let mapping = [
        (FieldRole::Title, "Name"),
        (FieldRole::Category, "Category"),
        (FieldRole::Url, "Website"),
        (FieldRole::Telephone, "Phone"),
        (FieldRole::Address, "Address"),
        (FieldRole::Hours, "Hours"),
        (FieldRole::Description, "About"),
    ];

    mapping
        .into_iter()
        .fold(GenerationConfig::new("Community Resources"), |config, (role, column)| {
            config.with_role(role, Some(column.to_string()))
        })
        .with_block_count(2)
        .with_block(
            0,
            ContentBlock::new("Welcome", "Find help near you.").with_header("About"),
        )
        .with_block(
            1,
            ContentBlock::new("Map", "").with_embed("<iframe src=\"https://maps.example\"></iframe>"),
        )
        .with_style(StyleConfig::new("#000", "ABCDEF", "#F0F", "#111111"))
}

/// Writes `content` to `name` inside a new temp dir.
pub fn temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write temp file");
    (path, temp_dir)
}

/// Writes a generation config as TOML.
pub fn write_config_toml(config: &GenerationConfig, path: &Path) {
    let text = toml::to_string_pretty(config).expect("Failed to serialize config");
    fs::write(path, text).expect("Failed to write config");
}

/// Reads a zip into (entry name, bytes) pairs in archive order.
pub fn read_zip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("Not a zip archive");
    (0..archive.len())
        .map(|index| {
            let mut file = archive.by_index(index).expect("Bad zip entry");
            let mut content = Vec::new();
            file.read_to_end(&mut content).expect("Failed to read zip entry");
            (file.name().to_string(), content)
        })
        .collect()
}

/// Text of a named zip entry.
pub fn zip_entry_text(bytes: &[u8], name: &str) -> String {
    read_zip(bytes)
        .into_iter()
        .find(|(entry, _)| entry == name)
        .map(|(_, content)| String::from_utf8(content).expect("Entry is not UTF-8"))
        .unwrap_or_else(|| panic!("Entry {name} not in archive"))
}
