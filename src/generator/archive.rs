//! In-memory zip assembly.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::assets::is_safe_relative_path;

/// Builds a deflate-compressed zip in memory.
///
/// Every entry carries the fixed DOS epoch timestamp, so identical inputs
/// produce identical archive bytes.
pub struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: Vec<String>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    /// Creates an empty archive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .unix_permissions(0o644)
                .last_modified_time(zip::DateTime::default()),
            entries: Vec::new(),
        }
    }

    /// Adds a file with zip-slip prevention.
    pub fn add_file(&mut self, name: &str, content: &[u8]) -> Result<(), String> {
        if !is_safe_relative_path(name) {
            return Err(format!("Invalid filename in zip: {name}"));
        }

        self.zip
            .start_file(name, self.options)
            .map_err(|e| format!("Failed to start file {name}: {e}"))?;
        self.zip
            .write_all(content)
            .map_err(|e| format!("Failed to write file {name}: {e}"))?;

        self.entries.push(name.to_string());
        Ok(())
    }

    /// Names added so far, in order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Finalizes the archive and returns its bytes and entry names.
    pub fn finish(self) -> Result<(Vec<u8>, Vec<String>), String> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| format!("Failed to finalize zip: {e}"))?;
        Ok((cursor.into_inner(), self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_build_and_read_back() {
        let mut builder = ArchiveBuilder::new();
        builder.add_file("app.R", b"shinyApp(ui, server)\n").unwrap();
        builder.add_file("www/styles.css", b"body {}\n").unwrap();
        let (bytes, entries) = builder.finish().unwrap();

        assert_eq!(entries, vec!["app.R", "www/styles.css"]);

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("www/styles.css")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "body {}\n");
    }

    #[test]
    fn test_rejects_unsafe_names() {
        let mut builder = ArchiveBuilder::new();
        assert!(builder.add_file("../evil", b"x").is_err());
        assert!(builder.add_file("/abs", b"x").is_err());
        assert!(builder.entries().is_empty());
    }

    #[test]
    fn test_identical_input_identical_bytes() {
        let build = || {
            let mut builder = ArchiveBuilder::new();
            builder.add_file("README.md", b"readme").unwrap();
            builder.finish().unwrap().0
        };
        assert_eq!(build(), build());
    }
}
