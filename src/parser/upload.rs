//! Upload validation: file type checks and text decoding.

use std::path::Path;

use crate::models::ParsedTable;

/// MIME types accepted for uploads.
///
/// Browsers on Windows report `.csv` files as `application/vnd.ms-excel`.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "text/csv",
    "text/tab-separated-values",
    "application/csv",
    "application/vnd.ms-excel",
];

/// File extensions accepted for uploads.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Reasons an uploaded file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// Neither the extension nor the MIME type is CSV/TSV.
    #[error("Please upload a valid CSV or TSV file (got '{file_name}')")]
    UnsupportedType {
        /// Name of the rejected file
        file_name: String,
    },
    /// The file is not UTF-8 text.
    #[error("File is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
}

/// Checks that `file_name` (and the client-reported MIME type, if any) look
/// like CSV or TSV.
pub fn validate_upload(file_name: &str, mime: Option<&str>) -> Result<(), UploadError> {
    let has_extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        });

    let guessed = mime_guess::from_path(file_name);
    let guessed_ok = guessed
        .iter()
        .any(|m| ACCEPTED_MIME_TYPES.contains(&m.essence_str()));

    let reported_ok = mime.is_some_and(|m| {
        let essence = m.split(';').next().unwrap_or(m).trim();
        ACCEPTED_MIME_TYPES
            .iter()
            .any(|accepted| essence.eq_ignore_ascii_case(accepted))
    });

    if has_extension || guessed_ok || reported_ok {
        Ok(())
    } else {
        Err(UploadError::UnsupportedType {
            file_name: file_name.to_string(),
        })
    }
}

/// Decodes upload bytes as UTF-8 text.
pub fn decode_upload(bytes: &[u8]) -> Result<String, UploadError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| UploadError::InvalidEncoding(e.to_string()))
}

/// Validates, decodes and parses an upload in one step.
pub fn parse_upload(
    file_name: &str,
    mime: Option<&str>,
    bytes: &[u8],
) -> Result<ParsedTable, UploadError> {
    validate_upload(file_name, mime)?;
    let text = decode_upload(bytes)?;
    let table = super::parse(&text);

    tracing::debug!(
        file = file_name,
        columns = table.columns.len(),
        rows = table.row_count(),
        delimiter = %table.delimiter,
        "Parsed upload"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_csv_and_tsv() {
        assert!(validate_upload("resources.csv", None).is_ok());
        assert!(validate_upload("RESOURCES.CSV", None).is_ok());
        assert!(validate_upload("resources.tsv", None).is_ok());
    }

    #[test]
    fn test_accepts_reported_mime() {
        assert!(validate_upload("export", Some("text/csv")).is_ok());
        assert!(validate_upload("export", Some("text/csv; charset=utf-8")).is_ok());
        assert!(validate_upload("export.dat", Some("application/vnd.ms-excel")).is_ok());
    }

    #[test]
    fn test_rejects_other_files() {
        let err = validate_upload("photo.png", Some("image/png")).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert!(validate_upload("notes", None).is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert!(decode_upload(b"Name\nAcme\n").is_ok());
        assert!(matches!(
            decode_upload(&[0xff, 0xfe, 0x00]),
            Err(UploadError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_parse_upload() {
        let table = parse_upload("list.csv", None, b"Name,Type\nAcme,Food\n").unwrap();
        assert_eq!(table.columns, vec!["Name", "Type"]);
        assert_eq!(table.row_count(), 1);

        assert!(parse_upload("list.exe", None, b"Name\n").is_err());
    }
}
