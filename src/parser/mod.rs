//! Parsing of uploaded tabular files.

pub mod tabular;
pub mod upload;

pub use tabular::{detect_delimiter, parse, split_fields};
pub use upload::{decode_upload, parse_upload, validate_upload, UploadError};
