//! RolodexGen Library
//!
//! This library turns a CSV/TSV resource list into a packaged shinyMobile
//! directory app: parsing uploads, mapping columns to roles, rendering the app
//! source and stylesheet, and zipping everything with the static asset bundle.

// Module declarations
pub mod branding;
pub mod cli;
pub mod config;
pub mod generator;
pub mod models;
pub mod parser;
#[cfg(feature = "web")]
pub mod web;
pub mod wizard;
