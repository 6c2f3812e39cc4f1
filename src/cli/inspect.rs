//! Inspect command: parse a data file and show what the wizard would see.

use crate::cli::common::{print_json, read_data_file, CliError, CliResult};
use crate::models::{ParsedTable, Row, PREVIEW_COLUMNS, PREVIEW_ROWS};
use crate::parser;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Parse a CSV/TSV file and show columns, delimiter and a preview
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the CSV or TSV file
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Number of preview rows
    #[arg(long, value_name = "N", default_value_t = PREVIEW_ROWS)]
    pub rows: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct InspectOutput<'a> {
    file: String,
    delimiter: String,
    row_count: usize,
    columns: &'a [String],
    preview: &'a [Row],
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let bytes = read_data_file(&self.data)?;
        let file_name = self
            .data
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let table = parser::parse_upload(&file_name, None, &bytes)
            .map_err(|e| CliError::validation(e.to_string()))?;

        if table.is_empty() {
            return Err(CliError::validation(format!(
                "No header row found in {}",
                self.data.display()
            )));
        }

        if self.json {
            print_json(&InspectOutput {
                file: file_name,
                delimiter: table.delimiter.to_string(),
                row_count: table.row_count(),
                columns: &table.columns,
                preview: table.preview(self.rows),
            })
        } else {
            print_table(&file_name, &table, self.rows);
            Ok(())
        }
    }
}

fn print_table(file_name: &str, table: &ParsedTable, rows: usize) {
    println!("File: {file_name}");
    println!("Delimiter: {}", table.delimiter);
    println!("Rows: {}", table.row_count());
    println!("Columns ({}):", table.columns.len());
    for column in &table.columns {
        println!("  - {column}");
    }

    let preview = table.preview(rows);
    if preview.is_empty() {
        return;
    }

    let shown: Vec<&String> = table.columns.iter().take(PREVIEW_COLUMNS).collect();
    println!();
    println!("Preview:");
    println!(
        "  {}",
        shown.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(" | ")
    );
    for row in preview {
        let cells: Vec<&str> = shown
            .iter()
            .map(|column| row.get(column.as_str()).map_or("", String::as_str))
            .collect();
        println!("  {}", cells.join(" | "));
    }
    if table.columns.len() > PREVIEW_COLUMNS {
        println!(
            "  ({} more column(s) not shown)",
            table.columns.len() - PREVIEW_COLUMNS
        );
    }
}
