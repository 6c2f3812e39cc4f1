//! Rendering of the primary artifact: the shinyMobile `app.R` source.

use std::collections::HashMap;

use crate::branding::GENERATOR_ID;
use crate::models::{ContentBlock, FieldRole, GenerationConfig};

use super::escape::{r_bool, r_string, r_string_or_null};
use super::template::{render_template, TemplateError};

/// The fixed R template.
const APP_TEMPLATE: &str = include_str!("templates/app.R.tmpl");

/// Suffix appended to the title stem for the standalone artifact.
pub const ARTIFACT_SUFFIX: &str = "_app.R";

/// Suffix appended to the title stem for the archive.
pub const ARCHIVE_SUFFIX: &str = "_app.zip";

/// Name of the artifact inside the archive.
pub const ARCHIVE_APP_ENTRY: &str = "app.R";

/// Indentation of elements inside an `f7Tab(...)` call.
const TAB_INDENT: &str = "        ";

/// Derives a file-name stem from the app title.
///
/// Lower-cases the title, collapses whitespace runs to `_` and maps every
/// character outside `[a-z0-9_.-]` to `_`, so the stem is safe both as a path
/// component and inside a quoted `Content-Disposition` value. A blank title
/// yields `app`.
///
/// # Examples
///
/// ```
/// use rolodexgen::generator::artifact_stem;
///
/// assert_eq!(artifact_stem("Test App"), "test_app");
/// ```
#[must_use]
pub fn artifact_stem(title: &str) -> String {
    let stem: String = title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '.' | '-' => c,
            _ => '_',
        })
        .collect();

    if stem.is_empty() {
        "app".to_string()
    } else {
        stem
    }
}

/// File name of the standalone artifact, e.g. `test_app_app.R`.
#[must_use]
pub fn artifact_file_name(title: &str) -> String {
    format!("{}{ARTIFACT_SUFFIX}", artifact_stem(title))
}

/// File name of the archive, e.g. `test_app_app.zip`.
#[must_use]
pub fn archive_file_name(title: &str) -> String {
    format!("{}{ARCHIVE_SUFFIX}", artifact_stem(title))
}

/// Renders the app source for `config`.
///
/// All user-supplied strings are escaped as R string literals before they are
/// substituted.
pub fn render_app(config: &GenerationConfig) -> Result<String, TemplateError> {
    let mut values: HashMap<&str, String> = HashMap::new();

    values.insert("GENERATOR", GENERATOR_ID.to_string());
    values.insert("APP_TITLE", r_string(config.display_title()));
    values.insert("DATA_FILE", r_string(&config.data.file_name));
    values.insert("DATA_SEP", format!("\"{}\"", config.data.delimiter.r_literal()));
    values.insert("COLUMN_DEFS", render_column_defs(config));
    values.insert("THEME", r_string(config.theme.as_str()));
    values.insert("DARK_MODE", r_bool(config.features.dark_mode).to_string());
    values.insert("PRIMARY_COLOR", r_string(&config.style.primary));
    values.insert("CONTENT_BLOCKS", render_blocks(&config.blocks));

    let has_filter =
        config.features.filters && config.mapping.get(FieldRole::Category).is_some();
    if config.features.filters && !has_filter {
        tracing::debug!("Category filter requested without a category column; omitting it");
    }

    values.insert("SEARCH_UI", render_if(config.features.search, SEARCH_UI));
    values.insert("FILTER_UI", render_if(has_filter, FILTER_UI));
    values.insert(
        "SEARCH_SERVER",
        render_if(config.features.search, SEARCH_SERVER),
    );
    values.insert("FILTER_SERVER", render_if(has_filter, FILTER_SERVER));

    render_template(APP_TEMPLATE, &values)
}

const SEARCH_UI: &str = r#"
        f7Text(inputId = "search", label = NULL, placeholder = "Search resources"),"#;

const FILTER_UI: &str = r#"
        f7Select(
          inputId = "category",
          label = "Category",
          choices = c("All", sort(unique(resources[[category_col]])))
        ),"#;

const SEARCH_SERVER: &str = r#"

    query <- trimws(if (is.null(input$search)) "" else input$search)
    if (nzchar(query) && length(search_cols) > 0) {
      haystack <- tolower(do.call(paste, c(lapply(search_cols, function(col) data[[col]]), sep = " ")))
      data <- data[grepl(tolower(query), haystack, fixed = TRUE), , drop = FALSE]
    }"#;

const FILTER_SERVER: &str = r#"

    if (!is.null(input$category) && input$category != "All") {
      data <- data[data[[category_col]] == input$category, , drop = FALSE]
    }"#;

fn render_if(enabled: bool, fragment: &str) -> String {
    if enabled {
        fragment.to_string()
    } else {
        String::new()
    }
}

/// One `<role>_col <- ...` line per role.
fn render_column_defs(config: &GenerationConfig) -> String {
    FieldRole::ALL
        .iter()
        .map(|role| {
            format!(
                "{}_col <- {}",
                role.key(),
                r_string_or_null(config.mapping.get(*role))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders every non-blank block as elements of the home tab.
///
/// Each element is prefixed with `,\n` so the fragment can follow the last
/// fixed argument of `f7Tab(...)`.
fn render_blocks(blocks: &[ContentBlock]) -> String {
    let mut output = String::new();

    for block in blocks.iter().filter(|block| !block.is_blank()) {
        for element in render_block(block) {
            output.push_str(",\n");
            output.push_str(TAB_INDENT);
            output.push_str(&element);
        }
    }

    output
}

/// Renders one block as a block title (if any) and an `f7Block` (if it has
/// a header, body or embed).
fn render_block(block: &ContentBlock) -> Vec<String> {
    let mut elements = Vec::new();

    if !block.title.trim().is_empty() {
        elements.push(format!("f7BlockTitle(title = {})", r_string(block.title.trim())));
    }

    let mut inner = Vec::new();
    if !block.header.trim().is_empty() {
        inner.push(format!("f7BlockHeader(text = {})", r_string(block.header.trim())));
    }
    if !block.body.trim().is_empty() {
        inner.push(format!("tags$p({})", r_string(block.body.trim())));
    }
    if block.has_embed() {
        inner.push(format!("HTML({})", r_string(&block.embed_markup)));
    }

    if !inner.is_empty() {
        let indent = format!("{TAB_INDENT}  ");
        let mut call = String::from("f7Block(\n");
        call.push_str(&format!("{indent}strong = TRUE,\n{indent}inset = TRUE"));
        for element in inner {
            call.push_str(",\n");
            call.push_str(&indent);
            call.push_str(&element);
        }
        call.push('\n');
        call.push_str(TAB_INDENT);
        call.push(')');
        elements.push(call);
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureToggles;

    fn config() -> GenerationConfig {
        GenerationConfig::new("Test App").with_role(FieldRole::Title, Some("Name".to_string()))
    }

    #[test]
    fn test_artifact_names() {
        assert_eq!(artifact_stem("Test App"), "test_app");
        assert_eq!(artifact_stem("  Food   Banks\tNY "), "food_banks_ny");
        assert_eq!(artifact_stem("a/b\\c"), "a_b_c");
        assert_eq!(artifact_stem("   "), "app");
        assert_eq!(artifact_file_name("Test App"), "test_app_app.R");
        assert_eq!(archive_file_name("Test App"), "test_app_app.zip");
    }

    #[test]
    fn test_artifact_stem_strips_header_unsafe_characters() {
        assert_eq!(artifact_stem("Bob \"Best\" List"), "bob__best__list");
        assert_eq!(artifact_stem("Food\u{1}Bank"), "food_bank");
        assert_eq!(artifact_stem("Café; x=1"), "caf___x_1");
        assert_eq!(artifact_stem("v1.2-beta"), "v1.2-beta");
        assert!(artifact_file_name("Tab\u{7f}Del")
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.-".contains(c)));
    }

    #[test]
    fn test_render_contains_title_and_columns() {
        let app = render_app(&config()).unwrap();

        assert!(app.contains("app_title <- \"Test App\""));
        assert!(app.contains("title_col <- \"Name\""));
        assert!(app.contains("description_col <- NULL"));
        assert!(app.contains("data_file <- \"data.csv\""));
        assert!(app.contains("sep = \",\""));
        assert!(app.contains("theme = \"auto\""));
        assert!(app.contains("color = \"#2563eb\""));
        assert!(!app.contains("{{"));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let config = config()
            .with_title("Bob's \"Best\" List")
            .with_block(0, ContentBlock::new("Hi", "line1\nline2 \\o/"));
        let app = render_app(&config).unwrap();

        assert!(app.contains(r#"app_title <- "Bob's \"Best\" List""#));
        assert!(app.contains(r#"tags$p("line1\nline2 \\o/")"#));
    }

    #[test]
    fn test_blank_blocks_skipped() {
        let app = render_app(&config().with_block_count(3)).unwrap();
        assert!(!app.contains("f7BlockTitle"));
        assert!(!app.contains("strong = TRUE"));
        assert!(app.contains("active = TRUE\n      ),"));
    }

    #[test]
    fn test_block_sub_elements() {
        let config = config()
            .with_block_count(2)
            .with_block(0, ContentBlock::new("About", ""))
            .with_block(
                1,
                ContentBlock::new("", "Body text").with_header("Header text"),
            );
        let app = render_app(&config).unwrap();

        assert!(app.contains("f7BlockTitle(title = \"About\")"));
        assert!(app.contains("f7BlockHeader(text = \"Header text\")"));
        assert!(app.contains("tags$p(\"Body text\")"));
        assert_eq!(app.matches("f7Block(\n").count(), 1);
    }

    #[test]
    fn test_embed_only_when_flagged() {
        let mut block = ContentBlock::new("Map", "Where we are");
        block.embed_markup = "<iframe src=\"https://maps\"></iframe>".to_string();

        let app = render_app(&config().with_block(0, block.clone())).unwrap();
        assert!(!app.contains("HTML("));

        block.embed = true;
        let app = render_app(&config().with_block(0, block)).unwrap();
        assert!(app.contains(r#"HTML("<iframe src=\"https://maps\"></iframe>")"#));
    }

    #[test]
    fn test_feature_toggles() {
        let with_category = config().with_role(FieldRole::Category, Some("Type".to_string()));
        let app = render_app(&with_category).unwrap();
        assert!(app.contains("inputId = \"search\""));
        assert!(app.contains("inputId = \"category\""));
        assert!(app.contains("input$category != \"All\""));

        // Filter needs a category column
        let app = render_app(&config()).unwrap();
        assert!(!app.contains("inputId = \"category\""));

        let off = with_category.with_features(FeatureToggles {
            search: false,
            filters: false,
            dark_mode: true,
        });
        let app = render_app(&off).unwrap();
        assert!(!app.contains("inputId = \"search\""));
        assert!(!app.contains("inputId = \"category\""));
        assert!(app.contains("dark = TRUE"));
        assert!(app.contains("icon = f7Icon(\"book\"),\n        uiOutput(\"resource_cards\")"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = config().with_block(0, ContentBlock::new("About", "Text"));
        assert_eq!(render_app(&config).unwrap(), render_app(&config).unwrap());
    }

    #[test]
    fn test_tab_delimited_source() {
        let mut config = config();
        config.data.delimiter = crate::models::Delimiter::Tab;
        config.data.file_name = "data.tsv".to_string();
        let app = render_app(&config).unwrap();
        assert!(app.contains("sep = \"\\t\""));
        assert!(app.contains("data_file <- \"data.tsv\""));
    }
}
