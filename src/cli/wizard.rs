//! Interactive wizard command driven by line prompts.

use crate::branding::APP_DISPLAY_NAME;
use crate::cli::common::{read_data_file, CliError, CliResult};
use crate::config::Config;
use crate::generator::AssetSource;
use crate::models::{
    ContentBlock, FeatureToggles, FieldRole, GenerationConfig, StyleConfig, Theme,
    MAX_CONTENT_BLOCKS, MIN_CONTENT_BLOCKS,
};
use crate::wizard::{Wizard, WizardError, WizardStep};
use clap::Args;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Build an app step by step from a data file
#[derive(Debug, Clone, Args)]
pub struct WizardArgs {
    /// Path to the CSV or TSV file
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    /// Output directory (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Directory with static assets replacing the embedded bundle
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,
}

impl WizardArgs {
    /// Execute the wizard on stdin/stdout
    pub fn execute(&self) -> CliResult<()> {
        let settings = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let out_dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| settings.output.output_dir.clone());
        let assets = settings.asset_source(self.assets.as_ref());
        let initial = GenerationConfig::default().with_theme(settings.defaults.theme);

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut session = Session::new(stdin.lock(), stdout.lock());
        session.run(&self.data, &out_dir, initial, assets.as_ref())?;
        Ok(())
    }
}

/// Answer that returns to the previous step from any prompt.
const BACK_ANSWER: &str = "back";

/// Why a step stopped before producing the next wizard state.
#[derive(Debug)]
enum StepError {
    /// The user asked to return to the previous step
    Back,
    /// The session cannot continue
    Cli(CliError),
}

impl From<CliError> for StepError {
    fn from(error: CliError) -> Self {
        Self::Cli(error)
    }
}

type StepResult<T> = Result<T, StepError>;

/// One interactive run over an input/output pair.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session reading answers from `input`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Walks every step and writes the archive into `out_dir`. Returns the
    /// archive path.
    pub fn run(
        &mut self,
        data: &Path,
        out_dir: &Path,
        initial: GenerationConfig,
        assets: &dyn AssetSource,
    ) -> CliResult<PathBuf> {
        self.say(&format!("{APP_DISPLAY_NAME} app wizard"))?;
        self.say(&format!(
            "Answer '{BACK_ANSWER}' at any prompt to return to the previous step."
        ))?;

        let mut wizard = Wizard::new(initial);
        loop {
            self.banner(wizard.step())?;
            let outcome = match wizard.step() {
                WizardStep::Upload => self.upload_step(&wizard, data),
                WizardStep::MapFields => self.mapping_step(&wizard),
                WizardStep::HomeContent => self.content_step(&wizard),
                WizardStep::Style => self.style_step(&wizard),
                WizardStep::Generate => return self.generate_step(&wizard, out_dir, assets),
            };

            wizard = match outcome {
                Ok(next) => next,
                Err(StepError::Back) => wizard
                    .back()
                    .map_err(|e| CliError::validation(e.to_string()))?,
                Err(StepError::Cli(error)) => return Err(error),
            };
        }
    }

    fn upload_step(&mut self, wizard: &Wizard, data: &Path) -> StepResult<Wizard> {
        let bytes = read_data_file(data)?;
        let file_name = data
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let next = wizard
            .upload(&file_name, None, &bytes)
            .map_err(|e| CliError::validation(e.to_string()))?;

        if let Some(table) = next.table() {
            if table.is_empty() {
                return Err(CliError::validation(format!(
                    "No header row found in {}",
                    data.display()
                ))
                .into());
            }
            self.say(&format!(
                "Loaded {} row(s) with {} column(s), {}-separated",
                table.row_count(),
                table.columns.len(),
                table.delimiter
            ))?;
        }
        Ok(next)
    }

    fn mapping_step(&mut self, wizard: &Wizard) -> StepResult<Wizard> {
        let columns = wizard
            .table()
            .map(|table| table.columns.clone())
            .unwrap_or_default();

        for (index, column) in columns.iter().enumerate() {
            self.say(&format!("  {}. {column}", index + 1))?;
        }

        let mut config = wizard.config().clone();
        for role in FieldRole::ALL {
            let current = config.mapping.get(role).unwrap_or("").to_string();
            let label = format!("{} column ({}; number or name, '-' to skip)", role, role.hint());
            let answer = self.ask(&label, &current)?;
            let column = resolve_column(&answer, &columns);
            if column.is_none() && !answer.is_empty() && answer != "-" {
                self.say(&format!("  '{answer}' is not a column; {role} left unset"))?;
            }
            config = config.with_role(role, column);
        }

        match wizard.with_config(config).next() {
            Err(WizardError::TitleRequired) => {
                self.say(&WizardError::TitleRequired.to_string())?;
                Ok(wizard.clone())
            }
            other => Ok(other.map_err(|e| CliError::validation(e.to_string()))?),
        }
    }

    fn content_step(&mut self, wizard: &Wizard) -> StepResult<Wizard> {
        let mut config = wizard.config().clone();

        let title = self.ask("App title", &config.app_title)?;
        config = config.with_title(title);

        let count = loop {
            let answer = self.ask(
                &format!("Number of content blocks ({MIN_CONTENT_BLOCKS}-{MAX_CONTENT_BLOCKS})"),
                &config.blocks.len().to_string(),
            )?;
            match answer.parse::<usize>() {
                Ok(n) if (MIN_CONTENT_BLOCKS..=MAX_CONTENT_BLOCKS).contains(&n) => break n,
                _ => self.say("  Enter a number from 1 to 5")?,
            }
        };
        config = config.with_block_count(count);

        for index in 0..count {
            let existing = config.blocks.get(index).cloned().unwrap_or_default();
            self.say(&format!("Block {}", index + 1))?;
            let block_title = self.ask("  Title", &existing.title)?;
            let header = self.ask("  Header", &existing.header)?;
            let body = self.ask("  Body", &existing.body)?;
            let embed = self.ask("  Embed HTML (blank for none)", &existing.embed_markup)?;

            let mut block = ContentBlock::new(block_title, body).with_header(header);
            if !embed.is_empty() {
                block = block.with_embed(embed);
            }
            config = config.with_block(index, block);
        }

        self.advance(&wizard.with_config(config))
    }

    fn style_step(&mut self, wizard: &Wizard) -> StepResult<Wizard> {
        let mut config = wizard.config().clone();
        let style = &config.style;

        let primary = self.ask("Primary colour", &style.primary)?;
        let secondary = self.ask("Secondary colour", &style.secondary)?;
        let accent = self.ask("Accent colour", &style.accent)?;
        let text = self.ask("Text colour", &style.text)?;
        config = config.with_style(StyleConfig::new(&primary, &secondary, &accent, &text));

        let theme = loop {
            let answer = self.ask("Theme (auto, ios, md)", config.theme.as_str())?;
            match Theme::from_name(&answer) {
                Some(theme) => break theme,
                None => self.say("  Choose auto, ios or md")?,
            }
        };
        config = config.with_theme(theme);

        let features = FeatureToggles {
            search: self.confirm("Enable search", config.features.search)?,
            filters: self.confirm("Enable category filter", config.features.filters)?,
            dark_mode: self.confirm("Start in dark mode", config.features.dark_mode)?,
        };
        config = config.with_features(features);

        self.advance(&wizard.with_config(config))
    }

    fn generate_step(
        &mut self,
        wizard: &Wizard,
        out_dir: &Path,
        assets: &dyn AssetSource,
    ) -> CliResult<PathBuf> {
        let package = wizard.generate(assets).map_err(|e| match e {
            WizardError::Generate(crate::generator::GenerateError::Config(inner)) => {
                CliError::validation(inner.to_string())
            }
            other => CliError::io(other.to_string()),
        })?;

        fs::create_dir_all(out_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create output directory {}: {e}",
                out_dir.display()
            ))
        })?;

        let path = out_dir.join(&package.archive_file_name);
        fs::write(&path, &package.archive)
            .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;

        self.say(&format!("Wrote {}", path.display()))?;
        for skipped in &package.skipped {
            self.say(&format!("  (skipped optional asset {skipped})"))?;
        }
        Ok(path)
    }

    fn advance(&mut self, wizard: &Wizard) -> StepResult<Wizard> {
        Ok(wizard
            .next()
            .map_err(|e| CliError::validation(e.to_string()))?)
    }

    fn banner(&mut self, step: WizardStep) -> CliResult<()> {
        self.say("")?;
        self.say(&format!(
            "Step {} of {}: {}",
            step.number(),
            WizardStep::ALL.len(),
            step.title()
        ))
    }

    fn say(&mut self, line: &str) -> CliResult<()> {
        writeln!(self.output, "{line}")
            .map_err(|e| CliError::io(format!("Failed to write prompt: {e}")))
    }

    /// Prompts for a line. Blank answers take `default`; end of input aborts;
    /// `back` leaves the current step.
    fn ask(&mut self, label: &str, default: &str) -> StepResult<String> {
        let prompt = if default.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{default}]: ")
        };
        self.output
            .write_all(prompt.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| CliError::io(format!("Failed to write prompt: {e}")))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| CliError::io(format!("Failed to read input: {e}")))?;
        if read == 0 {
            return Err(CliError::validation("Input ended before the wizard finished").into());
        }

        let answer = line.trim();
        if answer.eq_ignore_ascii_case(BACK_ANSWER) {
            return Err(StepError::Back);
        }
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    fn confirm(&mut self, label: &str, default: bool) -> StepResult<bool> {
        loop {
            let answer = self.ask(&format!("{label} (y/n)"), if default { "y" } else { "n" })?;
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("  Answer y or n")?,
            }
        }
    }
}

/// Maps an answer to a column: 1-based index or exact name. `-` clears.
fn resolve_column(answer: &str, columns: &[String]) -> Option<String> {
    if answer.is_empty() || answer == "-" {
        return None;
    }
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| columns.get(i))
            .cloned();
    }
    columns.iter().find(|column| *column == answer).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::EmbeddedAssets;
    use std::io::Cursor;
    use tempfile::TempDir;

    const CSV: &str = "Name,Type,Phone\n\"Acme, Inc\",Food,555-1234\n";

    fn run_with(answers: &str) -> (CliResult<PathBuf>, String, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("resources.csv");
        fs::write(&data, CSV).unwrap();
        let out_dir = temp_dir.path().join("out");

        let mut output = Vec::new();
        let result = Session::new(Cursor::new(answers.to_string()), &mut output).run(
            &data,
            &out_dir,
            GenerationConfig::default(),
            &EmbeddedAssets,
        );
        (result, String::from_utf8(output).unwrap(), temp_dir)
    }

    /// Title=1, skip the rest, keep every default after that.
    const HAPPY_PATH: &str = "1\n\n2\n\n3\n\n\n\
                              Test App\n1\nWelcome\n\nHello there\n\n\
                              #000\n\n\n\nios\n\n\n\n";

    #[test]
    fn test_resolve_column() {
        let columns = vec!["Name".to_string(), "Type".to_string()];
        assert_eq!(resolve_column("2", &columns), Some("Type".to_string()));
        assert_eq!(resolve_column("Name", &columns), Some("Name".to_string()));
        assert_eq!(resolve_column("0", &columns), None);
        assert_eq!(resolve_column("3", &columns), None);
        assert_eq!(resolve_column("-", &columns), None);
        assert_eq!(resolve_column("name", &columns), None);
    }

    #[test]
    fn test_wizard_happy_path() {
        let (result, output, _temp) = run_with(HAPPY_PATH);
        let path = result.unwrap();

        assert!(path.ends_with("test_app_app.zip"));
        assert!(path.exists());
        assert!(output.contains("Step 1 of 5: Upload Data"));
        assert!(output.contains("Step 5 of 5: Generate"));
        assert!(output.contains("Loaded 1 row(s) with 3 column(s), comma-separated"));
    }

    #[test]
    fn test_wizard_reprompts_for_title() {
        let answers = format!("-\n\n\n\n\n\n\n{HAPPY_PATH}");
        let (result, output, _temp) = run_with(&answers);

        assert!(result.is_ok());
        assert_eq!(output.matches("Step 2 of 5: Map Fields").count(), 2);
    }

    #[test]
    fn test_wizard_back_from_content_keeps_mapping() {
        // Title=1, then back at the app title, then keep every mapping default.
        let answers = "1\n\n2\n\n3\n\n\nback\n\n\n\n\n\n\n\n\
                       Test App\n1\nWelcome\n\nHello there\n\n\
                       #000\n\n\n\nios\n\n\n\n";
        let (result, output, _temp) = run_with(answers);

        assert!(result.unwrap().ends_with("test_app_app.zip"));
        assert_eq!(output.matches("Step 2 of 5: Map Fields").count(), 2);
        assert_eq!(output.matches("Step 3 of 5").count(), 2);
        assert!(output.contains("Title column (") && output.contains("[Name]: "));
    }

    #[test]
    fn test_wizard_back_from_mapping_reloads_data() {
        let answers = format!("BACK\n{HAPPY_PATH}");
        let (result, output, _temp) = run_with(&answers);

        assert!(result.is_ok());
        assert_eq!(output.matches("Step 1 of 5: Upload Data").count(), 2);
        assert_eq!(output.matches("Loaded 1 row(s)").count(), 2);
    }

    #[test]
    fn test_wizard_eof_aborts() {
        let (result, _output, _temp) = run_with("1\n");
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
