//! Step-by-step wizard that collects a [`GenerationConfig`].
//!
//! The wizard walks through five steps: upload a data file, map columns to
//! roles, write home-screen content, pick colours, and generate. A [`Wizard`]
//! is an immutable value; every transition returns a new one.

use crate::generator::{self, AssetSource, GenerateError, Package};
use crate::models::{FieldRole, GenerationConfig, ParsedTable};
use crate::parser::{self, UploadError};

/// Wizard steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    /// Upload a CSV/TSV file
    #[default]
    Upload,
    /// Map columns to field roles
    MapFields,
    /// Write home-screen content blocks
    HomeContent,
    /// Pick colours and theme
    Style,
    /// Review and generate
    Generate,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::Upload,
        Self::MapFields,
        Self::HomeContent,
        Self::Style,
        Self::Generate,
    ];

    /// Gets the next step in the wizard
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Upload => Some(Self::MapFields),
            Self::MapFields => Some(Self::HomeContent),
            Self::HomeContent => Some(Self::Style),
            Self::Style => Some(Self::Generate),
            Self::Generate => None,
        }
    }

    /// Gets the previous step in the wizard
    #[must_use]
    pub const fn previous(&self) -> Option<Self> {
        match self {
            Self::Upload => None,
            Self::MapFields => Some(Self::Upload),
            Self::HomeContent => Some(Self::MapFields),
            Self::Style => Some(Self::HomeContent),
            Self::Generate => Some(Self::Style),
        }
    }

    /// Gets the step title
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Upload => "Upload Data",
            Self::MapFields => "Map Fields",
            Self::HomeContent => "Home Content",
            Self::Style => "Style",
            Self::Generate => "Generate",
        }
    }

    /// 1-based position, for "Step n of 5" banners.
    #[must_use]
    pub const fn number(&self) -> usize {
        match self {
            Self::Upload => 1,
            Self::MapFields => 2,
            Self::HomeContent => 3,
            Self::Style => 4,
            Self::Generate => 5,
        }
    }
}

/// Transitions the wizard refuses.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Leaving field mapping without a title column.
    #[error("Select a column for the {} field before continuing", FieldRole::Title)]
    TitleRequired,
    /// `next` at the last step.
    #[error("Already at the last step")]
    NoNextStep,
    /// `back` at the first step.
    #[error("Already at the first step")]
    NoPreviousStep,
    /// `generate` before reaching the last step.
    #[error("Generation is only available at the {} step (currently at {})", WizardStep::Generate.title(), .0.title())]
    NotAtGenerate(WizardStep),
    /// The uploaded file was rejected.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Wizard state: current step, uploaded table and the config being built.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    table: Option<ParsedTable>,
    config: GenerationConfig,
}

impl Wizard {
    /// Starts a wizard at the upload step.
    #[must_use]
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            step: WizardStep::Upload,
            table: None,
            config,
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Uploaded table, if any.
    #[must_use]
    pub const fn table(&self) -> Option<&ParsedTable> {
        self.table.as_ref()
    }

    /// Config collected so far.
    #[must_use]
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Validates and parses an upload, replaces any previous table and moves
    /// to field mapping. The data source delimiter follows the file.
    pub fn upload(
        &self,
        file_name: &str,
        mime: Option<&str>,
        bytes: &[u8],
    ) -> Result<Self, WizardError> {
        let table = parser::parse_upload(file_name, mime, bytes)?;

        let mut data = self.config.data.clone();
        data.delimiter = table.delimiter;

        tracing::info!(
            file = file_name,
            columns = table.columns.len(),
            rows = table.row_count(),
            "Data file uploaded"
        );

        Ok(Self {
            step: WizardStep::MapFields,
            table: Some(table),
            config: self.config.clone().with_data(data),
        })
    }

    /// Moves forward one step. Leaving field mapping requires a title column.
    pub fn next(&self) -> Result<Self, WizardError> {
        if self.step == WizardStep::MapFields && !self.config.mapping.has_title() {
            return Err(WizardError::TitleRequired);
        }

        let step = self.step.next().ok_or(WizardError::NoNextStep)?;
        tracing::debug!(from = self.step.title(), to = step.title(), "Wizard step");

        Ok(Self {
            step,
            ..self.clone()
        })
    }

    /// Moves back one step. The collected config is kept.
    pub fn back(&self) -> Result<Self, WizardError> {
        let step = self.step.previous().ok_or(WizardError::NoPreviousStep)?;

        Ok(Self {
            step,
            ..self.clone()
        })
    }

    /// Replaces the config, keeping the step and table.
    #[must_use]
    pub fn with_config(&self, config: GenerationConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    /// Generates the package. Only available at the last step.
    pub fn generate(&self, assets: &dyn AssetSource) -> Result<Package, WizardError> {
        if self.step != WizardStep::Generate {
            return Err(WizardError::NotAtGenerate(self.step));
        }

        Ok(generator::generate(&self.config, assets)?)
    }
}
