//! Role mapping: which uploaded column plays which part in the generated app.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic roles a column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Card heading (required)
    Title,
    /// Card body text
    Description,
    /// Grouping and filtering
    Category,
    /// Link to the resource
    Url,
    /// Phone number
    Telephone,
    /// Street address
    Address,
    /// Opening hours
    Hours,
}

impl FieldRole {
    /// All roles in display order.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Description,
        Self::Category,
        Self::Url,
        Self::Telephone,
        Self::Address,
        Self::Hours,
    ];

    /// Machine-readable key, also used as the R variable prefix.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Category => "category",
            Self::Url => "url",
            Self::Telephone => "telephone",
            Self::Address => "address",
            Self::Hours => "hours",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Url => "URL",
            Self::Telephone => "Telephone",
            Self::Address => "Address",
            Self::Hours => "Hours",
        }
    }

    /// Short hint shown next to the role in prompts.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Title => "Main heading for each item",
            Self::Description => "Detailed information",
            Self::Category => "For filtering and grouping",
            Self::Url => "Links to resources",
            Self::Telephone => "Contact phone number",
            Self::Address => "Location of the resource",
            Self::Hours => "Opening hours",
        }
    }

    /// Parses a role from its key (case-insensitive).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Role → column assignment. `None` means the role is unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMapping {
    /// Title column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// URL column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Telephone column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    /// Address column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Hours column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

impl FieldMapping {
    /// Column assigned to `role`. Blank assignments count as unset.
    #[must_use]
    pub fn get(&self, role: FieldRole) -> Option<&str> {
        let slot = match role {
            FieldRole::Title => &self.title,
            FieldRole::Description => &self.description,
            FieldRole::Category => &self.category,
            FieldRole::Url => &self.url,
            FieldRole::Telephone => &self.telephone,
            FieldRole::Address => &self.address,
            FieldRole::Hours => &self.hours,
        };
        slot.as_deref().filter(|column| !column.trim().is_empty())
    }

    /// Returns a copy with `role` assigned to `column` (or cleared with `None`).
    pub fn with(mut self, role: FieldRole, column: Option<String>) -> Self {
        let column = column.filter(|c| !c.trim().is_empty());
        let slot = match role {
            FieldRole::Title => &mut self.title,
            FieldRole::Description => &mut self.description,
            FieldRole::Category => &mut self.category,
            FieldRole::Url => &mut self.url,
            FieldRole::Telephone => &mut self.telephone,
            FieldRole::Address => &mut self.address,
            FieldRole::Hours => &mut self.hours,
        };
        *slot = column;
        self
    }

    /// True once the title role has a column.
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.get(FieldRole::Title).is_some()
    }

    /// Iterates over the roles that are set, in display order.
    pub fn assigned(&self) -> impl Iterator<Item = (FieldRole, &str)> + '_ {
        FieldRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|column| (role, column)))
    }
}
