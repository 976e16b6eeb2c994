//! Design-week aggregate and its relational sources
//!
//! This is the read model handed over by the persistence layer: sessions
//! with their extracted items plus the dedicated scope, integration and
//! business-rule tables.

use crate::item::ExtractedItem;
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Design week identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DesignWeekId(pub Uuid);

impl DesignWeekId {
    /// Generate a new random id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DesignWeekId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DesignWeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DesignWeekId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Kind of client-facing deliverable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Full solution design document
    DesignDocument,
    /// Short brief for executive sponsors
    ExecutiveBrief,
    /// Integration-focused specification
    TechnicalSpecification,
}

impl DocumentType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesignDocument => "DESIGN_DOCUMENT",
            Self::ExecutiveBrief => "EXECUTIVE_BRIEF",
            Self::TechnicalSpecification => "TECHNICAL_SPECIFICATION",
        }
    }

    /// Human-readable title
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::DesignDocument => "Digital Employee Design Document",
            Self::ExecutiveBrief => "Digital Employee Executive Brief",
            Self::TechnicalSpecification => "Digital Employee Technical Specification",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "DESIGN_DOCUMENT" => Ok(Self::DesignDocument),
            "EXECUTIVE_BRIEF" => Ok(Self::ExecutiveBrief),
            "TECHNICAL_SPECIFICATION" => Ok(Self::TechnicalSpecification),
            other => Err(format!("unknown document type: {other}")),
        }
    }
}

/// Scope classification from the scoping workshop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeClassification {
    InScope,
    OutOfScope,
    Ambiguous,
}

/// Row of the scope table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeItemRecord {
    pub description: String,
    pub classification: ScopeClassification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScopeItemRecord {
    #[must_use]
    pub fn new(description: impl Into<String>, classification: ScopeClassification) -> Self {
        Self {
            description: description.into(),
            classification,
            notes: None,
        }
    }
}

/// Row of the integration table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationRecord {
    pub system_name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<String>,
    #[serde(default)]
    pub data_fields: Vec<String>,
}

/// Row of the business-rule table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRuleRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// One facilitated session and the items captured in it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub items: Vec<ExtractedItem>,
}

/// Design-week aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignWeek {
    pub id: DesignWeekId,
    pub company_name: String,
    pub agent_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Language,
    /// Timeline string maintained outside the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub scope_items: Vec<ScopeItemRecord>,
    #[serde(default)]
    pub integrations: Vec<IntegrationRecord>,
    #[serde(default)]
    pub business_rules: Vec<BusinessRuleRecord>,
}

impl DesignWeek {
    #[must_use]
    pub fn new(company_name: impl Into<String>, agent_name: impl Into<String>) -> Self {
        Self {
            id: DesignWeekId::new(),
            company_name: company_name.into(),
            agent_name: agent_name.into(),
            description: None,
            language: Language::default(),
            timeline: None,
            sessions: Vec::new(),
            scope_items: Vec::new(),
            integrations: Vec::new(),
            business_rules: Vec::new(),
        }
    }

    /// All items across sessions, in session order
    pub fn items(&self) -> impl Iterator<Item = &ExtractedItem> {
        self.sessions.iter().flat_map(|s| s.items.iter())
    }

    /// Items that take part in generation
    pub fn participating_items(&self) -> impl Iterator<Item = &ExtractedItem> {
        self.items().filter(|item| item.participates())
    }
}
