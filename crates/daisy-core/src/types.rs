//! Core types for daisy-core.
//!
//! [`PlantRecord`] is what the provider returns and what the cache stores;
//! [`ReferenceTerm`] is one entry of a catalog's static suggestion list.

use serde::{Deserialize, Serialize};

/// One plant returned by the provider (or read back from the cache).
///
/// Records are immutable once built. The meaning of `body` and `usage`
/// depends on the catalog that produced the record: healing properties and
/// medicinal uses for remedies, climate and care steps for plant care.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantRecord {
    /// Common name, e.g. "Mint".
    pub name: String,
    /// Scientific (or alternative) name, e.g. "Mentha".
    pub scientific_name: String,
    /// Descriptive paragraph: healing properties or climate.
    pub body: String,
    /// Medicinal uses or ordered care steps.
    pub usage: Usage,
    /// Representative thumbnail, when the image lookup found one.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PlantRecord {
    pub fn new(
        name: impl Into<String>,
        scientific_name: impl Into<String>,
        body: impl Into<String>,
        usage: Usage,
    ) -> Self {
        Self {
            name: name.into(),
            scientific_name: scientific_name.into(),
            body: body.into(),
            usage,
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: Option<String>) -> Self {
        self.image_url = url;
        self
    }
}

/// Usage notes attached to a [`PlantRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Usage {
    /// Free text, as returned for remedies.
    Text(String),
    /// Ordered care steps, each already rendered as `"<topic>: <advice>"`.
    Steps(Vec<String>),
}

impl Usage {
    /// Render as display lines; free text is a single line.
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Usage::Text(text) => vec![text.as_str()],
            Usage::Steps(steps) => steps.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Usage::Text(text) => write!(f, "{text}"),
            Usage::Steps(steps) => write!(f, "{}", steps.join("\n")),
        }
    }
}

/// A canonical symptom or plant name offered as an instant suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceTerm {
    pub label: String,
}

impl ReferenceTerm {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl std::fmt::Display for ReferenceTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}
