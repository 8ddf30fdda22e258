//! Test builders — ergonomic constructors for `PlantRecord` and `BlogEntry`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use chrono::{DateTime, TimeZone, Utc};
use daisy_core::{blog::BlogEntry, PlantRecord, Usage};

// ---------------------------------------------------------------------------
// PlantRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`PlantRecord`] fixtures.
///
/// ```rust,ignore
/// let mint = PlantRecordBuilder::new("Mint")
///     .scientific("Mentha")
///     .uses("tea for digestion")
///     .build();
/// ```
pub struct PlantRecordBuilder {
    name: String,
    scientific_name: String,
    body: String,
    usage: Usage,
    image_url: Option<String>,
}

impl PlantRecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            scientific_name: format!("{name} officinalis"),
            body: format!("{name} soothes"),
            usage: Usage::Text(format!("{name} infusion")),
            image_url: None,
            name,
        }
    }

    pub fn scientific(mut self, scientific_name: impl Into<String>) -> Self {
        self.scientific_name = scientific_name.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn uses(mut self, uses: impl Into<String>) -> Self {
        self.usage = Usage::Text(uses.into());
        self
    }

    pub fn steps(mut self, steps: &[&str]) -> Self {
        self.usage = Usage::Steps(steps.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn build(self) -> PlantRecord {
        PlantRecord::new(self.name, self.scientific_name, self.body, self.usage)
            .with_image_url(self.image_url)
    }
}

// ---------------------------------------------------------------------------
// BlogEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`BlogEntry`] fixtures.
pub struct BlogEntryBuilder {
    id: String,
    title: String,
    plants: Vec<String>,
    symptoms: Vec<String>,
    posted: bool,
    at: DateTime<Utc>,
}

impl BlogEntryBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: "A post".to_string(),
            plants: Vec::new(),
            symptoms: Vec::new(),
            posted: true,
            at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn plants(mut self, plants: &[&str]) -> Self {
        self.plants = plants.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn symptoms(mut self, symptoms: &[&str]) -> Self {
        self.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> BlogEntry {
        BlogEntry {
            id: self.id,
            user_id: "user-1".to_string(),
            user_name: "Ana".to_string(),
            title: self.title,
            content: "Something that worked for me.".to_string(),
            image_url: String::new(),
            posted: self.posted,
            plants: self.plants,
            symptoms: self.symptoms,
            created_at: self.at,
            updated_at: self.at,
        }
    }
}
