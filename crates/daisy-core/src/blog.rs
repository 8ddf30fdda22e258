//! Community blog entries and the keyword filter over their tags.
//!
//! Entries are read from a JSON export of the blog collection. Field names
//! follow the collection's document layout (`id_user`, `entry_title`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// One blog post with the plants and symptoms it is tagged with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogEntry {
    #[serde(alias = "$id")]
    pub id: String,
    #[serde(rename = "id_user")]
    pub user_id: String,
    #[serde(rename = "name_user")]
    pub user_name: String,
    #[serde(rename = "entry_title")]
    pub title: String,
    #[serde(rename = "entry_content")]
    pub content: String,
    #[serde(rename = "entry_image_url", default)]
    pub image_url: String,
    #[serde(default)]
    pub posted: bool,
    #[serde(default)]
    pub plants: Vec<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(alias = "$createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "$updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Parse a JSON array of entries.
pub fn parse_export(raw: &str) -> serde_json::Result<Vec<BlogEntry>> {
    serde_json::from_str(raw)
}

/// Lowercase `text` and strip diacritics ("Manzanilla Té" -> "manzanilla te").
pub fn fold_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Entries with at least one plant or symptom tag containing any
/// whitespace-separated keyword of `filter`. Comparison ignores case and
/// accents. A blank filter keeps every entry.
pub fn filter_entries<'a>(entries: &'a [BlogEntry], filter: &str) -> Vec<&'a BlogEntry> {
    let keywords: Vec<String> = filter.split_whitespace().map(fold_text).collect();
    if keywords.is_empty() {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| {
            entry
                .plants
                .iter()
                .chain(entry.symptoms.iter())
                .map(|tag| fold_text(tag.trim()))
                .any(|tag| keywords.iter().any(|kw| tag.contains(kw.as_str())))
        })
        .collect()
}
