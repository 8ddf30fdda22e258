//! Catalogs — the two search screens, expressed as data.
//!
//! A [`Catalog`] carries everything that differs between the remedies screen
//! and the plant-care screen: the static reference list, the cache file and
//! key, and the labels shown to the user. The search pipeline itself is the
//! same for both.

use crate::types::ReferenceTerm;

const SYMPTOMS: &[&str] = &[
    "Fever",
    "Cough",
    "Hoarseness",
    "Fatigue",
    "Nausea",
    "Vomiting",
    "Stomach problems",
    "Abdominal pain",
    "Skin spots",
];

const CARE_PLANTS: &[&str] = &[
    "Orchid",
    "Rose",
    "Daisy",
    "Gardenia",
    "Cinnamon",
    "Apple Tree",
    "Hydrangea",
    "Sunflower",
    "Blueberry",
];

/// Which search screen a component is working for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    /// Symptom → medicinal plant lookup.
    Remedies,
    /// Plant → care instructions lookup.
    Care,
}

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Remedies, Catalog::Care];

    /// The static reference list offered as instant suggestions.
    pub fn reference_terms(self) -> Vec<ReferenceTerm> {
        let labels = match self {
            Catalog::Remedies => SYMPTOMS,
            Catalog::Care => CARE_PLANTS,
        };
        labels.iter().copied().map(ReferenceTerm::new).collect()
    }

    /// Name of the preference file that holds this catalog's cache.
    pub fn store_name(self) -> &'static str {
        match self {
            Catalog::Remedies => "plants",
            Catalog::Care => "plant_tracking",
        }
    }

    /// Key of the cached blob inside the preference file.
    pub fn store_key(self) -> &'static str {
        "plants"
    }

    /// Short label for tabs and logs.
    pub fn title(self) -> &'static str {
        match self {
            Catalog::Remedies => "Symptoms",
            Catalog::Care => "Care",
        }
    }

    /// Placeholder shown in an empty query bar.
    pub fn placeholder(self) -> &'static str {
        match self {
            Catalog::Remedies => "Look for symptoms",
            Catalog::Care => "Look for plants",
        }
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::Remedies => write!(f, "remedies"),
            Catalog::Care => write!(f, "care"),
        }
    }
}

impl std::str::FromStr for Catalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remedies" | "symptoms" => Ok(Catalog::Remedies),
            "care" | "tracking" => Ok(Catalog::Care),
            other => Err(format!("unknown catalog: {other} (expected remedies or care)")),
        }
    }
}
