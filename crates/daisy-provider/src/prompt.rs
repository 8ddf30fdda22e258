//! Instructions sent to the text-generation model.
//!
//! Each prompt asks for an object of the form `{"plants": [...]}` whose
//! elements follow the catalog's record schema. The model is not trusted to
//! return only JSON; see [`extract`](crate::extract).

use daisy_core::Catalog;

const REMEDY_FORMAT: &str = concat!(
    r#"{"plants": [{"name": "plant name", "scientific_name": "scientific name of the plant", "#,
    r#""uses": "medicinal uses of the plant", "healing_properties": "healing properties of the plant"}, "#,
    r#"{"the same here for the next plant and so on"}]}"#,
);

const CARE_FORMAT: &str = concat!(
    r#"{"plants": [{"name": "name of the plant", "scientific_name": "scientific name of the plant", "#,
    r#""care": [{"care 1 of the plant": "care 1"}, {"care 2 of the plant": "care 2"}, "#,
    r#"{"care 3 of the plant": "care 3"}, {"care 4 of the plant": "care 4"}], "#,
    r#""climate": "climate of the plant"}, {"the same here for the next plant and so on"}]}"#,
);

/// Prompt for records relevant to `term`.
pub fn by_query(catalog: Catalog, term: &str) -> String {
    match catalog {
        Catalog::Remedies => format!(
            "Just as an example I need healing plants for {term}, give me the response in JSON \
             following the next format idea that will contain the plants: {REMEDY_FORMAT}"
        ),
        Catalog::Care => format!(
            "Just as an example, I need a list of care for the plant {term}, give me the response \
             in JSON following the format idea that will contain the plants: {CARE_FORMAT}"
        ),
    }
}

/// Prompt for the catalog's default list of common plants.
pub fn common(catalog: Catalog) -> String {
    match catalog {
        Catalog::Remedies => format!(
            "Just as an example I need common healing plants, give me the response in JSON \
             following the next format idea that will contain the plants: {REMEDY_FORMAT}"
        ),
        Catalog::Care => format!(
            "Just as an example I need the care of common plants, give me the response in JSON \
             following the format idea that will contain the plants: {CARE_FORMAT}"
        ),
    }
}

/// Query string for a record's thumbnail.
pub fn image_query(scientific_name: &str) -> String {
    format!("Medicinal plant {scientific_name}")
}
