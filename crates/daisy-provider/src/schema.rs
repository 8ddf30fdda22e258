//! Per-catalog record parsing.
//!
//! Parsing is all-or-nothing: one element with a missing field fails the
//! whole array, matching the provider's no-partial-results contract.
//! Records come back without an image URL; the HTTP layer fills it in.

use daisy_core::{Catalog, PlantRecord, ProviderError, Usage};
use serde_json::Value;

use crate::types::{RawCare, RawRemedy};

/// Parse the extracted JSON array into records for `catalog`.
pub fn parse_records(catalog: Catalog, array: &str) -> Result<Vec<PlantRecord>, ProviderError> {
    match catalog {
        Catalog::Remedies => {
            let raw: Vec<RawRemedy> = decode(array)?;
            raw.into_iter().enumerate().map(|(i, r)| remedy(i, r)).collect()
        }
        Catalog::Care => {
            let raw: Vec<RawCare> = decode(array)?;
            raw.into_iter().enumerate().map(|(i, r)| care(i, r)).collect()
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(array: &str) -> Result<Vec<T>, ProviderError> {
    serde_json::from_str(array)
        .map_err(|e| ProviderError::format(format!("plant array is not valid JSON: {e}")))
}

fn required(index: usize, field: &str, value: Option<String>) -> Result<String, ProviderError> {
    value.ok_or_else(|| ProviderError::format(format!("plant {index} is missing '{field}'")))
}

fn remedy(index: usize, raw: RawRemedy) -> Result<PlantRecord, ProviderError> {
    Ok(PlantRecord::new(
        required(index, "name", raw.name)?,
        required(index, "scientific_name", raw.scientific_name)?,
        required(index, "healing_properties", raw.healing_properties)?,
        Usage::Text(required(index, "uses", raw.uses)?),
    ))
}

fn care(index: usize, raw: RawCare) -> Result<PlantRecord, ProviderError> {
    let name = required(index, "name", raw.name)?;
    let scientific_name = required(index, "scientific_name", raw.scientific_name)?;
    let climate = required(index, "climate", raw.climate)?;
    let items = raw
        .care
        .ok_or_else(|| ProviderError::format(format!("plant {index} is missing 'care'")))?;

    // Every key of a care object is one step, in document order.
    let mut steps = Vec::with_capacity(items.len());
    for item in items {
        if item.is_empty() {
            return Err(ProviderError::format(format!("plant {index} has an empty care entry")));
        }
        steps.extend(item.iter().map(|(topic, advice)| format!("{topic}: {}", scalar_text(advice))));
    }

    Ok(PlantRecord::new(name, scientific_name, climate, Usage::Steps(steps)))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
