//! Defensive extraction of the record array from model output.
//!
//! Models wrap the requested JSON in prose, code fences, or an outer object.
//! The array is taken as the span from the first `[` to the last `]`
//! inclusive; anything outside it is ignored.

use daisy_core::ProviderError;

/// The substring from the first `[` to the last `]` of `content`.
pub fn extract_json_array(content: &str) -> Result<&str, ProviderError> {
    let start = content
        .find('[')
        .ok_or_else(|| ProviderError::format("no '[' in model output"))?;
    let end = content
        .rfind(']')
        .ok_or_else(|| ProviderError::format("no ']' in model output"))?;
    if end < start {
        return Err(ProviderError::format("']' appears before '[' in model output"));
    }
    Ok(&content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn strips_surrounding_noise() {
        let out = extract_json_array(r#"noise [{"name":"Mint"}] trailing"#).unwrap();
        assert_eq!(out, r#"[{"name":"Mint"}]"#);
    }

    #[test]
    fn spans_outer_object_and_nested_arrays() {
        let raw = r#"Sure! {"plants": [{"care": [{"Light": "bright"}]}]} Enjoy."#;
        assert_eq!(
            extract_json_array(raw).unwrap(),
            r#"[{"care": [{"Light": "bright"}]}]"#
        );
    }

    #[rstest]
    #[case("no brackets at all")]
    #[case("only open [")]
    #[case("only close ]")]
    #[case("] reversed [")]
    fn missing_or_misordered_delimiters_fail(#[case] raw: &str) {
        assert!(matches!(
            extract_json_array(raw),
            Err(ProviderError::UpstreamFormat(_))
        ));
    }
}
