//! Structured-answer parsing.
//!
//! The model is asked for raw JSON but sometimes wraps it in a Markdown fence.

use serde::de::DeserializeOwned;

use crate::error::{CoreError, Result};

/// Remove ```` ```json ```` / ```` ``` ```` fences and surrounding whitespace.
///
/// Blank input becomes `{}`.
pub fn clean_json(text: &str) -> String {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "{}".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Parse a model answer into `T`.
pub fn parse_answer<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(&clean_json(text))
        .map_err(|e| CoreError::Decode(format!("malformed model answer: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SoilReport;

    #[test]
    fn test_clean_json_strips_fences() {
        assert_eq!(clean_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(clean_json("  "), "{}");
    }

    #[test]
    fn test_parse_answer_accepts_legacy_field_name() {
        let report: SoilReport = parse_answer(
            "```json\n{\"soil_type\":\"Black\",\"gemini_analysis\":\"Rich in clay\"}\n```",
        )
        .unwrap();
        assert_eq!(report.soil_type, "Black");
        assert_eq!(report.analysis, "Rich in clay");
    }

    #[test]
    fn test_parse_answer_rejects_prose() {
        let err = parse_answer::<SoilReport>("I think the soil is loamy.").unwrap_err();
        assert!(matches!(err, CoreError::Decode(_)));
    }
}
