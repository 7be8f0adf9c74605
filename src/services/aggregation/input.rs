//! Decoding of page arrays from JSON.
//!
//! Only the page structure is validated. Region objects decode leniently
//! (see [`TextRegion`]), so a region never fails a document.

use serde_json::Value;

use super::AggregationError;
use crate::models::TextRegion;

/// Decode pages from a parsed JSON value.
///
/// Accepts a top-level array of pages or an object with a `pages` array.
pub fn pages_from_json(value: &Value) -> Result<Vec<Vec<TextRegion>>, AggregationError> {
    let pages = match value {
        Value::Array(pages) => pages,
        Value::Object(map) => match map.get("pages") {
            Some(Value::Array(pages)) => pages,
            Some(other) => {
                return Err(AggregationError::InvalidInput {
                    reason: format!("`pages` must be an array, found {}", kind(other)),
                })
            }
            None => {
                return Err(AggregationError::InvalidInput {
                    reason: "object has no `pages` field".to_string(),
                })
            }
        },
        other => {
            return Err(AggregationError::InvalidInput {
                reason: format!("expected an array of pages, found {}", kind(other)),
            })
        }
    };

    pages
        .iter()
        .enumerate()
        .map(|(page_index, page)| decode_page(page_index, page))
        .collect()
}

/// Parse a JSON document and decode its pages.
pub fn pages_from_str(json: &str) -> Result<Vec<Vec<TextRegion>>, AggregationError> {
    let value: Value = serde_json::from_str(json)?;
    pages_from_json(&value)
}

fn decode_page(page_index: usize, page: &Value) -> Result<Vec<TextRegion>, AggregationError> {
    let Value::Array(entries) = page else {
        return Err(AggregationError::InvalidPage {
            page_index,
            reason: format!("expected an array of regions, found {}", kind(page)),
        });
    };

    entries
        .iter()
        .enumerate()
        .map(|(region_index, entry)| {
            if !entry.is_object() {
                return Err(AggregationError::InvalidPage {
                    page_index,
                    reason: format!("region {} is {}, not an object", region_index, kind(entry)),
                });
            }
            serde_json::from_value(entry.clone()).map_err(|e| AggregationError::InvalidPage {
                page_index,
                reason: format!("region {}: {}", region_index, e),
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use serde_json::json;

    #[test]
    fn test_top_level_array() {
        let value = json!([
            [{"text": "Bonjour", "bbox": {"x": 1, "y": 2, "width": 3, "height": 4}, "confidence": 0.9, "language": "fr"}],
            []
        ]);
        let pages = pages_from_json(&value).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0][0].text, "Bonjour");
        assert_eq!(pages[0][0].language, Language::Fr);
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_pages_object() {
        let value = json!({"pages": [[{"text": "نص"}]]});
        let pages = pages_from_json(&value).unwrap();
        assert_eq!(pages[0][0].language, Language::Ar);
        assert_eq!(pages[0][0].confidence, 0.0);
    }

    #[test]
    fn test_non_array_input_rejected() {
        let err = pages_from_json(&json!("pages")).unwrap_err();
        assert!(matches!(err, AggregationError::InvalidInput { .. }));
        assert_eq!(err.to_string(), "Invalid input: expected an array of pages, found a string");

        let err = pages_from_json(&json!({"pages": 3})).unwrap_err();
        assert!(matches!(err, AggregationError::InvalidInput { .. }));
    }

    #[test]
    fn test_invalid_page_identified() {
        let err = pages_from_json(&json!([[], {"text": "x"}])).unwrap_err();
        assert_eq!(err.page_index(), Some(1));
        assert_eq!(err.to_string(), "Invalid page 2: expected an array of regions, found an object");

        let err = pages_from_json(&json!([["loose text"]])).unwrap_err();
        assert_eq!(err.page_index(), Some(0));
    }

    #[test]
    fn test_malformed_json() {
        let err = pages_from_str("[[{").unwrap_err();
        assert!(matches!(err, AggregationError::Json(_)));
    }
}
