//! OCR text region model.
//!
//! Regions arrive from the recognition engine in arbitrary order with a
//! bounding box, a confidence, and a coarse language tag. Decoding is
//! lenient: a region object with missing or malformed fields still decodes,
//! with the gaps defaulted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::script_counts;

/// Coarse per-region language classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    Fr,
    Mixed,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::Fr => "fr",
            Self::Mixed => "mixed",
        }
    }

    /// Parse a language tag, accepting a few common spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "ar" | "ara" | "arabic" => Some(Self::Ar),
            "fr" | "fra" | "fre" | "french" | "latin" => Some(Self::Fr),
            "mixed" | "mix" => Some(Self::Mixed),
            _ => None,
        }
    }
}

/// Infer a region language from the scripts present in its text.
///
/// Arabic letters only → `Ar`, Latin only → `Fr`, both → `Mixed`.
/// Text with neither script defaults to `Fr`.
pub fn detect_script_language(text: &str) -> Language {
    match script_counts(text) {
        (0, _) => Language::Fr,
        (_, 0) => Language::Ar,
        _ => Language::Mixed,
    }
}

/// Axis-aligned, page-relative bounding box in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: coordinate(x),
            y: coordinate(y),
            width: coordinate(width),
            height: coordinate(height),
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_f64).unwrap_or(0.0);
        Self::new(field("x"), field("y"), field("width"), field("height"))
    }
}

/// Coordinates are non-negative and finite; anything else becomes 0.
fn coordinate(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Clamp a confidence into `[0,1]`, mapping NaN to 0.
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// One OCR-recognized text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawRegion")]
pub struct TextRegion {
    pub text: String,
    pub bbox: BoundingBox,
    pub confidence: f64,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl TextRegion {
    /// Create a region; the bbox is sanitized and confidence clamped.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, confidence: f64, language: Language) -> Self {
        Self {
            text: text.into(),
            bbox: BoundingBox::new(bbox.x, bbox.y, bbox.width, bbox.height),
            confidence: clamp_confidence(confidence),
            language,
            entity_type: None,
        }
    }

    /// Attach an upstream semantic tag.
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Blank regions are present in the input but excluded from aggregation.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Wire shape of a region before defaults are applied.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegion {
    #[serde(default)]
    text: Value,
    #[serde(default)]
    bbox: Value,
    #[serde(default)]
    confidence: Value,
    #[serde(default)]
    language: Value,
    #[serde(default)]
    entity_type: Value,
}

impl From<RawRegion> for TextRegion {
    fn from(raw: RawRegion) -> Self {
        let text = raw.text.as_str().unwrap_or_default().to_string();
        let language = raw
            .language
            .as_str()
            .and_then(Language::from_tag)
            .unwrap_or_else(|| detect_script_language(&text));

        Self {
            bbox: BoundingBox::from_value(&raw.bbox),
            confidence: clamp_confidence(raw.confidence.as_f64().unwrap_or(0.0)),
            language,
            entity_type: raw.entity_type.as_str().map(str::to_string),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("ar"), Some(Language::Ar));
        assert_eq!(Language::from_tag(" French "), Some(Language::Fr));
        assert_eq!(Language::from_tag("MIXED"), Some(Language::Mixed));
        assert_eq!(Language::from_tag("de"), None);
        assert_eq!(Language::Mixed.as_str(), "mixed");
    }

    #[test]
    fn test_detect_script_language() {
        assert_eq!(detect_script_language("وزارة العدل"), Language::Ar);
        assert_eq!(detect_script_language("Ministère de la Justice"), Language::Fr);
        assert_eq!(detect_script_language("Wilaya ولاية"), Language::Mixed);
        assert_eq!(detect_script_language("12/03/2020"), Language::Fr);
    }

    #[test]
    fn test_confidence_clamped() {
        let bbox = BoundingBox::default();
        assert_eq!(TextRegion::new("a", bbox, 1.7, Language::Fr).confidence, 1.0);
        assert_eq!(TextRegion::new("a", bbox, -0.2, Language::Fr).confidence, 0.0);
        assert_eq!(TextRegion::new("a", bbox, f64::NAN, Language::Fr).confidence, 0.0);
    }

    #[test]
    fn test_bbox_sanitized() {
        let bbox = BoundingBox::new(-5.0, f64::NAN, 10.0, f64::INFINITY);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 0.0));
    }

    #[test]
    fn test_decode_full_region() {
        let region: TextRegion = serde_json::from_str(
            r#"{"text":"Article 1","bbox":{"x":10,"y":20,"width":100,"height":12},
                "confidence":0.93,"language":"fr","entityType":"title"}"#,
        )
        .unwrap();
        assert_eq!(region.text, "Article 1");
        assert_eq!(region.bbox.y, 20.0);
        assert_eq!(region.confidence, 0.93);
        assert_eq!(region.language, Language::Fr);
        assert_eq!(region.entity_type.as_deref(), Some("title"));
    }

    #[test]
    fn test_decode_malformed_region_defaults() {
        let region: TextRegion =
            serde_json::from_str(r#"{"bbox":{"x":"left"},"confidence":"high"}"#).unwrap();
        assert_eq!(region.text, "");
        assert!(region.is_blank());
        assert_eq!(region.bbox, BoundingBox::default());
        assert_eq!(region.confidence, 0.0);
        assert_eq!(region.entity_type, None);
    }

    #[test]
    fn test_decode_infers_missing_language() {
        let region: TextRegion = serde_json::from_str(r#"{"text":"الجريدة الرسمية"}"#).unwrap();
        assert_eq!(region.language, Language::Ar);

        let region: TextRegion =
            serde_json::from_str(r#"{"text":"Journal officiel","language":"klingon"}"#).unwrap();
        assert_eq!(region.language, Language::Fr);
    }

    #[test]
    fn test_serialize_camel_case() {
        let region = TextRegion::new("x", BoundingBox::default(), 0.5, Language::Ar)
            .with_entity_type("date");
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["entityType"], "date");
        assert_eq!(json["language"], "ar");
    }
}
