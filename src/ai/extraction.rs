// src/ai/extraction.rs
use crate::ai::backend::{CompletionBackend, CompletionRequest};
use crate::ai::fence::parse_fenced_json;
use crate::ai::prompts::extraction_prompt;
use crate::ai::AiError;
use crate::config::ModelSettings;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const STAGE: &str = "extraction";

/// Every key the extraction prompt asks for, in prompt order.
pub const EXTRACTION_FIELDS: [&str; 18] = [
    "reference",
    "title",
    "price",
    "location",
    "distance_city",
    "description",
    "terrain_area",
    "built_area",
    "bedrooms",
    "pool_size",
    "features",
    "equipment",
    "business_info",
    "investment_benefits",
    "documents",
    "contact_phone",
    "contact_email",
    "contact_website",
];

/// French fields that get an English twin.
pub const TRANSLATABLE_FIELDS: [&str; 7] = [
    "title",
    "description",
    "features",
    "equipment",
    "business_info",
    "investment_benefits",
    "documents",
];

/// Structured listing facts read out of a brochure.
///
/// Unknown keys in the model output are ignored, missing keys default to
/// `""` / `0`, so the serialized form always has exactly [`EXTRACTION_FIELDS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionResult {
    #[serde(deserialize_with = "lenient_text")]
    pub reference: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_int")]
    pub price: i64,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub distance_city: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_int")]
    pub terrain_area: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub built_area: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub bedrooms: i64,
    #[serde(deserialize_with = "lenient_text")]
    pub pool_size: String,
    #[serde(deserialize_with = "lenient_text")]
    pub features: String,
    #[serde(deserialize_with = "lenient_text")]
    pub equipment: String,
    #[serde(deserialize_with = "lenient_text")]
    pub business_info: String,
    #[serde(deserialize_with = "lenient_text")]
    pub investment_benefits: String,
    #[serde(deserialize_with = "lenient_text")]
    pub documents: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact_phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact_email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact_website: String,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Flat key/value view, keys drawn from [`EXTRACTION_FIELDS`] only.
    pub fn to_record(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// French text to hand to the translation client.
    pub fn translation_source(&self) -> BTreeMap<String, String> {
        let record = self.to_record();
        TRANSLATABLE_FIELDS
            .iter()
            .filter_map(|&name| {
                record
                    .get(name)
                    .and_then(Value::as_str)
                    .map(|text| (name.to_string(), text.to_string()))
            })
            .collect()
    }
}

/// Fail-closed client: any problem is an error, never a partial result.
pub struct ExtractionClient {
    backend: Arc<dyn CompletionBackend>,
    settings: ModelSettings,
}

impl ExtractionClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: ModelSettings) -> Self {
        Self { backend, settings }
    }

    pub fn extract(&self, raw_text: &str) -> Result<ExtractionResult, AiError> {
        self.try_extract(raw_text).map_err(|e| {
            log::error!(
                "[{STAGE}] failed (upstream status: {:?}, body: {:?}): {e}",
                e.upstream_status(),
                e.body_preview()
            );
            e
        })
    }

    fn try_extract(&self, raw_text: &str) -> Result<ExtractionResult, AiError> {
        let request = CompletionRequest::new(STAGE, &self.settings, extraction_prompt(raw_text));
        let started = std::time::Instant::now();
        let content = self.backend.complete(&request)?;

        let value: Value = parse_fenced_json(&content)?;
        if !value.is_object() {
            return Err(AiError::MalformedResponse(
                "expected a JSON object of listing fields".into(),
            ));
        }

        let result: ExtractionResult =
            serde_json::from_value(value).map_err(|e| AiError::JsonParse(e.to_string()))?;
        if result.is_empty() {
            return Err(AiError::EmptyExtraction);
        }

        let filled = result
            .to_record()
            .values()
            .filter(|v| match v {
                Value::String(s) => !s.is_empty(),
                Value::Number(n) => n.as_i64() != Some(0),
                _ => false,
            })
            .count();
        log::info!(
            "[{STAGE}] {filled}/{} fields extracted in {:?} (title: {:?})",
            EXTRACTION_FIELDS.len(),
            started.elapsed(),
            result.title
        );
        Ok(result)
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        // Models sometimes answer list fields with an array instead of lines.
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other @ Value::Object(_) => other.to_string(),
    })
}

fn lenient_int<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_loose_int(&s),
        _ => 0,
    })
}

/// "1 250 000 €" -> 1250000, "450,50" -> 450, "n/a" -> 0.
fn parse_loose_int(raw: &str) -> i64 {
    let trimmed = raw.trim();
    // Drop a trailing decimal part ("...,50" / "....5").
    let integral = match trimmed.rfind([',', '.']) {
        Some(idx) => {
            let tail = trimmed[idx + 1..].trim_end_matches(|c: char| !c.is_ascii_digit());
            if (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit()) {
                &trimmed[..idx]
            } else {
                trimmed
            }
        }
        None => trimmed,
    };

    let digits: String = integral.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}
