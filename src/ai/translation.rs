// src/ai/translation.rs
use crate::ai::backend::{CompletionBackend, CompletionRequest};
use crate::ai::fence::parse_fenced_json;
use crate::ai::prompts::translation_prompt;
use crate::ai::AiError;
use crate::config::ModelSettings;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

const STAGE: &str = "translation";

/// `title` -> `title_en`, `hero_subtitle_fr` -> `hero_subtitle_en`.
pub fn english_key(source_key: &str) -> String {
    let base = source_key.strip_suffix("_fr").unwrap_or(source_key);
    format!("{base}_en")
}

/// Result of one batch. A model that silently drops fields is accepted;
/// the dropped source keys end up in `missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translated: BTreeMap<String, String>,
    pub missing: Vec<String>,
}

impl TranslationOutcome {
    pub fn is_empty(&self) -> bool {
        self.translated.is_empty()
    }
}

/// Fail-open batch translator (French -> English).
pub struct TranslationClient {
    backend: Arc<dyn CompletionBackend>,
    settings: ModelSettings,
}

impl TranslationClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: ModelSettings) -> Self {
        Self { backend, settings }
    }

    /// `{name -> french}` in, `{name_en -> english}` out; `{}` on any failure.
    pub fn translate(&self, source_fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let batch = non_blank(source_fields);
        if batch.is_empty() {
            return BTreeMap::new();
        }

        let expected: Vec<String> = batch.keys().map(|k| english_key(k)).collect();
        match self.request(&batch, &expected) {
            Ok(returned) => returned
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(text) if expected.contains(&key) => Some((key, text)),
                    _ => {
                        log::debug!("[{STAGE}] dropping unexpected key {key:?}");
                        None
                    }
                })
                .collect(),
            Err(e) => {
                log::warn!(
                    "[{STAGE}] failed, no English produced (upstream status: {:?}, body: {:?}): {e}",
                    e.upstream_status(),
                    e.body_preview()
                );
                BTreeMap::new()
            }
        }
    }

    /// Same call as [`translate`](Self::translate), also naming the source
    /// fields that came back without English.
    pub fn translate_batch(&self, source_fields: &BTreeMap<String, String>) -> TranslationOutcome {
        let batch = non_blank(source_fields);
        if batch.is_empty() {
            return TranslationOutcome::default();
        }
        let translated = self.translate(&batch);
        let missing: Vec<String> = batch
            .into_keys()
            .filter(|k| !translated.contains_key(&english_key(k)))
            .collect();

        if missing.is_empty() {
            log::info!("[{STAGE}] translated {} fields", translated.len());
        } else if !translated.is_empty() {
            log::warn!(
                "[{STAGE}] partial batch: {} of {} fields translated, missing {:?}",
                translated.len(),
                translated.len() + missing.len(),
                missing
            );
        }

        TranslationOutcome {
            translated,
            missing,
        }
    }

    fn request(
        &self,
        batch: &BTreeMap<String, String>,
        expected: &[String],
    ) -> Result<Map<String, Value>, AiError> {
        let request =
            CompletionRequest::new(STAGE, &self.settings, translation_prompt(batch, expected));
        let content = self.backend.complete(&request)?;

        match parse_fenced_json::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(AiError::MalformedResponse(
                "expected a JSON object of translations".into(),
            )),
        }
    }
}

fn non_blank(fields: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}
