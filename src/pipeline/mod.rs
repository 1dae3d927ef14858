// src/pipeline/mod.rs
//
// Brochure import: document -> text -> structured facts -> English twins -> merged record.

use crate::ai::{AiError, AiServices, ExtractionResult, TranslationClient, TranslationOutcome};
use crate::documents::TextExtractor;
use crate::domain::ListingRecord;
use crate::errors::ServerError;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    TextExtracted,
    DataExtracted,
    Translated,
    Merged,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::TextExtracted => "text-extracted",
            PipelineStage::DataExtracted => "data-extracted",
            PipelineStage::Translated => "translated",
            PipelineStage::Merged => "merged",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No PDF file")]
    EmptyUpload,
    #[error("Could not store the uploaded document: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not extract text from PDF")]
    NoText,
    #[error("Could not extract villa data: {0}")]
    Extraction(#[source] AiError),
}

impl PipelineError {
    /// Last stage reached before the failure.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::EmptyUpload | PipelineError::Io(_) | PipelineError::NoText => {
                PipelineStage::Received
            }
            PipelineError::Extraction(_) => PipelineStage::TextExtracted,
        }
    }
}

impl From<PipelineError> for ServerError {
    fn from(e: PipelineError) -> Self {
        log::warn!("Import stopped after stage {}: {e}", e.stage());
        match e {
            PipelineError::EmptyUpload | PipelineError::NoText => {
                ServerError::BadRequest(e.to_string())
            }
            PipelineError::Io(err) => {
                log::error!("Upload scratch file failed: {err}");
                ServerError::InternalError
            }
            PipelineError::Extraction(AiError::MissingApiKey) => ServerError::ServiceUnavailable(
                "Could not extract villa data. Make sure OPENROUTER_API_KEY is configured.".into(),
            ),
            PipelineError::Extraction(_) => ServerError::UpstreamFailure(e.to_string()),
        }
    }
}

/// Successful import: extracted French facts plus whatever English came back.
#[derive(Debug, Clone)]
pub struct ImportedListing {
    pub extracted: ExtractionResult,
    pub translations: TranslationOutcome,
}

impl ImportedListing {
    /// Shallow merge: translation keys only add `_en` entries.
    pub fn merged(&self) -> Map<String, Value> {
        let mut record = self.extracted.to_record();
        for (key, text) in &self.translations.translated {
            if key.ends_with("_en") && !record.contains_key(key) {
                record.insert(key.clone(), Value::String(text.clone()));
            }
        }
        record
    }
}

pub struct ImportPipeline<'a> {
    text: &'a dyn TextExtractor,
    ai: &'a AiServices,
    scratch_dir: &'a Path,
}

impl<'a> ImportPipeline<'a> {
    pub fn new(text: &'a dyn TextExtractor, ai: &'a AiServices, scratch_dir: &'a Path) -> Self {
        Self {
            text,
            ai,
            scratch_dir,
        }
    }

    pub fn process_upload(&self, document: &[u8]) -> Result<ImportedListing, PipelineError> {
        if document.is_empty() {
            return Err(PipelineError::EmptyUpload);
        }

        log::info!("📄 Extracting text from PDF ({} bytes)...", document.len());
        let text = self.read_text(document)?;
        if text.trim().is_empty() {
            log::warn!("[{}] document has no text layer", PipelineStage::Received);
            return Err(PipelineError::NoText);
        }

        log::info!(
            "[{}] 🤖 Extracting French villa data with AI ({} chars)...",
            PipelineStage::TextExtracted,
            text.len()
        );
        let extracted = self
            .ai
            .extraction
            .extract(&text)
            .map_err(PipelineError::Extraction)?;

        log::info!("[{}] 🌍 Translating French content to English...", PipelineStage::DataExtracted);
        let translations = self
            .ai
            .translation
            .translate_batch(&extracted.translation_source());
        if translations.is_empty() {
            log::warn!("⚠️ Translation failed or returned no data - English fields will be empty");
        } else {
            log::info!(
                "[{}] ✅ {} English translations ready",
                PipelineStage::Translated,
                translations.translated.len()
            );
        }

        let imported = ImportedListing {
            extracted,
            translations,
        };
        log::info!(
            "[{}] import ready: {} English fields",
            PipelineStage::Merged,
            imported.translations.translated.len()
        );
        Ok(imported)
    }

    /// The scratch file lives only for the duration of text extraction and
    /// is removed on every path out of this function.
    fn read_text(&self, document: &[u8]) -> Result<String, PipelineError> {
        fs::create_dir_all(self.scratch_dir)?;
        let mut scratch = tempfile::Builder::new()
            .prefix("temp_")
            .suffix(".pdf")
            .tempfile_in(self.scratch_dir)?;
        scratch.write_all(document)?;
        scratch.flush()?;

        let text = self.text.extract_text(scratch.path());

        if let Err(e) = scratch.close() {
            log::warn!("Could not remove scratch PDF: {e}");
        }
        Ok(text)
    }
}

/// Fill the English twins of an existing listing. Returns the batch outcome;
/// the record is only modified for fields that came back.
pub fn translate_listing(
    translation: &TranslationClient,
    record: &mut ListingRecord,
) -> TranslationOutcome {
    let source = record.translation_source();
    if source.is_empty() {
        log::warn!("No French content to translate");
        return TranslationOutcome::default();
    }

    log::info!("🌍 Translating {} French fields...", source.len());
    let outcome = translation.translate_batch(&source);
    let applied = record.apply_translations(&outcome.translated);
    log::info!("💾 {applied} translations applied to the listing");
    outcome
}
