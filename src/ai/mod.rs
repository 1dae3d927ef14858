mod ai_error;
mod backend;
mod enhancement;
mod extraction;
mod fence;
mod prompts;
mod translation;

pub use ai_error::AiError;
pub use backend::{CompletionBackend, OpenRouterClient};
pub use enhancement::EnhancementClient;
pub use extraction::{ExtractionClient, ExtractionResult, TRANSLATABLE_FIELDS};
pub use translation::{english_key, TranslationClient, TranslationOutcome};

#[cfg(test)]
pub use backend::CompletionRequest;
#[cfg(test)]
pub use extraction::EXTRACTION_FIELDS;

use crate::config::AiConfig;
use std::sync::Arc;

/// The three AI clients, sharing one backend.
pub struct AiServices {
    pub extraction: ExtractionClient,
    pub enhancement: EnhancementClient,
    pub translation: TranslationClient,
}

impl AiServices {
    pub fn new(backend: Arc<dyn CompletionBackend>, cfg: &AiConfig) -> Self {
        Self {
            extraction: ExtractionClient::new(backend.clone(), cfg.extraction.clone()),
            enhancement: EnhancementClient::new(backend.clone(), cfg.enhancement.clone()),
            translation: TranslationClient::new(backend, cfg.translation.clone()),
        }
    }
}
