// src/ai/enhancement.rs
use crate::ai::backend::{CompletionBackend, CompletionRequest};
use crate::ai::prompts::enhancement_prompt;
use crate::config::ModelSettings;
use std::sync::Arc;

const STAGE: &str = "enhancement";

/// Rewrites one text field. Fail-open: the caller always gets usable text back.
pub struct EnhancementClient {
    backend: Arc<dyn CompletionBackend>,
    settings: ModelSettings,
}

impl EnhancementClient {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: ModelSettings) -> Self {
        Self { backend, settings }
    }

    pub fn enhance(&self, text: &str, context_label: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let request = CompletionRequest::new(
            STAGE,
            &self.settings,
            enhancement_prompt(text, context_label),
        );

        match self.backend.complete(&request) {
            Ok(improved) if !improved.trim().is_empty() => improved.trim().to_string(),
            Ok(_) => {
                log::warn!("[{STAGE}] empty reply for {context_label:?}, keeping original text");
                text.to_string()
            }
            Err(e) => {
                log::warn!(
                    "[{STAGE}] failed for {context_label:?} (upstream status: {:?}, body: {:?}): {e}",
                    e.upstream_status(),
                    e.body_preview()
                );
                text.to_string()
            }
        }
    }
}
