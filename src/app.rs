// src/app.rs
use crate::ai::{AiServices, CompletionBackend};
use crate::config::AppConfig;
use crate::db::Database;
use crate::documents::TextExtractor;
use std::sync::Arc;

/// Everything a request handler needs, shared by all workers.
pub struct App {
    pub config: AppConfig,
    pub db: Database,
    pub ai: AiServices,
    pub text_extractor: Box<dyn TextExtractor>,
}

impl App {
    pub fn new(
        config: AppConfig,
        backend: Arc<dyn CompletionBackend>,
        text_extractor: Box<dyn TextExtractor>,
    ) -> Self {
        let db = Database::new(config.database_path.clone());
        let ai = AiServices::new(backend, &config.ai);
        Self {
            config,
            db,
            ai,
            text_extractor,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.config.ai.api_key.is_some()
    }
}
