use crate::ai::{CompletionBackend, OpenRouterClient};
use crate::app::App;
use crate::config::AppConfig;
use crate::db::init_db;
use crate::documents::PdfTextExtractor;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;

mod ai;
mod app;
mod auth;
mod config;
mod db;
mod documents;
mod domain;
mod errors;
mod pipeline;
mod requests;
mod responses;
mod router;
mod routes;
mod templates;


fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1️⃣ Read configuration once
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };
    if config.ai.api_key.is_none() {
        log::warn!("⚠️ OPENROUTER_API_KEY is not set: PDF import, enhancement and translation are disabled");
    }

    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        log::error!("❌ Cannot create {}: {e}", config.upload_dir.display());
        std::process::exit(1);
    }

    // 2️⃣ AI provider client, shared by every worker
    let backend: Arc<dyn CompletionBackend> = match OpenRouterClient::new(&config.ai) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("❌ Could not build the AI client: {e}");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr;
    let max_workers = config.max_workers;
    let app = App::new(config, backend, Box::new(PdfTextExtractor));

    // 3️⃣ Initialize database from schema.sql
    if let Err(e) = init_db(&app.db, &app.config.schema_path) {
        log::error!("❌ Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 4️⃣ Start the server
    log::info!("Starting server at http://{addr} ({max_workers} workers)");
    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
