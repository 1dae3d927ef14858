use crate::ai::CompletionBackend;
use crate::app::App;
use crate::auth::sessions::{create_session, now_unix};
use crate::config::{AiConfig, AppConfig};
use crate::db::connection::init_db;
use crate::documents::TextExtractor;
use astra::Response;
use std::io::Read;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_PASSWORD: &str = "palmeraie-2024";

/// An `App` on a throwaway directory (database, uploads, static files).
/// The directory lives as long as this value.
pub struct TestApp {
    pub app: App,
    pub dir: TempDir,
}

pub fn test_config(dir: &TempDir, api_key: Option<&str>) -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        max_workers: 1,
        database_path: dir.path().join("test.sqlite3").to_string_lossy().into_owned(),
        schema_path: "sql/schema.sql".to_string(),
        static_dir: dir.path().join("static"),
        upload_dir: dir.path().join("static").join("uploads"),
        admin_password: TEST_PASSWORD.to_string(),
        max_upload_bytes: 1024 * 1024,
        ai: AiConfig {
            api_key: api_key.map(str::to_string),
            ..AiConfig::default()
        },
    }
}

/// Initialize a fresh test DB using the production schema
pub fn init_test_app(
    backend: Arc<dyn CompletionBackend>,
    text_extractor: Box<dyn TextExtractor>,
) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = test_config(&dir, Some("test-key"));
    std::fs::create_dir_all(&config.upload_dir).expect("upload dir");

    let app = App::new(config, backend, text_extractor);
    init_db(&app.db, &app.config.schema_path)
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestApp { app, dir }
}

pub fn admin_cookie(app: &App) -> String {
    let token = app
        .db
        .with_conn(|conn| create_session(conn, now_unix()))
        .expect("Failed to create session");
    format!("session={token}")
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("JSON body")
}

