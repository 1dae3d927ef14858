// src/routes/ai.rs
//
// Admin actions backed by the AI provider.
use crate::app::App;
use crate::db::listing::{load_listing, load_or_default, save_listing};
use crate::errors::ServerError;
use crate::pipeline::{translate_listing, ImportPipeline};
use crate::requests::{read_body, upload_filename};
use crate::responses::{json_ok, ResultResp};
use astra::Request;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

/// Brochure import. The listing is only written once the whole pipeline succeeded.
pub fn upload_pdf(req: &mut Request, app: &App) -> ResultResp {
    let filename = upload_filename(req)
        .ok_or_else(|| ServerError::BadRequest("No selected file".into()))?;
    if !filename.to_ascii_lowercase().ends_with(".pdf") {
        return Err(ServerError::BadRequest("File must be a PDF".into()));
    }
    let document = read_body(req, app.config.max_upload_bytes)?;

    let pipeline = ImportPipeline::new(
        app.text_extractor.as_ref(),
        &app.ai,
        &app.config.upload_dir,
    );
    let imported = pipeline.process_upload(&document)?;
    let merged = imported.merged();

    app.db.with_conn(|conn| {
        let mut record = load_or_default(conn)?;
        // English for fields the batch missed would describe the old brochure.
        record.clear_english_twins();
        record.apply_merged(&merged);
        record.is_active = true;
        save_listing(conn, &record, Utc::now().naive_utc())
    })?;

    let missing = &imported.translations.missing;
    if !missing.is_empty() {
        log::warn!("⚠️ Import saved without English for: {}", missing.join(", "));
    }
    log::info!("✅ {filename} imported ({} fields)", merged.len());

    json_ok(&json!({
        "success": true,
        "data": merged,
        "missing_translations": missing,
    }))
}

/// "Translate to English" on the stored listing.
pub fn translate(app: &App) -> ResultResp {
    let mut snapshot = app
        .db
        .with_conn(|conn| load_listing(conn))?
        .ok_or(ServerError::NotFound)?;

    // No connection is held during the AI call.
    let outcome = translate_listing(&app.ai.translation, &mut snapshot);

    if !outcome.translated.is_empty() {
        // Re-read so edits saved while the model was answering survive.
        app.db.with_conn(|conn| match load_listing(conn)? {
            Some(mut current) => {
                current.apply_translations(&outcome.translated);
                save_listing(conn, &current, Utc::now().naive_utc())
            }
            None => {
                log::warn!("Listing deleted during translation, nothing saved");
                Ok(())
            }
        })?;
    }
    if !outcome.missing.is_empty() {
        log::warn!("⚠️ Not translated: {}", outcome.missing.join(", "));
    }

    json_ok(&json!({
        "success": !outcome.translated.is_empty(),
        "translated": outcome.translated.keys().collect::<Vec<_>>(),
        "missing": outcome.missing,
    }))
}

#[derive(Debug, Deserialize)]
struct EnhanceRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    field: String,
}

/// Fail-open: the original text comes back when the provider fails.
pub fn enhance(req: &mut Request, app: &App) -> ResultResp {
    let body = read_body(req, app.config.max_upload_bytes)?;
    let payload: EnhanceRequest = serde_json::from_slice(&body)
        .map_err(|_| ServerError::BadRequest("No data provided".into()))?;

    let enhanced = app.ai.enhancement.enhance(&payload.text, &payload.field);
    json_ok(&json!({ "enhanced": enhanced }))
}
