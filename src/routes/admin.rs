// src/routes/admin.rs
use crate::app::App;
use crate::auth::token::short_id;
use crate::db::listing::{delete_listing, load_listing, load_or_default, save_listing};
use crate::documents::{is_allowed_image, optimize};
use crate::domain::ListingRecord;
use crate::errors::ServerError;
use crate::requests::{read_body, read_form, secure_filename, upload_filename};
use crate::responses::{html_response, json_ok, json_response, ResultResp};
use crate::templates::{self, pages::AdminVm};
use astra::Request;
use chrono::Utc;
use serde_json::json;
use std::fs;
use std::path::Path;

pub fn admin_page(app: &App) -> ResultResp {
    let record = app.db.with_conn(|conn| load_or_default(conn))?;
    html_response(templates::pages::admin_page(&AdminVm {
        record: &record,
        ai_enabled: app.ai_enabled(),
    }))
}

/// Main form: every listed field is overwritten, the listing becomes active.
pub fn save(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req, app.config.max_upload_bytes)?;

    app.db.with_conn(|conn| {
        let mut record = load_or_default(conn)?;
        record.apply_form(&form, ListingRecord::admin_form_fields());
        record.is_active = true;
        save_listing(conn, &record, Utc::now().naive_utc())
    })?;

    log::info!("💾 Listing saved from the admin form");
    json_ok(&json!({ "success": true, "message": "Villa enregistrée avec succès !" }))
}

pub fn upload_image(req: &mut Request, app: &App) -> ResultResp {
    let original = upload_filename(req)
        .ok_or_else(|| ServerError::BadRequest("No selected file".into()))?;
    if !is_allowed_image(&original) {
        return Err(ServerError::BadRequest("Invalid file type".into()));
    }
    let bytes = read_body(req, app.config.max_upload_bytes)?;
    if bytes.is_empty() {
        return Err(ServerError::BadRequest("No file".into()));
    }

    let stem = Path::new(&original)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let temp_name = format!(
        "{}_{}_{stem}.tmp",
        Utc::now().timestamp_millis(),
        short_id()
    );

    let upload_dir = &app.config.upload_dir;
    fs::create_dir_all(upload_dir).map_err(|e| {
        log::error!("Cannot create upload dir {}: {e}", upload_dir.display());
        ServerError::InternalError
    })?;
    let temp_path = upload_dir.join(temp_name);
    fs::write(&temp_path, &bytes).map_err(|e| {
        log::error!("Cannot write upload: {e}");
        ServerError::InternalError
    })?;

    let final_path = match optimize(&temp_path) {
        Ok(path) => path,
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
    };
    let filename = final_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or(ServerError::InternalError)?;

    app.db.with_conn(|conn| {
        if let Some(mut record) = load_listing(conn)? {
            record.images.push(filename.clone());
            save_listing(conn, &record, Utc::now().naive_utc())?;
        }
        Ok(())
    })?;

    log::info!("🖼️ Image stored as {filename}");
    json_ok(&json!({ "success": true, "filename": filename }))
}

pub fn delete_image(app: &App, filename: &str) -> ResultResp {
    let filename = secure_filename(filename);

    let removed = app.db.with_conn(|conn| {
        let Some(mut record) = load_listing(conn)? else {
            return Ok(false);
        };
        let Some(pos) = record.images.iter().position(|i| *i == filename) else {
            return Ok(false);
        };
        record.images.remove(pos);
        save_listing(conn, &record, Utc::now().naive_utc())?;
        Ok(true)
    })?;

    if !removed {
        return json_response(404, &json!({ "success": false, "error": "Image not found" }));
    }

    let path = app.config.upload_dir.join(&filename);
    if path.exists() {
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Could not delete {}: {e}", path.display());
        }
    }
    json_ok(&json!({ "success": true }))
}

pub fn edit_website(app: &App) -> ResultResp {
    let record = app.db.with_conn(|conn| load_listing(conn))?;
    html_response(templates::pages::edit_website_page(record.as_ref()))
}

pub fn save_website_text(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req, app.config.max_upload_bytes)?;

    let saved = app.db.with_conn(|conn| {
        let Some(mut record) = load_listing(conn)? else {
            return Ok(false);
        };
        record.apply_form(&form, ListingRecord::site_copy_fields());
        save_listing(conn, &record, Utc::now().naive_utc())?;
        Ok(true)
    })?;

    if !saved {
        return json_response(
            404,
            &json!({ "success": false, "error": "Aucune villa trouvée. Créez d'abord une villa." }),
        );
    }
    json_ok(&json!({ "success": true, "message": "Textes enregistrés avec succès !" }))
}

/// Deletes the listing and every file in the upload directory.
pub fn reset(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req, app.config.max_upload_bytes)?;
    if form.get("confirmation").map(String::as_str) != Some("SUPPRIMER") {
        return Err(ServerError::BadRequest("Confirmation incorrecte".into()));
    }

    app.db.with_conn(|conn| delete_listing(conn))?;

    let removed = clear_dir(&app.config.upload_dir).map_err(|e| {
        log::error!("Reset could not clear uploads: {e}");
        ServerError::InternalError
    })?;
    log::warn!("🗑️ Listing reset, {removed} uploaded files deleted");

    json_ok(&json!({ "success": true, "message": "Toutes les données ont été supprimées" }))
}

fn clear_dir(dir: &Path) -> std::io::Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
