// src/routes/auth.rs
use crate::app::App;
use crate::auth::sessions::{
    self, clear_session_cookie, now_unix, session_cookie, SESSION_COOKIE,
};
use crate::auth::token::password_matches;
use crate::errors::ServerError;
use crate::requests::{cookie, read_form};
use crate::responses::{html_response, html_response_with_status, redirect, ResultResp};
use crate::templates;
use astra::Request;

pub fn login_form() -> ResultResp {
    html_response(templates::pages::login_page(None))
}

pub fn login_submit(req: &mut Request, app: &App) -> ResultResp {
    let form = read_form(req, app.config.max_upload_bytes)?;
    let submitted = form.get("password").map(String::as_str).unwrap_or_default();

    if !password_matches(submitted, &app.config.admin_password) {
        log::warn!("🔒 Failed admin login attempt");
        return html_response_with_status(
            401,
            templates::pages::login_page(Some("Mot de passe incorrect")),
        );
    }

    let token = app
        .db
        .with_conn(|conn| sessions::create_session(conn, now_unix()))?;
    log::info!("🔓 Admin logged in");
    redirect("/admin", Some(session_cookie(&token)))
}

pub fn logout(req: &Request, app: &App) -> ResultResp {
    if let Some(token) = cookie(req, SESSION_COOKIE) {
        app.db
            .with_conn(|conn| sessions::revoke_session(conn, &token, now_unix()))?;
    }
    redirect("/login", Some(clear_session_cookie()))
}

/// True when the request carries a live admin session.
pub fn is_admin(req: &Request, app: &App) -> Result<bool, ServerError> {
    match cookie(req, SESSION_COOKIE) {
        Some(token) if !token.is_empty() => app
            .db
            .with_conn(|conn| sessions::is_valid_session(conn, &token, now_unix())),
        _ => Ok(false),
    }
}
