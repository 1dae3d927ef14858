// src/routes/public.rs
use crate::app::App;
use crate::db::listing::load_listing;
use crate::domain::Lang;
use crate::errors::ServerError;
use crate::requests::{cookie, header, parse_query};
use crate::responses::{html_response, json_ok, redirect, ResultResp};
use crate::templates;
use astra::Request;

pub const LANG_COOKIE: &str = "lang";

/// `?lang=` wins, then the `lang` cookie, then `Accept-Language`, then French.
pub fn request_lang(req: &Request) -> Lang {
    parse_query(req)
        .get("lang")
        .and_then(|code| Lang::from_code(code))
        .or_else(|| cookie(req, LANG_COOKIE).and_then(|code| Lang::from_code(&code)))
        .unwrap_or_else(|| {
            header(req, "Accept-Language")
                .map(Lang::from_accept_language)
                .unwrap_or_default()
        })
}

pub fn home(req: &Request, app: &App) -> ResultResp {
    let lang = request_lang(req);
    let record = app.db.with_conn(|conn| load_listing(conn))?;
    html_response(templates::pages::home_page(record.as_ref(), lang))
}

/// Remember the choice and go back where the visitor came from (same site only).
pub fn set_language(req: &Request, code: &str) -> ResultResp {
    let back = header(req, "Referer")
        .and_then(|r| url::Url::parse(r).ok())
        // `//host/...` would be read by the browser as another site.
        .filter(|u| !u.path().starts_with("//"))
        .map(|u| match u.query() {
            Some(q) => format!("{}?{q}", u.path()),
            None => u.path().to_string(),
        })
        .unwrap_or_else(|| "/".to_string());

    match Lang::from_code(code) {
        Some(lang) => redirect(
            &back,
            Some(format!(
                "{LANG_COOKIE}={}; Path=/; Max-Age=31536000; SameSite=Lax",
                lang.code()
            )),
        ),
        None => redirect(&back, None),
    }
}

/// Localized JSON of the active listing.
pub fn villa_api(req: &Request, app: &App) -> ResultResp {
    let lang = request_lang(req);
    let record = app
        .db
        .with_conn(|conn| load_listing(conn))?
        .filter(|r| r.is_active)
        .ok_or(ServerError::NotFound)?;
    json_ok(&record.localized(lang))
}
