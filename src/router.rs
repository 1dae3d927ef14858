use crate::app::App;
use crate::errors::ServerError;
use crate::responses::{json_error_response, redirect, static_file_response, ResultResp};
use crate::routes::{admin, ai, auth, public};
use astra::Request;

/// Routes behind the admin session gate.
fn requires_admin(path: &str) -> bool {
    path == "/admin" || path.starts_with("/admin/") || path == "/api/enhance"
}

/// JSON endpoints answer errors as JSON instead of an HTML page.
fn json_route(result: ResultResp) -> ResultResp {
    result.or_else(|err| {
        if err.status() >= 500 {
            log::error!("JSON route failed: {err}");
        }
        Ok(json_error_response(&err))
    })
}

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    log::debug!("{method} {path}");

    if method == "GET" {
        if let Some(rel) = path.strip_prefix("/static/uploads/") {
            return static_file_response(&app.config.upload_dir, rel);
        }
        if let Some(rel) = path.strip_prefix("/static/") {
            return static_file_response(&app.config.static_dir, rel);
        }
    }

    if requires_admin(&path) && !auth::is_admin(&req, app)? {
        return redirect("/login", None);
    }

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => public::home(&req, app),
        ("GET", p) if p.starts_with("/set-language/") => {
            public::set_language(&req, &p["/set-language/".len()..])
        }
        ("GET", "/api/villa") => json_route(public::villa_api(&req, app)),

        ("GET", "/login") => auth::login_form(),
        ("POST", "/login") => auth::login_submit(&mut req, app),
        ("GET", "/logout") => auth::logout(&req, app),

        ("GET", "/admin") => admin::admin_page(app),
        ("POST", "/admin/save") => json_route(admin::save(&mut req, app)),
        ("POST", "/admin/upload") => json_route(admin::upload_image(&mut req, app)),
        ("POST", p) if p.starts_with("/admin/delete-image/") => {
            json_route(admin::delete_image(app, &p["/admin/delete-image/".len()..]))
        }
        ("POST", "/admin/upload-pdf") => json_route(ai::upload_pdf(&mut req, app)),
        ("POST", "/admin/translate") => json_route(ai::translate(app)),
        ("POST", "/api/enhance") => json_route(ai::enhance(&mut req, app)),
        ("GET", "/admin/edit-website") => admin::edit_website(app),
        ("POST", "/admin/save-website-text") => json_route(admin::save_website_text(&mut req, app)),
        ("POST", "/admin/reset") => json_route(admin::reset(&mut req, app)),

        _ => Err(ServerError::NotFound),
    }
}
