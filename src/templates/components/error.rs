use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    match &err {
        ServerError::DbError(msg) => log::error!("Database error: {msg}"),
        ServerError::InternalError => log::error!("Internal server error"),
        ServerError::UpstreamFailure(msg) => log::warn!("Upstream failure: {msg}"),
        _ => {}
    }
    render_error(err.status(), &err.public_message())
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                title { "Erreur " (status) }
                link rel="stylesheet" href="/static/main.css";
            }
            body class="error-page" {
                h1 { "Erreur " (status) }
                p { (message) }
                p { a href="/" { "← Retour à l'accueil" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
