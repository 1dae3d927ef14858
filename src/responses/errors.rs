use crate::errors::ServerError;
use astra::Response;

pub use crate::errors::ResultResp;

/// Convert a ServerError into an HTML error page.
pub fn error_to_response(err: ServerError) -> Response {
    crate::templates::html_error_response(err)
}
