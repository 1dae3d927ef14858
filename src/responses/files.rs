// responses/files.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use std::path::{Component, Path};

/// Serve a file below `root`. Anything that tries to leave `root` is a 404.
pub fn static_file_response(root: &Path, relative: &str) -> ResultResp {
    let rel = Path::new(relative.trim_start_matches('/'));
    if rel.as_os_str().is_empty() || rel.components().any(|c| !matches!(c, Component::Normal(_))) {
        return Err(ServerError::NotFound);
    }

    let path = root.join(rel);
    let bytes = std::fs::read(&path).map_err(|_| ServerError::NotFound)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type(&path))
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}

fn content_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mime = match ext.as_str() {
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        "js" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "css" => mime::TEXT_CSS_UTF_8,
        "svg" => mime::IMAGE_SVG,
        "txt" => mime::TEXT_PLAIN_UTF_8,
        "xml" => return "application/xml".to_string(),
        "webp" => return "image/webp".to_string(),
        "ico" => return "image/x-icon".to_string(),
        _ => mime::APPLICATION_OCTET_STREAM,
    };
    mime.to_string()
}
