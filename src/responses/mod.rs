pub mod errors;
pub mod files;
pub mod html;
pub mod json;

pub use errors::{error_to_response, ResultResp};

pub use files::static_file_response;
pub use html::{html_response, html_response_with_status, redirect};
pub use json::{json_error_response, json_ok, json_response};
