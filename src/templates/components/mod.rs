pub mod card;
pub mod error;
pub mod fields;

pub use card::card;
pub use error::html_error_response;
pub use fields::{number_input, text_input, textarea_field};
