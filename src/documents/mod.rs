pub mod images;
mod pdf_text;

pub use images::{is_allowed_image, optimize};
pub use pdf_text::{PdfTextExtractor, TextExtractor};
