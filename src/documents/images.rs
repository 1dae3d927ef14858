// src/documents/images.rs
use image::codecs::jpeg::JpegEncoder;
use image::GenericImageView;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

const MAX_WIDTH: u32 = 1920;
const MAX_HEIGHT: u32 = 1080;
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub fn is_allowed_image(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ALLOWED_IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Re-encode `source` as a web-sized JPEG next to it and delete the source.
/// Returns the path of the `.jpg`.
pub fn optimize(source: &Path) -> Result<PathBuf, ImageError> {
    // Uploads are stored as `.tmp`, so sniff the format from the bytes.
    let img = image::load_from_memory(&fs::read(source)?)?;

    let (width, height) = img.dimensions();
    let img = if width > MAX_WIDTH || height > MAX_HEIGHT {
        img.thumbnail(MAX_WIDTH, MAX_HEIGHT)
    } else {
        img
    };
    // JPEG has no alpha channel.
    let rgb = img.to_rgb8();

    let target = source.with_extension("jpg");
    {
        let mut out = BufWriter::new(File::create(&target)?);
        let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode_image(&rgb)?;
    }

    if target != source && source.exists() {
        fs::remove_file(source)?;
    }

    Ok(target)
}

impl From<ImageError> for crate::errors::ServerError {
    fn from(e: ImageError) -> Self {
        match e {
            ImageError::Decode(err) => {
                crate::errors::ServerError::BadRequest(format!("Invalid image: {err}"))
            }
            ImageError::Io(err) => {
                log::error!("Image optimization I/O failed: {err}");
                crate::errors::ServerError::InternalError
            }
        }
    }
}
