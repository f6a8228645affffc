use crate::error::{image_error, ScheduleResult};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::info;

/// Basic facts about an uploaded screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

/// Make sure the bytes decode as an image before they are sent for
/// text detection
pub fn validate_image(image_data: &[u8]) -> ScheduleResult<ImageInfo> {
    info!("Validating schedule image, size: {} bytes", image_data.len());

    if image_data.is_empty() {
        return Err(image_error("Image is empty"));
    }

    let format = image::guess_format(image_data)
        .map_err(|e| image_error(&format!("Failed to determine image format: {}", e)))?;

    let img = decode(image_data)?;

    if img.width() == 0 || img.height() == 0 {
        return Err(image_error("Image has no pixels"));
    }

    info!(
        "Detected {:?} image with dimensions {}x{}",
        format,
        img.width(),
        img.height()
    );

    Ok(ImageInfo {
        format,
        width: img.width(),
        height: img.height(),
    })
}

fn decode(image_data: &[u8]) -> ScheduleResult<DynamicImage> {
    image::ImageReader::new(Cursor::new(image_data))
        .with_guessed_format()
        .map_err(|e| image_error(&format!("Failed to create image reader: {}", e)))?
        .decode()
        .map_err(|e| image_error(&format!("Failed to decode image: {}", e)))
}
