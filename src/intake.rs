use std::path::{Path, PathBuf};

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::debug;

use crate::{config::Configuration, error::Result, pixels::PixelBuffer};

/// Decodes an image file into RGBA8 pixels, shrinking it first if it exceeds
/// the configured bounds.
pub fn load_pixels(path: impl AsRef<Path>, configuration: &Configuration) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let image = image::open(path)?;
    debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
    pixels_from_image(&image, configuration.max_width, configuration.max_height)
}

/// Runs [`load_pixels`] on the blocking pool.
pub async fn load_pixels_async(path: PathBuf, configuration: Configuration) -> Result<PixelBuffer> {
    tokio::task::spawn_blocking(move || load_pixels(&path, &configuration)).await?
}

pub fn pixels_from_image(
    image: &DynamicImage,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> Result<PixelBuffer> {
    let (width, height) = image.dimensions();
    let bound_width = max_width.unwrap_or(width);
    let bound_height = max_height.unwrap_or(height);

    let rgba = if width > bound_width || height > bound_height {
        debug!("Resizing {}x{} to fit {}x{}", width, height, bound_width, bound_height);
        image
            .resize(bound_width, bound_height, FilterType::Triangle)
            .to_rgba8()
    } else {
        image.to_rgba8()
    };
    PixelBuffer::new(rgba.into_raw())
}
