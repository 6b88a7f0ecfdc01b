use crate::analysis::{AnalyzerKind, ColorAnalyzer, ColorCount};
use crate::color::{to_hex, ColorHex, Rgb};
use crate::pixels::PixelBuffer;

/// Tallies every pixel's exact color, alpha ignored.
pub fn count_colors(pixels: &PixelBuffer) -> ColorCount {
    pixels.pixels().map(|[r, g, b, _]| to_hex(r, g, b)).collect()
}

/// The most frequent exact color. Ties go to the color that appears first
/// in scan order; if every pixel is distinct, that is the first pixel.
pub fn dominant_hex(pixels: &PixelBuffer) -> ColorHex {
    let counts = count_colors(pixels);
    match counts.most_frequent() {
        Some((color, _)) => color.clone(),
        None => unreachable!("PixelBuffer holds at least one pixel, so the tally is never empty"),
    }
}

pub fn dominant_color(pixels: &PixelBuffer) -> Rgb {
    dominant_hex(pixels).to_rgb()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DominantColorAnalyzer;

impl DominantColorAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl ColorAnalyzer for DominantColorAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Dominant
    }

    fn analyze(&self, pixels: &PixelBuffer) -> ColorHex {
        dominant_hex(pixels)
    }
}
