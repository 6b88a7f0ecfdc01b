use crate::analysis::{AnalyzerKind, ColorAnalyzer};
use crate::color::{ColorHex, Rgb};
use crate::pixels::PixelBuffer;

/// Mean of the R, G and B channels over every pixel, alpha ignored.
///
/// Each channel is truncated (`floor(sum / count)`), never rounded.
pub fn average_color(pixels: &PixelBuffer) -> Rgb {
    let mut sums = [0u64; 3];
    let mut count = 0u64;
    for [r, g, b, _] in pixels.pixels() {
        sums[0] += u64::from(r);
        sums[1] += u64::from(g);
        sums[2] += u64::from(b);
        count += 1;
    }
    // PixelBuffer always holds at least one pixel, so count > 0 and each
    // quotient fits in a u8.
    let channel = |sum: u64| (sum / count) as u8;
    Rgb::new(channel(sums[0]), channel(sums[1]), channel(sums[2]))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AverageColorAnalyzer;

impl AverageColorAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl ColorAnalyzer for AverageColorAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Average
    }

    fn analyze(&self, pixels: &PixelBuffer) -> ColorHex {
        average_color(pixels).to_hex()
    }
}
