pub mod average;
pub mod color_count;
pub mod dominant;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::ColorHex;
use crate::pixels::PixelBuffer;

pub use average::{average_color, AverageColorAnalyzer};
pub use color_count::ColorCount;
pub use dominant::{count_colors, dominant_color, dominant_hex, DominantColorAnalyzer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    Average,
    Dominant,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerKind::Average => f.write_str("average"),
            AnalyzerKind::Dominant => f.write_str("dominant"),
        }
    }
}

/// A pure reduction from a pixel buffer to one color.
///
/// Implementations keep no state between calls; a worker may run the same
/// analyzer for any number of requests.
pub trait ColorAnalyzer: Send + Sync + 'static {
    fn kind(&self) -> AnalyzerKind;
    fn analyze(&self, pixels: &PixelBuffer) -> ColorHex;
}
