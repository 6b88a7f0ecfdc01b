//! Average and dominant color of an RGBA pixel buffer, each computed on its
//! own long-lived worker task and joined into one result.

pub mod analysis;
pub mod color;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod intake;
pub mod pixels;
pub mod service;
pub mod worker;

pub use analysis::{AnalyzerKind, ColorAnalyzer};
pub use color::{to_hex, ColorHex, Rgb};
pub use config::Configuration;
pub use coordinator::{AnalysisResult, Coordinator, CoordinatorBuilder};
pub use error::{AppError, Result};
pub use pixels::PixelBuffer;
pub use service::AnalysisService;
