use bytes::Bytes;

use crate::error::{AppError, Result};

pub const CHANNELS: usize = 4;

/// Immutable RGBA8 pixel data, row-major.
///
/// Always holds at least one whole pixel. Cloning is cheap and every clone
/// reads the same bytes; nothing can write to them once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Bytes,
}

impl PixelBuffer {
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(AppError::InvalidInput(
                "pixel buffer is empty; at least one pixel is required".to_string(),
            ));
        }
        if data.len() % CHANNELS != 0 {
            return Err(AppError::InvalidInput(format!(
                "pixel buffer length {} is not a multiple of {}",
                data.len(),
                CHANNELS
            )));
        }
        Ok(Self { data })
    }

    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::new(Bytes::copy_from_slice(data))
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Never true for a constructed buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterates pixels in scan order as `[r, g, b, a]`.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

impl TryFrom<Vec<u8>> for PixelBuffer {
    type Error = AppError;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for PixelBuffer {
    type Error = AppError;

    fn try_from(value: &[u8]) -> Result<Self> {
        Self::from_slice(value)
    }
}
