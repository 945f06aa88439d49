// SPDX-License-Identifier: MPL-2.0
use std::sync::Arc;

/// A decoded video frame ready for display.
///
/// The pixel buffer is shared, not copied, when a frame is handed to the
/// renderer or the display layer.
#[derive(Debug, Clone)]
pub struct Frame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Zero-based frame index within the video.
    pub index: u32,
}

impl Frame {
    /// Creates a frame from raw RGBA bytes.
    ///
    /// The buffer length must be `width * height * 4`.
    pub fn from_rgba(rgba_data: Vec<u8>, width: u32, height: u32, index: u32) -> Self {
        debug_assert_eq!(rgba_data.len(), (width * height * 4) as usize);
        Self {
            rgba_data: Arc::new(rgba_data),
            width,
            height,
            index,
        }
    }

    /// Returns the total size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.rgba_data.len()
    }
}
