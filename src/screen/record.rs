use crate::assets::bitmap::Bitmap;

/// One completed, shared meme.
///
/// Only the screen constructs records, and only while it holds a base image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemeRecord {
    top_text: String,
    bottom_text: String,
    base_image: Bitmap,
    flattened_image: Bitmap,
}

/// Serializable description of a [`MemeRecord`], without pixels.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MemeSummary {
    /// Top caption text.
    pub top_text: String,
    /// Bottom caption text.
    pub bottom_text: String,
    /// Base image `[width, height]`.
    pub base_size: [u32; 2],
    /// Flattened image `[width, height]`.
    pub flattened_size: [u32; 2],
}

impl MemeRecord {
    pub(crate) fn new(
        top_text: String,
        bottom_text: String,
        base_image: Bitmap,
        flattened_image: Bitmap,
    ) -> Self {
        Self {
            top_text,
            bottom_text,
            base_image,
            flattened_image,
        }
    }

    /// Top caption at share time.
    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    /// Bottom caption at share time.
    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// Image the captions were placed on.
    pub fn base_image(&self) -> &Bitmap {
        &self.base_image
    }

    /// Exported bitmap with captions burned in.
    pub fn flattened_image(&self) -> &Bitmap {
        &self.flattened_image
    }

    /// Pixel-free description.
    pub fn summary(&self) -> MemeSummary {
        MemeSummary {
            top_text: self.top_text.clone(),
            bottom_text: self.bottom_text.clone(),
            base_size: [self.base_image.width(), self.base_image.height()],
            flattened_size: [self.flattened_image.width(), self.flattened_image.height()],
        }
    }
}
