use std::path::PathBuf;

use crate::{
    assets::bitmap::{Bitmap, load_image},
    foundation::error::MemeResult,
};

/// Where the picker takes its image from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Saved photo library.
    Library,
    /// Live camera capture.
    Camera,
}

/// Result of a modal pick. Cancelling is not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    /// The user chose an image.
    Picked(Bitmap),
    /// The user dismissed the picker.
    Cancelled,
}

/// Modal image picker.
///
/// `request_image` blocks until the user picks or cancels.
pub trait ImageSource {
    /// Present the picker for `kind` and wait for its result.
    fn request_image(&mut self, kind: SourceKind) -> MemeResult<PickOutcome>;
}

/// Picker backed by image files, one optional path per [`SourceKind`].
///
/// A kind without a configured path behaves like the user cancelling.
#[derive(Clone, Debug, Default)]
pub struct FileImageSource {
    library: Option<PathBuf>,
    camera: Option<PathBuf>,
}

impl FileImageSource {
    /// Picker with no files configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `path` for [`SourceKind::Library`] requests.
    pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.library = Some(path.into());
        self
    }

    /// Serve `path` for [`SourceKind::Camera`] requests.
    pub fn with_camera(mut self, path: impl Into<PathBuf>) -> Self {
        self.camera = Some(path.into());
        self
    }
}

impl ImageSource for FileImageSource {
    fn request_image(&mut self, kind: SourceKind) -> MemeResult<PickOutcome> {
        let path = match kind {
            SourceKind::Library => self.library.as_ref(),
            SourceKind::Camera => self.camera.as_ref(),
        };
        let Some(path) = path else {
            tracing::debug!(?kind, "no file configured for source, treating as cancel");
            return Ok(PickOutcome::Cancelled);
        };
        Ok(PickOutcome::Picked(load_image(path)?))
    }
}
