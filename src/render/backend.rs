use crate::{assets::bitmap::Bitmap, foundation::error::MemeResult, surface::model::Surface};

/// Rasterizes a [`Surface`] into a bitmap of exactly the surface size.
///
/// Implementations draw visible layers only; hidden chrome never reaches the output.
pub trait SurfaceRenderer {
    /// Capture the current state of `surface`.
    fn capture(&mut self, surface: &Surface) -> MemeResult<Bitmap>;
}
