use std::sync::Arc;

use crate::{
    assets::{bitmap::Bitmap, text::TextAlign},
    caption::style::CaptionStyle,
    foundation::{
        core::{Canvas, Rect, Rgba8},
        error::{MemeError, MemeResult},
    },
};

/// Stable identifier of a layer within a [`Surface`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u32);

/// How a bitmap is fitted into its image view frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Stretch to the frame, ignoring aspect ratio.
    #[default]
    ScaleToFill,
    /// Scale uniformly so the whole image fits, centered (letterboxed).
    AspectFit,
    /// Scale uniformly so the frame is covered, centered (cropped by the frame).
    AspectFill,
}

/// Kind of non-content chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeKind {
    /// Bar along the top edge.
    NavigationBar,
    /// Bar along the bottom edge holding the pick/share controls.
    Toolbar,
}

/// Presentation flags that composition toggles temporarily.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Layer is not drawn.
    pub hidden: bool,
    /// Layer is excluded from the accessibility tree.
    pub accessibility_hidden: bool,
}

/// What a layer draws.
#[derive(Clone, Debug)]
pub enum LayerContent {
    /// Image view; draws nothing while empty.
    Image {
        /// Displayed bitmap.
        image: Option<Bitmap>,
        /// Fit of the bitmap inside the frame.
        mode: ContentMode,
    },
    /// Caption text field.
    Caption {
        /// Displayed text.
        text: String,
        /// Shared caption style.
        style: Arc<CaptionStyle>,
        /// Horizontal alignment inside the frame.
        align: TextAlign,
    },
    /// Non-content bar.
    Chrome {
        /// Bar kind.
        kind: ChromeKind,
        /// Bar fill color.
        color: Rgba8,
    },
}

/// One element of the on-screen hierarchy.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Identifier, unique within the surface.
    pub id: LayerId,
    /// Frame in surface pixels.
    pub frame: Rect,
    /// Paint order; higher draws later. Ties keep insertion order.
    pub z: i32,
    /// Visibility flags.
    pub presentation: Presentation,
    /// Drawn content.
    pub content: LayerContent,
}

impl Layer {
    /// Whether this layer is chrome.
    pub fn is_chrome(&self) -> bool {
        matches!(self.content, LayerContent::Chrome { .. })
    }
}

/// Retained view hierarchy captured by the composition engine.
#[derive(Clone, Debug)]
pub struct Surface {
    size: Canvas,
    background: Rgba8,
    layers: Vec<Layer>,
}

impl Surface {
    /// Empty surface of `size` cleared to `background`.
    pub fn new(size: Canvas, background: Rgba8) -> MemeResult<Self> {
        size.validate()?;
        Ok(Self {
            size,
            background,
            layers: Vec::new(),
        })
    }

    /// Pixel size.
    pub fn size(&self) -> Canvas {
        self.size
    }

    /// Clear color.
    pub fn background(&self) -> Rgba8 {
        self.background
    }

    /// Append a layer; ids must be unique.
    pub fn push(&mut self, layer: Layer) -> MemeResult<()> {
        if self.layer(layer.id).is_some() {
            return Err(MemeError::validation(format!(
                "duplicate layer id {}",
                layer.id.0
            )));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// All layers in insertion order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Lookup a layer.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Lookup a layer mutably.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    /// Ids of every chrome layer.
    pub fn chrome_ids(&self) -> Vec<LayerId> {
        self.layers
            .iter()
            .filter(|l| l.is_chrome())
            .map(|l| l.id)
            .collect()
    }

    /// Visible layers in paint order.
    pub fn draw_order(&self) -> Vec<&Layer> {
        let mut out: Vec<&Layer> = self
            .layers
            .iter()
            .filter(|l| !l.presentation.hidden)
            .collect();
        out.sort_by_key(|l| l.z);
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/model.rs"]
mod tests;
