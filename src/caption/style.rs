use crate::{
    assets::font::FontDescriptor,
    foundation::{
        core::Rgba8,
        error::{MemeError, MemeResult},
    },
};

/// Immutable look shared by both captions.
///
/// `stroke_width` is a percentage of the font size. A negative value strokes and fills the
/// glyphs, a positive value only strokes them, and zero only fills them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionStyle {
    /// Outline color.
    pub stroke_color: Rgba8,
    /// Glyph interior color.
    pub fill_color: Rgba8,
    /// Font request.
    pub font: FontDescriptor,
    /// Outline width as a percentage of the font size (sign selects the paint mode).
    pub stroke_width: f32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba8::BLACK,
            fill_color: Rgba8::WHITE,
            font: FontDescriptor {
                family: "HelveticaNeue-CondensedBlack".to_string(),
                size_px: 40.0,
                weight: 900,
                condensed: true,
                source: None,
            },
            stroke_width: -3.0,
        }
    }
}

/// How glyphs are painted for a given style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphPaint {
    /// Fill glyph interiors with the fill color.
    pub fill: bool,
    /// Outline width in pixels, if glyphs are stroked.
    pub stroke_px: Option<f32>,
}

impl CaptionStyle {
    /// Check font and stroke parameters.
    pub fn validate(&self) -> MemeResult<()> {
        self.font.validate()?;
        if !self.stroke_width.is_finite() {
            return Err(MemeError::validation("caption stroke_width must be finite"));
        }
        Ok(())
    }

    /// Resolve the paint mode and stroke width in pixels.
    pub fn glyph_paint(&self) -> GlyphPaint {
        let stroke_px = (self.stroke_width.abs() / 100.0) * self.font.size_px;
        GlyphPaint {
            fill: self.stroke_width <= 0.0,
            stroke_px: (self.stroke_width != 0.0 && stroke_px > 0.0).then_some(stroke_px),
        }
    }
}
