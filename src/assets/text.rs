use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::font::ResolvedFont,
    foundation::{
        core::Rgba8,
        error::{MemeError, MemeResult},
    },
};

/// Horizontal alignment of a caption inside its field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush with the leading edge.
    Start,
    /// Centered in the field width.
    #[default]
    Center,
    /// Flush with the trailing edge.
    End,
}

impl TextAlign {
    fn to_parley(self) -> parley::Alignment {
        match self {
            Self::Start => parley::Alignment::Start,
            Self::Center => parley::Alignment::Center,
            Self::End => parley::Alignment::End,
        }
    }
}

/// Stateful helper for building Parley text layouts from resolved font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    faces: HashMap<(usize, u32), RegisteredFace>,
}

/// A face registered with the layout engine's font collection.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredFace {
    /// Family name to put in the font stack.
    pub family: String,
    /// Weight of the face.
    pub weight: parley::FontWeight,
    /// Width (stretch) of the face.
    pub width: parley::FontWidth,
    /// Slant of the face.
    pub style: parley::FontStyle,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    /// Register `font` (once per byte buffer) and return the family and attributes of the
    /// face at `font.index`, so shaping picks the same face the renderer draws.
    pub fn face_for(&mut self, font: &ResolvedFont) -> MemeResult<RegisteredFace> {
        let key = (Arc::as_ptr(&font.bytes) as usize, font.index);
        if let Some(face) = self.faces.get(&key) {
            return Ok(face.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let (family_id, info) = families
            .iter()
            .find_map(|(id, infos)| {
                infos
                    .iter()
                    .find(|info| info.index() == font.index)
                    .map(|info| (*id, info))
            })
            .ok_or_else(|| {
                MemeError::font(format!(
                    "font bytes contain no face with index {}",
                    font.index
                ))
            })?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::font("registered font family has no name"))?
            .to_string();

        let face = RegisteredFace {
            family,
            weight: info.weight(),
            width: info.width(),
            style: info.style(),
        };
        self.faces.insert(key, face.clone());
        Ok(face)
    }

    /// Shape `text` into lines no wider than `max_width_px`, aligned within that width.
    pub fn layout_line(
        &mut self,
        text: &str,
        font: &ResolvedFont,
        size_px: f32,
        brush: Rgba8,
        max_width_px: f32,
        align: TextAlign,
    ) -> MemeResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MemeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let face = self.face_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(face.family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(face.weight));
        builder.push_default(parley::style::StyleProperty::FontWidth(face.width));
        builder.push_default(parley::style::StyleProperty::FontStyle(face.style));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        let width = max_width_px.max(1.0);
        layout.break_all_lines(Some(width));
        layout.align(
            Some(width),
            align.to_parley(),
            parley::AlignmentOptions::default(),
        );

        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
