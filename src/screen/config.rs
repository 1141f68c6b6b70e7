use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    caption::style::CaptionStyle,
    foundation::{
        core::{Canvas, Rect, Rgba8},
        error::{MemeError, MemeResult},
    },
};

/// Size and color of the navigation bar and toolbar.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Height of the top navigation bar in pixels.
    pub navigation_bar_height: f64,
    /// Height of the bottom toolbar in pixels.
    pub toolbar_height: f64,
    /// Fill color of both bars.
    pub color: Rgba8,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            navigation_bar_height: 44.0,
            toolbar_height: 44.0,
            color: Rgba8::opaque(247, 247, 247),
        }
    }
}

/// Placeholders and geometry of the caption fields.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    /// Text shown in the top field after every reset.
    pub top_placeholder: String,
    /// Text shown in the bottom field after every reset.
    pub bottom_placeholder: String,
    /// Inset of both fields from the image view edges.
    pub margin_px: f64,
    /// Height of each field.
    pub field_height_px: f64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            top_placeholder: "TOP".to_string(),
            bottom_placeholder: "BOTTOM".to_string(),
            margin_px: 16.0,
            field_height_px: 56.0,
        }
    }
}

/// Everything needed to set up a [`crate::MemeScreen`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Surface size; exported bitmaps have exactly this size.
    pub surface: Canvas,
    /// Color behind the image view.
    pub background: Rgba8,
    /// Chrome bars.
    pub chrome: ChromeConfig,
    /// Caption fields.
    pub captions: CaptionConfig,
    /// Style shared by both captions.
    pub style: CaptionStyle,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            surface: Canvas {
                width: 375,
                height: 667,
            },
            background: Rgba8::BLACK,
            chrome: ChromeConfig::default(),
            captions: CaptionConfig::default(),
            style: CaptionStyle::default(),
        }
    }
}

/// Frames of every screen element, derived from a [`ScreenConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLayout {
    /// Top chrome bar.
    pub navigation_bar: Rect,
    /// Bottom chrome bar.
    pub toolbar: Rect,
    /// Image view between the bars.
    pub image: Rect,
    /// Top caption field.
    pub top_caption: Rect,
    /// Bottom caption field.
    pub bottom_caption: Rect,
}

impl ScreenConfig {
    /// Check sizes and style are consistent.
    pub fn validate(&self) -> MemeResult<()> {
        self.surface.validate()?;
        self.style.validate()?;

        let (w, h) = (f64::from(self.surface.width), f64::from(self.surface.height));
        let chrome = &self.chrome;
        for (name, v) in [
            ("navigation_bar_height", chrome.navigation_bar_height),
            ("toolbar_height", chrome.toolbar_height),
            ("margin_px", self.captions.margin_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MemeError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        let field_h = self.captions.field_height_px;
        if !field_h.is_finite() || field_h <= 0.0 {
            return Err(MemeError::validation(
                "field_height_px must be finite and > 0",
            ));
        }

        let content_h = h - chrome.navigation_bar_height - chrome.toolbar_height;
        if content_h <= 0.0 {
            return Err(MemeError::validation(
                "chrome bars leave no room for the image view",
            ));
        }
        if 2.0 * self.captions.margin_px >= w {
            return Err(MemeError::validation(
                "caption margin leaves no room for caption text",
            ));
        }
        Ok(())
    }

    /// Compute element frames.
    pub fn layout(&self) -> ScreenLayout {
        let (w, h) = (f64::from(self.surface.width), f64::from(self.surface.height));
        let nav_h = self.chrome.navigation_bar_height;
        let bar_h = self.chrome.toolbar_height;
        let m = self.captions.margin_px;
        let field_h = self.captions.field_height_px;

        let image = Rect::new(0.0, nav_h, w, h - bar_h);
        ScreenLayout {
            navigation_bar: Rect::new(0.0, 0.0, w, nav_h),
            toolbar: Rect::new(0.0, h - bar_h, w, h),
            image,
            top_caption: Rect::new(m, image.y0 + m, w - m, image.y0 + m + field_h),
            bottom_caption: Rect::new(m, image.y1 - m - field_h, w - m, image.y1 - m),
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> MemeResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| MemeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> MemeResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| MemeError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty JSON form.
    pub fn to_json_pretty(&self) -> MemeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MemeError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/screen/config.rs"]
mod tests;
