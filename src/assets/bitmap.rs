use std::{io::Cursor, path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::{Canvas, Rgba8},
    error::{MemeError, MemeResult},
    math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

#[derive(Clone, PartialEq, Eq)]
/// Raster image in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so cloning a bitmap into a [`crate::MemeRecord`] is cheap.
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba8_premul.len())
            .finish()
    }
}

impl Bitmap {
    /// Wrap premultiplied RGBA8 bytes, checking the length matches `width * height * 4`.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> MemeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::validation("bitmap width/height must be > 0"));
        }
        if rgba8_premul.len() != width as usize * height as usize * 4 {
            return Err(MemeError::validation("bitmap byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Bitmap filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> MemeResult<Self> {
        let px = color.to_premul();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as a [`Canvas`].
    pub fn size(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn as_premul_rgba8(&self) -> &[u8] {
        self.rgba8_premul.as_slice()
    }

    /// Premultiplied `[r, g, b, a]` at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba8_premul[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Whether both bitmaps share the same pixel allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8_premul, &other.rgba8_premul)
    }

    /// Convert to a straight-alpha [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> MemeResult<image::RgbaImage> {
        let mut straight = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| MemeError::validation("bitmap buffer does not match its dimensions"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> MemeResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

/// Decode encoded image bytes and convert to a premultiplied [`Bitmap`].
pub fn decode_image(bytes: &[u8]) -> MemeResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Bitmap::from_premul_rgba8(width, height, rgba8_premul)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> MemeResult<Bitmap> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read image bytes from '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bitmap.rs"]
mod tests;
