use crate::{foundation::core::Rect, surface::model::ContentMode};

/// Rectangle the image occupies inside `frame` for the given content mode.
///
/// The result may extend past `frame` for [`ContentMode::AspectFill`]; callers clip.
pub fn place_image(frame: Rect, image_w: u32, image_h: u32, mode: ContentMode) -> Rect {
    let (fw, fh) = (frame.width(), frame.height());
    let (iw, ih) = (f64::from(image_w), f64::from(image_h));
    if iw <= 0.0 || ih <= 0.0 || fw <= 0.0 || fh <= 0.0 {
        return Rect::new(frame.x0, frame.y0, frame.x0, frame.y0);
    }

    let scale = match mode {
        ContentMode::ScaleToFill => return frame,
        ContentMode::AspectFit => (fw / iw).min(fh / ih),
        ContentMode::AspectFill => (fw / iw).max(fh / ih),
    };

    let (w, h) = (iw * scale, ih * scale);
    let x = frame.x0 + center_offset(fw, w);
    let y = frame.y0 + center_offset(fh, h);
    Rect::new(x, y, x + w, y + h)
}

fn center_offset(avail: f64, size: f64) -> f64 {
    (avail - size) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/surface/layout.rs"]
mod tests;
