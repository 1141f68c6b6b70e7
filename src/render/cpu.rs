use crate::{
    assets::{
        bitmap::Bitmap,
        font::{FontResolver, ResolvedFont},
        text::{TextAlign, TextLayoutEngine},
    },
    caption::style::CaptionStyle,
    foundation::{
        core::Rect,
        error::{MemeError, MemeResult},
    },
    render::backend::SurfaceRenderer,
    surface::{
        layout::place_image,
        model::{ContentMode, Layer, LayerContent, Surface},
    },
};

/// Software renderer built on `vello_cpu`.
///
/// Fonts, shaped-text contexts and the last uploaded image are kept across captures.
#[derive(Default)]
pub struct CpuRenderer {
    fonts: FontResolver,
    text: TextLayoutEngine,
    image_cache: Option<(Bitmap, vello_cpu::Image)>,
}

impl CpuRenderer {
    /// Renderer resolving caption fonts from system fonts.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurfaceRenderer for CpuRenderer {
    fn capture(&mut self, surface: &Surface) -> MemeResult<Bitmap> {
        let size = surface.size();
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| MemeError::capture("surface width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| MemeError::capture("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(surface.background().to_cpu_color());
        ctx.fill_rect(&rect_to_cpu(size.rect()));

        for layer in surface.draw_order() {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.draw_layer(&mut ctx, layer)?;
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Bitmap::from_premul_rgba8(
            size.width,
            size.height,
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

impl CpuRenderer {
    fn draw_layer(&mut self, ctx: &mut vello_cpu::RenderContext, layer: &Layer) -> MemeResult<()> {
        match &layer.content {
            LayerContent::Image { image: None, .. } => Ok(()),
            LayerContent::Image {
                image: Some(image),
                mode,
            } => self.draw_image(ctx, layer.frame, image, *mode),
            LayerContent::Caption { text, style, align } => {
                self.draw_caption(ctx, layer.frame, text, style, *align)
            }
            LayerContent::Chrome { color, .. } => {
                ctx.set_paint(color.to_cpu_color());
                ctx.fill_rect(&rect_to_cpu(layer.frame));
                Ok(())
            }
        }
    }

    fn draw_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: Rect,
        image: &Bitmap,
        mode: ContentMode,
    ) -> MemeResult<()> {
        let paint = self.image_paint_for(image)?;
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));
        let placed = place_image(frame, image.width(), image.height(), mode);
        if placed.width() <= 0.0 || placed.height() <= 0.0 {
            return Ok(());
        }

        ctx.push_clip_layer(&rect_path(frame));
        ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((placed.x0, placed.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(
                    placed.width() / iw,
                    placed.height() / ih,
                ),
        );
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        ctx.pop_layer();
        Ok(())
    }

    fn draw_caption(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        frame: Rect,
        text: &str,
        style: &CaptionStyle,
        align: TextAlign,
    ) -> MemeResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        let font = self.fonts.resolve(&style.font)?;
        let layout = self.text.layout_line(
            text,
            &font,
            style.font.size_px,
            style.fill_color,
            frame.width() as f32,
            align,
        )?;

        let top = frame.y0 + (frame.height() - f64::from(layout.height())) * 0.5;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((frame.x0, top)));

        let font_data = font_data_for(&font);
        let paint = style.glyph_paint();

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font_size = run.run().font_size();
                let glyphs = || {
                    run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                };

                if paint.fill {
                    ctx.set_paint(style.fill_color.to_cpu_color());
                    ctx.glyph_run(&font_data)
                        .font_size(font_size)
                        .fill_glyphs(glyphs());
                }
                if let Some(stroke_px) = paint.stroke_px {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(stroke_px)));
                    ctx.set_paint(style.stroke_color.to_cpu_color());
                    ctx.glyph_run(&font_data)
                        .font_size(font_size)
                        .stroke_glyphs(glyphs());
                }
            }
        }

        Ok(())
    }

    fn image_paint_for(&mut self, image: &Bitmap) -> MemeResult<vello_cpu::Image> {
        if let Some((cached, paint)) = &self.image_cache
            && cached.ptr_eq(image)
        {
            return Ok(paint.clone());
        }

        let pixmap = bitmap_to_pixmap(image)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some((image.clone(), paint.clone()));
        Ok(paint)
    }
}

fn font_data_for(font: &ResolvedFont) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
        font.index,
    )
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn rect_path(r: Rect) -> vello_cpu::kurbo::BezPath {
    use vello_cpu::kurbo::Shape as _;

    rect_to_cpu(r).to_path(0.1)
}

fn bitmap_to_pixmap(image: &Bitmap) -> MemeResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width()
        .try_into()
        .map_err(|_| MemeError::capture("image width exceeds u16"))?;
    let h: u16 = image
        .height()
        .try_into()
        .map_err(|_| MemeError::capture("image height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width() as usize * image.height() as usize);
    for px in image.as_premul_rgba8().chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
