use std::ops::Deref;

use crate::{
    assets::bitmap::Bitmap,
    foundation::error::{MemeError, MemeResult},
    render::backend::SurfaceRenderer,
    surface::model::{LayerId, Presentation, Surface},
};

/// Scope guard that hides chrome layers and restores their prior presentation on drop.
///
/// Restoration runs on every exit path, including errors and unwinding out of a renderer.
pub struct ChromeGuard<'a> {
    surface: &'a mut Surface,
    saved: Vec<(LayerId, Presentation)>,
}

impl<'a> ChromeGuard<'a> {
    /// Hide each layer in `chrome` and mark it accessibility-hidden.
    ///
    /// Every id is checked before anything is mutated, so an unknown id leaves the surface
    /// untouched.
    pub fn hide(surface: &'a mut Surface, chrome: &[LayerId]) -> MemeResult<Self> {
        if let Some(missing) = chrome.iter().find(|id| surface.layer(**id).is_none()) {
            return Err(MemeError::capture(format!(
                "chrome layer {} is not part of the surface",
                missing.0
            )));
        }

        let mut saved = Vec::with_capacity(chrome.len());
        for &id in chrome {
            if let Some(layer) = surface.layer_mut(id) {
                saved.push((id, layer.presentation));
                layer.presentation = Presentation {
                    hidden: true,
                    accessibility_hidden: true,
                };
            }
        }

        Ok(Self { surface, saved })
    }
}

impl Deref for ChromeGuard<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        self.surface
    }
}

impl Drop for ChromeGuard<'_> {
    fn drop(&mut self) {
        // Reverse order so a duplicated id ends at its first saved state.
        for (id, presentation) in self.saved.drain(..).rev() {
            if let Some(layer) = self.surface.layer_mut(id) {
                layer.presentation = presentation;
            }
        }
    }
}

/// Flatten what is on screen, minus `chrome`, into a bitmap the size of the surface.
///
/// Chrome presentation is restored whether or not the capture succeeds. Any renderer
/// failure is reported as [`MemeError::Capture`].
#[tracing::instrument(skip_all, fields(chrome = chrome.len()))]
pub fn compose<R: SurfaceRenderer + ?Sized>(
    surface: &mut Surface,
    chrome: &[LayerId],
    renderer: &mut R,
) -> MemeResult<Bitmap> {
    let expected = surface.size();

    let captured = {
        let guard = ChromeGuard::hide(surface, chrome)?;
        renderer.capture(&guard)
    };

    let bitmap = captured.map_err(|e| match e {
        MemeError::Capture(_) => e,
        other => MemeError::capture(format!("render failed: {other}")),
    })?;

    if bitmap.size() != expected {
        return Err(MemeError::capture(format!(
            "renderer produced {}x{}, surface is {}x{}",
            bitmap.width(),
            bitmap.height(),
            expected.width,
            expected.height
        )));
    }

    tracing::debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        "composed surface"
    );
    Ok(bitmap)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/engine.rs"]
mod tests;
