use super::*;
use crate::{
    foundation::core::{Canvas, Rect, Rgba8},
    surface::model::{ChromeKind, ContentMode, Layer, LayerContent},
};

const NAV: LayerId = LayerId(1);
const TOOLBAR: LayerId = LayerId(2);
const IMAGE: LayerId = LayerId(3);

fn surface() -> Surface {
    let mut s = Surface::new(
        Canvas {
            width: 8,
            height: 6,
        },
        Rgba8::WHITE,
    )
    .unwrap();
    s.push(Layer {
        id: IMAGE,
        frame: Rect::new(0.0, 0.0, 8.0, 6.0),
        z: 0,
        presentation: Presentation::default(),
        content: LayerContent::Image {
            image: None,
            mode: ContentMode::AspectFit,
        },
    })
    .unwrap();
    for (id, kind, y0) in [
        (NAV, ChromeKind::NavigationBar, 0.0),
        (TOOLBAR, ChromeKind::Toolbar, 5.0),
    ] {
        s.push(Layer {
            id,
            frame: Rect::new(0.0, y0, 8.0, y0 + 1.0),
            z: 100,
            presentation: Presentation::default(),
            content: LayerContent::Chrome {
                kind,
                color: Rgba8::BLACK,
            },
        })
        .unwrap();
    }
    s
}

fn presentations(s: &Surface) -> Vec<(LayerId, Presentation)> {
    s.layers().iter().map(|l| (l.id, l.presentation)).collect()
}

/// Records what was visible at capture time.
#[derive(Default)]
struct RecordingRenderer {
    seen_hidden: Vec<(LayerId, Presentation)>,
}

impl SurfaceRenderer for RecordingRenderer {
    fn capture(&mut self, surface: &Surface) -> MemeResult<Bitmap> {
        self.seen_hidden = presentations(surface);
        let size = surface.size();
        Bitmap::solid(size.width, size.height, surface.background())
    }
}

struct FailingRenderer;

impl SurfaceRenderer for FailingRenderer {
    fn capture(&mut self, _surface: &Surface) -> MemeResult<Bitmap> {
        Err(MemeError::font("no faces"))
    }
}

struct WrongSizeRenderer;

impl SurfaceRenderer for WrongSizeRenderer {
    fn capture(&mut self, _surface: &Surface) -> MemeResult<Bitmap> {
        Bitmap::solid(1, 1, Rgba8::WHITE)
    }
}

struct PanickingRenderer;

impl SurfaceRenderer for PanickingRenderer {
    fn capture(&mut self, _surface: &Surface) -> MemeResult<Bitmap> {
        panic!("renderer exploded");
    }
}

#[test]
fn chrome_is_hidden_during_capture_and_restored_after() {
    let mut s = surface();
    let before = presentations(&s);
    let mut r = RecordingRenderer::default();

    let bitmap = compose(&mut s, &[NAV, TOOLBAR], &mut r).unwrap();
    assert_eq!(bitmap.size(), s.size());

    let hidden = Presentation {
        hidden: true,
        accessibility_hidden: true,
    };
    for (id, p) in &r.seen_hidden {
        if *id == IMAGE {
            assert_eq!(*p, Presentation::default());
        } else {
            assert_eq!(*p, hidden);
        }
    }
    assert_eq!(presentations(&s), before);
}

#[test]
fn prior_state_is_restored_not_forced_visible() {
    let mut s = surface();
    s.layer_mut(NAV).unwrap().presentation.accessibility_hidden = true;
    let before = presentations(&s);

    compose(&mut s, &[NAV, TOOLBAR], &mut RecordingRenderer::default()).unwrap();
    assert_eq!(presentations(&s), before);
}

#[test]
fn failed_capture_restores_chrome_and_reports_capture_error() {
    let mut s = surface();
    let before = presentations(&s);

    let err = compose(&mut s, &[NAV, TOOLBAR], &mut FailingRenderer).unwrap_err();
    assert!(matches!(err, MemeError::Capture(_)));
    assert!(err.to_string().contains("no faces"));
    assert_eq!(presentations(&s), before);
}

#[test]
fn panicking_renderer_still_restores_chrome() {
    let mut s = surface();
    let before = presentations(&s);

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = compose(&mut s, &[NAV, TOOLBAR], &mut PanickingRenderer);
    }));
    assert!(result.is_err());
    assert_eq!(presentations(&s), before);
}

#[test]
fn unknown_chrome_id_mutates_nothing() {
    let mut s = surface();
    let before = presentations(&s);

    let err = compose(&mut s, &[NAV, LayerId(99)], &mut RecordingRenderer::default()).unwrap_err();
    assert!(matches!(err, MemeError::Capture(_)));
    assert_eq!(presentations(&s), before);
}

#[test]
fn size_mismatch_is_a_capture_error() {
    let mut s = surface();
    let err = compose(&mut s, &[], &mut WrongSizeRenderer).unwrap_err();
    assert!(matches!(err, MemeError::Capture(_)));
}

#[test]
fn duplicate_chrome_ids_restore_original_state() {
    let mut s = surface();
    let before = presentations(&s);
    compose(&mut s, &[NAV, NAV], &mut RecordingRenderer::default()).unwrap();
    assert_eq!(presentations(&s), before);
}
