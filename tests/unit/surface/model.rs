use super::*;

fn chrome(id: u32, z: i32) -> Layer {
    Layer {
        id: LayerId(id),
        frame: Rect::new(0.0, 0.0, 10.0, 2.0),
        z,
        presentation: Presentation::default(),
        content: LayerContent::Chrome {
            kind: ChromeKind::Toolbar,
            color: Rgba8::BLACK,
        },
    }
}

fn image(id: u32, z: i32) -> Layer {
    Layer {
        id: LayerId(id),
        frame: Rect::new(0.0, 0.0, 10.0, 10.0),
        z,
        presentation: Presentation::default(),
        content: LayerContent::Image {
            image: None,
            mode: ContentMode::AspectFit,
        },
    }
}

fn surface() -> Surface {
    Surface::new(
        Canvas {
            width: 10,
            height: 10,
        },
        Rgba8::WHITE,
    )
    .unwrap()
}

#[test]
fn push_rejects_duplicate_ids() {
    let mut s = surface();
    s.push(image(1, 0)).unwrap();
    assert!(s.push(chrome(1, 5)).is_err());
    assert_eq!(s.layers().len(), 1);
}

#[test]
fn draw_order_sorts_by_z_and_skips_hidden() {
    let mut s = surface();
    s.push(chrome(1, 10)).unwrap();
    s.push(image(2, 0)).unwrap();
    s.push(chrome(3, 10)).unwrap();

    let order: Vec<u32> = s.draw_order().iter().map(|l| l.id.0).collect();
    assert_eq!(order, vec![2, 1, 3]);

    s.layer_mut(LayerId(1)).unwrap().presentation.hidden = true;
    let order: Vec<u32> = s.draw_order().iter().map(|l| l.id.0).collect();
    assert_eq!(order, vec![2, 3]);
}

#[test]
fn chrome_ids_lists_only_chrome() {
    let mut s = surface();
    s.push(chrome(1, 10)).unwrap();
    s.push(image(2, 0)).unwrap();
    s.push(chrome(3, 10)).unwrap();
    assert_eq!(s.chrome_ids(), vec![LayerId(1), LayerId(3)]);
}

#[test]
fn new_validates_size() {
    assert!(
        Surface::new(
            Canvas {
                width: 0,
                height: 4
            },
            Rgba8::WHITE
        )
        .is_err()
    );
}
