use super::*;

const FRAME: Rect = Rect::new(0.0, 44.0, 375.0, 623.0);

#[test]
fn aspect_fit_letterboxes_wide_image() {
    let r = place_image(FRAME, 400, 300, ContentMode::AspectFit);
    assert!((r.width() - 375.0).abs() < 1e-9);
    assert!((r.height() - 281.25).abs() < 1e-9);
    assert!((r.x0 - 0.0).abs() < 1e-9);
    let expected_y = 44.0 + (579.0 - 281.25) / 2.0;
    assert!((r.y0 - expected_y).abs() < 1e-9);
}

#[test]
fn aspect_fill_covers_frame() {
    let r = place_image(FRAME, 400, 300, ContentMode::AspectFill);
    assert!((r.height() - 579.0).abs() < 1e-9);
    assert!(r.width() > FRAME.width());
    assert!((r.center().x - FRAME.center().x).abs() < 1e-9);
}

#[test]
fn scale_to_fill_is_the_frame() {
    assert_eq!(place_image(FRAME, 1, 7, ContentMode::ScaleToFill), FRAME);
}

#[test]
fn degenerate_inputs_collapse_to_origin() {
    let r = place_image(FRAME, 0, 300, ContentMode::AspectFit);
    assert_eq!(r.width(), 0.0);
    assert_eq!(r.height(), 0.0);
}
