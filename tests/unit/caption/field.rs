use super::*;

fn fields() -> CaptionFields {
    CaptionFields::new("TOP", "BOTTOM", Arc::new(CaptionStyle::default()))
}

#[test]
fn initialized_fields_show_placeholders_centered_borderless() {
    let f = fields();
    for (pos, text) in [
        (CaptionPosition::Top, "TOP"),
        (CaptionPosition::Bottom, "BOTTOM"),
    ] {
        let field = f.field(pos);
        assert_eq!(field.text(), text);
        assert_eq!(field.slot().placeholder_text, text);
        assert!(!field.slot().is_editing);
        assert_eq!(field.align(), TextAlign::Center);
        assert!(!field.bordered());
        assert!(field.above_image());
    }
    assert!(Arc::ptr_eq(
        f.field(CaptionPosition::Top).style(),
        f.field(CaptionPosition::Bottom).style()
    ));
}

#[test]
fn edit_begin_clears_instead_of_appending() {
    let mut f = fields();
    f.on_edit_begin(CaptionPosition::Top);
    assert_eq!(f.text(CaptionPosition::Top), "");
    f.on_text_changed(CaptionPosition::Top, "HELLO");
    f.on_submit(CaptionPosition::Top);

    f.on_edit_begin(CaptionPosition::Top);
    assert_eq!(f.text(CaptionPosition::Top), "");
    assert_eq!(f.focused(), Some(CaptionPosition::Top));
}

#[test]
fn focus_is_exclusive() {
    let mut f = fields();
    f.on_edit_begin(CaptionPosition::Top);
    f.on_edit_begin(CaptionPosition::Bottom);
    assert_eq!(f.focused(), Some(CaptionPosition::Bottom));
    assert!(!f.field(CaptionPosition::Top).slot().is_editing);
}

#[test]
fn submit_accepts_empty_text() {
    let mut f = fields();
    f.on_edit_begin(CaptionPosition::Bottom);
    assert_eq!(f.on_submit(CaptionPosition::Bottom), SubmitOutcome::Accepted);
    assert_eq!(f.text(CaptionPosition::Bottom), "");
    assert_eq!(f.focused(), None);
}

#[test]
fn reset_restores_placeholders_and_is_idempotent() {
    let mut f = fields();
    f.on_edit_begin(CaptionPosition::Top);
    f.on_text_changed(CaptionPosition::Top, "changed");
    f.reset();
    let once = (
        f.field(CaptionPosition::Top).slot().clone(),
        f.field(CaptionPosition::Bottom).slot().clone(),
    );
    f.reset();
    let twice = (
        f.field(CaptionPosition::Top).slot().clone(),
        f.field(CaptionPosition::Bottom).slot().clone(),
    );
    assert_eq!(once, twice);
    assert_eq!(once.0.current_text, "TOP");
    assert!(!once.0.is_editing);
}

#[test]
fn initialize_rebinds_one_field() {
    let mut f = fields();
    let style = Arc::new(CaptionStyle {
        stroke_width: 0.0,
        ..CaptionStyle::default()
    });
    f.initialize(CaptionPosition::Bottom, "BELOW", Arc::clone(&style));
    assert_eq!(f.text(CaptionPosition::Bottom), "BELOW");
    assert!(Arc::ptr_eq(f.field(CaptionPosition::Bottom).style(), &style));
    assert_eq!(f.text(CaptionPosition::Top), "TOP");
}
