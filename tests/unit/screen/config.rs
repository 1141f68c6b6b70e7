use super::*;

#[test]
fn default_config_is_valid_and_lays_out_inside_surface() {
    let cfg = ScreenConfig::default();
    cfg.validate().unwrap();

    let l = cfg.layout();
    let surface = cfg.surface.rect();
    for r in [
        l.navigation_bar,
        l.toolbar,
        l.image,
        l.top_caption,
        l.bottom_caption,
    ] {
        assert!(surface.contains(r.origin()));
        assert!(r.x1 <= surface.x1 && r.y1 <= surface.y1);
    }
    assert_eq!(l.image.y0, l.navigation_bar.y1);
    assert_eq!(l.image.y1, l.toolbar.y0);
    assert!(l.top_caption.y1 < l.bottom_caption.y0);
}

#[test]
fn json_roundtrip_and_partial_documents() {
    let cfg = ScreenConfig::default();
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(ScreenConfig::from_json_str(&json).unwrap(), cfg);

    let partial = r#"{ "surface": { "width": 200, "height": 300 } }"#;
    let parsed = ScreenConfig::from_json_str(partial).unwrap();
    assert_eq!(parsed.surface.width, 200);
    assert_eq!(parsed.captions.top_placeholder, "TOP");
    assert_eq!(parsed.style, CaptionStyle::default());
}

#[test]
fn invalid_documents_are_rejected() {
    assert!(matches!(
        ScreenConfig::from_json_str("{ not json"),
        Err(MemeError::Serde(_))
    ));

    let too_much_chrome = r#"{
        "surface": { "width": 100, "height": 80 },
        "chrome": { "navigation_bar_height": 40, "toolbar_height": 40 }
    }"#;
    assert!(matches!(
        ScreenConfig::from_json_str(too_much_chrome),
        Err(MemeError::Validation(_))
    ));

    let mut cfg = ScreenConfig::default();
    cfg.captions.margin_px = 200.0;
    assert!(cfg.validate().is_err());

    let mut cfg = ScreenConfig::default();
    cfg.captions.field_height_px = 0.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn from_json_file_reports_missing_file() {
    let err = ScreenConfig::from_json_file(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("open config"));
}
