use super::*;

fn fixture_font() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("fonts")
        .join("DejaVuSansCondensed-Bold.ttf")
}

fn descriptor(source: Option<PathBuf>) -> FontDescriptor {
    FontDescriptor {
        family: "DejaVu Sans".to_string(),
        size_px: 40.0,
        weight: 700,
        condensed: true,
        source,
    }
}

#[test]
fn explicit_source_is_loaded_and_cached() {
    let mut fonts = FontResolver::new();
    let desc = descriptor(Some(fixture_font()));

    let first = fonts.resolve(&desc).unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(
        first.bytes.as_slice(),
        std::fs::read(fixture_font()).unwrap().as_slice()
    );

    let second = fonts.resolve(&desc).unwrap();
    assert!(Arc::ptr_eq(&first.bytes, &second.bytes));
}

#[test]
fn missing_source_reports_path() {
    let mut fonts = FontResolver::new();
    let err = fonts
        .resolve(&descriptor(Some(PathBuf::from("no/such/font.ttf"))))
        .unwrap_err();
    assert!(err.to_string().contains("no/such/font.ttf"));
}

#[test]
fn descriptor_validation() {
    descriptor(None).validate().unwrap();

    let mut bad = descriptor(None);
    bad.size_px = 0.0;
    assert!(bad.validate().is_err());

    let mut bad = descriptor(None);
    bad.weight = 0;
    assert!(bad.validate().is_err());
}
