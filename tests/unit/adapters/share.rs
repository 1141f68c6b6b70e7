use super::*;
use crate::foundation::core::Rgba8;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "memeforge_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn writes_png_and_creates_parent_dirs() {
    let tmp = temp_dir("share_writes");
    let out = tmp.join("nested").join("meme.png");
    let mut gateway = FileShareGateway::new(&out);

    let image = Bitmap::solid(3, 2, Rgba8::opaque(1, 2, 3)).unwrap();
    let done = gateway.share(&image).unwrap();
    assert!(done.succeeded);
    assert!(!gateway.was_dismissed());
    gateway.dismiss();
    assert!(gateway.was_dismissed());

    let back = crate::assets::bitmap::load_image(&out).unwrap();
    assert_eq!(back.size(), image.size());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn existing_target_is_declined_without_overwrite() {
    let tmp = temp_dir("share_declines");
    std::fs::create_dir_all(&tmp).unwrap();
    let out = tmp.join("meme.png");
    std::fs::write(&out, b"keep me").unwrap();

    let image = Bitmap::solid(1, 1, Rgba8::WHITE).unwrap();
    let mut gateway = FileShareGateway::new(&out);
    assert!(!gateway.share(&image).unwrap().succeeded);
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");

    let mut gateway = FileShareGateway::new(&out).overwrite(true);
    assert!(gateway.share(&image).unwrap().succeeded);
    assert_ne!(std::fs::read(&out).unwrap(), b"keep me");

    std::fs::remove_dir_all(&tmp).ok();
}
