use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();

    let bitmap = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(bitmap.width(), 1);
    assert_eq!(bitmap.height(), 1);
    assert_eq!(
        bitmap.as_premul_rgba8(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn from_premul_checks_length() {
    assert!(Bitmap::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::from_premul_rgba8(0, 2, vec![]).is_err());
    assert!(Bitmap::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn encode_png_decodes_to_same_size_and_color() {
    let bitmap = Bitmap::solid(4, 3, Rgba8::opaque(10, 200, 30)).unwrap();
    let png = bitmap.encode_png().unwrap();
    let back = decode_image(&png).unwrap();
    assert_eq!(back.size(), bitmap.size());
    assert_eq!(back.pixel(3, 2), Some([10, 200, 30, 255]));
    assert_eq!(back.pixel(4, 0), None);
}

#[test]
fn clones_share_storage() {
    let a = Bitmap::solid(2, 2, Rgba8::WHITE).unwrap();
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    let c = Bitmap::solid(2, 2, Rgba8::WHITE).unwrap();
    assert!(!a.ptr_eq(&c));
    assert_eq!(a, c);
}
