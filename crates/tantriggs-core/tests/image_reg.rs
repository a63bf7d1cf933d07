//! Image container regression test
//!
//! Exercises construction, pixel access, arithmetic and the min/max
//! quantization used for writing normalized images.

use tantriggs_core::{Error, GrayImage, Image};
use tantriggs_test::RegParams;

#[test]
fn image_reg() {
    let mut rp = RegParams::new("image");

    // --- Test 1: construction and access ---
    let img = Image::from_fn(5, 3, |x, y| (x * 10 + y) as f64);
    rp.compare_values(5.0, img.width() as f64, 0.0);
    rp.compare_values(3.0, img.height() as f64, 0.0);
    rp.compare_values(42.0, img.get_pixel(4, 2).unwrap(), 0.0);
    rp.check(
        matches!(img.get_pixel(5, 0), Err(Error::IndexOutOfBounds { .. })),
        "out-of-bounds read rejected",
    );
    rp.check(
        Image::from_data(2, 2, vec![0.0; 3]).is_err(),
        "wrong data length rejected",
    );

    // --- Test 2: arithmetic and statistics ---
    let shifted = img.map(|v| v + 1.5);
    let diff = shifted.sub(&img).unwrap();
    rp.compare_images(&Image::new_with_value(5, 3, 1.5), &diff, 0.0);
    rp.check(
        matches!(img.sub(&Image::new(3, 5)), Err(Error::IncompatibleSizes(..))),
        "size mismatch rejected",
    );
    rp.compare_values(0.0, img.min_value().unwrap(), 0.0);
    rp.compare_values(42.0, img.max_value().unwrap(), 0.0);

    // --- Test 3: quantization by own range ---
    let signed = Image::from_data(5, 1, vec![-9.99, -5.0, 0.0, 5.0, 9.99]).unwrap();
    let gray = signed.to_gray_scaled();
    rp.compare_values(0.0, gray.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(255.0, gray.get_pixel(4, 0).unwrap() as f64, 0.0);
    let mid = gray.get_pixel(2, 0).unwrap() as f64;
    rp.compare_values(127.0, mid, 1.0);
    rp.check(
        gray.data().windows(2).all(|w| w[0] <= w[1]),
        "quantization preserves order",
    );

    // --- Test 4: constant and empty images quantize to zeros ---
    let flat = Image::new_with_value(4, 4, 3.25).to_gray_scaled();
    rp.compare_gray(&GrayImage::new(4, 4), &flat);
    let empty = Image::new(0, 7).to_gray_scaled();
    rp.check(empty.is_empty(), "empty image stays empty");

    // --- Test 5: round trip through 8 bits ---
    let gray = GrayImage::from_fn(16, 16, |x, y| (x * 16 + y) as u8);
    let back = Image::from_gray(&gray).to_gray_scaled();
    rp.compare_gray(&gray, &back);

    assert!(rp.cleanup(), "image regression test failed");
}
