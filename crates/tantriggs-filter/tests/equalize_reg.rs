//! Contrast equalization regression test
//!
//! Checks the alpha-norms, the open output bound, zero stability and the
//! monotonicity of the tanh squashing.

use tantriggs_core::Image;
use tantriggs_filter::{alpha_norm, equalize_contrast, soft_clip};
use tantriggs_test::RegParams;

#[test]
fn equalize_reg() {
    let mut rp = RegParams::new("equalize");

    // --- Test 1: alpha-norm of known sets ---
    rp.compare_values(3.0, alpha_norm([3.0, -3.0, 3.0], 0.1).unwrap(), 1e-9);
    rp.compare_values(2.5, alpha_norm([1.0, 4.0], 1.0).unwrap(), 1e-12);
    rp.compare_values(0.0, alpha_norm([0.0; 4], 0.1).unwrap(), 0.0);
    rp.check(alpha_norm(std::iter::empty(), 0.1).is_none(), "empty set has no norm");

    // --- Test 2: soft clip bound and monotonicity ---
    let threshold = 10.0;
    let mut prev = f64::NEG_INFINITY;
    let mut monotone = true;
    let mut bounded = true;
    for i in -4000..=4000 {
        let x = i as f64 * 0.05;
        let y = soft_clip(x, threshold);
        monotone &= y >= prev;
        bounded &= y > -threshold && y < threshold;
        prev = y;
    }
    rp.check(monotone, "soft clip is non-decreasing");
    rp.check(bounded, "soft clip stays inside the open bound");
    rp.check(soft_clip(1e308, threshold) < threshold, "saturated value below threshold");

    // --- Test 3: zero image ---
    let zeros = Image::new(7, 5);
    let out = equalize_contrast(&zeros, 0.1, threshold).expect("equalize zeros");
    rp.compare_images(&zeros, &out, 0.0);
    rp.check(out.data().iter().all(|v| !v.is_nan()), "no NaN from zero image");

    // --- Test 4: outliers are squashed, everything bounded ---
    let img = Image::from_fn(16, 16, |x, y| {
        let v = (x as f64 - 7.5) * 0.3 + (y as f64 - 7.5) * 0.1;
        if (x, y) == (3, 3) { 5e4 } else { v }
    });
    let out = equalize_contrast(&img, 0.1, threshold).expect("equalize");
    rp.compare_values(256.0, out.len() as f64, 0.0);
    let max_abs = out.data().iter().fold(0.0f64, |m, v| m.max(v.abs()));
    rp.check(max_abs < threshold, "max |p| below threshold");
    let outlier = out.get_pixel(3, 3).unwrap();
    rp.check(outlier == out.max_value().unwrap(), "outlier remains the maximum");
    eprintln!("  max |p| = {}, outlier -> {}", max_abs, outlier);

    // --- Test 5: trimmed norm ignores samples above threshold ---
    // [1, 1, 1, 97], alpha 1: a = 25, then a' is taken over the three
    // samples equal to 0.04 only, which restores them to 1.
    let spiky = Image::from_data(4, 1, vec![1.0, 1.0, 1.0, 97.0]).unwrap();
    let spiky_out = equalize_contrast(&spiky, 1.0, 1.0).expect("equalize spiky");
    let expected = Image::from_data(
        4,
        1,
        vec![
            soft_clip(1.0, 1.0),
            soft_clip(1.0, 1.0),
            soft_clip(1.0, 1.0),
            soft_clip(97.0, 1.0),
        ],
    )
    .unwrap();
    rp.compare_images(&expected, &spiky_out, 1e-12);
    eprintln!("  spiky -> {:?}", spiky_out.data());

    // --- Test 6: determinism ---
    let again = equalize_contrast(&img, 0.1, threshold).expect("equalize again");
    rp.compare_images(&out, &again, 0.0);

    assert!(rp.cleanup(), "equalize regression test failed");
}
