// Host-side tests for the pure paint helpers. The crate body is wasm-only,
// so the platform-free module is included directly.

mod helpers {
    include!("../src/paint/helpers.rs");
}

use helpers::{clamp_opacity, css_rgba};

#[test]
fn opacity_clamps_into_drawable_range() {
    // Pointer links report 1.4 - d/r, which exceeds 1 near the pointer
    assert_eq!(clamp_opacity(1.4), 1.0);
    assert_eq!(clamp_opacity(-0.2), 0.0);
    assert!((clamp_opacity(0.37) - 0.37).abs() < 1e-6);
}

#[test]
fn css_rgba_formats_channels_and_opacity() {
    assert_eq!(css_rgba([120, 180, 255], 1.0), "rgba(120,180,255,1.000)");
    assert_eq!(css_rgba([100, 149, 237], 0.5), "rgba(100,149,237,0.500)");
    assert_eq!(css_rgba([255, 0, 0], 0.0), "rgba(255,0,0,0.000)");
}

#[test]
fn css_rgba_clamps_out_of_range_opacity() {
    assert_eq!(css_rgba([0, 0, 255], 1.4), "rgba(0,0,255,1.000)");
    assert_eq!(css_rgba([0, 0, 255], -1.0), "rgba(0,0,255,0.000)");
}
