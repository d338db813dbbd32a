// Pure styling helpers, kept platform-free so host-side tests can cover them.

/// Clamp a raw stroke opacity into the drawable range. Pointer-link opacity
/// follows `1.4 - d / connect_radius` and exceeds 1 close to the pointer.
#[inline]
pub fn clamp_opacity(raw: f32) -> f64 {
    raw.clamp(0.0, 1.0) as f64
}

/// CSS `rgba()` string for an RGB triple at the given opacity.
#[inline]
pub fn css_rgba(rgb: [u8; 3], opacity: f32) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        rgb[0],
        rgb[1],
        rgb[2],
        clamp_opacity(opacity)
    )
}
