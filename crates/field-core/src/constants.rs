// Shared tuning constants for the particle field. All distances are in
// surface pixels (CSS pixels on the web front-end, physical pixels native).

// Population sizing
pub const DENSITY_DIVISOR: f64 = 8000.0; // one dot per this many square pixels
pub const MIN_DOTS: usize = 200;
pub const MAX_DOTS: usize = 3000;

// Dot geometry and motion
pub const DOT_RADIUS_MIN: f32 = 0.5;
pub const DOT_RADIUS_MAX: f32 = 1.3;
pub const MAX_SPEED: f32 = 0.15; // per-axis displacement per frame

// Pointer proximity radii
pub const VISIBILITY_RADIUS: f32 = 800.0; // dots beyond this are not drawn at all
pub const CONNECT_RADIUS: f32 = 100.0; // dot-to-pointer lines
pub const REVEAL_RADIUS: f32 = 300.0; // eligibility for dot-to-dot lines
pub const MAX_DOT_DISTANCE: f32 = 150.0; // pair separation cutoff

// Link stroke styling shared by both front-ends
pub const POINTER_LINK_RGB: [u8; 3] = [120, 180, 255];
pub const DOT_LINK_RGB: [u8; 3] = [100, 149, 237];
pub const POINTER_LINK_WIDTH: f32 = 0.6;
pub const DOT_LINK_WIDTH: f32 = 0.3;

// Ambient drift preset: denser, slightly larger and faster, no pointer
pub const DRIFT_DENSITY_DIVISOR: f64 = 6000.0;
pub const DRIFT_RADIUS_MAX: f32 = 1.7;
pub const DRIFT_MAX_SPEED: f32 = 0.2;
