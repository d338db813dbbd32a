use crate::constants::{
    CONNECT_RADIUS, DENSITY_DIVISOR, DOT_RADIUS_MAX, DOT_RADIUS_MIN, DRIFT_DENSITY_DIVISOR,
    DRIFT_MAX_SPEED, DRIFT_RADIUS_MAX, MAX_DOTS, MAX_DOT_DISTANCE, MAX_SPEED, MIN_DOTS,
    REVEAL_RADIUS, VISIBILITY_RADIUS,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("density divisor must be positive, got {0}")]
    NonPositiveDivisor(f64),
    #[error("min_dots {min} exceeds max_dots {max}")]
    EmptyCountRange { min: usize, max: usize },
    #[error("dot radius band [{min}, {max}) is empty")]
    EmptyRadiusBand { min: f32, max: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositiveRadius { name: &'static str, value: f32 },
}

/// Tuning knobs for one field instance. Each option affects exactly one of
/// the seeding or per-frame formulas; there are no interaction effects.
#[derive(Clone, Debug)]
pub struct FieldConfig {
    /// Square pixels of viewport area per dot.
    pub density_divisor: f64,
    pub min_dots: usize,
    pub max_dots: usize,
    /// Draw radius band, sampled uniformly at creation.
    pub dot_radius_min: f32,
    pub dot_radius_max: f32,
    /// Per-axis velocity magnitude bound; components are uniform in
    /// `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub visibility_radius: f32,
    pub connect_radius: f32,
    pub reveal_radius: f32,
    pub max_dot_distance: f32,
    /// When false every dot draws at full alpha and no links are computed,
    /// regardless of pointer state (the ambient drift variant).
    pub pointer_effects: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density_divisor: DENSITY_DIVISOR,
            min_dots: MIN_DOTS,
            max_dots: MAX_DOTS,
            dot_radius_min: DOT_RADIUS_MIN,
            dot_radius_max: DOT_RADIUS_MAX,
            max_speed: MAX_SPEED,
            visibility_radius: VISIBILITY_RADIUS,
            connect_radius: CONNECT_RADIUS,
            reveal_radius: REVEAL_RADIUS,
            max_dot_distance: MAX_DOT_DISTANCE,
            pointer_effects: true,
        }
    }
}

impl FieldConfig {
    /// Dormant background variant: denser, a little larger and faster, and
    /// entirely pointer-blind. `min_dots` drops to 0 so tiny surfaces stay
    /// sparse; `max_dots` keeps the allocation bound.
    pub fn ambient_drift() -> Self {
        Self {
            density_divisor: DRIFT_DENSITY_DIVISOR,
            min_dots: 0,
            dot_radius_max: DRIFT_RADIUS_MAX,
            max_speed: DRIFT_MAX_SPEED,
            pointer_effects: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.density_divisor > 0.0) {
            return Err(ConfigError::NonPositiveDivisor(self.density_divisor));
        }
        if self.min_dots > self.max_dots {
            return Err(ConfigError::EmptyCountRange {
                min: self.min_dots,
                max: self.max_dots,
            });
        }
        if !(self.dot_radius_min > 0.0) || self.dot_radius_max < self.dot_radius_min {
            return Err(ConfigError::EmptyRadiusBand {
                min: self.dot_radius_min,
                max: self.dot_radius_max,
            });
        }
        for (name, value) in [
            ("visibility_radius", self.visibility_radius),
            ("connect_radius", self.connect_radius),
            ("reveal_radius", self.reveal_radius),
            ("max_dot_distance", self.max_dot_distance),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveRadius { name, value });
            }
        }
        Ok(())
    }
}
