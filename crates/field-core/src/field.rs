use crate::color::DotColor;
use crate::config::{ConfigError, FieldConfig};
use crate::dot::Dot;
use glam::Vec2;
use rand::prelude::*;

/// One drawable link, resolved to surface-space endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    /// Raw stroke opacity from the falloff formula. Pointer links follow
    /// `1.4 - d / connect_radius` and exceed 1.0 close to the pointer;
    /// renderers clamp at draw time.
    pub opacity: f32,
}

/// The whole simulation state for one mounted instance: population, tracked
/// pointer, and surface dimensions. Instances share nothing.
pub struct ParticleField {
    pub config: FieldConfig,
    pub dots: Vec<Dot>,
    pointer: Option<Vec2>,
    width: f32,
    height: f32,
    rng: StdRng,
    reveal_scratch: Vec<usize>,
}

impl ParticleField {
    pub fn new(
        config: FieldConfig,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            config,
            dots: Vec::new(),
            pointer: None,
            width,
            height,
            rng: StdRng::seed_from_u64(seed),
            reveal_scratch: Vec::new(),
        };
        field.regenerate();
        Ok(field)
    }

    /// Population size for a surface: `clamp(floor(W*H / divisor), min, max)`.
    /// Computed in f64 so the floor stays exact at large viewport areas.
    pub fn dot_count_for(config: &FieldConfig, width: f32, height: f32) -> usize {
        let raw = (width as f64 * height as f64 / config.density_divisor).floor();
        let raw = if raw.is_finite() && raw > 0.0 {
            raw as usize
        } else {
            0
        };
        raw.clamp(config.min_dots, config.max_dots)
    }

    fn regenerate(&mut self) {
        let count = Self::dot_count_for(&self.config, self.width, self.height);
        log::debug!(
            "seeding {} dots for {:.0}x{:.0}",
            count,
            self.width,
            self.height
        );
        self.dots.clear();
        self.dots.reserve(count);
        for _ in 0..count {
            let position = Vec2::new(
                self.rng.gen::<f32>() * self.width,
                self.rng.gen::<f32>() * self.height,
            );
            let radius = self.config.dot_radius_min
                + self.rng.gen::<f32>() * (self.config.dot_radius_max - self.config.dot_radius_min);
            let velocity = Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0 * self.config.max_speed,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * self.config.max_speed,
            );
            let color = DotColor::sample(&mut self.rng);
            self.dots.push(Dot {
                position,
                velocity,
                radius,
                color,
            });
        }
    }

    /// Adopt new surface dimensions and fully regenerate the population.
    /// Regenerating rather than rescaling keeps the density uniform; no dot
    /// survives a resize by identity.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Replace the RNG stream and regenerate at the current dimensions, for
    /// deterministic demos and tests.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.regenerate();
    }

    /// Store the latest pointer coordinate verbatim. No smoothing, no queue.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Draw alpha for one dot this frame. `None` means the dot is outside the
    /// visibility radius and is skipped entirely: not drawn and not eligible
    /// for any link.
    pub fn dot_alpha(&self, dot: &Dot) -> Option<f32> {
        if !self.config.pointer_effects {
            return Some(1.0);
        }
        match self.pointer {
            None => Some(1.0),
            Some(p) => {
                let d = dot.position.distance(p);
                if d > self.config.visibility_radius {
                    None
                } else {
                    Some(1.0 - d / self.config.visibility_radius)
                }
            }
        }
    }

    /// Lines from nearby dots to the pointer, collected into `out`.
    pub fn collect_pointer_links(&self, out: &mut Vec<Link>) {
        out.clear();
        if !self.config.pointer_effects {
            return;
        }
        let Some(p) = self.pointer else { return };
        for dot in &self.dots {
            let d = dot.position.distance(p);
            if d > self.config.visibility_radius {
                continue;
            }
            if d < self.config.connect_radius {
                out.push(Link {
                    from: dot.position,
                    to: p,
                    opacity: 1.4 - d / self.config.connect_radius,
                });
            }
        }
    }

    /// Dot-to-dot lines near the pointer, collected into `out`. Eligible dots
    /// sit within both the reveal radius and the visibility radius of the
    /// pointer; every eligible unordered pair closer than `max_dot_distance`
    /// produces exactly one link. The pair scan is quadratic over the
    /// eligible subset, which the population bounds keep affordable; the
    /// prefilter only skips pairs that could never qualify, so the produced
    /// pair set matches a scan over the whole population.
    pub fn collect_dot_links(&mut self, out: &mut Vec<Link>) {
        out.clear();
        if !self.config.pointer_effects {
            return;
        }
        let Some(p) = self.pointer else { return };
        self.reveal_scratch.clear();
        for (i, dot) in self.dots.iter().enumerate() {
            let d = dot.position.distance(p);
            if d <= self.config.visibility_radius && d < self.config.reveal_radius {
                self.reveal_scratch.push(i);
            }
        }
        for (k, &i) in self.reveal_scratch.iter().enumerate() {
            for &j in &self.reveal_scratch[k + 1..] {
                let pair_d = self.dots[i].position.distance(self.dots[j].position);
                if pair_d < self.config.max_dot_distance {
                    out.push(Link {
                        from: self.dots[i].position,
                        to: self.dots[j].position,
                        opacity: 1.0 - pair_d / self.config.max_dot_distance,
                    });
                }
            }
        }
    }

    /// Advance every dot one frame. Runs after drawing, so each frame renders
    /// pre-move positions.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for dot in &mut self.dots {
            dot.advance(w, h);
        }
    }
}
