use rand::Rng;

/// Opaque RGB color assigned to a dot at creation. Draw alpha is computed
/// per frame from pointer distance and never stored here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DotColor {
    /// Fair coin flip between the warm (red-leaning) and cool (blue-leaning)
    /// families.
    pub fn sample(rng: &mut impl Rng) -> Self {
        if rng.gen::<f32>() < 0.5 {
            Self::sample_warm(rng)
        } else {
            Self::sample_cool(rng)
        }
    }

    pub fn sample_warm(rng: &mut impl Rng) -> Self {
        Self {
            r: 255,
            g: rng.gen_range(0..100u8),
            b: rng.gen_range(0..100u8),
        }
    }

    pub fn sample_cool(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.gen_range(0..100u8),
            g: rng.gen_range(0..100u8),
            b: 255,
        }
    }

    pub fn is_warm(&self) -> bool {
        self.r == 255
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
