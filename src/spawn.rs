//! Random draws used when a particle is created or recycled.

use crate::config::FieldConfig;
use crate::particle::{Particle, Velocity};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::ops::Range;

/// Seedable source of spawn values for one particle field.
///
/// ```ignore
/// let mut ctx = SpawnContext::seeded(42);
/// let x = ctx.random_range(-250.0..250.0);
/// ```
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible context.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded if the config carries a seed, entropy otherwise.
    pub fn for_config(config: &FieldConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Random f32 in `range`. An empty range yields its start.
    #[inline]
    pub fn random_range(&mut self, range: Range<f32>) -> f32 {
        if range.start < range.end {
            self.rng.gen_range(range)
        } else {
            range.start
        }
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.rng.gen_range(0.0..TAU)
    }

    /// Random horizontal position inside a band of `width` centred on zero.
    #[inline]
    pub fn random_x(&mut self, width: f32) -> f32 {
        let half = width * 0.5;
        self.random_range(-half..half)
    }

    /// Build particle `index` of `count`, with its baseline staggered so the
    /// pool starts spread over the whole rise instead of all at the bottom.
    pub fn spawn(&mut self, index: usize, count: usize, config: &FieldConfig) -> Particle {
        let baseline = stagger(index, count, &config.stagger);
        let position = Vec3::new(
            self.random_x(config.spawn_width),
            baseline,
            self.random_range(config.depth.clone()),
        );
        let rotation = self.random_angle();
        let opacity = self.random_range(config.opacity.clone());
        let velocity = Velocity {
            drift: self.random_range(config.drift.clone()),
            rise: self.random_range(config.rise.clone()),
            spin: self.random_range(config.spin.clone()),
        };

        Particle {
            position,
            velocity,
            baseline,
            initial_opacity: opacity,
            opacity,
            rotation,
            scale: 1.0,
        }
    }
}

/// Evenly spaced baseline for particle `index` of `count` across `range`.
pub fn stagger(index: usize, count: usize, range: &Range<f32>) -> f32 {
    if count == 0 {
        return range.start;
    }
    let t = index as f32 / count as f32;
    range.start + t * (range.end - range.start)
}
