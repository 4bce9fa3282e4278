//! The particle pool and its per-tick physics.
//!
//! A [`ParticleField`] owns a fixed number of [`Particle`]s. Every tick each
//! particle spins, rises, sways sideways, grows and fades with height. Once
//! it climbs past the ceiling or fades below the epsilon it is reset in
//! place: nothing is allocated or freed after construction.
//!
//! # Tick order
//!
//! For particle `i`, with speed multiplier `s`:
//!
//! 1. `rotation += (spin + delta * rotation_drift) * s`
//! 2. `y += rise * s`
//! 3. `x += (drift + sin(elapsed + i) * sway_amplitude) * s`
//! 4. `scale = 1 + (y - baseline) * growth`
//! 5. `opacity = initial_opacity * (1 - clamp((y - baseline) / rise_span, 0, 1))`
//! 6. recycle if `y > ceiling || opacity < fade_epsilon`
//!
//! Both recycle conditions are kept. The ceiling is an absolute bound for
//! particles that start high; the epsilon catches the rest once they have
//! risen most of a span.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::render::QuadInstance;
use crate::spawn::SpawnContext;

/// Fixed-size pool of smoke particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: FieldConfig,
    spawn: SpawnContext,
}

impl ParticleField {
    /// Build the pool, seeded from `config.seed` or entropy.
    pub fn new(config: FieldConfig) -> Self {
        let spawn = SpawnContext::for_config(&config);
        Self::with_context(config, spawn)
    }

    /// Build the pool with a fixed seed, ignoring `config.seed`.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_context(config, SpawnContext::seeded(seed))
    }

    fn with_context(config: FieldConfig, mut spawn: SpawnContext) -> Self {
        let count = config.pool_size;
        let particles = (0..count)
            .map(|i| spawn.spawn(i, count, &config))
            .collect();

        log::debug!(
            "Particle field created: {} particles, rise span {}",
            count,
            config.rise_span
        );

        Self {
            particles,
            config,
            spawn,
        }
    }

    /// Advance every particle by one tick. Returns how many were recycled.
    pub fn tick(&mut self, delta: f32, elapsed: f32, speed: f32) -> usize {
        let cfg = &self.config;
        let mut recycled = 0;

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.rotation += (p.velocity.spin + delta * cfg.rotation_drift) * speed;
            p.position.y += p.velocity.rise * speed;
            p.position.x +=
                (p.velocity.drift + (elapsed + i as f32).sin() * cfg.sway_amplitude) * speed;

            p.scale = 1.0 + p.displacement() * cfg.growth;
            p.opacity = p.initial_opacity * (1.0 - p.height_progress(cfg.rise_span));

            if p.position.y > cfg.ceiling || p.opacity < cfg.fade_epsilon {
                recycle(p, cfg, &mut self.spawn);
                recycled += 1;
            }
        }

        if recycled > 0 {
            log::trace!("Recycled {} particles", recycled);
        }
        recycled
    }

    /// Reset particle `index` in place as if it had expired.
    ///
    /// Returns `false` if the index is out of range.
    pub fn recycle(&mut self, index: usize) -> bool {
        match self.particles.get_mut(index) {
            Some(p) => {
                recycle(p, &self.config, &mut self.spawn);
                true
            }
            None => false,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to one particle, for hosts that nudge state directly.
    pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Overwrite `out` with one render record per particle, in pool order.
    pub fn write_quads(&self, out: &mut Vec<QuadInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(Particle::to_quad));
    }
}

fn recycle(p: &mut Particle, cfg: &FieldConfig, spawn: &mut SpawnContext) {
    p.baseline -= cfg.reset_offset;
    p.position.y = p.baseline;
    p.position.x = spawn.random_x(cfg.spawn_width);
    p.scale = 1.0;
    p.opacity = p.initial_opacity;
    p.rotation = spawn.random_angle();
}
