//! Per-particle state.

use crate::render::QuadInstance;
use glam::Vec3;

/// Per-tick motion rates of a particle, scaled by the speed multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    /// Horizontal drift.
    pub drift: f32,
    /// Vertical rise.
    pub rise: f32,
    /// Rotation rate in radians.
    pub spin: f32,
}

/// One smoke quad.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Position in scene units.
    pub position: Vec3,
    pub velocity: Velocity,
    /// Height of the last (re)spawn; rise progress is measured from here.
    pub baseline: f32,
    /// Opacity at spawn and the ceiling `opacity` never exceeds.
    pub initial_opacity: f32,
    pub opacity: f32,
    /// Rotation about the view axis, radians.
    pub rotation: f32,
    pub scale: f32,
}

impl Particle {
    /// How far the particle has risen since its baseline.
    #[inline]
    pub fn displacement(&self) -> f32 {
        self.position.y - self.baseline
    }

    /// Rise progress in `[0, 1]` over the given span.
    #[inline]
    pub fn height_progress(&self, rise_span: f32) -> f32 {
        (self.displacement() / rise_span).clamp(0.0, 1.0)
    }

    /// Render record for this particle.
    pub fn to_quad(&self) -> QuadInstance {
        QuadInstance {
            position: self.position.to_array(),
            rotation: self.rotation,
            scale: self.scale,
            opacity: self.opacity,
            _padding: [0.0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(y: f32, baseline: f32) -> Particle {
        Particle {
            position: Vec3::new(0.0, y, 0.0),
            velocity: Velocity::default(),
            baseline,
            initial_opacity: 0.1,
            opacity: 0.1,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    #[test]
    fn test_height_progress_clamps() {
        assert_eq!(particle_at(-50.0, 0.0).height_progress(400.0), 0.0);
        assert!((particle_at(100.0, 0.0).height_progress(400.0) - 0.25).abs() < 1e-6);
        assert_eq!(particle_at(900.0, 0.0).height_progress(400.0), 1.0);
    }

    #[test]
    fn test_to_quad_copies_render_state() {
        let mut p = particle_at(12.0, 0.0);
        p.rotation = 1.5;
        p.scale = 1.2;
        let quad = p.to_quad();
        assert_eq!(quad.position, [0.0, 12.0, 0.0]);
        assert_eq!(quad.rotation, 1.5);
        assert_eq!(quad.scale, 1.2);
        assert_eq!(quad.opacity, 0.1);
    }
}
