//! Particle field bound to a render adapter.

use crate::config::FieldConfig;
use crate::error::SmokeError;
use crate::field::ParticleField;
use crate::render::{QuadInstance, RenderAdapter};

/// Owns a [`ParticleField`] and the adapter that draws it.
///
/// `tick` advances the physics and submits the frame; `dispose` releases the
/// adapter's resources exactly once. Both are no-ops after disposal.
pub struct Animator<R: RenderAdapter> {
    field: ParticleField,
    renderer: R,
    quads: Vec<QuadInstance>,
    disposed: bool,
}

impl<R: RenderAdapter> Animator<R> {
    /// Build the pool from `config` and bind it to an already-prepared adapter.
    pub fn new(config: FieldConfig, renderer: R) -> Self {
        Self::from_field(ParticleField::new(config), renderer)
    }

    pub fn from_field(field: ParticleField, renderer: R) -> Self {
        let quads = Vec::with_capacity(field.len());
        Self {
            field,
            renderer,
            quads,
            disposed: false,
        }
    }

    /// Advance one frame and draw it. Returns the number of recycled particles.
    pub fn tick(&mut self, delta: f32, elapsed: f32, speed: f32) -> Result<usize, SmokeError> {
        if self.disposed {
            return Ok(0);
        }
        let recycled = self.field.tick(delta, elapsed, speed);
        self.field.write_quads(&mut self.quads);
        self.renderer.draw(&self.quads)?;
        Ok(recycled)
    }

    /// Release render resources. Returns `false` if already disposed.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        self.renderer.release();
        log::debug!("Animator disposed ({} particles)", self.field.len());
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: RenderAdapter> Drop for Animator<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}
