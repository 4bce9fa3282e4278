//! The seam between the particle field and whatever draws it.
//!
//! The animator owns the particle records; a render adapter owns the GPU (or
//! other) objects. Each frame the animator hands over one [`QuadInstance`] per
//! particle, in pool order, so the instance slot doubles as the handle.

use crate::error::SmokeError;
use crate::textures::TextureData;
use bytemuck::{Pod, Zeroable};

/// Per-quad render data, laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub position: [f32; 3],
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
    pub _padding: [f32; 2],
}

/// Pixel size of a render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Replace each zero dimension with the matching fallback dimension.
    ///
    /// Containers report zero before layout; the effect sizes itself from
    /// the fallback instead of creating an empty surface.
    pub fn or_fallback(self, fallback: [u32; 2]) -> Self {
        Self {
            width: if self.width == 0 { fallback[0] } else { self.width },
            height: if self.height == 0 { fallback[1] } else { self.height },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// A backend that can draw the smoke field.
///
/// Call order is `prepare` once, then any mix of `resize` and `draw`, then
/// `release`. `release` must tolerate being called on an adapter that was
/// never prepared, and everything after `release` must be a no-op.
pub trait RenderAdapter {
    /// Upload the particle texture and allocate room for `pool_size` quads.
    fn prepare(&mut self, texture: &TextureData, pool_size: usize) -> Result<(), SmokeError>;

    /// Resize the output surface. Particle state is not affected.
    fn resize(&mut self, size: SurfaceSize);

    /// Draw one frame.
    fn draw(&mut self, quads: &[QuadInstance]) -> Result<(), SmokeError>;

    /// Release textures, materials and geometry and detach from the surface.
    fn release(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_instance_is_32_bytes() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 32);
    }

    #[test]
    fn test_fallback_replaces_zero_dimensions() {
        let fallback = [500, 400];
        assert_eq!(SurfaceSize::new(0, 0).or_fallback(fallback), SurfaceSize::new(500, 400));
        assert_eq!(SurfaceSize::new(800, 0).or_fallback(fallback), SurfaceSize::new(800, 400));
        assert_eq!(SurfaceSize::new(800, 600).or_fallback(fallback), SurfaceSize::new(800, 600));
    }

    #[test]
    fn test_aspect_never_divides_by_zero() {
        assert_eq!(SurfaceSize::new(300, 0).aspect(), 300.0);
        assert_eq!(SurfaceSize::new(800, 400).aspect(), 2.0);
    }
}
