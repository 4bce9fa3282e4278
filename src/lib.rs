//! # wisp - rising smoke particle field
//!
//! A decorative smoke effect: a fixed pool of textured quads that rise,
//! sway, spin, grow and fade, then reset in place. The speed of the whole
//! field eases between a resting and an active level driven by a single
//! boolean (hover, focus, anything).
//!
//! ## Quick Start
//!
//! ```ignore
//! use wisp::prelude::*;
//!
//! fn main() -> Result<(), SmokeError> {
//!     let config = SmokeConfig::default()
//!         .with_field(FieldConfig::default().with_pool_size(60))
//!         .with_texture(TextureSource::file("assets/smoke.png"));
//!
//!     wisp::window::run(config, WindowOptions::default())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle field
//!
//! [`ParticleField`] is the simulation: plain data, no rendering. It can be
//! ticked headless, which is how the tests drive it.
//!
//! ### Render adapters
//!
//! [`RenderAdapter`] is the seam to whatever draws the quads. The crate
//! ships [`WgpuRenderer`]; anything that can draw textured, rotated,
//! alpha-blended quads can implement the trait.
//!
//! ### Host
//!
//! [`SmokeHost`] binds the field to a container: mount, one call per
//! display frame, resize, unmount. Teardown cancels the frame loop before
//! releasing anything and is safe to call at any time.
//!
//! ## Feature Overview
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `remote` | yes | Fetch the texture from an HTTP(S) URL |

pub mod animator;
pub mod config;
pub mod error;
pub mod field;
pub mod gpu;
pub mod host;
pub mod particle;
pub mod render;
pub mod spawn;
pub mod speed;
pub mod textures;
pub mod time;
pub mod window;

pub use animator::Animator;
pub use config::{FieldConfig, SceneConfig, SmokeConfig, SpeedConfig};
pub use error::{ConfigError, GpuError, HostError, SmokeError, TextureError};
pub use field::ParticleField;
pub use glam::Vec3;
pub use gpu::WgpuRenderer;
pub use host::{CancellationToken, FrameOutcome, FrameScheduler, SmokeHost};
pub use particle::{Particle, Velocity};
pub use render::{QuadInstance, RenderAdapter, SurfaceSize};
pub use speed::{SpeedController, SpeedLevel};
pub use textures::{TextureData, TextureSource};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use wisp::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::Animator;
    pub use crate::config::{FieldConfig, SceneConfig, SmokeConfig, SpeedConfig};
    pub use crate::error::SmokeError;
    pub use crate::field::ParticleField;
    pub use crate::gpu::WgpuRenderer;
    pub use crate::host::{CancellationToken, FrameOutcome, FrameScheduler, SmokeHost};
    pub use crate::particle::{Particle, Velocity};
    pub use crate::render::{QuadInstance, RenderAdapter, SurfaceSize};
    pub use crate::speed::{SpeedController, SpeedLevel};
    pub use crate::textures::{TextureData, TextureSource};
    pub use crate::time::Clock;
    pub use crate::window::WindowOptions;
    pub use crate::Vec3;
}
