//! Binding the animator to a container's lifecycle.
//!
//! [`SmokeHost`] is what a page or window embeds. It owns everything that
//! lives as long as the effect is on screen (the animator, the speed
//! controller, the frame clock, the current surface size) and exposes the
//! four lifecycle hooks a container provides:
//!
//! | Hook | Method |
//! |------|--------|
//! | mounted | [`SmokeHost::mount`] |
//! | display refresh | [`SmokeHost::frame`] |
//! | resized | [`SmokeHost::resize`] |
//! | unmounted | [`SmokeHost::unmount`] |
//!
//! The frame loop is cooperative: each `frame` call does one tick and asks
//! the [`FrameScheduler`] for the next one. `unmount` cancels the
//! [`CancellationToken`] before releasing anything, so a frame that was
//! already queued when teardown ran finds the token cancelled and returns
//! without touching freed state.
//!
//! ```ignore
//! let mut host = SmokeHost::new(SmokeConfig::default());
//! host.mount(container_size, |size, scene| MyRenderer::new(size, scene))?;
//!
//! // each display refresh:
//! host.frame(&mut scheduler)?;
//!
//! // pointer enters the hero card:
//! host.set_active(true);
//!
//! host.unmount();
//! ```

use crate::animator::Animator;
use crate::config::{SceneConfig, SmokeConfig};
use crate::error::{HostError, SmokeError, TextureError};
use crate::field::ParticleField;
use crate::render::{RenderAdapter, SurfaceSize};
use crate::speed::SpeedController;
use crate::textures::{TextureData, TextureSource};
use crate::time::Clock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag for one run of the frame loop.
///
/// Clones observe the same flag. Once cancelled it stays cancelled; a new
/// mount hands out a fresh token.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// The host's "call me again next frame" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self()
    }
}

/// What a frame call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Ticked, drew and requested the next frame.
    Continue,
    /// The loop is not running; nothing was touched and nothing rescheduled.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Mounted,
    Unmounted,
}

/// Lifecycle owner for one smoke effect.
pub struct SmokeHost<R: RenderAdapter> {
    config: SmokeConfig,
    animator: Option<Animator<R>>,
    speed: SpeedController,
    clock: Clock,
    cancel: CancellationToken,
    size: SurfaceSize,
    phase: Phase,
}

impl<R: RenderAdapter> SmokeHost<R> {
    pub fn new(config: SmokeConfig) -> Self {
        let speed = SpeedController::new(config.speed.clone());
        let [width, height] = config.scene.fallback_size;
        let cancel = CancellationToken::new();
        cancel.cancel();

        Self {
            config,
            animator: None,
            speed,
            clock: Clock::new(),
            cancel,
            size: SurfaceSize::new(width, height),
            phase: Phase::Idle,
        }
    }

    /// Mount against a container of `measured` size.
    ///
    /// Zero dimensions fall back to `scene.fallback_size`. The config is
    /// validated first. The factory builds the render adapter at the
    /// effective size; the configured texture is then loaded (remote fetches
    /// bounded by `texture_timeout_secs`) and uploaded. If any step fails,
    /// whatever was built is released and the host stays unmounted.
    pub fn mount<F>(
        &mut self,
        measured: SurfaceSize,
        make_renderer: F,
    ) -> Result<CancellationToken, SmokeError>
    where
        F: FnOnce(SurfaceSize, &SceneConfig) -> Result<R, SmokeError>,
    {
        let timeout = self.config.texture_timeout();
        self.mount_inner(measured, make_renderer, |source| {
            source.load_with_timeout(timeout)
        })
    }

    /// Mount with the outcome of a texture load that already ran, e.g. via
    /// [`TextureSource::spawn_load`]. A failed load is reported exactly as
    /// [`mount`](Self::mount) reports it.
    pub fn mount_loaded<F>(
        &mut self,
        measured: SurfaceSize,
        loaded: Result<TextureData, TextureError>,
        make_renderer: F,
    ) -> Result<CancellationToken, SmokeError>
    where
        F: FnOnce(SurfaceSize, &SceneConfig) -> Result<R, SmokeError>,
    {
        self.mount_inner(measured, make_renderer, move |_| loaded)
    }

    fn mount_inner<F, L>(
        &mut self,
        measured: SurfaceSize,
        make_renderer: F,
        load: L,
    ) -> Result<CancellationToken, SmokeError>
    where
        F: FnOnce(SurfaceSize, &SceneConfig) -> Result<R, SmokeError>,
        L: FnOnce(&TextureSource) -> Result<TextureData, TextureError>,
    {
        self.preflight()?;
        let size = self.effective_size(measured);
        let mut renderer = make_renderer(size, &self.config.scene)?;

        let texture = match load(&self.config.texture) {
            Ok(texture) => texture,
            Err(source) => {
                renderer.release();
                let resource = self.config.texture.to_string();
                log::warn!("Smoke texture '{}' failed to load: {}", resource, source);
                return Err(SmokeError::ResourceLoad { resource, source });
            }
        };

        self.attach(renderer, &texture, size)
    }

    /// Like [`mount`](Self::mount) but with a texture the caller already has.
    pub fn mount_with_texture<F>(
        &mut self,
        measured: SurfaceSize,
        texture: &TextureData,
        make_renderer: F,
    ) -> Result<CancellationToken, SmokeError>
    where
        F: FnOnce(SurfaceSize, &SceneConfig) -> Result<R, SmokeError>,
    {
        self.preflight()?;
        let size = self.effective_size(measured);
        let renderer = make_renderer(size, &self.config.scene)?;
        self.attach(renderer, texture, size)
    }

    fn preflight(&self) -> Result<(), SmokeError> {
        if self.phase == Phase::Mounted {
            return Err(HostError::AlreadyMounted.into());
        }
        self.config.validate()?;
        Ok(())
    }

    fn effective_size(&self, measured: SurfaceSize) -> SurfaceSize {
        let size = measured.or_fallback(self.config.scene.fallback_size);
        if size != measured {
            log::debug!(
                "Container measured {}x{}, using {}x{}",
                measured.width,
                measured.height,
                size.width,
                size.height
            );
        }
        size
    }

    fn attach(
        &mut self,
        mut renderer: R,
        texture: &TextureData,
        size: SurfaceSize,
    ) -> Result<CancellationToken, SmokeError> {
        let pool_size = self.config.field.pool_size;
        if let Err(e) = renderer.prepare(texture, pool_size) {
            renderer.release();
            return Err(e);
        }

        let field = ParticleField::new(self.config.field.clone());
        self.animator = Some(Animator::from_field(field, renderer));

        let level = self.speed.level();
        self.speed = SpeedController::new(self.config.speed.clone());
        self.speed.set_target(level);

        self.clock.reset();
        self.size = size;
        self.cancel = CancellationToken::new();
        self.phase = Phase::Mounted;

        log::info!(
            "Smoke mounted at {}x{} with {} particles",
            size.width,
            size.height,
            pool_size
        );
        Ok(self.cancel.clone())
    }

    /// Run one frame on wall-clock time.
    pub fn frame<S>(&mut self, scheduler: &mut S) -> Result<FrameOutcome, SmokeError>
    where
        S: FrameScheduler + ?Sized,
    {
        if !self.is_running() {
            return Ok(FrameOutcome::Stopped);
        }
        let (elapsed, delta) = self.clock.update();
        self.frame_at(delta, elapsed, scheduler)
    }

    /// Run one frame with explicit timing.
    ///
    /// On a render error the next frame is not requested and the error is
    /// returned; the caller decides whether to unmount.
    pub fn frame_at<S>(
        &mut self,
        delta: f32,
        elapsed: f32,
        scheduler: &mut S,
    ) -> Result<FrameOutcome, SmokeError>
    where
        S: FrameScheduler + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return Ok(FrameOutcome::Stopped);
        }
        let Some(animator) = self.animator.as_mut() else {
            return Ok(FrameOutcome::Stopped);
        };

        let speed = self.speed.advance();
        animator.tick(delta, elapsed, speed)?;
        log::trace!("Frame at {:.3}s, speed {:.3}", elapsed, speed);

        scheduler.request_frame();
        Ok(FrameOutcome::Continue)
    }

    /// Container resized. Updates the surface; particles are untouched.
    pub fn resize(&mut self, measured: SurfaceSize) {
        let size = self.effective_size(measured);
        if size == self.size {
            return;
        }
        self.size = size;
        if let Some(animator) = self.animator.as_mut() {
            animator.renderer_mut().resize(size);
        }
    }

    /// Activation signal (hover/focus) changed.
    pub fn set_active(&mut self, active: bool) {
        self.speed.set_active(active);
    }

    /// Stop the loop and release every render resource. Safe to call at any
    /// point, any number of times.
    pub fn unmount(&mut self) {
        self.cancel.cancel();
        if let Some(mut animator) = self.animator.take() {
            animator.dispose();
            log::info!("Smoke unmounted");
        }
        if self.phase == Phase::Mounted {
            self.phase = Phase::Unmounted;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    /// Mounted and not cancelled.
    pub fn is_running(&self) -> bool {
        self.is_mounted() && !self.cancel.is_cancelled()
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn speed(&self) -> &SpeedController {
        &self.speed
    }

    pub fn animator(&self) -> Option<&Animator<R>> {
        self.animator.as_ref()
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Frame clock used by [`frame`](Self::frame). Fixed delta and delta
    /// clamp survive remounts.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

impl<R: RenderAdapter> Drop for SmokeHost<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
