//! Standalone window host.
//!
//! Opens a transparent winit window and drives a [`SmokeHost`] with a
//! [`WgpuRenderer`]. The cursor entering the window is the activation
//! signal; leaving it lets the smoke settle back to the resting speed.
//!
//! The texture loads on a worker thread and arrives as a user event, so a
//! slow fetch never stalls window events.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::config::SmokeConfig;
use crate::error::{SmokeError, TextureError};
use crate::gpu::WgpuRenderer;
use crate::host::{FrameScheduler, SmokeHost};
use crate::render::SurfaceSize;
use crate::textures::TextureData;

/// Events posted back to the event loop from worker threads.
enum SmokeEvent {
    TextureLoaded(Result<TextureData, TextureError>),
}

/// Window title and initial size.
#[derive(Clone, Debug)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "wisp".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Asks winit for another redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

struct App {
    options: WindowOptions,
    window: Option<Arc<Window>>,
    host: SmokeHost<WgpuRenderer>,
    proxy: EventLoopProxy<SmokeEvent>,
    closing: bool,
    fatal: Option<SmokeError>,
}

impl App {
    fn new(config: SmokeConfig, options: WindowOptions, proxy: EventLoopProxy<SmokeEvent>) -> Self {
        Self {
            options,
            window: None,
            host: SmokeHost::new(config),
            proxy,
            closing: false,
            fatal: None,
        }
    }

    fn start_texture_load(&self) {
        let config = self.host.config();
        let proxy = self.proxy.clone();
        let spawned = config
            .texture
            .spawn_load(config.texture_timeout(), move |loaded| {
                // The loop may already be gone if the window closed meanwhile.
                let _ = proxy.send_event(SmokeEvent::TextureLoaded(loaded));
            });
        if let Err(e) = spawned {
            log::error!("Smoke effect disabled: cannot start texture loader: {}", e);
        }
    }

    fn mount(&mut self, loaded: Result<TextureData, TextureError>) {
        if self.closing {
            return;
        }
        let Some(window) = self.window.clone() else {
            return;
        };
        let physical = window.inner_size();
        let measured = SurfaceSize::new(physical.width, physical.height);
        let target = window.clone();

        match self.host.mount_loaded(measured, loaded, move |size, scene| {
            Ok(WgpuRenderer::new_blocking(target, size, scene)?)
        }) {
            Ok(_) => window.request_redraw(),
            // Window stays open without the effect.
            Err(e) => log::error!("Smoke effect disabled: {}", e),
        }
    }
}

impl ApplicationHandler<SmokeEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_transparent(true)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.width,
                self.options.height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fatal = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window);
        self.start_texture_load();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: SmokeEvent) {
        match event {
            SmokeEvent::TextureLoaded(loaded) => self.mount(loaded),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.closing = true;
                self.host.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.host
                    .resize(SurfaceSize::new(physical_size.width, physical_size.height));
            }
            WindowEvent::CursorEntered { .. } => self.host.set_active(true),
            WindowEvent::CursorLeft { .. } => self.host.set_active(false),
            WindowEvent::RedrawRequested => {
                let Some(window) = self.window.as_deref() else {
                    return;
                };
                if let Err(e) = self.host.frame(&mut RedrawScheduler(window)) {
                    log::error!("Smoke render failed, stopping effect: {}", e);
                    self.host.unmount();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.closing = true;
        self.host.unmount();
    }
}

/// Open a window and run the smoke effect until it is closed.
pub fn run(config: SmokeConfig, options: WindowOptions) -> Result<(), SmokeError> {
    config.validate()?;
    let event_loop = EventLoop::<SmokeEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, options, event_loop.create_proxy());
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
