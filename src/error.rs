//! Error types for wisp.
//!
//! The smoke field is decorative, so none of these are fatal to the host:
//! a failed mount leaves the host unmounted and the caller decides whether
//! to log and carry on.

use thiserror::Error;

/// Errors that can occur while creating or driving the GPU renderer.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface could not hand out a frame.
    #[error("Failed to acquire surface frame: {0}")]
    Frame(#[from] wgpu::SurfaceError),
    /// The renderer was asked to draw before `prepare` uploaded a texture.
    #[error("Renderer has not been prepared with a texture")]
    NotPrepared,
}

/// Errors that can occur while loading the particle texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to decode image bytes.
    #[error("Failed to decode image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// Failed to read a file or response body.
    #[error("Failed to read texture data: {0}")]
    Io(#[from] std::io::Error),
    /// The HTTP request itself failed.
    #[cfg(feature = "remote")]
    #[error("Failed to fetch texture: {0}")]
    Http(#[from] isahc::Error),
    /// The server answered with a non-success status.
    #[error("Texture request returned HTTP {0}")]
    Status(u16),
    /// A URL source was configured but the crate was built without `remote`.
    #[error("Remote textures require the `remote` feature")]
    RemoteDisabled,
    /// The decoded image has no pixels.
    #[error("Texture has zero size")]
    Empty,
}

/// Errors raised by the host integration layer.
#[derive(Debug, Error)]
pub enum HostError {
    /// `mount` was called on a host that is already mounted.
    #[error("Smoke host is already mounted")]
    AlreadyMounted,
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Errors raised while reading or writing a [`SmokeConfig`](crate::SmokeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A value is outside the range the simulation can honour.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Top-level error returned by the public API.
#[derive(Debug, Error)]
pub enum SmokeError {
    /// The particle texture could not be loaded. The effect is not mounted.
    #[error("Failed to load resource '{resource}': {source}")]
    ResourceLoad {
        /// Display name of the resource (path or URL).
        resource: String,
        #[source]
        source: TextureError,
    },
    /// GPU initialization or rendering failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Host lifecycle misuse or windowing failure.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
    /// Configuration could not be read or written.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<winit::error::EventLoopError> for SmokeError {
    fn from(e: winit::error::EventLoopError) -> Self {
        SmokeError::Host(HostError::EventLoop(e))
    }
}

impl From<winit::error::OsError> for SmokeError {
    fn from(e: winit::error::OsError) -> Self {
        SmokeError::Host(HostError::Window(e))
    }
}
