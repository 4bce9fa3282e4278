//! Loading the particle texture.
//!
//! The smoke quads share a single RGBA texture. It can come from a file, a
//! URL (with the default `remote` feature), bytes already in memory, or a
//! procedurally generated soft puff.
//!
//! A load failure is returned to the caller rather than leaving the quads
//! drawing with a missing texture.
//!
//! # Supported Formats
//!
//! - PNG (recommended, the alpha channel carries the puff shape)
//! - JPEG

use crate::config::DEFAULT_TEXTURE_TIMEOUT_SECS;
use crate::error::TextureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Texture used when no source is configured.
pub const DEFAULT_TEXTURE_URL: &str =
    "https://s3-us-west-2.amazonaws.com/s.cdpn.io/95637/Smoke-Element.png";

/// Where the particle texture comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureSource {
    /// Fetch over HTTP(S).
    Url(String),
    /// Read from disk.
    File(PathBuf),
    /// Encoded image bytes (PNG/JPEG) already in memory.
    #[serde(skip)]
    Encoded(Vec<u8>),
    /// Generate a radial puff of `size`×`size` pixels.
    Procedural { size: u32 },
}

impl Default for TextureSource {
    fn default() -> Self {
        TextureSource::Url(DEFAULT_TEXTURE_URL.to_string())
    }
}

impl TextureSource {
    pub fn url(url: impl Into<String>) -> Self {
        TextureSource::Url(url.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        TextureSource::File(path.into())
    }

    /// Interpret a command-line style argument: anything with a scheme is
    /// a URL, everything else a path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            TextureSource::url(arg)
        } else {
            TextureSource::file(arg)
        }
    }

    /// Load and decode the texture, with the default fetch deadline.
    pub fn load(&self) -> Result<TextureData, TextureError> {
        self.load_with_timeout(Duration::from_secs_f32(DEFAULT_TEXTURE_TIMEOUT_SECS))
    }

    /// Load and decode the texture. A URL fetch gives up after `timeout`.
    pub fn load_with_timeout(&self, timeout: Duration) -> Result<TextureData, TextureError> {
        let data = match self {
            TextureSource::Url(url) => TextureData::fetch(url, timeout)?,
            TextureSource::File(path) => TextureData::from_file(path)?,
            TextureSource::Encoded(bytes) => TextureData::from_encoded(bytes)?,
            TextureSource::Procedural { size } => TextureData::soft_puff(*size),
        };
        if data.width == 0 || data.height == 0 {
            return Err(TextureError::Empty);
        }
        log::debug!("Loaded texture {} ({}x{})", self, data.width, data.height);
        Ok(data)
    }

    /// Load on a worker thread and hand the result to `done` there.
    ///
    /// Keeps a slow fetch off the event-loop thread.
    pub fn spawn_load<F>(&self, timeout: Duration, done: F) -> io::Result<JoinHandle<()>>
    where
        F: FnOnce(Result<TextureData, TextureError>) + Send + 'static,
    {
        let source = self.clone();
        thread::Builder::new()
            .name("wisp-texture".to_string())
            .spawn(move || done(source.load_with_timeout(timeout)))
    }
}

impl fmt::Display for TextureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureSource::Url(url) => write!(f, "{}", url),
            TextureSource::File(path) => write!(f, "{}", path.display()),
            TextureSource::Encoded(bytes) => write!(f, "<{} encoded bytes>", bytes.len()),
            TextureSource::Procedural { size } => write!(f, "<procedural puff {}px>", size),
        }
    }
}

/// Decoded RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    /// Wrap raw RGBA data. Returns `None` if the length does not match.
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self { rgba, width, height })
    }

    /// Decode PNG or JPEG bytes.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, TextureError> {
        let img = image::load_from_memory(bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            rgba: img.into_raw(),
            width,
            height,
        })
    }

    /// Read and decode an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_encoded(&bytes)
    }

    /// Download and decode an image. Connecting and the whole transfer must
    /// finish within `timeout`; a timeout surfaces as `TextureError::Http`.
    #[cfg(feature = "remote")]
    pub fn fetch(url: &str, timeout: Duration) -> Result<Self, TextureError> {
        use isahc::config::Configurable;
        use isahc::{HttpClient, ReadResponseExt};

        let client = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        let mut response = client.get(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TextureError::Status(status.as_u16()));
        }
        let bytes = response.bytes()?;
        Self::from_encoded(&bytes)
    }

    #[cfg(not(feature = "remote"))]
    pub fn fetch(_url: &str, _timeout: Duration) -> Result<Self, TextureError> {
        Err(TextureError::RemoteDisabled)
    }

    /// White puff whose alpha falls off smoothly from the centre, broken up
    /// by a little value noise so overlapping quads do not look stamped.
    pub fn soft_puff(size: u32) -> Self {
        let mut rgba = Vec::with_capacity((size as usize) * (size as usize) * 4);
        let half = size as f32 * 0.5;

        for y in 0..size {
            for x in 0..size {
                let dx = (x as f32 + 0.5 - half) / half;
                let dy = (y as f32 + 0.5 - half) / half;
                let r = (dx * dx + dy * dy).sqrt();
                let falloff = 1.0 - smoothstep(0.2, 1.0, r);
                let grain = 0.75 + 0.25 * hash_noise(x / 4, y / 4);
                let alpha = (falloff * grain).clamp(0.0, 1.0);
                rgba.extend_from_slice(&[255, 255, 255, (alpha * 255.0) as u8]);
            }
        }

        Self {
            rgba,
            width: size,
            height: size,
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn hash_noise(x: u32, y: u32) -> f32 {
    let n = x.wrapping_mul(374_761_393) ^ y.wrapping_mul(668_265_263);
    let n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    (n & 0xFFFF) as f32 / 65_535.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_puff_is_opaque_in_middle_clear_at_corner() {
        let tex = TextureData::soft_puff(64);
        assert_eq!(tex.rgba.len(), 64 * 64 * 4);
        let alpha = |x: usize, y: usize| tex.rgba[(y * 64 + x) * 4 + 3];
        assert!(alpha(32, 32) > 150);
        assert_eq!(alpha(0, 0), 0);
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(TextureData::from_rgba(vec![0; 16], 2, 2).is_some());
        assert!(TextureData::from_rgba(vec![0; 15], 2, 2).is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TextureSource::file("/nonexistent/smoke.png").load().unwrap_err();
        assert!(matches!(err, TextureError::Io(_)));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let err = TextureSource::Encoded(vec![1, 2, 3, 4]).load().unwrap_err();
        assert!(matches!(err, TextureError::ImageLoad(_)));
    }

    #[test]
    fn test_zero_size_procedural_is_empty() {
        let err = TextureSource::Procedural { size: 0 }.load().unwrap_err();
        assert!(matches!(err, TextureError::Empty));
    }

    #[test]
    fn test_png_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("puff.png");
        let puff = TextureData::soft_puff(16);
        image::RgbaImage::from_raw(16, 16, puff.rgba.clone())
            .unwrap()
            .save(&path)
            .unwrap();

        let loaded = TextureSource::file(&path).load().unwrap();
        assert_eq!(loaded, puff);
    }

    #[test]
    fn test_spawn_load_reports_on_worker() {
        let (tx, rx) = std::sync::mpsc::channel();
        let handle = TextureSource::Procedural { size: 8 }
            .spawn_load(Duration::from_secs(1), move |result| {
                tx.send(result.map(|t| (t.width, t.height))).unwrap();
            })
            .unwrap();
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap().unwrap(), (8, 8));
    }

    #[cfg(feature = "remote")]
    #[test]
    fn test_stalled_server_times_out() {
        use std::net::TcpListener;
        use std::time::Instant;

        // Accepts the connection (via the backlog) but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/smoke.png", listener.local_addr().unwrap());

        let started = Instant::now();
        let err = TextureSource::url(url)
            .load_with_timeout(Duration::from_millis(300))
            .unwrap_err();

        // A configured HTTP proxy may answer with a status instead.
        assert!(matches!(err, TextureError::Http(_) | TextureError::Status(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn test_parse_argument() {
        assert!(matches!(TextureSource::parse("https://x/y.png"), TextureSource::Url(_)));
        assert!(matches!(TextureSource::parse("assets/y.png"), TextureSource::File(_)));
    }
}
