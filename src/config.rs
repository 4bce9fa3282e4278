//! Configuration for the smoke field, its speed controller and the scene.
//!
//! Every struct here has a `Default` matching the classic hero-banner smoke
//! look, `#[serde(default)]` so partial JSON files work, and `with_*`
//! builder methods for code-side tweaks.
//!
//! ```ignore
//! let config = SmokeConfig::default()
//!     .with_field(FieldConfig::default().with_pool_size(80).with_seed(7))
//!     .with_texture(TextureSource::file("assets/smoke.png"));
//! ```

use crate::error::ConfigError;
use crate::textures::TextureSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

/// Particle pool layout and per-tick physics constants.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles. Fixed for the lifetime of a field.
    pub pool_size: usize,
    /// Width of the horizontal spawn band, centred on x = 0.
    pub spawn_width: f32,
    /// Depth band particles are placed in (z).
    pub depth: Range<f32>,
    /// Initial baselines are staggered evenly across this range.
    pub stagger: Range<f32>,
    /// Vertical distance over which a particle fades from full to zero.
    pub rise_span: f32,
    /// Absolute height above which a particle is recycled.
    pub ceiling: f32,
    /// How far below its previous baseline a recycled particle respawns.
    pub reset_offset: f32,
    /// Opacity below which a particle is recycled.
    pub fade_epsilon: f32,
    /// Spawn opacity band.
    pub opacity: Range<f32>,
    /// Horizontal drift per tick.
    pub drift: Range<f32>,
    /// Vertical rise per tick.
    pub rise: Range<f32>,
    /// Rotation per tick, radians.
    pub spin: Range<f32>,
    /// Extra rotation per second of frame time.
    pub rotation_drift: f32,
    /// Amplitude of the sinusoidal horizontal sway.
    pub sway_amplitude: f32,
    /// Scale gained per unit of rise.
    pub growth: f32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            pool_size: 50,
            spawn_width: 500.0,
            depth: 100.0..400.0,
            stagger: -400.0..200.0,
            rise_span: 400.0,
            ceiling: 400.0,
            reset_offset: 100.0,
            fade_epsilon: 0.01,
            opacity: 0.05..0.15,
            drift: -0.25..0.25,
            rise: 0.3..0.8,
            spin: -0.001..0.001,
            rotation_drift: 0.1,
            sway_amplitude: 0.2,
            growth: 0.001,
            seed: None,
        }
    }
}

impl FieldConfig {
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_spawn_width(mut self, width: f32) -> Self {
        self.spawn_width = width;
        self
    }

    pub fn with_rise_span(mut self, rise_span: f32) -> Self {
        self.rise_span = rise_span;
        self
    }

    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn with_reset_offset(mut self, offset: f32) -> Self {
        self.reset_offset = offset;
        self
    }

    pub fn with_opacity(mut self, opacity: Range<f32>) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values that would stop particles fading or recycling sanely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rise_span > 0.0) {
            return Err(invalid(format!("rise_span must be > 0, got {}", self.rise_span)));
        }
        if !(self.reset_offset >= 0.0) {
            return Err(invalid(format!(
                "reset_offset must be >= 0, got {}",
                self.reset_offset
            )));
        }
        if !(self.spawn_width >= 0.0) {
            return Err(invalid(format!(
                "spawn_width must be >= 0, got {}",
                self.spawn_width
            )));
        }
        check_range("depth", &self.depth)?;
        check_range("stagger", &self.stagger)?;
        check_range("opacity", &self.opacity)?;
        check_range("drift", &self.drift)?;
        check_range("rise", &self.rise)?;
        check_range("spin", &self.spin)?;
        // Anything spawned below the epsilon would recycle every tick.
        if self.opacity.start < self.fade_epsilon {
            return Err(invalid(format!(
                "opacity.start ({}) must be >= fade_epsilon ({})",
                self.opacity.start, self.fade_epsilon
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

fn check_range(name: &str, range: &Range<f32>) -> Result<(), ConfigError> {
    if range.start.is_finite() && range.end.is_finite() && range.start <= range.end {
        Ok(())
    } else {
        Err(invalid(format!(
            "{} range {}..{} must be finite with start <= end",
            name, range.start, range.end
        )))
    }
}

/// The two speed presets and how quickly the multiplier chases them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeedConfig {
    /// Multiplier when the activation signal is off.
    pub resting: f32,
    /// Multiplier when the activation signal is on (hover/focus).
    pub active: f32,
    /// Fraction of the remaining gap closed each tick.
    pub smoothing: f32,
    /// Multiplier at mount, before any smoothing.
    pub initial: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            resting: 2.0,
            active: 6.0,
            smoothing: 0.05,
            initial: 1.0,
        }
    }
}

impl SpeedConfig {
    pub fn with_levels(mut self, resting: f32, active: f32) -> Self {
        self.resting = resting;
        self.active = active;
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_initial(mut self, initial: f32) -> Self {
        self.initial = initial;
        self
    }

    /// Smoothing must lie in `(0, 1]` or the multiplier overshoots its target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(invalid(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        for (name, value) in [
            ("resting", self.resting),
            ("active", self.active),
            ("initial", self.initial),
        ] {
            if !value.is_finite() {
                return Err(invalid(format!("{} speed must be finite, got {}", name, value)));
            }
        }
        Ok(())
    }
}

/// Camera, lighting and surface settings used by render adapters.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Size used when the container reports a zero dimension.
    pub fallback_size: [u32; 2],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Camera distance along +z, looking toward the origin.
    pub camera_distance: f32,
    /// Side length of each particle quad in scene units.
    pub quad_size: f32,
    /// Linear RGB tint applied to the texture.
    pub tint: [f32; 3],
    /// Direction *toward* the directional light.
    pub light_direction: [f32; 3],
    pub light_intensity: f32,
    pub ambient_intensity: f32,
    /// RGBA clear colour. Alpha 0 keeps the surface see-through.
    pub clear_color: [f64; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fallback_size: [500, 400],
            fov_degrees: 75.0,
            near: 1.0,
            far: 10_000.0,
            camera_distance: 1000.0,
            quad_size: 300.0,
            tint: [1.0, 1.0, 1.0],
            light_direction: [-1.0, 0.0, 1.0],
            light_intensity: 0.8,
            ambient_intensity: 0.4,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        }
    }
}

impl SceneConfig {
    pub fn with_fallback_size(mut self, width: u32, height: u32) -> Self {
        self.fallback_size = [width, height];
        self
    }

    pub fn with_quad_size(mut self, size: f32) -> Self {
        self.quad_size = size;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 3]) -> Self {
        self.tint = tint;
        self
    }
}

/// Seconds allowed for fetching a remote texture.
pub const DEFAULT_TEXTURE_TIMEOUT_SECS: f32 = 10.0;

/// Complete smoke effect configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmokeConfig {
    pub field: FieldConfig,
    pub speed: SpeedConfig,
    pub scene: SceneConfig,
    pub texture: TextureSource,
    /// Deadline for fetching a remote texture, in seconds.
    pub texture_timeout_secs: f32,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            speed: SpeedConfig::default(),
            scene: SceneConfig::default(),
            texture: TextureSource::default(),
            texture_timeout_secs: DEFAULT_TEXTURE_TIMEOUT_SECS,
        }
    }
}

impl SmokeConfig {
    pub fn with_field(mut self, field: FieldConfig) -> Self {
        self.field = field;
        self
    }

    pub fn with_speed(mut self, speed: SpeedConfig) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_texture(mut self, texture: TextureSource) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_texture_timeout(mut self, timeout: Duration) -> Self {
        self.texture_timeout_secs = timeout.as_secs_f32();
        self
    }

    /// Remote texture deadline. Falls back to the default for unusable values.
    pub fn texture_timeout(&self) -> Duration {
        Duration::try_from_secs_f32(self.texture_timeout_secs)
            .ok()
            .filter(|t| !t.is_zero())
            .unwrap_or(Duration::from_secs_f32(DEFAULT_TEXTURE_TIMEOUT_SECS))
    }

    /// Check every section. Called by [`load`](Self::load) and on mount.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.speed.validate()?;
        if !(self.texture_timeout_secs > 0.0 && self.texture_timeout_secs.is_finite()) {
            return Err(invalid(format!(
                "texture_timeout_secs must be a positive number, got {}",
                self.texture_timeout_secs
            )));
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file. Missing keys take
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: SmokeConfig =
            serde_json::from_str(r#"{ "field": { "pool_size": 12 }, "speed": { "active": 9.0 } }"#)
                .unwrap();
        assert_eq!(config.field.pool_size, 12);
        assert_eq!(config.field.rise_span, 400.0);
        assert_eq!(config.speed.active, 9.0);
        assert_eq!(config.speed.resting, 2.0);
        assert_eq!(config.scene.fallback_size, [500, 400]);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smoke.json");
        let config = SmokeConfig::default()
            .with_field(FieldConfig::default().with_pool_size(20).with_seed(3))
            .with_speed(SpeedConfig::default().with_levels(1.0, 4.0));

        config.save(&path).unwrap();
        assert_eq!(SmokeConfig::load(&path).unwrap(), config);
    }

    fn rejected(config: &SmokeConfig) -> String {
        match config.validate() {
            Err(ConfigError::Invalid(message)) => message,
            other => panic!("expected an invalid config, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        SmokeConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_smoothing_outside_unit_interval() {
        for smoothing in [0.0, -0.5, 1.5, f32::NAN] {
            let config = SmokeConfig::default()
                .with_speed(SpeedConfig::default().with_smoothing(smoothing));
            assert!(rejected(&config).contains("smoothing"));
        }
        let full_step = SmokeConfig::default()
            .with_speed(SpeedConfig::default().with_smoothing(1.0));
        full_step.validate().unwrap();
    }

    #[test]
    fn test_rejects_non_positive_rise_span() {
        for span in [0.0, -400.0] {
            let config =
                SmokeConfig::default().with_field(FieldConfig::default().with_rise_span(span));
            assert!(rejected(&config).contains("rise_span"));
        }
    }

    #[test]
    fn test_rejects_negative_reset_offset() {
        let config =
            SmokeConfig::default().with_field(FieldConfig::default().with_reset_offset(-1.0));
        assert!(rejected(&config).contains("reset_offset"));
    }

    #[test]
    fn test_rejects_opacity_below_fade_epsilon() {
        let config =
            SmokeConfig::default().with_field(FieldConfig::default().with_opacity(0.001..0.005));
        assert!(rejected(&config).contains("fade_epsilon"));
    }

    #[test]
    fn test_rejects_inverted_ranges() {
        let mut field = FieldConfig::default();
        field.rise = 0.8..0.3;
        let config = SmokeConfig::default().with_field(field);
        assert!(rejected(&config).contains("rise"));

        let config =
            SmokeConfig::default().with_field(FieldConfig::default().with_opacity(0.15..0.05));
        assert!(rejected(&config).contains("opacity"));
    }

    #[test]
    fn test_rejects_zero_texture_timeout() {
        let mut config = SmokeConfig::default();
        config.texture_timeout_secs = 0.0;
        assert!(rejected(&config).contains("texture_timeout_secs"));
    }

    #[test]
    fn test_load_rejects_overshooting_smoothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smoke.json");
        fs::write(&path, r#"{ "speed": { "smoothing": 1.5, "initial": 2.0 } }"#).unwrap();

        let err = SmokeConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SmokeConfig::load("/nonexistent/wisp.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
