//! Speed multiplier smoothing.
//!
//! The multiplier eases toward one of two preset levels. An external
//! boolean (pointer hover, keyboard focus) picks the level; the multiplier
//! closes a fixed fraction of the gap every tick, so it never overshoots and
//! only approaches the target asymptotically.

use crate::config::SpeedConfig;

/// Which preset the multiplier is chasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SpeedLevel {
    #[default]
    Resting,
    Active,
}

impl From<bool> for SpeedLevel {
    fn from(active: bool) -> Self {
        if active {
            SpeedLevel::Active
        } else {
            SpeedLevel::Resting
        }
    }
}

/// One exponential smoothing step.
#[inline]
pub fn approach(current: f32, target: f32, smoothing: f32) -> f32 {
    current + (target - current) * smoothing
}

/// Exponentially smoothed speed multiplier.
#[derive(Clone, Debug)]
pub struct SpeedController {
    current: f32,
    target: f32,
    level: SpeedLevel,
    config: SpeedConfig,
}

impl SpeedController {
    /// Start at `config.initial`, chasing the resting level.
    pub fn new(config: SpeedConfig) -> Self {
        Self {
            current: config.initial,
            target: config.resting,
            level: SpeedLevel::Resting,
            config,
        }
    }

    pub fn set_target(&mut self, level: SpeedLevel) {
        if level != self.level {
            log::debug!("Speed target {:?} -> {:?}", self.level, level);
        }
        self.level = level;
        self.target = match level {
            SpeedLevel::Resting => self.config.resting,
            SpeedLevel::Active => self.config.active,
        };
    }

    /// Map the activation signal onto a level.
    pub fn set_active(&mut self, active: bool) {
        self.set_target(active.into());
    }

    /// Take one smoothing step and return the new multiplier.
    pub fn advance(&mut self) -> f32 {
        self.current = approach(self.current, self.target, self.config.smoothing);
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn level(&self) -> SpeedLevel {
        self.level
    }
}

impl Default for SpeedController {
    fn default() -> Self {
        Self::new(SpeedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_step_from_resting() {
        let mut speed = SpeedController::new(SpeedConfig::default().with_initial(2.0));
        speed.set_active(true);
        assert_eq!(speed.target(), 6.0);
        let next = speed.advance();
        assert!((next - 2.2).abs() < 1e-6);
    }

    #[test]
    fn test_starts_easing_toward_resting() {
        let mut speed = SpeedController::default();
        assert_eq!(speed.current(), 1.0);
        assert_eq!(speed.level(), SpeedLevel::Resting);
        assert!((speed.advance() - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_never_overshoots() {
        let mut speed = SpeedController::new(SpeedConfig::default().with_initial(2.0));
        speed.set_active(true);
        for _ in 0..500 {
            let before = (speed.current() - speed.target()).abs();
            speed.advance();
            let after = (speed.current() - speed.target()).abs();
            assert!(speed.current() <= 6.0);
            assert!(after <= before);
        }
        assert!((speed.current() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_release_eases_back_down() {
        let mut speed = SpeedController::new(SpeedConfig::default().with_initial(6.0));
        speed.set_active(false);
        let next = speed.advance();
        assert!((next - 5.8).abs() < 1e-6);
    }

    #[test]
    fn test_approach_at_target_is_fixed_point() {
        assert_eq!(approach(2.0, 2.0, 0.05), 2.0);
    }
}
