//! Property tests for the particle field and speed smoothing.
//!
//! These drive the public API headless: no render adapter involved.

use proptest::prelude::*;
use wisp::speed::approach;
use wisp::{FieldConfig, ParticleField, SpeedConfig, SpeedController};

fn seeded_field(pool_size: usize, seed: u64) -> ParticleField {
    ParticleField::with_seed(FieldConfig::default().with_pool_size(pool_size), seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn opacity_stays_within_spawn_opacity(
        seed in any::<u64>(),
        speed in 0.0f32..8.0,
        ticks in 1usize..600,
    ) {
        let mut field = seeded_field(30, seed);
        for t in 0..ticks {
            field.tick(0.016, t as f32 * 0.016, speed);
            for p in field.particles() {
                prop_assert!(p.opacity >= 0.0);
                prop_assert!(p.opacity <= p.initial_opacity);
            }
        }
    }

    #[test]
    fn rise_overshoot_is_bounded_by_one_tick(
        seed in any::<u64>(),
        speed in 0.0f32..8.0,
        ticks in 1usize..600,
    ) {
        let mut field = seeded_field(30, seed);
        let rise_span = field.config().rise_span;
        for t in 0..ticks {
            field.tick(0.016, t as f32 * 0.016, speed);
            for p in field.particles() {
                prop_assert!(p.displacement() <= rise_span + p.velocity.rise * speed + 1e-3);
            }
        }
    }

    #[test]
    fn recycled_particles_restart_fresh(
        seed in any::<u64>(),
        ticks in 1usize..800,
    ) {
        let mut field = seeded_field(20, seed);
        for t in 0..ticks {
            let before: Vec<f32> = field.particles().iter().map(|p| p.baseline).collect();
            field.tick(0.016, t as f32 * 0.016, 6.0);
            for (p, old_baseline) in field.particles().iter().zip(before) {
                if p.baseline != old_baseline {
                    prop_assert_eq!(p.baseline, old_baseline - 100.0);
                    prop_assert_eq!(p.position.y, p.baseline);
                    prop_assert_eq!(p.opacity, p.initial_opacity);
                    prop_assert_eq!(p.scale, 1.0);
                }
            }
        }
    }

    #[test]
    fn pool_size_never_changes(seed in any::<u64>(), pool in 0usize..120) {
        let mut field = seeded_field(pool, seed);
        for t in 0..300 {
            field.tick(0.016, t as f32 * 0.016, 6.0);
        }
        prop_assert_eq!(field.len(), pool);
    }

    #[test]
    fn speed_moves_strictly_closer(current in -10.0f32..10.0, target in -10.0f32..10.0) {
        prop_assume!((current - target).abs() > 1e-3);
        let next = approach(current, target, 0.05);
        prop_assert!((next - target).abs() < (current - target).abs());
        // Never crosses the target.
        prop_assert_eq!((next - target).signum(), (current - target).signum());
    }
}

#[test]
fn scenario_fifty_particles_rise_at_double_speed() {
    let mut field = ParticleField::with_seed(
        FieldConfig::default().with_pool_size(50).with_rise_span(400.0),
        2024,
    );
    let before = field.particles().to_vec();

    let recycled = field.tick(0.016, 0.0, 2.0);

    assert_eq!(recycled, 0);
    for (old, new) in before.iter().zip(field.particles()) {
        let delta = new.position.y - old.position.y;
        assert!((delta - old.velocity.rise * 2.0).abs() < 1e-4);
    }
}

#[test]
fn scenario_particle_past_bound_is_reset() {
    let mut field = seeded_field(1, 9);
    let baseline = field.particles()[0].baseline;
    field.particle_mut(0).unwrap().position.y = baseline + 401.0;
    let initial_opacity = field.particles()[0].initial_opacity;

    field.tick(0.016, 0.0, 1.0);

    let p = &field.particles()[0];
    assert_eq!(p.baseline, baseline - 100.0);
    assert_eq!(p.opacity, initial_opacity);
}

#[test]
fn scenario_activation_flip_first_step() {
    let mut speed = SpeedController::new(SpeedConfig::default().with_initial(2.0));
    assert_eq!(speed.target(), 2.0);
    speed.set_active(true);
    assert!((speed.advance() - 2.2).abs() < 1e-6);
}
