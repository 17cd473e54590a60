use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_pyre::emitter::EmitterPolicy;
use bevy_pyre::particle::{BlendMode, ParticleFamily};
use rand::{SeedableRng, rngs::StdRng};

const SAMPLES: usize = 2000;

fn assert_in_box(position: Vec3, origin: Vec3, half_extent: f32) {
    let offset = (position - origin).abs();
    assert!(
        offset.max_element() <= half_extent,
        "{position} is outside the ±{half_extent} box around {origin}"
    );
}

#[test]
fn flame_particles_rise_straight_up() {
    let policy = EmitterPolicy::flame();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..SAMPLES {
        let particle = policy.emit(&mut rng);

        assert_eq!(particle.family, ParticleFamily::Flame);
        assert_eq!(particle.blend, BlendMode::Additive);
        assert_eq!(particle.velocity, Vec3::new(0.0, 5.0, 0.0));
        assert_in_box(particle.position, Vec3::ZERO, 4.0);
        assert!((1.0..=2.0).contains(&particle.size));
        assert!((2.5..=10.0).contains(&particle.life));
    }
}

#[test]
fn smoke_starts_above_the_fire() {
    let policy = EmitterPolicy::smoke();
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..SAMPLES {
        let particle = policy.emit(&mut rng);

        assert_eq!(particle.family, ParticleFamily::Smoke);
        assert_eq!(particle.blend, BlendMode::Subtractive);
        assert_in_box(particle.position, Vec3::new(0.0, 10.0, 0.0), 4.0);
        assert!((3.75..=15.0).contains(&particle.life));
    }
}

#[test]
fn sparks_scatter_sideways() {
    let policy = EmitterPolicy::spark();
    let mut rng = StdRng::seed_from_u64(3);
    let mut any_lateral = false;

    for _ in 0..SAMPLES {
        let particle = policy.emit(&mut rng);

        assert_eq!(particle.family, ParticleFamily::Spark);
        assert_eq!(particle.blend, BlendMode::Additive);
        assert_eq!(particle.velocity.y, 10.0);
        assert!(particle.velocity.x.abs() <= 3.0);
        assert!(particle.velocity.z.abs() <= 3.0);
        assert!((0.25..=0.5).contains(&particle.size));
        assert!((0.5..=2.0).contains(&particle.life));
        any_lateral |= particle.velocity.x != 0.0;
    }

    assert!(any_lateral, "sparks should get random horizontal velocity");
}

#[test]
fn spark_policy_emits_twice_per_tick() {
    assert_eq!(EmitterPolicy::flame().multiplier, 1);
    assert_eq!(EmitterPolicy::smoke().multiplier, 1);
    assert_eq!(EmitterPolicy::spark().multiplier, 2);
}

#[test]
fn new_particles_are_unaged() {
    let mut rng = StdRng::seed_from_u64(4);

    for policy in [
        EmitterPolicy::flame(),
        EmitterPolicy::smoke(),
        EmitterPolicy::spark(),
    ] {
        let particle = policy.emit(&mut rng);
        assert_eq!(particle.life, particle.max_life);
        assert_eq!(particle.normalized_age(), 0.0);
        assert_eq!(particle.current_size, particle.size);
        assert!((0.0..TAU).contains(&particle.rotation));
    }
}

#[test]
fn emission_is_reproducible_with_the_same_seed() {
    let policy = EmitterPolicy::spark();
    let mut a = StdRng::seed_from_u64(99);
    let mut b = StdRng::seed_from_u64(99);

    for _ in 0..16 {
        assert_eq!(policy.emit(&mut a), policy.emit(&mut b));
    }
}

#[test]
fn positions_fill_the_spawn_box() {
    let policy = EmitterPolicy::flame();
    let mut rng = StdRng::seed_from_u64(5);

    let (mut min, mut max) = (Vec3::splat(f32::MAX), Vec3::splat(f32::MIN));
    for _ in 0..SAMPLES {
        let position = policy.emit(&mut rng).position;
        min = min.min(position);
        max = max.max(position);
    }

    assert!(min.max_element() < -3.5, "box should reach near -4, got {min}");
    assert!(max.min_element() > 3.5, "box should reach near 4, got {max}");
}

#[test]
fn zero_jitter_spawns_at_the_origin() {
    let policy = EmitterPolicy {
        origin: Vec3::new(1.0, 2.0, 3.0),
        jitter: 0.0,
        ..EmitterPolicy::smoke()
    };
    let mut rng = StdRng::seed_from_u64(6);

    assert_eq!(policy.emit(&mut rng).position, Vec3::new(1.0, 2.0, 3.0));
}
