use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::asset::Range;
use crate::particle::{BlendMode, Particle, ParticleFamily};

fn default_jitter() -> f32 {
    4.0
}

fn default_multiplier() -> u32 {
    1
}

fn is_zero_f32(value: &f32) -> bool {
    *value == 0.0
}

fn is_one_u32(value: &u32) -> bool {
    *value == 1
}

/// A stateless factory that samples the initial state of one particle.
///
/// Every spawn tick, the pool asks each policy for [`multiplier`](Self::multiplier)
/// particles. The policy itself never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterPolicy {
    /// Family tag stamped on every particle this policy creates.
    pub family: ParticleFamily,
    /// Centre of the spawn box.
    ///
    /// Defaults to [`Vec3::ZERO`].
    #[serde(default)]
    pub origin: Vec3,
    /// Half-extent of the spawn box on every axis.
    ///
    /// Defaults to `4.0`.
    #[serde(default = "default_jitter")]
    pub jitter: f32,
    /// Range the base size is drawn from.
    pub size: Range,
    /// Range the lifetime, in seconds, is drawn from.
    pub life: Range,
    /// Initial velocity.
    pub velocity: Vec3,
    /// Maximum random horizontal speed added on the X and Z axes.
    ///
    /// Defaults to `0.0`, which keeps the horizontal velocity exactly as configured.
    #[serde(default, skip_serializing_if = "is_zero_f32")]
    pub lateral_jitter: f32,
    /// Compositing mode of the emitted sprites. Defaults to [`BlendMode::Additive`].
    #[serde(default)]
    pub blend: BlendMode,
    /// Particles emitted per spawn tick. Defaults to `1`.
    #[serde(default = "default_multiplier", skip_serializing_if = "is_one_u32")]
    pub multiplier: u32,
}

impl EmitterPolicy {
    /// Rising flame licks around the base of the fire.
    pub fn flame() -> Self {
        Self {
            family: ParticleFamily::Flame,
            origin: Vec3::ZERO,
            jitter: 4.0,
            size: Range::new(1.0, 2.0),
            life: Range::new(2.5, 10.0),
            velocity: Vec3::new(0.0, 5.0, 0.0),
            lateral_jitter: 0.0,
            blend: BlendMode::Additive,
            multiplier: 1,
        }
    }

    /// Smoke rising from above the flames.
    pub fn smoke() -> Self {
        Self {
            family: ParticleFamily::Smoke,
            origin: Vec3::new(0.0, 10.0, 0.0),
            jitter: 4.0,
            size: Range::new(1.0, 2.0),
            life: Range::new(3.75, 15.0),
            velocity: Vec3::new(0.0, 5.0, 0.0),
            lateral_jitter: 0.0,
            blend: BlendMode::Subtractive,
            multiplier: 1,
        }
    }

    /// Short-lived sparks bursting upward and outward. Emitted at twice the rate
    /// of the other families.
    pub fn spark() -> Self {
        Self {
            family: ParticleFamily::Spark,
            origin: Vec3::new(0.0, 10.0, 0.0),
            jitter: 4.0,
            size: Range::new(0.25, 0.5),
            life: Range::new(0.5, 2.0),
            velocity: Vec3::new(0.0, 10.0, 0.0),
            lateral_jitter: 3.0,
            blend: BlendMode::Additive,
            multiplier: 2,
        }
    }

    /// Samples one freshly born particle.
    ///
    /// Curve-driven attributes (`current_size`, `colour`, `alpha`) hold placeholder
    /// values until the pool's first update.
    pub fn emit<R: Rng + ?Sized>(&self, rng: &mut R) -> Particle {
        let life = self.life.sample(rng);
        let size = self.size.sample(rng);

        let offset = Vec3::new(
            signed_unit(rng) * self.jitter,
            signed_unit(rng) * self.jitter,
            signed_unit(rng) * self.jitter,
        );

        let mut velocity = self.velocity;
        if self.lateral_jitter != 0.0 {
            velocity.x += signed_unit(rng) * self.lateral_jitter;
            velocity.z += signed_unit(rng) * self.lateral_jitter;
        }

        Particle {
            position: self.origin + offset,
            velocity,
            size,
            current_size: size,
            colour: Srgba::WHITE,
            alpha: 1.0,
            life,
            max_life: life,
            rotation: rng.random::<f32>() * TAU,
            blend: self.blend,
            family: self.family,
        }
    }
}

fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random::<f32>() * 2.0 - 1.0
}
