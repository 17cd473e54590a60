use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// The emitter family a particle was created by.
///
/// The family is fixed at creation and selects which set of lifetime curves animates
/// the particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Reflect)]
pub enum ParticleFamily {
    /// Rising flame licks.
    #[default]
    Flame,
    /// Slow, dark smoke drifting above the fire.
    Smoke,
    /// Small, fast sparks thrown sideways.
    Spark,
}

impl ParticleFamily {
    /// Every family, in spawn order.
    pub const ALL: [Self; 3] = [Self::Flame, Self::Smoke, Self::Spark];

    /// Stable index of this family, usable for per-family tables.
    pub fn index(self) -> usize {
        match self {
            Self::Flame => 0,
            Self::Smoke => 1,
            Self::Spark => 2,
        }
    }
}

/// How a sprite composites onto what is already drawn.
///
/// The renderer uses premultiplied "source + destination × (1 − source alpha)" blending
/// and scales the output alpha by [`BlendMode::weight`]: a weight of `0` turns the sprite
/// into a purely additive glow, a weight of `1` lets it darken what is behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Reflect)]
pub enum BlendMode {
    /// Adds light. Used for flames and sparks.
    #[default]
    Additive,
    /// Occludes light. Used for smoke.
    Subtractive,
}

impl BlendMode {
    /// The value streamed into the `blend` attribute buffer.
    pub fn weight(self) -> f32 {
        match self {
            Self::Additive => 0.0,
            Self::Subtractive => 1.0,
        }
    }
}

/// A single simulated sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Vec3,
    /// World-space velocity, in units per second.
    pub velocity: Vec3,
    /// Base scale, constant over the particle's life.
    pub size: f32,
    /// `size` scaled by the size curve for the current age.
    pub current_size: f32,
    /// Colour for the current age.
    pub colour: Srgba,
    /// Opacity for the current age.
    pub alpha: f32,
    /// Remaining lifetime in seconds.
    pub life: f32,
    /// Total lifetime in seconds.
    pub max_life: f32,
    /// Sprite rotation angle in radians.
    pub rotation: f32,
    /// Compositing mode.
    pub blend: BlendMode,
    /// The emitter family that created this particle.
    pub family: ParticleFamily,
}

impl Particle {
    /// Normalized age: `0` at birth, approaching `1` at death.
    pub fn normalized_age(&self) -> f32 {
        1.0 - self.life / self.max_life
    }

    /// Returns `true` while the particle still has lifetime left.
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: 1.0,
            current_size: 1.0,
            colour: Srgba::WHITE,
            alpha: 1.0,
            life: 1.0,
            max_life: 1.0,
            rotation: 0.0,
            blend: BlendMode::Additive,
            family: ParticleFamily::Flame,
        }
    }
}
