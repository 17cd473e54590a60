use bevy::prelude::*;

use crate::asset::{FireEffectAsset, FireEffectValidationError};
use crate::pool::ParticlePool;

/// Spawns a fire effect.
///
/// Once the referenced asset is loaded, [`PyrePlugin`](crate::PyrePlugin) adds a
/// [`FireEffectRuntime`], a [`ParticleGeometry`](crate::ParticleGeometry) and a
/// [`FireEffectMesh`] to the entity and starts simulating.
#[derive(Component, Debug, Clone)]
pub struct FireEffect {
    /// The effect to simulate.
    pub handle: Handle<FireEffectAsset>,
}

/// Playback state and live particles of a spawned [`FireEffect`].
#[derive(Component)]
pub struct FireEffectRuntime {
    /// Whether the simulation is frozen. Paused effects keep their particles.
    pub paused: bool,
    /// The simulated particles.
    pub pool: ParticlePool,
}

impl Default for FireEffectRuntime {
    fn default() -> Self {
        Self::new(&FireEffectAsset::default())
    }
}

impl FireEffectRuntime {
    /// Creates a running, empty simulation of `effect`.
    pub fn new(effect: &FireEffectAsset) -> Self {
        Self {
            paused: false,
            pool: ParticlePool::new(effect),
        }
    }

    /// Freezes the simulation.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Unfreezes the simulation.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips between paused and running.
    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Drops every particle and restarts spawning from an empty accumulator.
    /// The paused state is kept.
    pub fn restart(&mut self) {
        debug!(
            "restarting fire effect, dropping {} particles",
            self.pool.len()
        );
        self.pool.clear();
    }
}

/// Quad mesh rebuilt from the effect's [`ParticleGeometry`](crate::ParticleGeometry)
/// every frame.
#[derive(Component, Debug, Clone)]
pub struct FireEffectMesh(pub Handle<Mesh>);

/// Added instead of a [`FireEffectRuntime`] when the effect's asset fails
/// [`FireEffectAsset::validate`]. The effect is retried once its asset is modified.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RejectedFireEffect(pub FireEffectValidationError);

/// Marks the camera particles are sorted against.
///
/// Without one, particles are sorted by distance to the world origin.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ParticleSortCamera;
