#![deny(missing_docs)]
//! **Pyre** is a CPU-simulated fire, smoke and spark particle effect for the
//! [Bevy game engine](https://bevyengine.org/).
//!
//! Every frame, each effect spawns particles at a fixed rate, ages and animates them
//! along piecewise-linear lifetime curves, sorts them back to front and streams their
//! attributes into flat buffers and a quad [`Mesh`](bevy::prelude::Mesh) drawn by
//! [`FireMaterial`] with premultiplied blending.
//!
//! # Getting started
//!
//! ## Add the dependency
//!
//! ```toml
//! [dependencies]
//! bevy_pyre = "0.1"
//! ```
//!
//! ## Add the plugin
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_pyre::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins((DefaultPlugins, PyrePlugin))
//!         .run();
//! }
//! ```
//!
//! ## Spawning a fire
//!
//! Effects are [`FireEffectAsset`]s, loaded from RON files or built in code. The
//! default asset is a campfire.
//!
//! ```
//! use bevy::prelude::*;
//! use bevy_pyre::prelude::*;
//!
//! fn setup(mut commands: Commands, mut effects: ResMut<Assets<FireEffectAsset>>) {
//!     let mut effect = FireEffectAsset::new("Brazier".into());
//!     effect.spawn_rate = 60.0;
//!
//!     commands.spawn(FireEffect {
//!         handle: effects.add(effect),
//!     });
//!     commands.spawn((Camera3d::default(), ParticleSortCamera));
//! }
//! ```
//!
//! # Table of contents
//!
//! - [Effect files](asset): format, versioning and validation
//! - [Emitters](EmitterPolicy): how each family samples new particles
//! - [Lifetime curves](LinearSpline) and [their defaults](CurveSet)
//! - [The simulation](ParticlePool): spawning, aging, drag and sorting
//! - [Renderer output](ParticleGeometry), [its mesh](mesh) and [the material](FireMaterial)
//! - [Playback control](FireEffectRuntime) (pause, resume, restart)

/// Effect asset definitions, loader and validation.
pub mod asset;
/// Per-family lifetime curve sets.
pub mod curves;
/// Particle spawn policies.
pub mod emitter;
/// Flat attribute buffers and bounding volumes for the renderer.
pub mod geometry;
/// Material and shader drawing the sprites.
pub mod material;
/// Quad mesh carrying the sprite attributes.
pub mod mesh;
/// The particle record and its family and blend tags.
pub mod particle;
/// The live particle set and its per-frame update.
pub mod pool;
/// Convenience re-exports for common types.
pub mod prelude;
/// Components attached to spawned effects.
pub mod runtime;
/// Piecewise-linear interpolation.
pub mod spline;
mod systems;

use bevy::{prelude::*, render::RenderApp};

use asset::FireEffectAssetLoader;
use systems::{
    cleanup_fire_effects, reload_fire_effects, setup_fire_effects, step_fire_effects,
    stream_fire_geometry, sync_fire_meshes,
};

/// Plugin that simulates every [`FireEffect`] in the world.
///
/// Registers the effect asset and its loader, and runs setup, hot reload, simulation,
/// geometry streaming and mesh sync, in that order, in [`Update`]. Apps that render
/// also get the [`FireMaterialPlugin`]; headless apps only simulate.
pub struct PyrePlugin;

impl Plugin for PyrePlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<FireEffectAsset>()
            .init_asset_loader::<FireEffectAssetLoader>();

        app.add_systems(
            Update,
            (
                setup_fire_effects,
                reload_fire_effects,
                step_fire_effects,
                stream_fire_geometry,
                sync_fire_meshes,
                cleanup_fire_effects,
            )
                .chain(),
        );

        if app.get_sub_app(RenderApp).is_some() {
            app.add_plugins(FireMaterialPlugin);
        }
    }
}

pub use asset::{
    ColourKey, CurveSet, FamilyCurves, FireEffectAsset, FireEffectLoaderError,
    FireEffectValidationError, Range, ScalarKey,
};
pub use curves::{CurveSample, FamilySplines, SplineSet};
pub use emitter::EmitterPolicy;
pub use geometry::{GeometryBounds, ParticleGeometry, SpriteInstance, point_multiplier};
pub use material::{DefaultFireMaterial, FireMaterial, FireMaterialPlugin};
pub use particle::{BlendMode, Particle, ParticleFamily};
pub use pool::ParticlePool;
pub use runtime::{
    FireEffect, FireEffectMesh, FireEffectRuntime, ParticleSortCamera, RejectedFireEffect,
};
pub use spline::LinearSpline;
