pub use crate::PyrePlugin;

pub use crate::asset::{
    ColourKey, CurveSet, FamilyCurves, FireEffectAsset, Range as ParticleRange, ScalarKey,
};
pub use crate::emitter::EmitterPolicy;
pub use crate::geometry::ParticleGeometry;
pub use crate::material::FireMaterial;
pub use crate::particle::{BlendMode, ParticleFamily};
pub use crate::runtime::{
    FireEffect, FireEffectMesh, FireEffectRuntime, ParticleSortCamera, RejectedFireEffect,
};
pub use crate::spline::LinearSpline;
