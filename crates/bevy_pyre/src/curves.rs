use bevy::prelude::*;

use crate::asset::{CurveSet, FamilyCurves};
use crate::particle::ParticleFamily;
use crate::spline::LinearSpline;

/// Attribute values sampled from a [`SplineSet`] at one normalized age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Opacity.
    pub alpha: f32,
    /// Colour.
    pub colour: Srgba,
    /// Multiplier applied to the particle's base size.
    pub size: f32,
}

/// The lifetime curves that animate one particle family.
#[derive(Debug, Clone)]
pub struct SplineSet {
    /// Opacity over normalized age.
    pub alpha: LinearSpline<f32>,
    /// Colour over normalized age.
    pub colour: LinearSpline<Srgba>,
    /// Size multiplier over normalized age.
    pub size: LinearSpline<f32>,
}

impl SplineSet {
    /// Builds the splines described by a [`CurveSet`].
    pub fn from_curves(curves: &CurveSet) -> Self {
        Self {
            alpha: LinearSpline::from_points(
                crate::spline::lerp_scalar,
                curves.alpha.iter().map(|key| (key.t, key.value)),
            ),
            colour: LinearSpline::from_points(
                crate::spline::lerp_colour,
                curves.colour.iter().map(|key| (key.t, key.srgba())),
            ),
            size: LinearSpline::from_points(
                crate::spline::lerp_scalar,
                curves.size.iter().map(|key| (key.t, key.value)),
            ),
        }
    }

    /// Samples every curve at normalized age `t`.
    pub fn sample(&self, t: f32) -> CurveSample {
        CurveSample {
            alpha: self.alpha.get(t),
            colour: self.colour.get(t),
            size: self.size.get(t),
        }
    }
}

/// One [`SplineSet`] per [`ParticleFamily`].
#[derive(Debug, Clone)]
pub struct FamilySplines {
    flame: SplineSet,
    smoke: SplineSet,
    spark: SplineSet,
}

impl FamilySplines {
    /// Builds all three spline sets.
    pub fn from_curves(curves: &FamilyCurves) -> Self {
        Self {
            flame: SplineSet::from_curves(&curves.flame),
            smoke: SplineSet::from_curves(&curves.smoke),
            spark: SplineSet::from_curves(&curves.spark),
        }
    }

    /// The spline set that animates `family`.
    pub fn get(&self, family: ParticleFamily) -> &SplineSet {
        match family {
            ParticleFamily::Flame => &self.flame,
            ParticleFamily::Smoke => &self.smoke,
            ParticleFamily::Spark => &self.spark,
        }
    }
}

impl Default for FamilySplines {
    fn default() -> Self {
        Self::from_curves(&FamilyCurves::default())
    }
}
