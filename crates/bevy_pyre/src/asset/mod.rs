/// Effect file format version checks.
pub mod versioning;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::emitter::EmitterPolicy;
use crate::particle::ParticleFamily;
use versioning::{FORMAT_VERSION, VersionStatus};

/// Asset loader for [`FireEffectAsset`] files in RON format.
#[derive(Default, TypePath)]
pub struct FireEffectAssetLoader;

/// Errors that can occur when loading a [`FireEffectAsset`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FireEffectLoaderError {
    /// An I/O error occurred while reading the asset file.
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    /// The asset file contained invalid RON syntax.
    #[error("Could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// The asset file was written for another format version, likely by a newer Pyre.
    #[error(
        "Unsupported pyre_version \"{found}\", this Pyre reads \"{current}\". You may need a newer version of Pyre."
    )]
    UnsupportedVersion {
        /// The version found in the asset file.
        found: String,
        /// The format version this build reads.
        current: &'static str,
    },
    /// The asset parsed but describes an effect that cannot be simulated.
    #[error("Invalid fire effect: {0}")]
    Invalid(#[from] FireEffectValidationError),
}

/// Reasons a [`FireEffectAsset`] is rejected by [`FireEffectAsset::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireEffectValidationError {
    /// The effect has no emitter policy.
    #[error("effect has no emitters")]
    NoEmitters,
    /// The spawn rate is zero, negative or not finite.
    #[error("spawn_rate must be positive, got {0}")]
    NonPositiveSpawnRate(f32),
    /// The drag coefficient is negative or not finite.
    #[error("drag must be zero or positive, got {0}")]
    NegativeDrag(f32),
    /// A lifetime curve has no control points.
    #[error("{family:?} {channel} curve has no control points")]
    EmptyCurve {
        /// Family owning the curve.
        family: ParticleFamily,
        /// Which curve of the set: `"alpha"`, `"colour"` or `"size"`.
        channel: &'static str,
    },
    /// A sampling range has `min > max` or a non-finite bound.
    #[error("{what} range is invalid: min {min}, max {max}")]
    InvalidRange {
        /// Which range failed, e.g. `"Spark life"`.
        what: String,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
}

impl AssetLoader for FireEffectAssetLoader {
    type Asset = FireEffectAsset;
    type Settings = ();
    type Error = FireEffectLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let asset = FireEffectAsset::from_ron_bytes(&bytes)?;

        let path = load_context.path();
        debug!(
            "{path:?}: loaded fire effect \"{}\" with {} emitters",
            asset.name,
            asset.emitters.len()
        );

        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &["pyre.ron", "ron"]
    }
}

/// A closed interval that values are sampled from uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct Range {
    /// Lower bound of the range. Defaults to `0.0`.
    #[serde(default)]
    pub min: f32,
    /// Upper bound of the range. Defaults to `1.0`.
    #[serde(default = "default_one_f32")]
    pub max: f32,
}

fn default_one_f32() -> f32 {
    1.0
}

impl Default for Range {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Range {
    /// Creates a new range with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the span of this range (`max - min`).
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Draws a value in `[min, max)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * self.span()
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// A scalar control point of a lifetime curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ScalarKey {
    /// Normalized age, from `0.0` (birth) to `1.0` (death).
    pub t: f32,
    /// Curve value at `t`.
    pub value: f32,
}

impl ScalarKey {
    /// Creates a new key.
    pub fn new(t: f32, value: f32) -> Self {
        Self { t, value }
    }
}

/// A colour control point of a lifetime curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ColourKey {
    /// Normalized age, from `0.0` (birth) to `1.0` (death).
    pub t: f32,
    /// sRGB channels in `0.0..=1.0`.
    pub colour: [f32; 3],
}

impl ColourKey {
    /// Creates a key from a packed `0xRRGGBB` colour.
    pub fn hex(t: f32, rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xFF) as f32 / 255.0;
        Self {
            t,
            colour: [channel(16), channel(8), channel(0)],
        }
    }

    /// The key's colour as an opaque [`Srgba`].
    pub fn srgba(&self) -> Srgba {
        Srgba::rgb(self.colour[0], self.colour[1], self.colour[2])
    }
}

/// Alpha, colour and size curves for one particle family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct CurveSet {
    /// Opacity over normalized age.
    pub alpha: Vec<ScalarKey>,
    /// Colour over normalized age.
    pub colour: Vec<ColourKey>,
    /// Size multiplier over normalized age.
    pub size: Vec<ScalarKey>,
}

impl CurveSet {
    /// Flames fade in fast, hold, then fade out while cooling from yellow to red.
    /// They balloon early and shrink to nothing.
    pub fn flame() -> Self {
        Self {
            alpha: vec![
                ScalarKey::new(0.0, 0.0),
                ScalarKey::new(0.1, 1.0),
                ScalarKey::new(0.5, 1.0),
                ScalarKey::new(1.0, 0.0),
            ],
            colour: vec![
                ColourKey::hex(0.0, 0xFFFF80),
                ColourKey::hex(1.0, 0xFF8080),
            ],
            size: vec![
                ScalarKey::new(0.0, 1.0),
                ScalarKey::new(0.25, 7.0),
                ScalarKey::new(0.5, 2.5),
                ScalarKey::new(1.0, 0.0),
            ],
        }
    }

    /// Smoke darkens to black and keeps growing until it dies.
    pub fn smoke() -> Self {
        Self {
            alpha: vec![
                ScalarKey::new(0.0, 0.0),
                ScalarKey::new(0.1, 1.0),
                ScalarKey::new(0.5, 1.0),
                ScalarKey::new(1.0, 0.0),
            ],
            colour: vec![
                ColourKey::hex(0.0, 0x202020),
                ColourKey::hex(1.0, 0x000000),
            ],
            size: vec![
                ScalarKey::new(0.0, 1.0),
                ScalarKey::new(0.5, 8.0),
                ScalarKey::new(1.0, 16.0),
            ],
        }
    }

    /// Sparks stay fully visible for most of their life and heat up to white.
    pub fn spark() -> Self {
        Self {
            alpha: vec![
                ScalarKey::new(0.0, 0.0),
                ScalarKey::new(0.1, 1.0),
                ScalarKey::new(0.9, 1.0),
                ScalarKey::new(1.0, 0.0),
            ],
            colour: vec![
                ColourKey::hex(0.0, 0xFF8080),
                ColourKey::hex(1.0, 0xFFFFFF),
            ],
            size: vec![ScalarKey::new(0.0, 1.0), ScalarKey::new(1.0, 1.0)],
        }
    }

    fn validate(&self, family: ParticleFamily) -> Result<(), FireEffectValidationError> {
        let empty = |channel: &'static str| FireEffectValidationError::EmptyCurve { family, channel };
        if self.alpha.is_empty() {
            return Err(empty("alpha"));
        }
        if self.colour.is_empty() {
            return Err(empty("colour"));
        }
        if self.size.is_empty() {
            return Err(empty("size"));
        }
        Ok(())
    }
}

/// One [`CurveSet`] per [`ParticleFamily`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct FamilyCurves {
    /// Curves for [`ParticleFamily::Flame`].
    #[serde(default = "CurveSet::flame")]
    pub flame: CurveSet,
    /// Curves for [`ParticleFamily::Smoke`].
    #[serde(default = "CurveSet::smoke")]
    pub smoke: CurveSet,
    /// Curves for [`ParticleFamily::Spark`].
    #[serde(default = "CurveSet::spark")]
    pub spark: CurveSet,
}

impl Default for FamilyCurves {
    fn default() -> Self {
        Self {
            flame: CurveSet::flame(),
            smoke: CurveSet::smoke(),
            spark: CurveSet::spark(),
        }
    }
}

impl FamilyCurves {
    /// The curve set for `family`.
    pub fn get(&self, family: ParticleFamily) -> &CurveSet {
        match family {
            ParticleFamily::Flame => &self.flame,
            ParticleFamily::Smoke => &self.smoke,
            ParticleFamily::Spark => &self.spark,
        }
    }
}

fn default_spawn_rate() -> f32 {
    120.0
}

fn default_drag() -> f32 {
    0.1
}

fn default_spin_rate() -> f32 {
    0.5
}

fn default_emitters() -> Vec<EmitterPolicy> {
    vec![
        EmitterPolicy::flame(),
        EmitterPolicy::smoke(),
        EmitterPolicy::spark(),
    ]
}

/// A complete fire effect description, loadable from RON files.
///
/// Reference it from a [`FireEffect`](crate::FireEffect) component to simulate it.
/// The [`Default`] value is the reference campfire: flames, smoke and sparks
/// spawned 120 times per second.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct FireEffectAsset {
    pyre_version: String,
    /// Display name for this effect.
    pub name: String,
    /// Spawn ticks per second. Each tick asks every emitter for its
    /// [`multiplier`](EmitterPolicy::multiplier) particles. Defaults to `120.0`.
    #[serde(default = "default_spawn_rate")]
    pub spawn_rate: f32,
    /// Fraction of the velocity removed per second of simulation. Defaults to `0.1`.
    #[serde(default = "default_drag")]
    pub drag: f32,
    /// Sprite angular velocity, in radians per second. Defaults to `0.5`.
    #[serde(default = "default_spin_rate")]
    pub spin_rate: f32,
    /// Optional fixed random seed for reproducible effects. Defaults to `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_seed: Option<u64>,
    /// Emitter policies, in spawn order. Defaults to flame, smoke and spark.
    #[serde(default = "default_emitters")]
    pub emitters: Vec<EmitterPolicy>,
    /// Lifetime curves for every family.
    #[serde(default)]
    pub curves: FamilyCurves,
}

impl Default for FireEffectAsset {
    fn default() -> Self {
        Self::new("Campfire".to_string())
    }
}

impl FireEffectAsset {
    /// Creates the reference campfire effect under the given name, stamped with the
    /// current format version.
    pub fn new(name: String) -> Self {
        Self {
            pyre_version: FORMAT_VERSION.to_string(),
            name,
            spawn_rate: default_spawn_rate(),
            drag: default_drag(),
            spin_rate: default_spin_rate(),
            fixed_seed: None,
            emitters: default_emitters(),
            curves: FamilyCurves::default(),
        }
    }

    /// Parses, version-checks and validates an effect from RON bytes.
    pub fn from_ron_bytes(bytes: &[u8]) -> Result<Self, FireEffectLoaderError> {
        let asset = ron::de::from_bytes::<FireEffectAsset>(bytes)?;

        let status = versioning::validate_version(&asset.pyre_version);
        if let VersionStatus::Unsupported { found } = status {
            return Err(FireEffectLoaderError::UnsupportedVersion {
                found,
                current: FORMAT_VERSION,
            });
        }

        asset.validate()?;
        Ok(asset)
    }

    /// Parses an effect from a RON string. See [`from_ron_bytes`](Self::from_ron_bytes).
    pub fn from_ron_str(source: &str) -> Result<Self, FireEffectLoaderError> {
        Self::from_ron_bytes(source.as_bytes())
    }

    /// Serializes this effect to pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// The `pyre_version` this asset is stamped with.
    pub fn version(&self) -> &str {
        &self.pyre_version
    }

    /// Checks that the effect can be simulated.
    pub fn validate(&self) -> Result<(), FireEffectValidationError> {
        if self.emitters.is_empty() {
            return Err(FireEffectValidationError::NoEmitters);
        }
        if !(self.spawn_rate.is_finite() && self.spawn_rate > 0.0) {
            return Err(FireEffectValidationError::NonPositiveSpawnRate(
                self.spawn_rate,
            ));
        }
        if !(self.drag.is_finite() && self.drag >= 0.0) {
            return Err(FireEffectValidationError::NegativeDrag(self.drag));
        }

        for emitter in &self.emitters {
            for (what, range) in [("size", emitter.size), ("life", emitter.life)] {
                if !range.is_valid() {
                    return Err(FireEffectValidationError::InvalidRange {
                        what: format!("{:?} {what}", emitter.family),
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        for family in ParticleFamily::ALL {
            self.curves.get(family).validate(family)?;
        }

        Ok(())
    }
}
