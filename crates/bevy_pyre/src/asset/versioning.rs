/// Effect file format written and read by this release of Pyre.
///
/// Bump it whenever a change to [`FireEffectAsset`](super::FireEffectAsset) stops
/// older files from parsing the same way.
pub const FORMAT_VERSION: &str = "0.1";

/// The result of checking an effect's `pyre_version` against [`FORMAT_VERSION`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionStatus {
    /// The effect was written for this format.
    Current,
    /// The effect was written for another format, most likely by a newer Pyre.
    Unsupported {
        /// The version found in the effect file.
        found: String,
    },
}

/// Checks a version string against [`FORMAT_VERSION`].
///
/// Surrounding whitespace is ignored.
pub fn validate_version(version: &str) -> VersionStatus {
    if version.trim() == FORMAT_VERSION {
        VersionStatus::Current
    } else {
        VersionStatus::Unsupported {
            found: version.to_string(),
        }
    }
}
