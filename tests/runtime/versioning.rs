use bevy_pyre::asset::FireEffectAsset;
use bevy_pyre::asset::FireEffectLoaderError;
use bevy_pyre::asset::versioning::*;

#[test]
fn format_version_is_current() {
    assert_eq!(FORMAT_VERSION, "0.1");
    assert_eq!(validate_version(FORMAT_VERSION), VersionStatus::Current);
    assert_eq!(validate_version(" 0.1\n"), VersionStatus::Current);
}

#[test]
fn other_versions_are_unsupported() {
    for version in ["0.2", "1.0", "0.1.0", ""] {
        assert_eq!(
            validate_version(version),
            VersionStatus::Unsupported {
                found: version.to_string(),
            },
            "{version:?}"
        );
    }
}

#[test]
fn new_assets_are_stamped_with_the_format_version() {
    let effect = FireEffectAsset::new("Fresh".into());
    assert_eq!(effect.version(), FORMAT_VERSION);

    let parsed = FireEffectAsset::from_ron_str(&effect.to_ron_string().unwrap()).unwrap();
    assert_eq!(parsed.version(), FORMAT_VERSION);
}

#[test]
fn unsupported_asset_is_rejected() {
    let result = FireEffectAsset::from_ron_str(r#"(pyre_version: "2.0", name: "Future")"#);

    match result {
        Err(FireEffectLoaderError::UnsupportedVersion { found, current }) => {
            assert_eq!(found, "2.0");
            assert_eq!(current, FORMAT_VERSION);
        }
        other => panic!("expected UnsupportedVersion, got {other:?}"),
    }
}

#[test]
fn version_is_checked_before_validation() {
    let result =
        FireEffectAsset::from_ron_str(r#"(pyre_version: "2.0", name: "Future", emitters: [])"#);
    assert!(matches!(
        result,
        Err(FireEffectLoaderError::UnsupportedVersion { .. })
    ));
}
