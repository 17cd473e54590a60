#![allow(dead_code)]

use bevy::asset::{AssetPlugin, AssetServer, LoadState};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_pyre::PyrePlugin;
use bevy_pyre::asset::FireEffectAsset;
use bevy_pyre::particle::{Particle, ParticleFamily};
use bevy_pyre::runtime::FireEffect;
use std::path::Path;
use std::time::Duration;

pub const FRAME: f32 = 1.0 / 120.0;

pub fn fixtures_path() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .to_string_lossy()
        .to_string()
}

pub fn create_minimal_app() -> App {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(bevy::app::ScheduleRunnerPlugin::run_loop(
            std::time::Duration::from_millis(10),
        )),
    );

    app.add_plugins(AssetPlugin {
        file_path: fixtures_path(),
        ..default()
    });

    app.init_asset::<Mesh>();
    app.add_plugins(PyrePlugin);

    app
}

/// every update advances time by exactly `seconds`, except the very first one,
/// which always reports a zero delta.
pub fn use_fixed_frame_time(app: &mut App, seconds: f32) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        seconds,
    )));
}

pub fn load_fixture(app: &mut App, filename: &str) -> Handle<FireEffectAsset> {
    let asset_server = app.world().resource::<AssetServer>();
    asset_server.load(filename.to_string())
}

pub fn run_until_loaded<T: Asset>(app: &mut App, handle: &Handle<T>, max_updates: u32) -> bool {
    for _ in 0..max_updates {
        app.update();

        let asset_server = app.world().resource::<AssetServer>();
        match asset_server.load_state(handle) {
            LoadState::Loaded => return true,
            LoadState::Failed(_) => return false,
            _ => continue,
        }
    }
    false
}

pub fn run_until_failed<T: Asset>(app: &mut App, handle: &Handle<T>, max_updates: u32) -> bool {
    for _ in 0..max_updates {
        app.update();

        let asset_server = app.world().resource::<AssetServer>();
        match asset_server.load_state(handle) {
            LoadState::Failed(_) => return true,
            LoadState::Loaded => return false,
            _ => continue,
        }
    }
    false
}

pub fn spawn_fire_effect(app: &mut App, handle: Handle<FireEffectAsset>) -> Entity {
    app.world_mut().spawn(FireEffect { handle }).id()
}

pub fn setup_loaded_effect(fixture: &str) -> (App, Handle<FireEffectAsset>, Entity) {
    let mut app = create_minimal_app();
    use_fixed_frame_time(&mut app, FRAME);
    let handle = load_fixture(&mut app, fixture);
    let entity = spawn_fire_effect(&mut app, handle.clone());
    assert!(
        run_until_loaded(&mut app, &handle, 100),
        "fixture should load"
    );
    advance_frames(&mut app, 2);
    (app, handle, entity)
}

pub fn load_asset(app: &mut App, fixture: &str) -> FireEffectAsset {
    let handle = load_fixture(app, fixture);
    for _ in 0..100 {
        app.update();
        let asset_server = app.world().resource::<AssetServer>();
        match asset_server.load_state(&handle) {
            LoadState::Loaded => {
                let assets = app.world().resource::<Assets<FireEffectAsset>>();
                return assets.get(&handle).expect("asset should exist").clone();
            }
            LoadState::Failed(err) => {
                panic!("fixture failed to load '{fixture}': {err:?}");
            }
            _ => continue,
        }
    }
    panic!("fixture timed out loading: {fixture}");
}

pub fn advance_frames(app: &mut App, n: u32) {
    for _ in 0..n {
        app.update();
    }
}

/// the reference campfire with a fixed seed, so pool tests are reproducible.
pub fn seeded_campfire(seed: u64) -> FireEffectAsset {
    let mut effect = FireEffectAsset::default();
    effect.fixed_seed = Some(seed);
    effect
}

pub fn particle_at(position: Vec3, life: f32, family: ParticleFamily) -> Particle {
    Particle {
        position,
        life,
        max_life: life,
        family,
        ..default()
    }
}

pub fn assert_approx(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "{what}: expected {expected}, got {actual}"
    );
}
