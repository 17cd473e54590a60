use bevy::{camera::visibility::NoFrustumCulling, prelude::*};

use crate::{
    asset::FireEffectAsset,
    geometry::ParticleGeometry,
    material::FireMaterial,
    mesh::create_particle_mesh,
    runtime::{
        FireEffect, FireEffectMesh, FireEffectRuntime, ParticleSortCamera, RejectedFireEffect,
    },
};

pub fn setup_fire_effects(
    mut commands: Commands,
    query: Query<
        (Entity, &FireEffect),
        (Without<FireEffectRuntime>, Without<RejectedFireEffect>),
    >,
    assets: Res<Assets<FireEffectAsset>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (entity, effect) in query.iter() {
        let Some(asset) = assets.get(&effect.handle) else {
            continue;
        };

        if let Err(err) = asset.validate() {
            error!("{entity}: fire effect \"{}\" is invalid: {err}", asset.name);
            commands.entity(entity).insert(RejectedFireEffect(err));
            continue;
        }

        info!(
            "{entity}: starting fire effect \"{}\" ({} emitters at {} Hz)",
            asset.name,
            asset.emitters.len(),
            asset.spawn_rate
        );

        let geometry = ParticleGeometry::default();
        let mesh = meshes.add(create_particle_mesh(&geometry));

        commands.entity(entity).insert((
            FireEffectRuntime::new(asset),
            geometry,
            FireEffectMesh(mesh),
        ));
    }
}

pub fn reload_fire_effects(
    mut commands: Commands,
    mut events: MessageReader<AssetEvent<FireEffectAsset>>,
    assets: Res<Assets<FireEffectAsset>>,
    mut query: Query<(
        Entity,
        &FireEffect,
        Option<&mut FireEffectRuntime>,
        Has<RejectedFireEffect>,
    )>,
) {
    for event in events.read() {
        let AssetEvent::Modified { id } = event else {
            continue;
        };
        let Some(asset) = assets.get(*id) else {
            continue;
        };
        let validation = asset.validate();

        for (entity, effect, runtime, rejected) in query.iter_mut() {
            if effect.handle.id() != *id {
                continue;
            }
            if rejected {
                // setup_fire_effects picks it up again on the next update
                commands.entity(entity).remove::<RejectedFireEffect>();
                continue;
            }
            let Some(mut runtime) = runtime else {
                continue;
            };
            if let Err(err) = &validation {
                error!(
                    "{entity}: fire effect \"{}\" changed but is invalid, keeping the previous one: {err}",
                    asset.name
                );
                continue;
            }

            debug!("{entity}: fire effect \"{}\" changed, restarting", asset.name);
            let paused = runtime.paused;
            *runtime = FireEffectRuntime::new(asset);
            runtime.paused = paused;
        }
    }
}

pub fn step_fire_effects(
    time: Res<Time>,
    camera_query: Query<&GlobalTransform, With<ParticleSortCamera>>,
    mut query: Query<&mut FireEffectRuntime>,
) {
    let camera = camera_query
        .iter()
        .next()
        .map(GlobalTransform::translation)
        .unwrap_or(Vec3::ZERO);
    let dt = time.delta_secs();

    for mut runtime in query.iter_mut() {
        if runtime.paused {
            continue;
        }
        runtime.pool.step(dt, camera);
    }
}

pub fn stream_fire_geometry(
    mut query: Query<(&FireEffectRuntime, &mut ParticleGeometry), Changed<FireEffectRuntime>>,
) {
    for (runtime, mut geometry) in query.iter_mut() {
        geometry.stream(runtime.pool.particles());
    }
}

pub fn sync_fire_meshes(
    query: Query<(&ParticleGeometry, &FireEffectMesh), Changed<ParticleGeometry>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    for (geometry, mesh_handle) in query.iter() {
        if let Some(mut mesh) = meshes.get_mut(&mesh_handle.0) {
            geometry.write_mesh(&mut mesh);
        }
    }
}

pub fn cleanup_fire_effects(
    mut commands: Commands,
    mut removed: RemovedComponents<FireEffect>,
    orphans: Query<(), Without<FireEffect>>,
) {
    for entity in removed.read() {
        if orphans.contains(entity) {
            commands.entity(entity).remove::<(
                FireEffectRuntime,
                ParticleGeometry,
                FireEffectMesh,
                RejectedFireEffect,
                Mesh3d,
                MeshMaterial3d<FireMaterial>,
                NoFrustumCulling,
            )>();
        }
    }
}
