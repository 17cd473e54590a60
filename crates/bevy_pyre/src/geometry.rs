use bevy::{
    math::{
        Vec3A,
        bounding::{Aabb3d, BoundingSphere},
    },
    prelude::*,
};
use bytemuck::{Pod, Zeroable};

use crate::mesh::{create_particle_mesh, write_particle_mesh};
use crate::particle::Particle;

/// Bounding volumes enclosing every particle position of a [`ParticleGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryBounds {
    /// Tight axis-aligned box around the particle positions.
    pub aabb: Aabb3d,
    /// Sphere centred on the box, with a radius of half its diagonal.
    pub sphere: BoundingSphere,
}

impl GeometryBounds {
    fn from_aabb(aabb: Aabb3d) -> Self {
        let center = (aabb.min + aabb.max) * 0.5;
        let radius = (aabb.max - aabb.min).length() * 0.5;
        Self {
            aabb,
            sphere: BoundingSphere::new(center, radius),
        }
    }
}

/// One sprite's attributes interleaved into a single GPU-ready record.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// World-space position.
    pub position: [f32; 3],
    /// Sprite size, before perspective scaling.
    pub size: f32,
    /// sRGB colour followed by opacity.
    pub colour: [f32; 4],
    /// Rotation of the texture lookup, in radians.
    pub angle: f32,
    /// Blend weight, see [`BlendMode::weight`](crate::BlendMode::weight).
    pub blend: f32,
}

/// Flat per-particle attribute buffers for the renderer, rebuilt every frame.
///
/// All buffers follow the pool's back-to-front order. For `N` live particles,
/// `positions` holds `3 × N` floats, `colours` holds `4 × N`, and `sizes`,
/// `angles` and `blends` hold `N` each.
#[derive(Component, Debug, Clone, Default)]
pub struct ParticleGeometry {
    positions: Vec<f32>,
    sizes: Vec<f32>,
    colours: Vec<f32>,
    angles: Vec<f32>,
    blends: Vec<f32>,
    bounds: Option<GeometryBounds>,
}

impl ParticleGeometry {
    /// Builds geometry for `particles`.
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut geometry = Self::default();
        geometry.stream(particles);
        geometry
    }

    /// Rewrites every buffer and the bounds from `particles`, keeping the
    /// allocations of the previous frame.
    pub fn stream(&mut self, particles: &[Particle]) {
        let count = particles.len();

        self.positions.clear();
        self.sizes.clear();
        self.colours.clear();
        self.angles.clear();
        self.blends.clear();
        self.positions.reserve(count * 3);
        self.sizes.reserve(count);
        self.colours.reserve(count * 4);
        self.angles.reserve(count);
        self.blends.reserve(count);

        let mut min = Vec3A::splat(f32::INFINITY);
        let mut max = Vec3A::splat(f32::NEG_INFINITY);

        for particle in particles {
            let position = Vec3A::from(particle.position);
            min = min.min(position);
            max = max.max(position);

            self.positions.extend_from_slice(&particle.position.to_array());
            self.sizes.push(particle.current_size);
            self.colours.extend_from_slice(&[
                particle.colour.red,
                particle.colour.green,
                particle.colour.blue,
                particle.alpha,
            ]);
            self.angles.push(particle.rotation);
            self.blends.push(particle.blend.weight());
        }

        self.bounds = (count > 0).then(|| GeometryBounds::from_aabb(Aabb3d { min, max }));
    }

    /// Number of sprites in the buffers.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Positions, three floats per sprite.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Sizes, one float per sprite.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Colour and alpha, four floats per sprite.
    pub fn colours(&self) -> &[f32] {
        &self.colours
    }

    /// Rotation angles, one float per sprite.
    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    /// Blend weights, one float per sprite.
    pub fn blends(&self) -> &[f32] {
        &self.blends
    }

    /// Bounding volumes of the positions, or `None` when there are no sprites.
    pub fn bounds(&self) -> Option<GeometryBounds> {
        self.bounds
    }

    /// Byte view of [`positions`](Self::positions), ready for a vertex buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Byte view of [`sizes`](Self::sizes).
    pub fn size_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    /// Byte view of [`colours`](Self::colours).
    pub fn colour_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colours)
    }

    /// Byte view of [`angles`](Self::angles).
    pub fn angle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.angles)
    }

    /// Byte view of [`blends`](Self::blends).
    pub fn blend_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blends)
    }

    /// The buffers interleaved into one record per sprite, in draw order.
    pub fn instances(&self) -> Vec<SpriteInstance> {
        (0..self.len())
            .map(|i| SpriteInstance {
                position: [
                    self.positions[i * 3],
                    self.positions[i * 3 + 1],
                    self.positions[i * 3 + 2],
                ],
                size: self.sizes[i],
                colour: [
                    self.colours[i * 4],
                    self.colours[i * 4 + 1],
                    self.colours[i * 4 + 2],
                    self.colours[i * 4 + 3],
                ],
                angle: self.angles[i],
                blend: self.blends[i],
            })
            .collect()
    }

    /// Builds the quad mesh the fire material draws. See [`create_particle_mesh`].
    pub fn to_mesh(&self) -> Mesh {
        create_particle_mesh(self)
    }

    /// Overwrites the sprite attributes of an existing mesh. See [`write_particle_mesh`].
    pub fn write_mesh(&self, mesh: &mut Mesh) {
        write_particle_mesh(mesh, self);
    }
}

/// Scale applied to sprite sizes so that they shrink with distance like world-space
/// geometry: `viewport_height / (2 · tan(fov / 2))`.
pub fn point_multiplier(viewport_height: f32, fov_radians: f32) -> f32 {
    viewport_height / (2.0 * (0.5 * fov_radians).tan())
}
