use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, MeshVertexAttribute, PrimitiveTopology},
    prelude::*,
    render::render_resource::VertexFormat,
};

use crate::geometry::ParticleGeometry;

// high and arbitrary, clear of bevy's built-in attribute ids
const ATTRIBUTE_BASE_ID: u64 = 472_019_330;

/// Sprite size in world units, one `f32` per vertex.
pub const ATTRIBUTE_SIZE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Size", ATTRIBUTE_BASE_ID + 1, VertexFormat::Float32);

/// Colour and alpha, one `[f32; 4]` per vertex.
pub const ATTRIBUTE_COLOUR: MeshVertexAttribute = MeshVertexAttribute::new(
    "Vertex_Colour",
    ATTRIBUTE_BASE_ID + 2,
    VertexFormat::Float32x4,
);

/// Texture rotation in radians, one `f32` per vertex.
pub const ATTRIBUTE_ANGLE: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Angle", ATTRIBUTE_BASE_ID + 3, VertexFormat::Float32);

/// Blend weight, one `f32` per vertex.
pub const ATTRIBUTE_BLEND: MeshVertexAttribute =
    MeshVertexAttribute::new("Vertex_Blend", ATTRIBUTE_BASE_ID + 4, VertexFormat::Float32);

/// Every sprite is drawn as a camera-facing quad of this many vertices.
pub const VERTICES_PER_SPRITE: usize = 4;

// counter-clockwise once the shader maps uv y down to view-space y up
const CORNERS: [[f32; 2]; VERTICES_PER_SPRITE] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Builds a triangle-list mesh with one quad per sprite of `geometry`.
///
/// All four vertices of a quad share the sprite's centre in
/// [`Mesh::ATTRIBUTE_POSITION`] and its [`ATTRIBUTE_SIZE`], [`ATTRIBUTE_COLOUR`],
/// [`ATTRIBUTE_ANGLE`] and [`ATTRIBUTE_BLEND`]. [`Mesh::ATTRIBUTE_UV_0`] holds the
/// corner, which the fire shader expands into a billboard.
pub fn create_particle_mesh(geometry: &ParticleGeometry) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    write_particle_mesh(&mut mesh, geometry);
    mesh
}

/// Replaces every sprite attribute and the indices of `mesh` with the contents of
/// `geometry`.
pub fn write_particle_mesh(mesh: &mut Mesh, geometry: &ParticleGeometry) {
    let vertex_count = geometry.len() * VERTICES_PER_SPRITE;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut corners = Vec::with_capacity(vertex_count);
    let mut sizes = Vec::with_capacity(vertex_count);
    let mut colours = Vec::with_capacity(vertex_count);
    let mut angles = Vec::with_capacity(vertex_count);
    let mut blends = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity(geometry.len() * QUAD_INDICES.len());

    let sprites = geometry
        .positions()
        .chunks_exact(3)
        .zip(geometry.colours().chunks_exact(4))
        .zip(geometry.sizes())
        .zip(geometry.angles())
        .zip(geometry.blends());

    for (sprite, ((((position, colour), size), angle), blend)) in sprites.enumerate() {
        let base = (sprite * VERTICES_PER_SPRITE) as u32;
        for corner in CORNERS {
            positions.push([position[0], position[1], position[2]]);
            corners.push(corner);
            sizes.push(*size);
            colours.push([colour[0], colour[1], colour[2], colour[3]]);
            angles.push(*angle);
            blends.push(*blend);
        }
        indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, corners);
    mesh.insert_attribute(ATTRIBUTE_SIZE, sizes);
    mesh.insert_attribute(ATTRIBUTE_COLOUR, colours);
    mesh.insert_attribute(ATTRIBUTE_ANGLE, angles);
    mesh.insert_attribute(ATTRIBUTE_BLEND, blends);
    mesh.insert_indices(Indices::U32(indices));
}
