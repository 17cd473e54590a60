use bevy::{
    asset::embedded_asset,
    camera::visibility::NoFrustumCulling,
    mesh::{MeshVertexBufferLayoutRef, VertexAttributeDescriptor},
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    render::render_resource::{
        AsBindGroup, BlendComponent, BlendFactor, BlendOperation, BlendState, ColorTargetState,
        CompareFunction, DepthStencilState, RenderPipelineDescriptor,
        SpecializedMeshPipelineError,
    },
    shader::ShaderRef,
};

use crate::mesh::{ATTRIBUTE_ANGLE, ATTRIBUTE_BLEND, ATTRIBUTE_COLOUR, ATTRIBUTE_SIZE};
use crate::runtime::FireEffectMesh;

const SHADER_ASSET_PATH: &str = "embedded://bevy_pyre/shaders/fire_material.wgsl";

/// Premultiplied blending: `src · 1 + dst · (1 − src.a)`.
///
/// The fragment shader premultiplies colour by alpha and then scales alpha by the
/// sprite's [blend weight](crate::BlendMode::weight), so additive sprites
/// (weight `0`) only add light while subtractive sprites (weight `1`) also
/// occlude what is behind them.
pub const FIRE_BLEND: BlendState = BlendState {
    color: BlendComponent {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        operation: BlendOperation::Add,
    },
    alpha: BlendComponent::OVER,
};

/// Sprites are depth tested against opaque geometry but never write depth.
pub const FIRE_DEPTH_WRITE: bool = false;

/// Depth comparison for sprites. Bevy uses reversed z, so nearer is greater.
pub const FIRE_DEPTH_COMPARE: CompareFunction = CompareFunction::GreaterEqual;

/// Vertex inputs of the fire shader, in shader location order.
pub const FIRE_VERTEX_ATTRIBUTES: [VertexAttributeDescriptor; 6] = [
    Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
    Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
    ATTRIBUTE_SIZE.at_shader_location(2),
    ATTRIBUTE_COLOUR.at_shader_location(3),
    ATTRIBUTE_ANGLE.at_shader_location(4),
    ATTRIBUTE_BLEND.at_shader_location(5),
];

/// Material drawing the quad mesh of a [`FireEffect`](crate::FireEffect).
///
/// Every effect gets the shared [`DefaultFireMaterial`] unless its entity already
/// carries a `MeshMaterial3d<FireMaterial>`, for instance one with a flame texture.
#[derive(Asset, AsBindGroup, Reflect, Debug, Clone, Default)]
pub struct FireMaterial {
    /// Sprite texture, rotated by each sprite's angle. A blank white texture is
    /// used when `None`.
    #[texture(0)]
    #[sampler(1)]
    pub texture: Option<Handle<Image>>,
}

impl Material for FireMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Premultiplied
    }

    fn enable_prepass() -> bool {
        false
    }

    fn enable_shadows() -> bool {
        false
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        descriptor.vertex.buffers = vec![layout.0.get_layout(&FIRE_VERTEX_ATTRIBUTES)?];
        descriptor.primitive.cull_mode = None;

        if let Some(fragment) = &mut descriptor.fragment {
            apply_fire_blend(&mut fragment.targets);
        }
        if let Some(depth_stencil) = &mut descriptor.depth_stencil {
            apply_fire_depth(depth_stencil);
        }

        Ok(())
    }
}

/// Sets [`FIRE_BLEND`] on every colour target.
pub fn apply_fire_blend(targets: &mut [Option<ColorTargetState>]) {
    for target in targets.iter_mut().flatten() {
        target.blend = Some(FIRE_BLEND);
    }
}

/// Sets [`FIRE_DEPTH_WRITE`] and [`FIRE_DEPTH_COMPARE`] on a depth state.
pub fn apply_fire_depth(depth_stencil: &mut DepthStencilState) {
    depth_stencil.depth_write_enabled = FIRE_DEPTH_WRITE;
    depth_stencil.depth_compare = FIRE_DEPTH_COMPARE;
}

/// The material given to effects that don't bring their own.
#[derive(Resource, Debug, Clone)]
pub struct DefaultFireMaterial(pub Handle<FireMaterial>);

impl FromWorld for DefaultFireMaterial {
    fn from_world(world: &mut World) -> Self {
        let mut materials = world.resource_mut::<Assets<FireMaterial>>();
        Self(materials.add(FireMaterial::default()))
    }
}

/// Draws fire effects with [`FireMaterial`].
///
/// [`PyrePlugin`](crate::PyrePlugin) adds it on its own when the app renders.
pub struct FireMaterialPlugin;

impl Plugin for FireMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/fire_material.wgsl");

        app.add_plugins(MaterialPlugin::<FireMaterial>::default())
            .init_resource::<DefaultFireMaterial>()
            .add_systems(Update, attach_fire_materials);
    }
}

fn attach_fire_materials(
    mut commands: Commands,
    default_material: Res<DefaultFireMaterial>,
    query: Query<(Entity, &FireEffectMesh, Has<MeshMaterial3d<FireMaterial>>), Without<Mesh3d>>,
) {
    for (entity, mesh, has_material) in query.iter() {
        let mut entity = commands.entity(entity);
        // particles move every frame, the bounds computed at insertion would go stale
        entity.insert((Mesh3d(mesh.0.clone()), NoFrustumCulling));
        if !has_material {
            entity.insert(MeshMaterial3d(default_material.0.clone()));
        }
    }
}
