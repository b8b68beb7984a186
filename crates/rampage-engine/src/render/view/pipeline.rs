//! wgpu layouts and pipelines derived from the contract slots.

use std::num::NonZeroU64;

use rampage_contract::binding::{
    sampler_binding, texture_binding, uniform_binding, vertex_buffer_slot, TEXTURE_GROUP,
    UNIFORM_GROUP,
};
use rampage_contract::{wgsl, BufferIndex, TextureIndex, UNIFORMS_SIZE};

use super::vertex::ViewVertex;

/// Vertex entry point for world-space meshes.
pub const VS_WORLD: &str = "vs_world";
/// Vertex entry point for pixel-space overlays.
pub const VS_OVERLAY: &str = "vs_overlay";
pub const FS_MAIN: &str = "fs_main";

/// Full WGSL source: generated contract prelude + view shader body.
pub fn shader_source() -> String {
    wgsl::compose(include_str!("shaders/view.wgsl"))
}

/// Binding of the uniform block inside [`UNIFORM_GROUP`].
pub(super) const UNIFORMS_BINDING: u32 = match uniform_binding(BufferIndex::Uniforms) {
    Some(binding) => binding,
    None => panic!("BufferIndex::Uniforms must be a bind-group resource"),
};

/// Vertex buffer index the mesh is bound to.
pub(super) const MESH_VERTEX_SLOT: u32 = match vertex_buffer_slot(BufferIndex::MeshPositions) {
    Some(slot) => slot,
    None => panic!("BufferIndex::MeshPositions must be a vertex buffer"),
};

pub(super) const UNIFORMS_MIN_BINDING_SIZE: NonZeroU64 = match NonZeroU64::new(UNIFORMS_SIZE as u64) {
    Some(size) => size,
    None => panic!("Uniforms has non-zero size"),
};

pub fn uniform_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("rampage view uniforms bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: UNIFORMS_BINDING,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                // One region per frame in flight, selected at bind time.
                has_dynamic_offset: true,
                min_binding_size: Some(UNIFORMS_MIN_BINDING_SIZE),
            },
            count: None,
        }],
    })
}

pub fn texture_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let color = TextureIndex::Color;
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("rampage view texture bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: texture_binding(color),
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: sampler_binding(color),
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// Bind group layouts in group order.
pub struct ViewLayouts {
    pub uniforms: wgpu::BindGroupLayout,
    pub textures: wgpu::BindGroupLayout,
}

impl ViewLayouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            uniforms: uniform_bind_group_layout(device),
            textures: texture_bind_group_layout(device),
        }
    }

    fn in_group_order(&self) -> [&wgpu::BindGroupLayout; 2] {
        const _: () = assert!(UNIFORM_GROUP == 0 && TEXTURE_GROUP == 1);
        [&self.uniforms, &self.textures]
    }
}

/// World and overlay pipelines sharing one shader module and layout.
pub struct ViewPipelines {
    pub format: wgpu::TextureFormat,
    pub world: wgpu::RenderPipeline,
    pub overlay: wgpu::RenderPipeline,
}

impl ViewPipelines {
    pub fn new(
        device: &wgpu::Device,
        layouts: &ViewLayouts,
        format: wgpu::TextureFormat,
        cull_back_faces: bool,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rampage view shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source().into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rampage view pipeline layout"),
            bind_group_layouts: &layouts.in_group_order(),
            immediate_size: 0,
        });

        let cull_mode = cull_back_faces.then_some(wgpu::Face::Back);
        let world = create_pipeline(device, &pipeline_layout, &shader, format, VS_WORLD, cull_mode);
        // Overlays are flat quads; never culled.
        let overlay = create_pipeline(device, &pipeline_layout, &shader, format, VS_OVERLAY, None);

        Self { format, world, overlay }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    vs_entry: &str,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    // `buffers` is indexed by vertex buffer slot.
    const _: () = assert!(MESH_VERTEX_SLOT == 0);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("rampage view pipeline"),
        layout: Some(layout),

        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            compilation_options: Default::default(),
            buffers: &[ViewVertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(FS_MAIN),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                // Vertex colors are premultiplied.
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use naga::{Binding, ShaderStage};

    fn module() -> naga::Module {
        let src = shader_source();
        let module = naga::front::wgsl::parse_str(&src)
            .unwrap_or_else(|e| panic!("WGSL parse error: {}", e.emit_to_string(&src)));
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .unwrap_or_else(|e| panic!("WGSL validation error: {e:?}"));
        module
    }

    fn entry<'a>(module: &'a naga::Module, name: &str) -> &'a naga::EntryPoint {
        module
            .entry_points
            .iter()
            .find(|ep| ep.name == name)
            .unwrap_or_else(|| panic!("missing entry point {name}"))
    }

    #[test]
    fn view_shader_validates_with_contract_prelude() {
        let m = module();
        assert_eq!(entry(&m, VS_WORLD).stage, ShaderStage::Vertex);
        assert_eq!(entry(&m, VS_OVERLAY).stage, ShaderStage::Vertex);
        assert_eq!(entry(&m, FS_MAIN).stage, ShaderStage::Fragment);
    }

    #[test]
    fn vertex_stages_read_every_layout_location() {
        let m = module();
        let host: Vec<u32> = ViewVertex::layout().attributes.iter().map(|a| a.shader_location).collect();
        for name in [VS_WORLD, VS_OVERLAY] {
            let ep = entry(&m, name);
            let arg_ty = ep.function.arguments[0].ty;
            let naga::TypeInner::Struct { members, .. } = &m.types[arg_ty].inner else {
                panic!("{name} input is not a struct");
            };
            let shader: Vec<u32> = members
                .iter()
                .filter_map(|mb| match mb.binding {
                    Some(Binding::Location { location, .. }) => Some(location),
                    _ => None,
                })
                .collect();
            assert_eq!(shader, host, "{name}");
        }
    }

    #[test]
    fn host_bindings_follow_contract() {
        assert_eq!(UNIFORMS_BINDING, 1);
        assert_eq!(MESH_VERTEX_SLOT, 0);
        assert_eq!(UNIFORMS_MIN_BINDING_SIZE.get(), 192);
    }
}
