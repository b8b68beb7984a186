//! View renderer.
//!
//! Draws a textured world mesh and a pixel-space overlay mesh with one uniform
//! block per frame. Every binding point comes from `rampage-contract`:
//! - mesh vertices at `BufferIndex::MeshPositions`
//! - uniform block at `BufferIndex::Uniforms` (through a [`UniformRing`])
//! - color texture at `TextureIndex::Color`

mod camera;
mod pipeline;
mod ring;
mod vertex;

use std::borrow::Cow;

use anyhow::{Context, Result};
use rampage_contract::binding::{sampler_binding, texture_binding, TEXTURE_GROUP, UNIFORM_GROUP};
use rampage_contract::{TextureIndex, Uniforms};

use crate::render::{RenderCtx, RenderTarget};

pub use camera::{overlay_ortho, Camera};
pub use pipeline::{shader_source, ViewLayouts, ViewPipelines};
pub use ring::{aligned_stride, RingCursor, UniformRing};
pub use vertex::ViewVertex;

use pipeline::{MESH_VERTEX_SLOT, UNIFORMS_BINDING, UNIFORMS_MIN_BINDING_SIZE};

/// View renderer configuration.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Uniform regions kept alive at once. Must be at least the surface's
    /// maximum frame latency + 1.
    pub frames_in_flight: u32,

    /// Cull back faces of the world mesh (counter-clockwise front faces).
    pub cull_back_faces: bool,

    /// Label for the render pass.
    pub label: &'static str,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            cull_back_faces: false,
            label: "rampage view pass",
        }
    }
}

/// Which vertex transform a mesh is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Layer {
    /// `projectionMatrix * modelViewMatrix`.
    World,
    /// `orthoMatrix`, logical pixels.
    Overlay,
}

struct MeshBuffers {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    index_count: u32,
}

struct ColorTexture {
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// Renders one view against the contract's slots.
///
/// GPU resources are created lazily on first use; the pipelines are rebuilt
/// when the surface format changes.
#[derive(Default)]
pub struct ViewRenderer {
    config: ViewConfig,

    layouts: Option<ViewLayouts>,
    pipelines: Option<ViewPipelines>,

    ring: Option<UniformRing>,
    uniform_bind_group: Option<wgpu::BindGroup>,

    texture: Option<ColorTexture>,

    world: Option<MeshBuffers>,
    overlay: Option<MeshBuffers>,
}

impl ViewRenderer {
    pub fn new(config: ViewConfig) -> Self {
        Self { config, ..Default::default() }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Size of the bound color texture, if one has been created.
    pub fn texture_size(&self) -> Option<(u32, u32)> {
        self.texture.as_ref().map(|t| t.size)
    }

    /// Uploads `rgba8` (tightly packed, sRGB) to `TextureIndex::Color`.
    pub fn set_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        rgba8: &[u8],
    ) -> Result<()> {
        validate_rgba8(width, height, rgba8.len(), ctx.max_texture_dimension())?;

        self.ensure_layouts(ctx);
        let Some(layouts) = self.layouts.as_ref() else { return Ok(()) };

        self.texture = Some(create_color_texture(ctx, layouts, width, height, rgba8));
        log::debug!("ViewRenderer: color texture set to {width}x{height}");
        Ok(())
    }

    /// Replaces the mesh drawn on `layer`.
    ///
    /// An empty index list clears the layer.
    pub fn set_mesh(
        &mut self,
        ctx: &RenderCtx<'_>,
        layer: Layer,
        vertices: &[ViewVertex],
        indices: &[u16],
    ) -> Result<()> {
        validate_mesh(vertices.len(), indices)?;

        let slot = match layer {
            Layer::World => &mut self.world,
            Layer::Overlay => &mut self.overlay,
        };

        let fits = slot.as_ref().is_some_and(|m| {
            vertices.len() <= m.vertex_capacity && indices.len() <= m.index_capacity
        });
        if !fits {
            *slot = Some(create_mesh_buffers(ctx, layer, vertices.len(), indices.len()));
        }
        let Some(mesh) = slot.as_mut() else { return Ok(()) };

        if !vertices.is_empty() {
            ctx.queue.write_buffer(&mesh.vbo, 0, bytemuck::cast_slice(vertices));
        }
        if !indices.is_empty() {
            ctx.queue.write_buffer(&mesh.ibo, 0, bytemuck::cast_slice(&padded_indices(indices)));
        }
        mesh.index_count = indices.len() as u32;
        Ok(())
    }

    /// Uploads `uniforms` for this frame and draws both layers into `target`.
    ///
    /// The pass loads existing contents; the caller clears. Nothing is recorded
    /// when neither layer has geometry.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        uniforms: &Uniforms,
    ) -> Result<()> {
        let has_geometry = [&self.world, &self.overlay]
            .into_iter()
            .any(|m| m.as_ref().is_some_and(|m| m.index_count > 0));
        if !has_geometry {
            return Ok(());
        }

        self.ensure_layouts(ctx);
        self.ensure_pipelines(ctx);
        self.ensure_uniforms(ctx)?;
        self.ensure_default_texture(ctx);

        let ring = self.ring.as_ref().context("uniform ring missing after setup")?;
        let dynamic_offset = ring.write(ctx.queue, uniforms);

        let pipelines = self.pipelines.as_ref().context("pipelines missing after setup")?;
        let uniform_bg = self
            .uniform_bind_group
            .as_ref()
            .context("uniform bind group missing after setup")?;
        let texture = self.texture.as_ref().context("color texture missing after setup")?;

        {
            let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(self.config.label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_bind_group(UNIFORM_GROUP, uniform_bg, &[dynamic_offset]);
            rpass.set_bind_group(TEXTURE_GROUP, &texture.bind_group, &[]);

            let layers = [
                (&pipelines.world, self.world.as_ref()),
                (&pipelines.overlay, self.overlay.as_ref()),
            ];
            for (pipeline, mesh) in layers {
                let Some(mesh) = mesh.filter(|m| m.index_count > 0) else { continue };
                rpass.set_pipeline(pipeline);
                rpass.set_vertex_buffer(MESH_VERTEX_SLOT, mesh.vbo.slice(..));
                rpass.set_index_buffer(mesh.ibo.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        if let Some(ring) = self.ring.as_mut() {
            ring.advance();
        }
        Ok(())
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.layouts.is_none() {
            self.layouts = Some(ViewLayouts::new(ctx.device));
        }
    }

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.format == ctx.surface_format) {
            return;
        }
        let Some(layouts) = self.layouts.as_ref() else { return };

        log::debug!("ViewRenderer: building pipelines for {:?}", ctx.surface_format);
        self.pipelines = Some(ViewPipelines::new(
            ctx.device,
            layouts,
            ctx.surface_format,
            self.config.cull_back_faces,
        ));
    }

    fn ensure_uniforms(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self.ring.is_some() && self.uniform_bind_group.is_some() {
            return Ok(());
        }
        let Some(layouts) = self.layouts.as_ref() else { return Ok(()) };

        let ring = UniformRing::new(ctx, self.config.frames_in_flight)
            .context("failed to create view uniform ring")?;

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rampage view uniforms bind group"),
            layout: &layouts.uniforms,
            entries: &[wgpu::BindGroupEntry {
                binding: UNIFORMS_BINDING,
                // One block wide; the dynamic offset picks the region.
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: ring.buffer(),
                    offset: 0,
                    size: Some(UNIFORMS_MIN_BINDING_SIZE),
                }),
            }],
        });

        self.ring = Some(ring);
        self.uniform_bind_group = Some(bind_group);
        Ok(())
    }

    fn ensure_default_texture(&mut self, ctx: &RenderCtx<'_>) {
        if self.texture.is_some() {
            return;
        }
        let Some(layouts) = self.layouts.as_ref() else { return };

        // 1×1 white: untextured meshes render with their vertex color.
        self.texture = Some(create_color_texture(ctx, layouts, 1, 1, &[255; 4]));
    }
}

fn create_color_texture(
    ctx: &RenderCtx<'_>,
    layouts: &ViewLayouts,
    width: u32,
    height: u32,
    rgba8: &[u8],
) -> ColorTexture {
    let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("rampage view color texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba8,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Nearest filtering keeps texels crisp at close range.
    let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("rampage view color sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let color = TextureIndex::Color;
    let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("rampage view texture bind group"),
        layout: &layouts.textures,
        entries: &[
            wgpu::BindGroupEntry {
                binding: texture_binding(color),
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: sampler_binding(color),
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    ColorTexture { bind_group, size: (width, height) }
}

fn create_mesh_buffers(
    ctx: &RenderCtx<'_>,
    layer: Layer,
    vertices: usize,
    indices: usize,
) -> MeshBuffers {
    let vertex_capacity = buffer_capacity(vertices);
    let index_capacity = buffer_capacity(indices);

    log::debug!(
        "ViewRenderer: {layer:?} mesh buffers grown to {vertex_capacity} vertices / {index_capacity} indices"
    );

    let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("rampage view mesh vbo"),
        size: (vertex_capacity * std::mem::size_of::<ViewVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let ibo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("rampage view mesh ibo"),
        size: (index_capacity * std::mem::size_of::<u16>()) as u64,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    MeshBuffers { vbo, ibo, vertex_capacity, index_capacity, index_count: 0 }
}

/// Capacity for `required` elements: next power of two, at least 64.
fn buffer_capacity(required: usize) -> usize {
    required.next_power_of_two().max(64)
}

/// Pads odd-length index data to a 4-byte multiple for `write_buffer`.
fn padded_indices(indices: &[u16]) -> Cow<'_, [u16]> {
    if indices.len() % 2 == 0 {
        Cow::Borrowed(indices)
    } else {
        let mut padded = indices.to_vec();
        padded.push(0);
        Cow::Owned(padded)
    }
}

fn validate_rgba8(width: u32, height: u32, len: usize, max_dim: u32) -> Result<()> {
    anyhow::ensure!(width > 0 && height > 0, "texture has zero size ({width}x{height})");
    anyhow::ensure!(
        width <= max_dim && height <= max_dim,
        "texture {width}x{height} exceeds device limit {max_dim}"
    );
    let expected = width as usize * height as usize * 4;
    anyhow::ensure!(
        len == expected,
        "rgba8 data is {len} bytes, expected {expected} for {width}x{height}"
    );
    Ok(())
}

fn validate_mesh(vertex_count: usize, indices: &[u16]) -> Result<()> {
    anyhow::ensure!(
        indices.len() % 3 == 0,
        "index count {} is not a multiple of 3",
        indices.len()
    );
    if let Some(&max) = indices.iter().max() {
        anyhow::ensure!(
            (max as usize) < vertex_count,
            "index {max} out of range for {vertex_count} vertices"
        );
    }
    Ok(())
}
