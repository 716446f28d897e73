//! The wgpu quad renderer
//!
//! Implements the overlay renderer collaborators: a [`TextureStore`] keyed by
//! [`TextureId`], and a recorded [`QuadPass`] that encodes all blits and
//! fills of one output repaint into a single render pass.

use shimmer_core::{Color, PixelFormat, Rect};
use shimmer_overlay::{RenderPass, TextureId, TextureStore};
use slotmap::SlotMap;
use wgpu::util::DeviceExt;

use crate::shaders::QUAD_SHADER;
use crate::texture::GpuTexture;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 2],
    uv: [f32; 2],
    color: [f32; 4],
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

/// Build the two triangles of a quad.
///
/// `dst` is in target pixel coordinates (y down); `uv` is `[u0, v0, u1, v1]`.
fn quad_vertices(dst: Rect, uv: [f32; 4], color: [f32; 4], target: (f32, f32)) -> [Vertex; 6] {
    let to_ndc = |x: f32, y: f32| [x / target.0 * 2.0 - 1.0, 1.0 - y / target.1 * 2.0];

    let (x0, y0) = (dst.x as f32, dst.y as f32);
    let (x1, y1) = ((dst.x + dst.width) as f32, (dst.y + dst.height) as f32);

    let top_left = Vertex {
        position: to_ndc(x0, y0),
        uv: [uv[0], uv[1]],
        color,
    };
    let top_right = Vertex {
        position: to_ndc(x1, y0),
        uv: [uv[2], uv[1]],
        color,
    };
    let bottom_left = Vertex {
        position: to_ndc(x0, y1),
        uv: [uv[0], uv[3]],
        color,
    };
    let bottom_right = Vertex {
        position: to_ndc(x1, y1),
        uv: [uv[2], uv[3]],
        color,
    };

    [
        top_left,
        bottom_left,
        top_right,
        top_right,
        bottom_left,
        bottom_right,
    ]
}

enum QuadCmd {
    Blit { texture: TextureId, src: Rect, dst: Rect },
    Fill { dst: Rect, color: Color },
}

/// Blits and fills recorded for one output repaint.
///
/// Overlays draw into this through the [`RenderPass`] trait; the renderer
/// turns it into GPU work in [`GpuRenderer::submit`].
pub struct QuadPass {
    target_width: u32,
    target_height: u32,
    cmds: Vec<QuadCmd>,
}

impl QuadPass {
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

impl RenderPass for QuadPass {
    fn blit_texture(&mut self, texture: TextureId, src: Rect, dst: Rect) {
        self.cmds.push(QuadCmd::Blit { texture, src, dst });
    }

    fn fill_rect(&mut self, dst: Rect, color: Color) {
        self.cmds.push(QuadCmd::Fill { dst, color });
    }
}

/// A wgpu-backed renderer for overlay content.
///
/// Holds the textured-quad pipeline (premultiplied-alpha blending), a shared
/// sampler, a 1x1 white texture backing solid fills, and every texture
/// overlays have uploaded.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white: GpuTexture,
    textures: SlotMap<TextureId, GpuTexture>,
}

impl GpuRenderer {
    /// Create a renderer drawing to targets of `target_format`.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(QUAD_SHADER.into()),
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Quad Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[&texture_layout],
            push_constant_ranges: &[],
        });

        // Premultiplied-alpha blending over the existing scene
        let blend_state = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(blend_state),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Quad Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let white = GpuTexture::from_argb(
            &device,
            &queue,
            &texture_layout,
            &sampler,
            &[255, 255, 255, 255],
            4,
            1,
            1,
            Some("White Texture"),
        );

        Self {
            device,
            queue,
            pipeline,
            texture_layout,
            sampler,
            white,
            textures: SlotMap::with_key(),
        }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Start recording a pass for a target of the given pixel size.
    pub fn begin_pass(&self, target_width: u32, target_height: u32) -> QuadPass {
        QuadPass {
            target_width,
            target_height,
            cmds: Vec::new(),
        }
    }

    /// Encode a recorded pass into `encoder`, drawing over `target_view`.
    pub fn submit(&self, pass: QuadPass, encoder: &mut wgpu::CommandEncoder, target_view: &wgpu::TextureView) {
        if pass.cmds.is_empty() {
            return;
        }

        let target = (pass.target_width as f32, pass.target_height as f32);
        let mut vertices = Vec::with_capacity(pass.cmds.len() * 6);
        let mut draws: Vec<(Option<TextureId>, u32)> = Vec::with_capacity(pass.cmds.len());

        for cmd in &pass.cmds {
            match cmd {
                QuadCmd::Blit { texture, src, dst } => {
                    let Some(gpu_texture) = self.textures.get(*texture) else {
                        tracing::warn!("Dropping blit of unknown texture {texture:?}");
                        continue;
                    };
                    let (tex_w, tex_h) = gpu_texture.dimensions();
                    let uv = [
                        src.x as f32 / tex_w as f32,
                        src.y as f32 / tex_h as f32,
                        (src.x + src.width) as f32 / tex_w as f32,
                        (src.y + src.height) as f32 / tex_h as f32,
                    ];
                    vertices.extend(quad_vertices(*dst, uv, [1.0; 4], target));
                    draws.push((Some(*texture), 6));
                }
                QuadCmd::Fill { dst, color } => {
                    let color = [color.r, color.g, color.b, color.a];
                    vertices.extend(quad_vertices(*dst, [0.0, 0.0, 1.0, 1.0], color, target));
                    draws.push((None, 6));
                }
            }
        }

        if vertices.is_empty() {
            return;
        }

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Quad Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

        let mut offset = 0;
        for (texture, count) in draws {
            let bind_group = match texture {
                Some(id) => self.textures[id].bind_group(),
                None => self.white.bind_group(),
            };
            render_pass.set_bind_group(0, bind_group, &[]);
            render_pass.draw(offset..offset + count, 0..1);
            offset += count;
        }
    }
}

impl TextureStore for GpuRenderer {
    fn upload_texture(
        &mut self,
        pixels: &[u8],
        format: PixelFormat,
        stride: usize,
        width: u32,
        height: u32,
    ) -> Option<TextureId> {
        let PixelFormat::Argb8888 = format;

        let max_dim = self.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max_dim || height > max_dim {
            tracing::warn!("Refusing texture upload of {width}x{height} (max {max_dim})");
            return None;
        }
        if pixels.len() < stride * height as usize {
            tracing::warn!("Refusing texture upload with short pixel buffer");
            return None;
        }

        let texture = GpuTexture::from_argb(
            &self.device,
            &self.queue,
            &self.texture_layout,
            &self.sampler,
            pixels,
            stride,
            width,
            height,
            Some("Overlay Texture"),
        );
        tracing::debug!("Uploaded {width}x{height} overlay texture");
        Some(self.textures.insert(texture))
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        if self.textures.remove(texture).is_none() {
            tracing::warn!("Destroy of unknown texture {texture:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_vertices_cover_target() {
        let verts = quad_vertices(
            Rect::new(0, 0, 100, 50),
            [0.0, 0.0, 1.0, 1.0],
            [1.0; 4],
            (100.0, 50.0),
        );
        assert_eq!(verts[0].position, [-1.0, 1.0]);
        assert_eq!(verts[5].position, [1.0, -1.0]);
        assert_eq!(verts[0].uv, [0.0, 0.0]);
        assert_eq!(verts[5].uv, [1.0, 1.0]);
    }

    #[test]
    fn test_quad_vertices_centered_quad() {
        let verts = quad_vertices(
            Rect::new(25, 25, 50, 50),
            [0.0, 0.0, 1.0, 1.0],
            [1.0; 4],
            (100.0, 100.0),
        );
        assert_eq!(verts[0].position, [-0.5, 0.5]);
        assert_eq!(verts[5].position, [0.5, -0.5]);
    }

    #[test]
    fn test_quad_triangles_share_diagonal() {
        let verts = quad_vertices(
            Rect::new(0, 0, 10, 10),
            [0.0, 0.0, 1.0, 1.0],
            [1.0; 4],
            (10.0, 10.0),
        );
        // Triangle list: [tl, bl, tr], [tr, bl, br]
        assert_eq!(verts[2], verts[3]);
        assert_eq!(verts[1], verts[4]);
    }

    // Needs a GPU; run with: cargo test -- --ignored
    #[test]
    #[ignore]
    fn test_renderer_creation() {
        // Would need an actual wgpu device for this test
    }
}
