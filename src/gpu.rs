//! WebGL2 rendering module using wgpu

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use static_assertions::const_assert_eq;

use crate::error::ViewerError;
use crate::scene::{BodyPart, DrawList, MeshKind};

/// Position + colour passthrough, transformed by projection * model-view
const FIGURE_SHADER: &str = r#"
struct DrawUniforms {
    projection: mat4x4<f32>,
    model_view: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: DrawUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.model_view * vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

/// Per-draw uniform slot
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct DrawUniforms {
    projection: [[f32; 4]; 4],
    model_view: [[f32; 4]; 4],
}

const UNIFORM_SIZE: u64 = std::mem::size_of::<DrawUniforms>() as u64;
const_assert_eq!(UNIFORM_SIZE, 128);

/// GPU copy of one block: separate position, colour and index buffers
pub struct Mesh {
    pub positions: wgpu::Buffer,
    pub colors: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    pub index_count: u32,
}

impl Mesh {
    fn upload(device: &wgpu::Device, kind: MeshKind) -> Self {
        use wgpu::util::DeviceExt;

        let data = kind.data();
        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Positions"),
            contents: bytemuck::cast_slice(&data.positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Colors"),
            contents: bytemuck::cast_slice(&data.colors),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            positions,
            colors,
            indices,
            index_count: data.indices.len() as u32,
        }
    }
}

/// Every mesh, uploaded once at start-up and never modified
pub struct GeometryStore {
    meshes: [Mesh; MeshKind::COUNT],
}

impl GeometryStore {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            meshes: MeshKind::ALL.map(|kind| Mesh::upload(device, kind)),
        }
    }

    #[inline]
    pub fn get(&self, kind: MeshKind) -> &Mesh {
        &self.meshes[kind.index()]
    }
}

/// Device, surface, pipeline and the figure's buffers
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    /// Distance between uniform slots, padded to the device's offset alignment
    uniform_stride: u64,
    depth_view: wgpu::TextureView,
    geometry: GeometryStore,
    clear_color: wgpu::Color,
}

impl GpuContext {
    /// Acquire a WebGL2 context on `canvas` and build everything the frame
    /// loop needs. Shader and pipeline failures carry the backend log.
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        clear_color: [f64; 4],
    ) -> Result<Self, ViewerError> {
        let width = (canvas.client_width().max(1)) as u32;
        let height = (canvas.client_height().max(1)) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        // The GL backend needs the surface before an adapter can be picked
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| ViewerError::ContextUnavailable(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                ViewerError::ContextUnavailable("no WebGL2 adapter available".to_string())
            })?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| ViewerError::ContextUnavailable(e.to_string()))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats.first().copied().ok_or_else(|| {
            ViewerError::ContextUnavailable("surface reports no texture formats".to_string())
        })?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Figure Shader"),
            source: wgpu::ShaderSource::Wgsl(FIGURE_SHADER.into()),
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(ViewerError::ShaderCompile(err.to_string()));
        }

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = UNIFORM_SIZE.next_multiple_of(alignment);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniforms"),
            size: uniform_stride * BodyPart::COUNT as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: NonZeroU64::new(UNIFORM_SIZE),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Figure Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Figure Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &POSITION_ATTRIBUTES,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &COLOR_ATTRIBUTES,
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(ViewerError::ShaderLink(err.to_string()));
        }

        let depth_view = create_depth_view(&device, width, height);
        let geometry = GeometryStore::new(&device);

        let [r, g, b, a] = clear_color;
        log::info!(
            "WebGL2 context ready ({}x{}, {:?}, uniform stride {})",
            width,
            height,
            format,
            uniform_stride
        );

        Ok(Self {
            device,
            queue,
            surface,
            config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            depth_view,
            geometry,
            clear_color: wgpu::Color { r, g, b, a },
        })
    }

    /// Viewport width / height
    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height as f32
    }

    /// Reconfigure the surface and depth target after the canvas changed size
    pub fn resize(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
        log::info!("Surface resized to {}x{}", width, height);
    }

    /// Upload this frame's uniforms and draw every recorded part
    pub fn render(&mut self, frame: &DrawList) {
        for (slot, call) in frame.calls().iter().enumerate() {
            let uniforms = DrawUniforms {
                projection: frame.projection.to_cols_array_2d(),
                model_view: call.model_view.to_cols_array_2d(),
            };
            self.queue.write_buffer(
                &self.uniform_buffer,
                slot as u64 * self.uniform_stride,
                bytemuck::bytes_of(&uniforms),
            );
        }

        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(err) => {
                log::warn!("Skipping frame: {}", err);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Figure Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            for (slot, call) in frame.calls().iter().enumerate() {
                let mesh = self.geometry.get(call.mesh);
                let offset = (slot as u64 * self.uniform_stride) as wgpu::DynamicOffset;

                pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                pass.set_vertex_buffer(0, mesh.positions.slice(..));
                pass.set_vertex_buffer(1, mesh.colors.slice(..));
                pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&Default::default())
}
