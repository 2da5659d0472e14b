use crate::flower::mesh::FlowerMesh;
use crate::renderer::camera::{Camera, CameraUniform};

// UI bounds top out at 100 x 720 = 72k vertices; leave headroom for
// hand-imported parameter files.
pub const MAX_FLOWER_VERTICES: usize = 200_000;
pub const MAX_FLOWER_INDICES: usize = 1_500_000;
const MAX_AXES_VERTICES: usize = 600;

/// Whether a mesh fits the preallocated GPU buffers. Imported parameter
/// files can describe grids far beyond the UI sliders; callers must reject
/// those outright rather than upload a partial mesh.
pub fn mesh_fits_gpu(mesh: &FlowerMesh) -> bool {
    mesh.vertex_count() <= MAX_FLOWER_VERTICES && mesh.indices.len() <= MAX_FLOWER_INDICES
}

/// GPU-side copy of the current flower plus the radial axes helper. Every
/// upload rewrites the buffers from a freshly built [`FlowerMesh`], so the
/// render loop only ever sees a complete mesh.
pub struct FlowerBuffers {
    pub position_buffer: wgpu::Buffer,
    pub normal_buffer: wgpu::Buffer,
    pub color_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,

    pub axes_vertex_buffer: wgpu::Buffer,
    pub axes_vertex_count: u32,
}

impl FlowerBuffers {
    pub fn new(device: &wgpu::Device) -> Self {
        let attribute_size = (MAX_FLOWER_VERTICES * 3 * 4) as u64;

        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Flower Position Buffer"),
            size: attribute_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let normal_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Flower Normal Buffer"),
            size: attribute_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Flower Color Buffer"),
            size: attribute_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Flower Index Buffer"),
            size: (MAX_FLOWER_INDICES * 4) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let axes_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Axes Vertex Buffer"),
            size: (MAX_AXES_VERTICES * 6 * 4) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            position_buffer,
            normal_buffer,
            color_buffer,
            index_buffer,
            vertex_count: 0,
            index_count: 0,
            axes_vertex_buffer,
            axes_vertex_count: 0,
        }
    }

    /// Uploads a complete mesh. The caller guarantees [`mesh_fits_gpu`];
    /// a truncated upload would leave indices pointing past the vertex
    /// buffers, so there is deliberately no partial path here.
    pub fn upload_flower(&mut self, queue: &wgpu::Queue, mesh: &FlowerMesh) {
        debug_assert!(mesh_fits_gpu(mesh));

        queue.write_buffer(
            &self.position_buffer,
            0,
            bytemuck::cast_slice(&mesh.positions),
        );
        queue.write_buffer(&self.normal_buffer, 0, bytemuck::cast_slice(&mesh.normals));
        queue.write_buffer(&self.color_buffer, 0, bytemuck::cast_slice(&mesh.colors));
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));

        self.vertex_count = mesh.vertex_count() as u32;
        self.index_count = mesh.indices.len() as u32;
    }

    pub fn upload_axes(&mut self, queue: &wgpu::Queue, vertices: &[f32]) {
        let count = vertices.len().min(MAX_AXES_VERTICES * 6);
        queue.write_buffer(
            &self.axes_vertex_buffer,
            0,
            bytemuck::cast_slice(&vertices[..count]),
        );
        self.axes_vertex_count = (count / 6) as u32;
    }
}

pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    pub pipeline_shaded: wgpu::RenderPipeline,
    pub pipeline_points: wgpu::RenderPipeline,
    pub pipeline_axes: wgpu::RenderPipeline,

    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,

    pub flower_buffers: FlowerBuffers,

    pub depth_texture: wgpu::TextureView,
}

const fn vec3_layout(shader_location: u32) -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: 12,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: match shader_location {
            0 => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
            1 => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            }],
            _ => &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 2,
                format: wgpu::VertexFormat::Float32x3,
            }],
        },
    }
}

// Interleaved position + color, for the line helper.
const AXES_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 24,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[
        wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute {
            offset: 12,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
    ],
};

impl GpuState {
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .unwrap();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Flower Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout],
            push_constant_ranges: &[],
        });

        let depth_stencil = Some(wgpu::DepthStencilState {
            format: wgpu::TextureFormat::Depth32Float,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        let color_target = Some(wgpu::ColorTargetState {
            format: config.format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        });

        let pipeline_shaded = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shaded Flower Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_flower"),
                buffers: &[vec3_layout(0), vec3_layout(1), vec3_layout(2)],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_flower"),
                targets: &[color_target.clone()],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Both faces visible: the flower is an open surface.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: depth_stencil.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pipeline_points = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Flower Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_points"),
                buffers: &[vec3_layout(0), vec3_layout(1)],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_points"),
                targets: &[color_target.clone()],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: depth_stencil.clone(),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let pipeline_axes = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Axes Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_axes"),
                buffers: &[AXES_LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_axes"),
                targets: &[color_target],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let flower_buffers = FlowerBuffers::new(&device);
        let depth_texture = Self::create_depth_texture(&device, &config);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            pipeline_shaded,
            pipeline_points,
            pipeline_axes,
            camera_buffer,
            camera_bind_group,
            flower_buffers,
            depth_texture,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Self::create_depth_texture(&self.device, &self.config);
        }
    }

    pub fn update_camera(&self, camera: &Camera) {
        let uniform = CameraUniform::from_camera(camera);
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = if enabled {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    /// One pass: clear, optionally draw the axes helper, then the flower as
    /// an indexed triangle mesh.
    pub fn render_shaded(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        show_axes: bool,
    ) {
        let mut render_pass = self.begin_scene_pass(view, encoder);

        if show_axes {
            self.draw_axes(&mut render_pass);
        }

        render_pass.set_pipeline(&self.pipeline_shaded);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.flower_buffers.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.flower_buffers.normal_buffer.slice(..));
        render_pass.set_vertex_buffer(2, self.flower_buffers.color_buffer.slice(..));
        render_pass.set_index_buffer(
            self.flower_buffers.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.flower_buffers.index_count, 0, 0..1);
    }

    /// Same pass shape, but the vertex field as a point cloud.
    pub fn render_points(
        &self,
        view: &wgpu::TextureView,
        encoder: &mut wgpu::CommandEncoder,
        show_axes: bool,
    ) {
        let mut render_pass = self.begin_scene_pass(view, encoder);

        if show_axes {
            self.draw_axes(&mut render_pass);
        }

        render_pass.set_pipeline(&self.pipeline_points);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.flower_buffers.position_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.flower_buffers.color_buffer.slice(..));
        render_pass.draw(0..self.flower_buffers.vertex_count, 0..1);
    }

    fn begin_scene_pass<'a>(
        &'a self,
        view: &'a wgpu::TextureView,
        encoder: &'a mut wgpu::CommandEncoder,
    ) -> wgpu::RenderPass<'a> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        })
    }

    fn draw_axes(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline_axes);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.flower_buffers.axes_vertex_buffer.slice(..));
        render_pass.draw(0..self.flower_buffers.axes_vertex_count, 0..1);
    }
}

const AXES_CIRCLE_COLOR: [f32; 3] = [1.0, 0.65, 0.0];
const AXES_VERTICAL_COLOR: [f32; 3] = [0.2, 0.2, 1.0];

/// Line-list vertices for the reference circle around the flower's base
/// plane plus a vertical axis through the pole. Interleaved position+color,
/// already in render space (y up, base plane at y = -200).
pub fn generate_axes_vertices(radius: f32, segments: u32, axis_length: f32) -> Vec<f32> {
    let base_y = -200.0f32;
    let mut vertices = Vec::with_capacity(((segments as usize) * 2 + 2) * 6);

    let mut push = |pos: [f32; 3], color: [f32; 3]| {
        vertices.extend_from_slice(&pos);
        vertices.extend_from_slice(&color);
    };

    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * std::f32::consts::TAU;
        let a1 = (i + 1) as f32 / segments as f32 * std::f32::consts::TAU;
        push([radius * a0.cos(), base_y, radius * a0.sin()], AXES_CIRCLE_COLOR);
        push([radius * a1.cos(), base_y, radius * a1.sin()], AXES_CIRCLE_COLOR);
    }

    push([0.0, base_y, 0.0], AXES_VERTICAL_COLOR);
    push([0.0, base_y + axis_length, 0.0], AXES_VERTICAL_COLOR);

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_maximums_fit_the_gpu_buffers() {
        let r = &crate::flower::SLIDER_RANGES;
        let vertical = r.vertical_resolution.1;
        let radial = r.radial_resolution.1;
        assert!((vertical as usize) * (radial as usize) <= MAX_FLOWER_VERTICES);
        assert!(
            crate::flower::generator::triangulate(vertical, radial).len() <= MAX_FLOWER_INDICES
        );
    }

    #[test]
    fn oversized_imported_grid_is_flagged_as_unfit() {
        // 1000 x 720 is valid input but exceeds the vertex capacity.
        let mesh = FlowerMesh {
            positions: vec![0.0; 1000 * 720 * 3],
            colors: vec![0.0; 1000 * 720 * 3],
            normals: Vec::new(),
            indices: Vec::new(),
        };
        assert!(!mesh_fits_gpu(&mesh));

        let in_bounds = FlowerMesh {
            positions: vec![0.0; 100 * 720 * 3],
            colors: vec![0.0; 100 * 720 * 3],
            normals: Vec::new(),
            indices: crate::flower::generator::triangulate(100, 720),
        };
        assert!(mesh_fits_gpu(&in_bounds));
    }

    #[test]
    fn axes_vertex_count_matches_line_list() {
        let verts = generate_axes_vertices(250.0, 64, 300.0);
        // 64 circle segments (2 vertices each) + the vertical axis pair.
        assert_eq!(verts.len(), (64 * 2 + 2) * 6);
        assert_eq!(verts.len() % 12, 0, "line list needs vertex pairs");
    }
}
