//! WebGPU render pipeline for the exploration scene
//!
//! Draws the floor grid, indicator discs and lit solids. There is no depth
//! buffer: `scene_items` hands objects over in painter's order.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::RenderError;
use super::mesh::{InstanceData, LineVertex, MeshKind, MeshSet, Vertex, grid_vertices, scene_items};
use crate::hex_to_rgb;
use crate::scene::SceneSetup;
use crate::settings::Settings;
use crate::sim::GameState;

/// Initial instance capacity; grows on demand
const INITIAL_INSTANCES: usize = 128;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    sun_color: [f32; 4],
    sun_dir: [f32; 4],
}

impl Globals {
    fn new(view_proj: glam::Mat4, scene: &SceneSetup) -> Self {
        let [ar, ag, ab] = hex_to_rgb(scene.ambient.color);
        let [sr, sg, sb] = hex_to_rgb(scene.sun.color);
        let dir = scene.sun.direction();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            ambient: [ar, ag, ab, scene.ambient.intensity],
            sun_color: [sr, sg, sb, scene.sun.intensity],
            sun_dir: [dir.x, dir.y, dir.z, 0.0],
        }
    }
}

/// Prefer a non-sRGB format: scene colors are authored as sRGB hex values
/// and written as-is
pub fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Result<wgpu::TextureFormat, RenderError> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
        .ok_or(RenderError::IncompatibleSurface)
}

pub struct SceneRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,

    solid_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    meshes: MeshSet,
    mesh_vertex_buffer: wgpu::Buffer,
    mesh_index_buffer: wgpu::Buffer,
    grid_buffer: wgpu::Buffer,
    grid_vertex_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    scene: SceneSetup,
    pub size: (u32, u32),
}

impl SceneRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        scene: SceneSetup,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("memory-walk-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = pick_surface_format(&surface_caps.formats)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RenderError::IncompatibleSurface)?;
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals::new(glam::Mat4::IDENTITY, &scene)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = |label: &str,
                        vs: &str,
                        fs: &str,
                        buffers: &[wgpu::VertexBufferLayout<'_>],
                        topology: wgpu::PrimitiveTopology,
                        cull_mode: Option<wgpu::Face>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let mesh_buffers = [Vertex::desc(), InstanceData::desc()];
        let solid_pipeline = pipeline(
            "solid_pipeline",
            "vs_main",
            "fs_main",
            &mesh_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
        );
        let disc_pipeline = pipeline(
            "disc_pipeline",
            "vs_main",
            "fs_main",
            &mesh_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            None,
        );
        let line_pipeline = pipeline(
            "line_pipeline",
            "vs_line",
            "fs_line",
            &[LineVertex::desc()],
            wgpu::PrimitiveTopology::LineList,
            None,
        );

        let meshes = MeshSet::build();
        let mesh_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertices"),
            contents: bytemuck::cast_slice(&meshes.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let mesh_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_indices"),
            contents: bytemuck::cast_slice(&meshes.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let grid = grid_vertices(&scene.floor);
        let grid_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("grid_vertices"),
            contents: bytemuck::cast_slice(&grid),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = Self::create_instance_buffer(&device, INITIAL_INSTANCES);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            solid_pipeline,
            disc_pipeline,
            line_pipeline,
            globals_buffer,
            bind_group,
            meshes,
            mesh_vertex_buffer,
            mesh_index_buffer,
            grid_buffer,
            grid_vertex_count: grid.len() as u32,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            scene,
            size: (width, height),
        })
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (std::mem::size_of::<InstanceData>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the frame's objects and draw them
    pub fn render(
        &mut self,
        state: &GameState,
        settings: &Settings,
    ) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals::new(state.camera.view_projection(), &self.scene);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let items = scene_items(state, settings);
        if items.len() > self.instance_capacity {
            self.instance_capacity = items.len().next_power_of_two();
            self.instance_buffer =
                Self::create_instance_buffer(&self.device, self.instance_capacity);
        }
        let instances: Vec<InstanceData> = items.iter().map(|item| item.instance).collect();
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        {
            let [r, g, b] = hex_to_rgb(self.scene.background);
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);

            // Floor grid
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.grid_buffer.slice(..));
            render_pass.draw(0..self.grid_vertex_count, 0..1);

            // Discs, then solids, in the order given
            render_pass.set_vertex_buffer(0, self.mesh_vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.set_index_buffer(
                self.mesh_index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );

            let mut current: Option<MeshKind> = None;
            for (i, item) in items.iter().enumerate() {
                let is_disc = item.mesh == MeshKind::Disc;
                if current.map(|m| (m == MeshKind::Disc) != is_disc).unwrap_or(true) {
                    render_pass.set_pipeline(if is_disc {
                        &self.disc_pipeline
                    } else {
                        &self.solid_pipeline
                    });
                }
                current = Some(item.mesh);

                let range = self.meshes.range(item.mesh);
                let instance = i as u32;
                render_pass.draw_indexed(range.indices.clone(), 0, instance..instance + 1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_linear_format() {
        let formats = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(
            pick_surface_format(&formats).unwrap(),
            wgpu::TextureFormat::Bgra8Unorm
        );
    }

    #[test]
    fn test_falls_back_to_first_format() {
        let formats = [wgpu::TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            pick_surface_format(&formats).unwrap(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
    }

    #[test]
    fn test_no_formats_is_an_error() {
        let err = pick_surface_format(&[]).unwrap_err();
        assert!(matches!(err, RenderError::IncompatibleSurface));
        assert!(err.to_string().contains("adapter"));
    }
}
