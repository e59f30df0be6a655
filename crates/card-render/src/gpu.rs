use crate::helpers::{self, PipelineSpec};
use crate::meshes::{self, MeshLibrary};
use crate::packing::*;
use crate::textures::TextureCache;
use card_core::animation::{FrameSink, RenderFrame};
use card_core::label::{Bitmap, LabelRasterizer};
use card_core::scene::{compute_world_matrices, MeshKind, SceneDescription, TextureKey};
use glam::Mat4;
use std::cmp::Ordering;
use wgpu::util::DeviceExt;

struct DrawItem {
    mesh: MeshKind,
    texture: Option<TextureKey>,
    transparent: bool,
    /// Squared distance to the camera.
    depth: f32,
    instance: InstanceData,
}

impl DrawItem {
    fn batches_with(&self, other: &DrawItem) -> bool {
        self.mesh == other.mesh
            && self.texture == other.texture
            && self.transparent == other.transparent
    }
}

/// Opaque first (grouped for batching), then transparent back to front.
fn draw_order(a: &DrawItem, b: &DrawItem) -> Ordering {
    a.transparent.cmp(&b.transparent).then_with(|| {
        if a.transparent {
            b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal)
        } else {
            (a.mesh as u8)
                .cmp(&(b.mesh as u8))
                .then(a.texture.is_some().cmp(&b.texture.is_some()))
        }
    })
}

struct CloudSlot {
    instances: wgpu::Buffer,
    capacity: usize,
    len: u32,
    uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Buffer identity and generation of the last upload.
    uploaded: Option<(usize, u64)>,
}

/// Draws [`RenderFrame`]s onto a surface (canvas or window).
pub struct SceneRenderer<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    meshes: MeshLibrary,
    textures: TextureCache,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    cloud_layout: wgpu::BindGroupLayout,
    quad_vb: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    clouds: Vec<CloudSlot>,
    // per-frame scratch, reused
    world: Vec<Mat4>,
    draws: Vec<DrawItem>,
    instances: Vec<InstanceData>,
    particles: Vec<ParticleInstance>,
}

impl<'w> SceneRenderer<'w> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'w>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Palette colors are authored in sRGB and written out as-is.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = helpers::create_depth_texture(&device, config.width, config.height);

        let meshes = MeshLibrary::new(&device);
        let textures = TextureCache::new(&device, &queue);

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::SCENE_WGSL.into()),
        });
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_layout, &textures.layout],
            push_constant_ranges: &[],
        });
        const INSTANCE_ATTRS: [wgpu::VertexAttribute; 9] = wgpu::vertex_attr_array![
            3 => Float32x4, 4 => Float32x4, 5 => Float32x4, 6 => Float32x4,
            7 => Float32x4, 8 => Float32x4, 9 => Float32x4,
            10 => Float32x4, 11 => Float32x4
        ];
        let scene_buffers = [
            meshes::vertex_layout(),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<InstanceData>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &INSTANCE_ATTRS,
            },
        ];
        let opaque_spec = PipelineSpec {
            label: "opaque_pipeline",
            layout: &scene_layout,
            shader: &scene_shader,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            buffers: &scene_buffers,
            color_format: format,
            blend: None,
            depth_write: true,
            cull_mode: None,
        };
        let opaque_pipeline = helpers::make_pipeline(&device, &opaque_spec);
        let transparent_pipeline = helpers::make_pipeline(
            &device,
            &PipelineSpec {
                label: "transparent_pipeline",
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                ..opaque_spec
            },
        );

        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::POINTS_WGSL.into()),
        });
        let cloud_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("cloud_bgl"),
            entries: &[helpers::uniform_layout_entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let points_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&cloud_layout],
            push_constant_ranges: &[],
        });
        const PARTICLE_ATTRS: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![1 => Float32x4, 2 => Float32x4];
        let points_buffers = [
            // slot 0: sprite corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: per-particle data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &PARTICLE_ATTRS,
            },
        ];
        let points_pipeline = helpers::make_pipeline(
            &device,
            &PipelineSpec {
                label: "points_pipeline",
                layout: &points_layout,
                shader: &points_shader,
                vs_entry: "vs_points",
                fs_entry: "fs_points",
                buffers: &points_buffers,
                color_format: format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                cull_mode: None,
            },
        );

        let quad_vertices: [f32; 12] = [
            -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = helpers::grow_capacity(256);
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        log::info!(
            "[render] surface {}x{} format {:?} alpha {:?}",
            config.width,
            config.height,
            format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            meshes,
            textures,
            globals_buffer,
            globals_bind_group,
            opaque_pipeline,
            transparent_pipeline,
            points_pipeline,
            cloud_layout,
            quad_vb,
            instance_buffer,
            instance_capacity,
            clouds: Vec::new(),
            world: Vec::new(),
            draws: Vec::new(),
            instances: Vec::new(),
            particles: Vec::new(),
        })
    }

    /// Create GPU resources a scene description needs beyond the shared unit
    /// meshes: currently its text labels.
    pub fn instantiate(&mut self, description: &SceneDescription, rasterizer: &mut dyn LabelRasterizer) {
        for (key, spec) in &description.labels {
            match rasterizer.rasterize(spec) {
                Some(bitmap) => {
                    self.upload_texture(*key, &bitmap);
                }
                None => log::warn!("[render] no 2D context; label {:?} skipped", key),
            }
        }
    }

    pub fn upload_texture(&mut self, key: TextureKey, bitmap: &Bitmap) -> bool {
        self.textures.upload(&self.device, &self.queue, key, bitmap)
    }

    pub fn has_texture(&self, key: TextureKey) -> bool {
        self.textures.contains(key)
    }

    /// Drop photo textures from generations other than `generation`.
    pub fn retain_photo_generation(&mut self, generation: u64) {
        self.textures.retain(|k| match k {
            TextureKey::Photo { generation: g, .. } => *g == generation,
            _ => true,
        });
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) =
            helpers::create_depth_texture(&self.device, self.config.width, self.config.height);
        self.depth_view = depth_view;
    }

    fn collect_draws(&mut self, frame: &RenderFrame<'_>) {
        self.draws.clear();
        let eye = frame.camera.eye;
        for set in &frame.node_sets {
            compute_world_matrices(set.nodes, set.root, &mut self.world);
            for (node, world) in set.nodes.iter().zip(self.world.iter()) {
                let Some(mesh) = node.shape.mesh_kind() else {
                    continue;
                };
                if node.material.opacity <= 0.0 {
                    continue;
                }
                let instance = InstanceData::new(mesh_matrix(*world, node), &node.material);
                self.draws.push(DrawItem {
                    mesh,
                    texture: node.material.texture,
                    transparent: node.material.is_transparent(),
                    depth: (instance.translation() - eye).length_squared(),
                    instance,
                });
            }
        }
        self.draws.sort_by(draw_order);

        self.instances.clear();
        self.instances.extend(self.draws.iter().map(|d| d.instance));
        if self.instances.len() > self.instance_capacity {
            self.instance_capacity = helpers::grow_capacity(self.instances.len());
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.instances));
    }

    fn sync_clouds(&mut self, frame: &RenderFrame<'_>) {
        for (i, cloud) in frame.clouds.iter().enumerate() {
            if self.clouds.len() <= i {
                self.clouds.push(create_cloud_slot(
                    &self.device,
                    &self.cloud_layout,
                    helpers::grow_capacity(cloud.buffer.len()),
                ));
            }
            let slot = &mut self.clouds[i];
            let uniform = CloudUniform::new(frame.camera, cloud);
            self.queue
                .write_buffer(&slot.uniform, 0, bytemuck::bytes_of(&uniform));

            let identity = (cloud.buffer.positions.as_ptr() as usize, cloud.buffer.generation);
            if slot.uploaded == Some(identity) {
                continue;
            }
            pack_particles(cloud.buffer, &mut self.particles);
            if self.particles.len() > slot.capacity {
                slot.capacity = helpers::grow_capacity(self.particles.len());
                slot.instances = create_particle_buffer(&self.device, slot.capacity);
            }
            self.queue
                .write_buffer(&slot.instances, 0, bytemuck::cast_slice(&self.particles));
            slot.len = self.particles.len() as u32;
            slot.uploaded = Some(identity);
        }
    }

    pub fn render_frame(&mut self, frame: &RenderFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        let mut camera = frame.camera.clone();
        camera.aspect = self.config.width as f32 / self.config.height.max(1) as f32;
        let globals = Globals::new(&camera, frame.lights);
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let frame = RenderFrame {
            camera: &camera,
            node_sets: frame.node_sets.iter().cloned().collect(),
            clouds: frame.clouds.iter().cloned().collect(),
            lights: frame.lights,
            background: frame.background,
        };
        self.collect_draws(&frame);
        self.sync_clouds(&frame);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let clear = match frame.background {
            Some(c) => wgpu::Color {
                r: c.r as f64,
                g: c.g as f64,
                b: c.b as f64,
                a: 1.0,
            },
            None => wgpu::Color::TRANSPARENT,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            let mut start = 0usize;
            let mut bound_transparent = None;
            while start < self.draws.len() {
                let first = &self.draws[start];
                let end = start
                    + self.draws[start..]
                        .iter()
                        .take_while(|d| d.batches_with(first))
                        .count();
                if bound_transparent != Some(first.transparent) {
                    rpass.set_pipeline(if first.transparent {
                        &self.transparent_pipeline
                    } else {
                        &self.opaque_pipeline
                    });
                    bound_transparent = Some(first.transparent);
                }
                let mesh = self.meshes.get(first.mesh);
                rpass.set_bind_group(1, self.textures.bind_group(first.texture), &[]);
                rpass.set_vertex_buffer(0, mesh.vertices.slice(..));
                rpass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, start as u32..end as u32);
                start = end;
            }

            rpass.set_pipeline(&self.points_pipeline);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            for (slot, cloud) in self.clouds.iter().zip(frame.clouds.iter()) {
                if !cloud.buffer.is_visible() || slot.len == 0 {
                    continue;
                }
                rpass.set_bind_group(0, &slot.bind_group, &[]);
                rpass.set_vertex_buffer(1, slot.instances.slice(..));
                rpass.draw(0..6, 0..slot.len);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl FrameSink for SceneRenderer<'_> {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        match self.render_frame(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("[render] out of GPU memory"),
            Err(e) => log::warn!("[render] frame skipped: {:?}", e),
        }
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<InstanceData>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_particle_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("particle_vb"),
        size: (std::mem::size_of::<ParticleInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_cloud_slot(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, capacity: usize) -> CloudSlot {
    let uniform = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("cloud_uniform"),
        size: std::mem::size_of::<CloudUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("cloud_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform.as_entire_binding(),
        }],
    });
    CloudSlot {
        instances: create_particle_buffer(device, capacity),
        capacity,
        len: 0,
        uniform,
        bind_group,
        uploaded: None,
    }
}
