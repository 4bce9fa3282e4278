//! wgpu render adapter.
//!
//! Draws the pool as one instanced draw call: six vertices per quad, one
//! [`QuadInstance`] per particle. Quads are alpha blended without depth
//! writes, so instances are sorted back-to-front before upload.

mod camera;
mod shader;

use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::Camera;
use shader::{Uniforms, SMOKE_SHADER};

use crate::config::SceneConfig;
use crate::error::{GpuError, SmokeError};
use crate::render::{QuadInstance, RenderAdapter, SurfaceSize};
use crate::textures::TextureData;

/// Device, queue and surface. Dropped on release.
struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

/// Texture, material and geometry for the pool. Created by `prepare`.
struct SceneResources {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    capacity: usize,
    _texture: wgpu::Texture,
}

/// Render adapter backed by wgpu, drawing into a winit window.
pub struct WgpuRenderer {
    gpu: Option<GpuContext>,
    resources: Option<SceneResources>,
    camera: Camera,
    scene: SceneConfig,
    sorted: Vec<QuadInstance>,
    released: bool,
}

impl WgpuRenderer {
    /// Create the device and configure the window surface at `size`.
    pub async fn new(
        window: Arc<Window>,
        size: SurfaceSize,
        scene: &SceneConfig,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Smoke Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        // Prefer a compositor mode that lets the page show through.
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .unwrap_or(surface_caps.alpha_modes[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::debug!(
            "Smoke surface configured: {}x{} {:?} {:?}",
            size.width,
            size.height,
            surface_format,
            alpha_mode
        );

        Ok(Self {
            gpu: Some(GpuContext {
                surface,
                device,
                queue,
                config,
            }),
            resources: None,
            camera: Camera::new(scene, size.aspect()),
            scene: scene.clone(),
            sorted: Vec::new(),
            released: false,
        })
    }

    /// Blocking wrapper around [`new`](Self::new) for event-loop callbacks.
    pub fn new_blocking(
        window: Arc<Window>,
        size: SurfaceSize,
        scene: &SceneConfig,
    ) -> Result<Self, GpuError> {
        pollster::block_on(Self::new(window, size, scene))
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    fn uniforms(&self) -> Uniforms {
        let light = Vec3::from_array(self.scene.light_direction).normalize_or_zero();
        let [r, g, b] = self.scene.tint;
        Uniforms {
            view_proj: self.camera.view_proj().to_cols_array_2d(),
            tint: [r, g, b, self.scene.quad_size],
            light: [light.x, light.y, light.z, self.scene.light_intensity],
            ambient: [self.scene.ambient_intensity, 0.0, 0.0, 0.0],
        }
    }
}

impl RenderAdapter for WgpuRenderer {
    fn prepare(&mut self, texture: &TextureData, pool_size: usize) -> Result<(), SmokeError> {
        let uniforms = self.uniforms();
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(GpuError::NotPrepared.into());
        };
        let device = &gpu.device;

        let texture_size = wgpu::Extent3d {
            width: texture.width,
            height: texture.height,
            depth_or_array_layers: 1,
        };
        let smoke_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Smoke Texture"),
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &smoke_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &texture.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * texture.width),
                rows_per_image: Some(texture.height),
            },
            texture_size,
        );
        let texture_view = smoke_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Smoke Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Smoke Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let capacity = pool_size.max(1);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Smoke Instance Buffer"),
            size: (capacity * std::mem::size_of::<QuadInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Smoke Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Smoke Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Smoke Shader"),
            source: wgpu::ShaderSource::Wgsl(SMOKE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Smoke Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let instance_attributes = wgpu::vertex_attr_array![
            0 => Float32x3, // position
            1 => Float32,   // rotation
            2 => Float32,   // scale
            3 => Float32,   // opacity
        ];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Smoke Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<QuadInstance>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &instance_attributes,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        self.resources = Some(SceneResources {
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer,
            capacity,
            _texture: smoke_texture,
        });
        self.sorted = Vec::with_capacity(capacity);
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.config.width = size.width;
            gpu.config.height = size.height;
            gpu.surface.configure(&gpu.device, &gpu.config);
        }
        self.camera.set_aspect(size.aspect());
    }

    fn draw(&mut self, quads: &[QuadInstance]) -> Result<(), SmokeError> {
        if self.released {
            return Ok(());
        }
        let uniforms = self.uniforms();
        let (Some(gpu), Some(res)) = (self.gpu.as_ref(), self.resources.as_ref()) else {
            return Err(GpuError::NotPrepared.into());
        };

        let count = quads.len().min(res.capacity);
        self.sorted.clear();
        self.sorted.extend_from_slice(&quads[..count]);
        // Farther quads (smaller z) first so blending composes correctly.
        self.sorted
            .sort_by(|a, b| a.position[2].total_cmp(&b.position[2]));

        gpu.queue
            .write_buffer(&res.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        gpu.queue
            .write_buffer(&res.instance_buffer, 0, bytemuck::cast_slice(&self.sorted));

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::debug!("Surface frame timed out, skipping");
                return Ok(());
            }
            Err(e) => return Err(GpuError::Frame(e).into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Smoke Encoder"),
            });

        {
            let [r, g, b, a] = self.scene.clear_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Smoke Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&res.pipeline);
            render_pass.set_bind_group(0, &res.bind_group, &[]);
            render_pass.set_vertex_buffer(0, res.instance_buffer.slice(..));
            render_pass.draw(0..6, 0..count as u32);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.resources = None;
        self.gpu = None;
        self.sorted = Vec::new();
        log::debug!("Smoke GPU resources released");
    }
}
