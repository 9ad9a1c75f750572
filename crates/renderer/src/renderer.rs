//! Main renderer managing wgpu state and the per-frame passes.

use crate::{
    camera::{CameraUniform, OrbitCamera},
    mesh::Mesh,
    pipeline::{
        create_blur_bind_group_layout,
        create_blur_pipeline,
        create_body_pipeline,
        create_bright_bind_group_layout,
        create_bright_pipeline,
        create_camera_bind_group_layout,
        create_cinematic_bind_group_layout,
        create_cinematic_pipeline,
        create_glow_pipeline,
        create_light_bind_group_layout,
        create_line_pipeline,
        create_overlay_bind_group_layout,
        create_overlay_pipeline,
        create_ring_pipeline,
        create_rock_pipeline,
        create_shadow_pass_bind_group_layout,
        create_shadow_pipeline,
        create_spark_pipeline,
        create_star_pipeline,
        create_texture_bind_group_layout,
    },
    texture::Texture,
    vertex::{BodyInstance, InstanceData, LineBatch, OverlayVertex, StarInstance},
};
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// First instance slot reserved for shadow casters. The scene passes allocate
/// upward from slot 0, so the two regions never collide within a frame.
pub const SHADOW_INSTANCE_OFFSET: u32 = 2048;

/// Sun light uniform (must match body.wgsl / rock.wgsl / shadow.wgsl LightUniform).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    pub light_view_proj: [[f32; 4]; 4],
    pub sun_position: [f32; 4],
    /// x = shadows enabled (0 or 1), y = shadow map size in texels, zw unused
    pub params: [f32; 4],
}

impl Default for LightUniform {
    fn default() -> Self {
        Self {
            light_view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            sun_position: [0.0, 0.0, 0.0, 1.0],
            params: [0.0; 4],
        }
    }
}

/// Main renderer state.
pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // Pipelines
    body_pipeline: wgpu::RenderPipeline,
    ring_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    rock_pipeline: wgpu::RenderPipeline,
    spark_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    // Camera
    camera_bind_group: wgpu::BindGroup,
    camera_buffer: wgpu::Buffer,
    camera_uniform: CameraUniform,

    texture_bind_group_layout: wgpu::BindGroupLayout,
    default_texture_bind_group: wgpu::BindGroup,

    // Sun light and shadow map (directional, fixed diagonal above the system)
    light_uniform: LightUniform,
    light_buffer: wgpu::Buffer,
    light_bind_group_layout: wgpu::BindGroupLayout,
    light_bind_group: wgpu::BindGroup,
    shadow_pass_bind_group: wgpu::BindGroup,
    shadow_pipeline: wgpu::RenderPipeline,
    shadow_map_view: wgpu::TextureView,
    shadow_sampler: wgpu::Sampler,
    shadow_map_size: u32,

    // Depth buffer
    depth_texture: Texture,

    // Instance buffer for batched rendering
    instance_buffer: wgpu::Buffer,
    /// Tracks current write offset into instance_buffer per frame.
    /// Each render pass writes to a unique region so `queue.write_buffer` calls
    /// don't overwrite each other (all writes execute before command buffer).
    frame_instance_offset: u32,
    body_instance_buffer: wgpu::Buffer,
    max_body_instances: u32,
    body_instance_offset: u32,

    // Starfield: instances uploaded once, drawn as camera-facing billboards
    star_mesh: Mesh,
    star_instance_buffer: Option<wgpu::Buffer>,
    star_count: u32,

    // Text overlay
    overlay_pipeline: wgpu::RenderPipeline,
    overlay_bind_group: wgpu::BindGroup,

    // Cinematic post-process (vignette + blue lift + dither)
    scene_color_texture: wgpu::Texture,
    cinematic_pipeline: wgpu::RenderPipeline,
    cinematic_bind_group_layout: wgpu::BindGroupLayout,
    cinematic_uniform_buffer: wgpu::Buffer,
    cinematic_sampler: wgpu::Sampler,

    // Bloom: bright pass + blur
    bloom_texture_a: wgpu::Texture,
    bloom_texture_b: wgpu::Texture,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    bright_bind_group_layout: wgpu::BindGroupLayout,
    blur_bind_group_layout: wgpu::BindGroupLayout,
    bright_uniform_buffer: wgpu::Buffer,
    blur_uniform_h: wgpu::Buffer,
    blur_uniform_v: wgpu::Buffer,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
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

        // Prefer Mailbox (low-latency vsync) if available; otherwise AutoVsync.
        let present_mode = surface_caps
            .present_modes
            .iter()
            .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
            .copied()
            .unwrap_or(wgpu::PresentMode::AutoVsync);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        // Camera uniform buffer
        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let texture_bind_group_layout = create_texture_bind_group_layout(&device);

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Default white texture for untextured draws (comet heads)
        let default_texture = Texture::white_pixel(&device, &queue);
        let default_texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Default Texture Bind Group"),
            layout: &texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&default_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&default_texture.sampler),
                },
            ],
        });

        // Shadow mapping: planets cast onto each other and onto the rings
        let shadow_map_size = 2048u32;
        let shadow_pass_layout = create_shadow_pass_bind_group_layout(&device);
        let light_bind_group_layout = create_light_bind_group_layout(&device);
        let light_uniform = LightUniform::default();
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Uniform"),
            contents: bytemuck::cast_slice(&[light_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let shadow_map_view = create_shadow_map_view(&device, shadow_map_size);
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });
        let shadow_pass_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Pass Bind Group"),
            layout: &shadow_pass_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });
        let light_bind_group = create_light_bind_group(
            &device,
            &light_bind_group_layout,
            &light_buffer,
            &shadow_map_view,
            &shadow_sampler,
        );
        let shadow_pipeline = create_shadow_pipeline(&device, &shadow_pass_layout);

        // Scene pipelines
        let body_pipeline = create_body_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &texture_bind_group_layout,
            &light_bind_group_layout,
        );
        let ring_pipeline = create_ring_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &texture_bind_group_layout,
            &light_bind_group_layout,
        );
        let glow_pipeline = create_glow_pipeline(&device, &config, &camera_bind_group_layout);
        let rock_pipeline = create_rock_pipeline(
            &device,
            &config,
            &camera_bind_group_layout,
            &light_bind_group_layout,
        );
        let spark_pipeline = create_spark_pipeline(&device, &config, &camera_bind_group_layout);
        let star_pipeline = create_star_pipeline(&device, &config, &camera_bind_group_layout);
        let line_pipeline = create_line_pipeline(&device, &config, &camera_bind_group_layout);

        let depth_texture =
            Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");

        // Instance buffer: lower half for per-frame scene draws, upper half for shadow casters
        let max_instances = 4096u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (std::mem::size_of::<InstanceData>() * max_instances as usize) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let max_body_instances = 64u32;
        let body_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Body Instance Buffer"),
            size: (std::mem::size_of::<BodyInstance>() * max_body_instances as usize) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let star_mesh = Mesh::billboard_quad(&device, 1.0);

        // --- Overlay (text) pipeline ---
        let overlay_bind_group_layout = create_overlay_bind_group_layout(&device);
        let overlay_pipeline = create_overlay_pipeline(&device, &config, &overlay_bind_group_layout);

        let (font_pixels, font_w, font_h) = crate::vertex::generate_font_atlas();
        let font_texture = device.create_texture_with_data(
            &queue,
            &wgpu::TextureDescriptor {
                label: Some("Font Atlas"),
                size: wgpu::Extent3d {
                    width: font_w,
                    height: font_h,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &font_pixels,
        );
        let font_view = font_texture.create_view(&wgpu::TextureViewDescriptor::default());
        let font_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let overlay_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Bind Group"),
            layout: &overlay_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&font_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&font_sampler),
                },
            ],
        });

        // Scene texture for the cinematic pass (render 3D here, post-process to swap chain)
        let scene_color_texture = create_scene_color_texture(&device, &config);

        let cinematic_bind_group_layout = create_cinematic_bind_group_layout(&device);
        let cinematic_pipeline =
            create_cinematic_pipeline(&device, &config, &cinematic_bind_group_layout);
        // x = time, y = dither, z = vignette, w = bloom strength
        let cinematic_uniform: [f32; 4] = [0.0, 0.015, 0.32, 0.85];
        let cinematic_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cinematic Uniform"),
            contents: bytemuck::cast_slice(&cinematic_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let cinematic_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Scene Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Bloom textures (1/4 resolution)
        let (bloom_texture_a, bloom_texture_b) = create_bloom_textures(&device, &config);

        let bright_bind_group_layout = create_bright_bind_group_layout(&device);
        let bright_pipeline = create_bright_pipeline(&device, &config, &bright_bind_group_layout);
        let bright_uniform: [f32; 4] = [0.7, 0.0, 0.0, 0.0]; // threshold
        let bright_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Bright Uniform"),
            contents: bytemuck::cast_slice(&bright_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Blur: separate direction uniforms for H and V (avoid overwrite between passes)
        let blur_bind_group_layout = create_blur_bind_group_layout(&device);
        let blur_pipeline = create_blur_pipeline(&device, &config, &blur_bind_group_layout);
        let blur_h: [f32; 4] = [1.0, 0.0, 0.0, 0.0];
        let blur_v: [f32; 4] = [0.0, 1.0, 0.0, 0.0];
        let blur_uniform_h = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blur Uniform H"),
            contents: bytemuck::cast_slice(&blur_h),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let blur_uniform_v = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Blur Uniform V"),
            contents: bytemuck::cast_slice(&blur_v),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            body_pipeline,
            ring_pipeline,
            glow_pipeline,
            rock_pipeline,
            spark_pipeline,
            star_pipeline,
            line_pipeline,
            camera_bind_group,
            camera_buffer,
            camera_uniform,
            texture_bind_group_layout,
            default_texture_bind_group,
            light_uniform,
            light_buffer,
            light_bind_group_layout,
            light_bind_group,
            shadow_pass_bind_group,
            shadow_pipeline,
            shadow_map_view,
            shadow_sampler,
            shadow_map_size,
            depth_texture,
            instance_buffer,
            frame_instance_offset: 0,
            body_instance_buffer,
            max_body_instances,
            body_instance_offset: 0,
            star_mesh,
            star_instance_buffer: None,
            star_count: 0,
            overlay_pipeline,
            overlay_bind_group,
            scene_color_texture,
            cinematic_pipeline,
            cinematic_bind_group_layout,
            cinematic_uniform_buffer,
            cinematic_sampler,
            bloom_texture_a,
            bloom_texture_b,
            bright_pipeline,
            blur_pipeline,
            bright_bind_group_layout,
            blur_bind_group_layout,
            bright_uniform_buffer,
            blur_uniform_h,
            blur_uniform_v,
        })
    }

    /// Update the light uniform. The shadow light sits on a fixed diagonal above
    /// the system looking at the origin; the sun position drives day/night shading.
    pub fn update_light(&mut self, sun_position: Vec3, shadows_enabled: bool) {
        let light_eye = Vec3::new(50.0, 50.0, 50.0).normalize() * 100.0;
        let view = Mat4::look_at_rh(light_eye, Vec3::ZERO, Vec3::Y);
        // Half-extent 55 covers Neptune's orbit (radius 31) with margin for comets
        let half = 55.0f32;
        let proj = Mat4::orthographic_rh(-half, half, -half, half, 10.0, 200.0);
        self.light_uniform.light_view_proj = (proj * view).to_cols_array_2d();
        self.light_uniform.sun_position =
            [sun_position.x, sun_position.y, sun_position.z, 1.0];
        self.light_uniform.params[0] = if shadows_enabled { 1.0 } else { 0.0 };
        self.light_uniform.params[1] = self.shadow_map_size as f32;
        self.queue
            .write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[self.light_uniform]));
    }

    /// Recreate the shadow map at a new resolution. No-op if already that size.
    /// The light uniform picks up the new size on the next `update_light`.
    pub fn set_shadow_map_size(&mut self, size: u32) {
        if size == self.shadow_map_size {
            return;
        }
        self.shadow_map_size = size;
        self.shadow_map_view = create_shadow_map_view(&self.device, size);
        self.light_bind_group = create_light_bind_group(
            &self.device,
            &self.light_bind_group_layout,
            &self.light_buffer,
            &self.shadow_map_view,
            &self.shadow_sampler,
        );
        log::debug!("shadow map resized to {}x{}", size, size);
    }

    pub fn shadow_map_size(&self) -> u32 {
        self.shadow_map_size
    }

    /// Run the shadow pass: clear the shadow map, then run the closure to draw casters.
    pub fn with_shadow_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        f: impl FnOnce(&Self, &mut wgpu::RenderPass),
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.shadow_pipeline);
        pass.set_bind_group(0, &self.shadow_pass_bind_group, &[]);
        f(self, &mut pass);
    }

    /// Draw instanced casters into an open shadow pass. `base_offset` is the
    /// instance slot to stage at; the caller advances it between calls because
    /// the pass holds `&self`.
    pub fn render_shadow_instanced(
        &self,
        pass: &mut wgpu::RenderPass,
        mesh: &Mesh,
        instances: &[InstanceData],
        base_offset: u32,
    ) {
        if instances.is_empty() {
            return;
        }
        let byte_offset = (base_offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue
            .write_buffer(&self.instance_buffer, byte_offset, bytemuck::cast_slice(instances));
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(
            0..mesh.num_indices,
            0,
            base_offset..(base_offset + instances.len() as u32),
        );
    }

    /// Handle window resize.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Texture::create_depth_texture(
                &self.device,
                self.config.width,
                self.config.height,
                "Depth Texture",
            );
            self.scene_color_texture = create_scene_color_texture(&self.device, &self.config);
            let (a, b) = create_bloom_textures(&self.device, &self.config);
            self.bloom_texture_a = a;
            self.bloom_texture_b = b;
        }
    }

    /// View of the offscreen scene texture. Render all 3D content to this,
    /// then run the cinematic pass to the swap chain.
    pub fn scene_view(&self) -> wgpu::TextureView {
        self.scene_color_texture
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Update the cinematic uniform (call once per frame before run_cinematic_pass).
    pub fn update_cinematic_uniform(&mut self, time: f32) {
        let cinematic_uniform: [f32; 4] = [
            time, 0.015, // dither_strength
            0.32,  // vignette_strength
            0.85,  // bloom_strength
        ];
        self.queue.write_buffer(
            &self.cinematic_uniform_buffer,
            0,
            bytemuck::cast_slice(&cinematic_uniform),
        );
    }

    /// Run bloom passes: bright extract -> blur H -> blur V. Returns the bloom view.
    pub fn run_bloom_passes(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene_view: &wgpu::TextureView,
    ) -> wgpu::TextureView {
        let bloom_a_view = self
            .bloom_texture_a
            .create_view(&wgpu::TextureViewDescriptor::default());
        let bloom_b_view = self
            .bloom_texture_b
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Bright pass: scene -> bloom_a
        let bright_bind = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bright Bind Group"),
            layout: &self.bright_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.cinematic_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.bright_uniform_buffer.as_entire_binding(),
                },
            ],
        });
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Bright Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &bloom_a_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.bright_pipeline);
        pass.set_bind_group(0, &bright_bind, &[]);
        pass.draw(0..3, 0..1);
        drop(pass);

        // Blur horizontal: bloom_a -> bloom_b
        let blur_bind_h = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blur Bind H"),
            layout: &self.blur_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.cinematic_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.blur_uniform_h.as_entire_binding(),
                },
            ],
        });
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blur H Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &bloom_b_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.blur_pipeline);
        pass.set_bind_group(0, &blur_bind_h, &[]);
        pass.draw(0..3, 0..1);
        drop(pass);

        // Blur vertical: bloom_b -> bloom_a
        let blur_bind_v = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blur Bind V"),
            layout: &self.blur_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&bloom_b_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.cinematic_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.blur_uniform_v.as_entire_binding(),
                },
            ],
        });
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Blur V Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &bloom_a_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.blur_pipeline);
        pass.set_bind_group(0, &blur_bind_v, &[]);
        pass.draw(0..3, 0..1);

        bloom_a_view
    }

    /// Run cinematic post-process: scene + bloom + vignette + grain -> output.
    pub fn run_cinematic_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        output_view: &wgpu::TextureView,
    ) {
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cinematic Bind Group"),
            layout: &self.cinematic_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.cinematic_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.cinematic_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(bloom_view),
                },
            ],
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cinematic Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.cinematic_pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    /// Update the camera uniform.
    pub fn update_camera(&mut self, camera: &OrbitCamera) {
        self.camera_uniform.update(camera);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Begin a new frame, returns the surface texture and command encoder.
    pub fn begin_frame(&mut self) -> Result<(wgpu::SurfaceTexture, wgpu::CommandEncoder)> {
        self.frame_instance_offset = 0;
        self.body_instance_offset = 0;
        let output = self.surface.get_current_texture()?;
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        Ok((output, encoder))
    }

    /// Upload the star instances. Call once at startup; the starfield is static.
    pub fn upload_stars(&mut self, instances: &[StarInstance]) {
        self.star_instance_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Star Instance Buffer"),
                contents: bytemuck::cast_slice(instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.star_count = instances.len() as u32;
        log::info!("uploaded {} stars", self.star_count);
    }

    /// First scene pass of the frame: clears color and depth, draws the starfield.
    pub fn render_stars(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Star Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        // The clear above must happen even before the stars are uploaded.
        let buffer = match &self.star_instance_buffer {
            Some(buffer) if self.star_count > 0 => buffer,
            _ => return,
        };
        pass.set_pipeline(&self.star_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.star_mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, buffer.slice(..));
        pass.set_index_buffer(self.star_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.star_mesh.num_indices, 0, 0..self.star_count);
    }

    /// Allocate one slot in the body instance buffer and stage the instance there.
    fn push_body_instance(&mut self, instance: BodyInstance) -> Option<u32> {
        let index = self.body_instance_offset;
        if index >= self.max_body_instances {
            log::warn!("body instance buffer full, dropping draw");
            return None;
        }
        let byte_offset = (index as usize * std::mem::size_of::<BodyInstance>()) as u64;
        self.queue.write_buffer(
            &self.body_instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&[instance]),
        );
        self.body_instance_offset = index + 1;
        Some(index)
    }

    /// Draw one textured celestial body (planet, sun, or comet head).
    /// `texture`: None uses the default white texture.
    pub fn render_body(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        texture: Option<&wgpu::BindGroup>,
        instance: BodyInstance,
    ) {
        let index = match self.push_body_instance(instance) {
            Some(index) => index,
            None => return,
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Body Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.body_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, texture.unwrap_or(&self.default_texture_bind_group), &[]);
        pass.set_bind_group(2, &self.light_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.body_instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, index..index + 1);
    }

    /// Draw a ring annulus, alpha blended, both faces visible.
    pub fn render_ring(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        texture: Option<&wgpu::BindGroup>,
        instance: BodyInstance,
    ) {
        let index = match self.push_body_instance(instance) {
            Some(index) => index,
            None => return,
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Ring Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.ring_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, texture.unwrap_or(&self.default_texture_bind_group), &[]);
        pass.set_bind_group(2, &self.light_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.body_instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, index..index + 1);
    }

    /// Draw an additive glow shell (atmosphere rim, hover highlight, sun corona).
    /// Front faces are culled so only the far hemisphere renders; the body drawn
    /// in front of it masks the center, leaving a halo.
    pub fn render_glow(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instance: BodyInstance,
    ) {
        let index = match self.push_body_instance(instance) {
            Some(index) => index,
            None => return,
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Glow Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.glow_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.body_instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.num_indices, 0, index..index + 1);
    }

    /// Draw the asteroid belt in one instanced call (loads existing frame content).
    pub fn render_rocks(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        if instances.is_empty() {
            return;
        }

        // Allocate a unique region in the instance buffer for this draw call
        let offset = self.frame_instance_offset;
        let remaining = SHADOW_INSTANCE_OFFSET.saturating_sub(offset) as usize;
        let instance_count = instances.len().min(remaining);
        if instance_count == 0 {
            log::warn!("instance buffer full, dropping {} instances", instances.len());
            return;
        }

        let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue.write_buffer(
            &self.instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&instances[..instance_count]),
        );
        self.frame_instance_offset = offset + instance_count as u32;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Rock Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.rock_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_bind_group(1, &self.light_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(
            0..mesh.num_indices,
            0,
            offset..(offset + instance_count as u32),
        );
    }

    /// Draw unlit instanced spheres (halo dots, comet heads) in one call.
    pub fn render_sparks(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        mesh: &Mesh,
        instances: &[InstanceData],
    ) {
        if instances.is_empty() {
            return;
        }

        let offset = self.frame_instance_offset;
        let remaining = SHADOW_INSTANCE_OFFSET.saturating_sub(offset) as usize;
        let instance_count = instances.len().min(remaining);
        if instance_count == 0 {
            log::warn!("instance buffer full, dropping {} instances", instances.len());
            return;
        }

        let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
        self.queue.write_buffer(
            &self.instance_buffer,
            byte_offset,
            bytemuck::cast_slice(&instances[..instance_count]),
        );
        self.frame_instance_offset = offset + instance_count as u32;

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Spark Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.spark_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(
            0..mesh.num_indices,
            0,
            offset..(offset + instance_count as u32),
        );
    }

    /// Draw line strips (orbit rings, comet tails, selection ellipses).
    /// Buffers are rebuilt per frame; the batch changes every frame anyway.
    pub fn render_lines(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        batch: &LineBatch,
    ) {
        if batch.is_empty() {
            return;
        }

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Vertex Buffer"),
            contents: bytemuck::cast_slice(&batch.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Index Buffer"),
            contents: bytemuck::cast_slice(&batch.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Line Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_texture.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_pipeline(&self.line_pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..batch.indices.len() as u32, 0, 0..1);
    }

    /// Render screen-space text overlay. Call as the very last pass before end_frame.
    /// Takes pre-built overlay vertices and indices from an `OverlayTextBuilder`.
    pub fn render_overlay(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertices: &[OverlayVertex],
        indices: &[u32],
    ) {
        if vertices.is_empty() || indices.is_empty() {
            return;
        }

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Overlay Index Buffer"),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
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
        pass.set_pipeline(&self.overlay_pipeline);
        pass.set_bind_group(0, &self.overlay_bind_group, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..indices.len() as u32, 0, 0..1);
    }

    /// End frame and present.
    pub fn end_frame(&self, output: wgpu::SurfaceTexture, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Access the device for mesh and texture creation.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Access the queue for texture uploads.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Bind a loaded texture for use with the body and ring pipelines.
    pub fn create_texture_bind_group(&self, texture: &Texture) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }
}

fn create_shadow_map_view(device: &wgpu::Device, size: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Shadow Map"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: Texture::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_light_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
    shadow_map_view: &wgpu::TextureView,
    shadow_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Light Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(shadow_map_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(shadow_sampler),
            },
        ],
    })
}

fn create_scene_color_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Scene Color"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    })
}

fn create_bloom_textures(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> (wgpu::Texture, wgpu::Texture) {
    let bloom_w = (config.width / 4).max(1);
    let bloom_h = (config.height / 4).max(1);
    let descriptor = |label| wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: bloom_w,
            height: bloom_h,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    };
    (
        device.create_texture(&descriptor("Bloom A")),
        device.create_texture(&descriptor("Bloom B")),
    )
}
