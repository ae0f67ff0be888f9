use crate::constants::{CLEAR_COLOR, MSAA_SAMPLES, SNOW_OPACITY};
use glam::{Mat4, Vec3};
use globe_core::constants::GLOBE_RADIUS;
use globe_core::TierConfig;
use web_sys as web;

mod globe;
mod helpers;
mod snow;

use globe::{create_globe_resources, GlobeResources};
use snow::{create_snow_resources, SnowResources};

pub(crate) static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");
pub(crate) static SNOW_WGSL: &str = include_str!("../shaders/snow.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    inv_view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    /// xyz = eye, w = time
    camera_time: [f32; 4],
    /// globe radius, particle size, projection x scale, projection y scale
    params: [f32; 4],
    /// shake glow, snow opacity, unused, unused
    look: [f32; 4],
}

/// Everything the renderer needs from the simulation for one frame.
pub struct SceneFrame<'s> {
    pub view_proj: Mat4,
    pub projection: Mat4,
    pub eye: Vec3,
    pub model: Mat4,
    /// Particle positions in the globe's local frame.
    pub positions: &'s [Vec3],
    pub glow: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene_bgl: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    globe: GlobeResources,
    snow: SnowResources,
    msaa: Option<(wgpu::Texture, wgpu::TextureView)>,
    sample_count: u32,
    particle_size: f32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, tier: &TierConfig) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
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
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let sample_count = sample_count_for(tier);
        let globe = create_globe_resources(&device, &scene_bgl, format, sample_count);
        let snow = create_snow_resources(
            &device,
            &queue,
            &scene_bgl,
            format,
            sample_count,
            tier.snow.particle_count,
            tier.snow.texture_resolution,
        );
        let msaa = helpers::create_msaa_target(&device, width, height, format, sample_count);

        log::info!(
            "[gpu] {}x{} format={:?} tier={} msaa={}",
            width,
            height,
            format,
            tier.tier.as_str(),
            sample_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_bgl,
            uniform_buffer,
            scene_bind_group,
            globe,
            snow,
            msaa,
            sample_count,
            particle_size: tier.snow.particle_size,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            time_accum: 0.0,
        })
    }

    /// Rebuild pipelines, sprite and instance storage for a newly resolved tier.
    pub fn apply_tier(&mut self, tier: &TierConfig) {
        let format = self.config.format;
        self.sample_count = sample_count_for(tier);
        self.particle_size = tier.snow.particle_size;
        self.globe = create_globe_resources(&self.device, &self.scene_bgl, format, self.sample_count);
        self.snow = create_snow_resources(
            &self.device,
            &self.queue,
            &self.scene_bgl,
            format,
            self.sample_count,
            tier.snow.particle_count,
            tier.snow.texture_resolution,
        );
        self.msaa = helpers::create_msaa_target(
            &self.device,
            self.width,
            self.height,
            format,
            self.sample_count,
        );
        log::info!(
            "[gpu] tier={} msaa={} particles={}",
            tier.tier.as_str(),
            self.sample_count,
            tier.snow.particle_count
        );
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.msaa = helpers::create_msaa_target(
                &self.device,
                width,
                height,
                self.config.format,
                self.sample_count,
            );
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render(&mut self, dt_sec: f32, scene: &SceneFrame<'_>) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let count = scene.positions.len().min(self.snow.capacity);
        if count > 0 {
            self.queue.write_buffer(
                &self.snow.instance_buffer,
                0,
                bytemuck::cast_slice(&scene.positions[..count]),
            );
        }
        let u = SceneUniforms {
            view_proj: scene.view_proj.to_cols_array_2d(),
            inv_view_proj: scene.view_proj.inverse().to_cols_array_2d(),
            model: scene.model.to_cols_array_2d(),
            camera_time: [scene.eye.x, scene.eye.y, scene.eye.z, self.time_accum],
            params: [
                GLOBE_RADIUS,
                self.particle_size,
                scene.projection.x_axis.x,
                scene.projection.y_axis.y,
            ],
            look: [scene.glow.clamp(0.0, 1.0), SNOW_OPACITY, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let (target, resolve_target) = match &self.msaa {
                Some((_, msaa_view)) => (msaa_view, Some(&view)),
                None => (&view, None),
            };
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);

            rpass.set_pipeline(&self.globe.pipeline);
            rpass.draw(0..3, 0..1);

            if count > 0 {
                rpass.set_pipeline(&self.snow.pipeline);
                rpass.set_bind_group(1, &self.snow.sprite_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.snow.instance_buffer.slice(..));
                rpass.draw(0..6, 0..count as u32);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[inline]
fn sample_count_for(tier: &TierConfig) -> u32 {
    if tier.antialias {
        MSAA_SAMPLES
    } else {
        1
    }
}
