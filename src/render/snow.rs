use super::helpers;
use glam::Vec3;
use globe_core::snow_sprite_rgba;
use wgpu;

/// Instanced billboards, one per particle, sampled from the soft sprite.
pub(crate) struct SnowResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) instance_buffer: wgpu::Buffer,
    pub(crate) capacity: usize,
    pub(crate) sprite_bind_group: wgpu::BindGroup,
    _sprite: wgpu::Texture,
}

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

fn additive_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Zero,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub(crate) fn create_snow_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
    particle_count: usize,
    texture_resolution: u32,
) -> SnowResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("snow_shader"),
        source: wgpu::ShaderSource::Wgsl(super::SNOW_WGSL.into()),
    });
    let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("snow_sprite_bgl"),
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
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("snow_pl"),
        bind_group_layouts: &[scene_bgl, &sprite_bgl],
        push_constant_ranges: &[],
    });
    let instance_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    };
    let pipeline = helpers::make_scene_pipeline(
        device,
        "snow_pipeline",
        &pl,
        &shader,
        &[instance_layout],
        color_format,
        Some(additive_blend()),
        sample_count,
    );

    let size = texture_resolution.max(2);
    let rgba = snow_sprite_rgba(size);
    let (sprite, sprite_view) = helpers::upload_rgba_texture(device, queue, "snow_sprite", size, &rgba);
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("snow_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });
    let sprite_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("snow_sprite_bg"),
        layout: &sprite_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&sprite_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    let capacity = particle_count.max(1);
    let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("snow_instances"),
        size: (capacity * std::mem::size_of::<Vec3>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    SnowResources {
        pipeline,
        instance_buffer,
        capacity,
        sprite_bind_group,
        _sprite: sprite,
    }
}
