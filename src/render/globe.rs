use super::helpers;
use wgpu;

/// Full-screen pass: backdrop gradient plus the analytic glass sphere.
pub(crate) struct GlobeResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
}

pub(crate) fn create_globe_resources(
    device: &wgpu::Device,
    scene_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    sample_count: u32,
) -> GlobeResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("globe_shader"),
        source: wgpu::ShaderSource::Wgsl(super::GLOBE_WGSL.into()),
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("globe_pl"),
        bind_group_layouts: &[scene_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_scene_pipeline(
        device,
        "globe_pipeline",
        &pl,
        &shader,
        &[],
        color_format,
        Some(wgpu::BlendState::REPLACE),
        sample_count,
    );
    GlobeResources { pipeline }
}
