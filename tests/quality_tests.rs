// Host-side tests for renderer classification, the tier table and the async probe.

use globe_core::{
    classify_renderer, detect, fps_from_frames, provisional_config, tier_for_fps, CapabilityTier,
    ProbeHost, ProbePlan, RendererClass, TierSlot, HIGH_TIER, LOW_TIER,
};

#[derive(Default)]
struct FakeHost {
    renderer: Option<String>,
    fps: Vec<Option<f64>>,
    measured: usize,
    paused_ms: Vec<f64>,
}

impl ProbeHost for FakeHost {
    fn renderer_info(&mut self) -> Option<String> {
        self.renderer.clone()
    }

    async fn measure_fps(&mut self, _window_ms: f64) -> Option<f64> {
        let fps = self.fps.get(self.measured).copied().flatten();
        self.measured += 1;
        fps
    }

    async fn pause(&mut self, ms: f64) {
        self.paused_ms.push(ms);
    }
}

fn run(host: &mut FakeHost) -> CapabilityTier {
    pollster::block_on(detect(host, &ProbePlan::default()))
}

#[test]
fn software_and_embedded_renderers_are_very_low_end() {
    for r in [
        "Google SwiftShader",
        "llvmpipe (LLVM 15.0.7, 256 bits)",
        "Software Rasterizer",
        "VideoCore IV HW",
    ] {
        assert_eq!(classify_renderer(r), RendererClass::VeryLowEnd, "{}", r);
    }
}

#[test]
fn integrated_and_old_mobile_renderers_are_likely_low_end() {
    for r in [
        "Intel(R) HD Graphics 620",
        "ANGLE (Intel, Intel(R) UHD Graphics 630 Direct3D11)",
        "Mali-G52",
        "Adreno 506",
    ] {
        assert_eq!(classify_renderer(r), RendererClass::LikelyLowEnd, "{}", r);
    }
}

#[test]
fn discrete_renderers_are_unremarkable() {
    assert_eq!(
        classify_renderer("Intel(R) Arc(TM) A770 Graphics"),
        RendererClass::Unremarkable
    );
    assert_eq!(
        classify_renderer("NVIDIA GeForce RTX 3080"),
        RendererClass::Unremarkable
    );
    assert_eq!(classify_renderer("Adreno (TM) 740"), RendererClass::Unremarkable);
}

#[test]
fn fps_threshold_splits_tiers() {
    assert_eq!(tier_for_fps(39.9), CapabilityTier::Low);
    assert_eq!(tier_for_fps(40.0), CapabilityTier::High);
    assert_eq!(tier_for_fps(60.0), CapabilityTier::High);
    assert!((fps_from_frames(30, 500.0) - 60.0).abs() < 1e-9);
    assert_eq!(fps_from_frames(10, 0.0), 0.0);
}

#[test]
fn very_low_end_skips_measurement() {
    let mut host = FakeHost {
        renderer: Some("Google SwiftShader".into()),
        fps: vec![Some(120.0), Some(120.0)],
        ..Default::default()
    };
    assert_eq!(run(&mut host), CapabilityTier::Low);
    assert_eq!(host.measured, 0);
}

#[test]
fn fast_device_gets_high_tier() {
    let mut host = FakeHost {
        renderer: Some("NVIDIA GeForce RTX 3080".into()),
        fps: vec![Some(60.0), Some(59.0)],
        ..Default::default()
    };
    assert_eq!(run(&mut host), CapabilityTier::High);
    assert_eq!(host.measured, 2);
    assert_eq!(host.paused_ms, vec![200.0]);
}

#[test]
fn slow_device_gets_low_tier() {
    let mut host = FakeHost {
        renderer: None,
        fps: vec![Some(35.0), Some(38.0)],
        ..Default::default()
    };
    assert_eq!(run(&mut host), CapabilityTier::Low);
}

#[test]
fn worst_sample_decides() {
    let mut host = FakeHost {
        renderer: Some("Intel(R) UHD Graphics 630".into()),
        fps: vec![Some(58.0), Some(31.0)],
        ..Default::default()
    };
    assert_eq!(run(&mut host), CapabilityTier::Low);
}

#[test]
fn missing_graphics_context_falls_back_to_low() {
    let mut host = FakeHost::default();
    assert_eq!(run(&mut host), CapabilityTier::Low);
    assert_eq!(host.measured, 2);
}

#[test]
fn tier_table_scales_down_for_low() {
    assert_eq!(HIGH_TIER.snow.particle_count, 1500);
    assert!(LOW_TIER.snow.particle_count < HIGH_TIER.snow.particle_count);
    assert!(HIGH_TIER.antialias && !LOW_TIER.antialias);
    assert!(LOW_TIER.max_pixel_ratio <= HIGH_TIER.max_pixel_ratio);
    assert!(LOW_TIER.snow.texture_resolution <= HIGH_TIER.snow.texture_resolution);
    assert_eq!(CapabilityTier::High.config().tier, CapabilityTier::High);
    assert_eq!(provisional_config().tier, CapabilityTier::Low);
}

#[test]
fn tier_names_round_trip() {
    for tier in [CapabilityTier::High, CapabilityTier::Low] {
        assert_eq!(CapabilityTier::parse(tier.as_str()), Some(tier));
    }
    assert_eq!(CapabilityTier::parse("ultra"), None);
}

#[test]
fn tier_slot_keeps_the_first_resolution() {
    let mut slot = TierSlot::default();
    assert_eq!(slot.get(), None);
    assert_eq!(slot.resolve(CapabilityTier::High), CapabilityTier::High);
    assert_eq!(slot.resolve(CapabilityTier::Low), CapabilityTier::High);
    assert_eq!(slot.get(), Some(CapabilityTier::High));
}
