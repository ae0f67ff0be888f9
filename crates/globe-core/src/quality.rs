//! Device capability tiers and the startup probe that picks one.
//!
//! The probe first looks at the GPU renderer string and short-circuits for
//! software rasterizers and tiny embedded GPUs. Everything else is settled by a
//! short empirical frame-rate measurement. The platform side supplies both
//! inputs through [`ProbeHost`], so the decision logic runs unchanged in tests.

use crate::constants::*;
use crate::snow::SnowConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityTier {
    High,
    Low,
}

impl CapabilityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityTier::High => "high",
            CapabilityTier::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(CapabilityTier::High),
            "low" => Some(CapabilityTier::Low),
            _ => None,
        }
    }

    /// Static configuration record for this tier.
    pub fn config(self) -> &'static TierConfig {
        match self {
            CapabilityTier::High => &HIGH_TIER,
            CapabilityTier::Low => &LOW_TIER,
        }
    }
}

/// Everything a tier changes, injected into the simulator and the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierConfig {
    pub tier: CapabilityTier,
    pub snow: SnowConfig,
    /// Multisampled rendering (x4) when true.
    pub antialias: bool,
    /// Upper bound on the device pixel ratio used for the canvas backing store.
    pub max_pixel_ratio: f64,
}

pub const HIGH_TIER: TierConfig = TierConfig {
    tier: CapabilityTier::High,
    snow: SnowConfig {
        particle_count: 1500,
        container_radius: CONTAINER_RADIUS,
        particle_size: 0.05,
        impulse_strength: 1.0,
        texture_resolution: 64,
    },
    antialias: true,
    max_pixel_ratio: 2.0,
};

pub const LOW_TIER: TierConfig = TierConfig {
    tier: CapabilityTier::Low,
    snow: SnowConfig {
        particle_count: 500,
        container_radius: CONTAINER_RADIUS,
        particle_size: 0.06,
        impulse_strength: 1.0,
        texture_resolution: 32,
    },
    antialias: false,
    max_pixel_ratio: 1.0,
};

/// Configuration used while the probe is still running.
pub fn provisional_config() -> &'static TierConfig {
    &LOW_TIER
}

/// Holds the session tier. The first resolution wins; later ones are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct TierSlot {
    tier: Option<CapabilityTier>,
}

impl TierSlot {
    pub fn get(&self) -> Option<CapabilityTier> {
        self.tier
    }

    pub fn resolve(&mut self, tier: CapabilityTier) -> CapabilityTier {
        match self.tier {
            Some(existing) => {
                if existing != tier {
                    log::warn!(
                        "[quality] tier already {}, ignoring {}",
                        existing.as_str(),
                        tier.as_str()
                    );
                }
                existing
            }
            None => {
                log::info!("[quality] session tier = {}", tier.as_str());
                self.tier = Some(tier);
                tier
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererClass {
    /// Software rasterizer or embedded GPU: no point measuring.
    VeryLowEnd,
    /// Integrated or older mobile GPU: measured anyway.
    LikelyLowEnd,
    Unremarkable,
}

const VERY_LOW_END_KEYWORDS: &[&str] = &["swiftshader", "llvmpipe", "software", "videocore"];

const LOW_END_KEYWORDS: &[&str] = &[
    "intel hd",
    "intel(r) hd",
    "intel uhd",
    "intel(r) uhd",
    "integrated",
    "mali",
    "adreno 3",
    "adreno 4",
    "adreno 5",
];

pub fn classify_renderer(renderer: &str) -> RendererClass {
    let lower = renderer.to_lowercase();
    if VERY_LOW_END_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return RendererClass::VeryLowEnd;
    }
    // Intel Arc matches the Intel keywords but is a discrete part
    if LOW_END_KEYWORDS.iter().any(|kw| lower.contains(kw)) && !lower.contains("arc") {
        return RendererClass::LikelyLowEnd;
    }
    RendererClass::Unremarkable
}

#[inline]
pub fn fps_from_frames(frames: u32, elapsed_ms: f64) -> f64 {
    if elapsed_ms <= 0.0 {
        return 0.0;
    }
    frames as f64 / elapsed_ms * 1000.0
}

#[inline]
pub fn tier_for_fps(fps: f64) -> CapabilityTier {
    if fps < LOW_FPS_THRESHOLD {
        CapabilityTier::Low
    } else {
        CapabilityTier::High
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbePlan {
    pub window_ms: f64,
    /// Measurement windows; the worst result is kept.
    pub samples: usize,
    pub pause_ms: f64,
}

impl Default for ProbePlan {
    fn default() -> Self {
        Self {
            window_ms: PROBE_WINDOW_MS,
            samples: PROBE_SAMPLES,
            pause_ms: PROBE_PAUSE_MS,
        }
    }
}

/// Platform services the probe needs.
#[allow(async_fn_in_trait)]
pub trait ProbeHost {
    /// Unmasked GPU renderer string, when the platform exposes it.
    fn renderer_info(&mut self) -> Option<String>;

    /// Render a fixed synthetic load for `window_ms` and report frames per
    /// second. `None` when no graphics context can be created.
    async fn measure_fps(&mut self, window_ms: f64) -> Option<f64>;

    async fn pause(&mut self, ms: f64);
}

pub async fn detect<H: ProbeHost>(host: &mut H, plan: &ProbePlan) -> CapabilityTier {
    if let Some(renderer) = host.renderer_info() {
        log::info!("[probe] GPU renderer: {}", renderer);
        match classify_renderer(&renderer) {
            RendererClass::VeryLowEnd => {
                log::info!("[probe] very low-end GPU, skipping FPS test");
                return CapabilityTier::Low;
            }
            RendererClass::LikelyLowEnd => {
                log::info!("[probe] likely low-end GPU, confirming with FPS test");
            }
            RendererClass::Unremarkable => {}
        }
    }

    let mut worst: Option<f64> = None;
    for i in 0..plan.samples.max(1) {
        if i > 0 {
            host.pause(plan.pause_ms).await;
        }
        let fps = match host.measure_fps(plan.window_ms).await {
            Some(fps) => fps,
            None => {
                log::warn!("[probe] no graphics context, assuming {} FPS", FALLBACK_FPS);
                FALLBACK_FPS
            }
        };
        log::info!("[probe] FPS sample {}: {:.1}", i + 1, fps);
        worst = Some(worst.map_or(fps, |w| w.min(fps)));
    }

    let tier = tier_for_fps(worst.unwrap_or(FALLBACK_FPS));
    log::info!("[probe] detected tier: {}", tier.as_str());
    tier
}
