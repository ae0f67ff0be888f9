//! Launch options read from the page query string, e.g. `?tier=low&lang=en`.

use crate::predictions::Lang;
use crate::quality::CapabilityTier;
use crate::shake::ShakeConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct LaunchOptions {
    /// Skip the capability probe and use this tier.
    pub forced_tier: Option<CapabilityTier>,
    pub lang: Lang,
    pub shake: ShakeConfig,
    /// Fixed snow seed for reproducible scenes.
    pub seed: Option<u64>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            forced_tier: None,
            lang: Lang::Ru,
            shake: ShakeConfig::default(),
            seed: None,
        }
    }
}

impl LaunchOptions {
    /// Parse `query` (with or without the leading `?`). Unknown keys are
    /// ignored; malformed values are logged and left at their defaults.
    pub fn from_query(query: &str) -> Self {
        let mut options = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "tier" => match CapabilityTier::parse(value) {
                    Some(tier) => options.forced_tier = Some(tier),
                    None => log::warn!("[options] ignoring tier={:?}", value),
                },
                "lang" => match Lang::from_code(&value.to_ascii_lowercase()) {
                    Some(lang) => options.lang = lang,
                    None => log::warn!("[options] ignoring lang={:?}", value),
                },
                "threshold" => match value.parse::<f64>() {
                    Ok(t) if t.is_finite() && t > 0.0 => options.shake.threshold = t,
                    _ => log::warn!("[options] ignoring threshold={:?}", value),
                },
                "seed" => match value.parse::<u64>() {
                    Ok(seed) => options.seed = Some(seed),
                    Err(_) => log::warn!("[options] ignoring seed={:?}", value),
                },
                _ => {}
            }
        }
        options
    }
}
