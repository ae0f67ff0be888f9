// Host-side tests for launch options parsed from the page query string.

use globe_core::{CapabilityTier, Lang, LaunchOptions, ShakeConfig};

#[test]
fn empty_query_gives_defaults() {
    let opts = LaunchOptions::from_query("");
    assert_eq!(opts, LaunchOptions::default());
    assert_eq!(opts.lang, Lang::Ru);
    assert_eq!(opts.forced_tier, None);
    assert_eq!(opts.shake, ShakeConfig::default());
    assert_eq!(LaunchOptions::from_query("?"), LaunchOptions::default());
}

#[test]
fn all_keys_parse() {
    let opts = LaunchOptions::from_query("?tier=low&lang=EN&threshold=22.5&seed=42");
    assert_eq!(opts.forced_tier, Some(CapabilityTier::Low));
    assert_eq!(opts.lang, Lang::En);
    assert_eq!(opts.shake.threshold, 22.5);
    assert_eq!(opts.seed, Some(42));
}

#[test]
fn leading_question_mark_is_optional() {
    assert_eq!(
        LaunchOptions::from_query("tier=high").forced_tier,
        Some(CapabilityTier::High)
    );
}

#[test]
fn malformed_values_fall_back() {
    let opts =
        LaunchOptions::from_query("?tier=ultra&lang=fr&threshold=-3&seed=abc&threshold=NaN");
    assert_eq!(opts, LaunchOptions::default());
    let opts = LaunchOptions::from_query("?threshold=0&tier");
    assert_eq!(opts.shake.threshold, ShakeConfig::default().threshold);
    assert_eq!(opts.forced_tier, None);
}

#[test]
fn unknown_keys_are_ignored() {
    let opts = LaunchOptions::from_query("?utm_source=x&lang=en&&debug");
    assert_eq!(opts.lang, Lang::En);
    assert_eq!(opts.forced_tier, None);
}
