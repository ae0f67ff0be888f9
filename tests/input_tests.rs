// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn shake_keys() {
    assert_eq!(action_for_key(" "), Some(KeyAction::Shake));
    assert_eq!(action_for_key("Enter"), Some(KeyAction::Shake));
}

#[test]
fn language_keys() {
    assert_eq!(action_for_key("l"), Some(KeyAction::ToggleLanguage));
    assert_eq!(action_for_key("L"), Some(KeyAction::ToggleLanguage));
}

#[test]
fn other_keys_do_nothing() {
    for key in ["a", "Escape", "ArrowUp", "h", ""] {
        assert_eq!(action_for_key(key), None, "{:?}", key);
    }
}

#[test]
fn pointer_corners_map_to_ndc_with_y_up() {
    assert_eq!(pointer_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn pointer_outside_is_clamped() {
    assert_eq!(pointer_ndc(-50.0, 900.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
}

#[test]
fn degenerate_canvas_gives_centre() {
    assert_eq!(pointer_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    assert_eq!(pointer_ndc(10.0, 10.0, 800.0, -1.0), Vec2::ZERO);
}

#[test]
fn default_pointer_is_centred_and_outside() {
    let p = PointerState::default();
    assert_eq!(p.ndc, Vec2::ZERO);
    assert!(!p.inside);
}
