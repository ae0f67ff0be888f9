use glam::Vec2;

#[derive(Default, Clone, Copy)]
pub struct PointerState {
    /// Pointer in normalized device coordinates, y up.
    pub ndc: Vec2,
    pub inside: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Shake,
    ToggleLanguage,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        " " | "Enter" => Some(KeyAction::Shake),
        "l" | "L" => Some(KeyAction::ToggleLanguage),
        _ => None,
    }
}

/// CSS-pixel position inside an element of `width` x `height` to NDC.
#[inline]
pub fn pointer_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    let u = (x_css / width).clamp(0.0, 1.0);
    let v = (y_css / height).clamp(0.0, 1.0);
    Vec2::new(u * 2.0 - 1.0, 1.0 - v * 2.0)
}
