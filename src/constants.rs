/// Frontend wiring and rendering constants.
///
/// Physics and timing live in `globe_core::constants`; this file keeps the
/// DOM contract with `index.html` and the renderer's look.
// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const LOADER_ID: &str = "loader";
pub const PREDICTION_ID: &str = "prediction";
pub const LANG_TOGGLE_ID: &str = "lang-toggle";

// Loader stays up at least this long (ms)
pub const LOADER_MIN_MS: i32 = 1500;
pub const LOADER_FADE_MS: i32 = 500;

// Assets
pub const MAGIC_SOUND_URL: &str = "magic-magic-sound-4.mp3";

// Frame driver
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches

// Capability probe canvas
pub const PROBE_CANVAS_SIZE: u32 = 300;
pub const PROBE_DRAW_CALLS: i32 = 100;
pub const UNMASKED_RENDERER_WEBGL: u32 = 0x9246;

// Prediction text: world units -> CSS pixels
pub const REVEAL_PX_PER_UNIT: f32 = 160.0;

// Rendering
pub const MSAA_SAMPLES: u32 = 4;
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.03, 0.07];
pub const SNOW_OPACITY: f32 = 0.8;
pub const SHAKE_GLOW_MAX: f32 = 0.35; // warm glass tint at the height of a shake
