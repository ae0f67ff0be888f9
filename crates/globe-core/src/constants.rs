// Shared physics, timing and probe tuning constants used by the core and the web frontend.

// Integration baseline: per-frame rates below are expressed at this frame rate
pub const BASELINE_FPS: f32 = 60.0;

// Container
pub const CONTAINER_RADIUS: f32 = 0.85; // snow lives inside this sphere
pub const GLOBE_RADIUS: f32 = 1.0; // glass shell drawn around the container

// Snow forces (per baseline frame)
pub const GRAVITY_PER_FRAME: f32 = 0.000_06;
pub const DRAG_PER_FRAME: f32 = 0.95;
pub const GRAVITY_FACTOR_MIN: f32 = 0.5;
pub const GRAVITY_FACTOR_MAX: f32 = 1.5;

// Containment and settling
pub const LATERAL_PULLBACK: f32 = 0.9; // soft inward correction past the wall
pub const SETTLE_RADIUS_FRACTION: f32 = 0.8; // settle radii spread over 80% of the floor
pub const SETTLE_SLIDE_PER_FRAME: f32 = 0.999;
pub const SETTLE_EPSILON: f32 = 1e-5;

// Shake impulse
pub const IMPULSE_SPREAD: f32 = 0.04; // horizontal spread, centred on zero
pub const IMPULSE_LAUNCH_MIN: f32 = 0.03;
pub const IMPULSE_LAUNCH_RANGE: f32 = 0.06;
pub const IMPULSE_EVENT_STRENGTH_MIN: f32 = 0.5;
pub const IMPULSE_EVENT_STRENGTH_MAX: f32 = 1.5;

// Shake detection
pub const SHAKE_THRESHOLD: f64 = 15.0;
pub const SHAKE_MIN_INTERVAL_MS: f64 = 100.0;
pub const SHAKE_SPEED_SCALE: f64 = 10_000.0;

// Session timing (seconds)
pub const SHAKE_DURATION_SEC: f64 = 6.0;
pub const PREDICTION_DELAY_SEC: f64 = 1.0;

// Globe spin
pub const IDLE_SPIN_PER_FRAME: f32 = 0.002;
pub const TILT_SETTLE_SHAKING: f32 = 0.9;
pub const TILT_SETTLE_IDLE: f32 = 0.95;
pub const TILT_KICK_X: f32 = 0.075;
pub const TILT_KICK_Z: f32 = 0.04;

// Prediction reveal
pub const REVEAL_START_POSITION: [f32; 3] = [0.0, -0.5, -0.8]; // low and deep
pub const REVEAL_START_TILT: f32 = -std::f32::consts::FRAC_PI_2; // lying flat
pub const REVEAL_START_SCALE: f32 = 0.5;
pub const REVEAL_MOVE_RATE: f32 = 0.5; // per second
pub const REVEAL_FADE_RATE: f32 = 0.2; // per second

// Camera rig
pub const CAMERA_Z: f32 = 3.5;
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_SWAY: f32 = 0.5; // pointer NDC -> world offset
pub const CAMERA_FOLLOW_PER_FRAME: f32 = 0.05;

// Capability probe
pub const LOW_FPS_THRESHOLD: f64 = 40.0;
pub const FALLBACK_FPS: f64 = 30.0; // assumed when no graphics context exists
pub const PROBE_WINDOW_MS: f64 = 500.0;
pub const PROBE_PAUSE_MS: f64 = 200.0;
pub const PROBE_SAMPLES: usize = 2;

// Magic sound envelope
pub const SOUND_START_VOLUME: f32 = 0.5;
pub const SOUND_FADE_DELAY_SEC: f64 = 6.0;
pub const SOUND_FADE_STEP: f32 = 0.05;
pub const SOUND_FADE_INTERVAL_SEC: f64 = 0.1;
pub const SOUND_FADE_FLOOR: f32 = 0.05;

/// Number of baseline frames represented by `dt_sec`.
#[inline]
pub fn baseline_frames(dt_sec: f32) -> f32 {
    dt_sec.max(0.0) * BASELINE_FPS
}
