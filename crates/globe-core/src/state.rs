//! Session and animation state shared with the web frontend.
//!
//! These types avoid platform APIs. They are driven once per frame with the
//! current time and `dt`, and the frontend reads them to build camera and model
//! matrices and to pose the prediction text.

use crate::constants::*;
use glam::{EulerRot, Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Eases the camera toward a pointer-driven sway target.
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    offset: Vec2,
}

impl CameraRig {
    /// `pointer_ndc` is the pointer in [-1, 1] on both axes, y up.
    pub fn follow(&mut self, camera: &mut Camera, pointer_ndc: Vec2, dt_sec: f32) {
        let target = pointer_ndc.clamp(Vec2::splat(-1.0), Vec2::ONE) * CAMERA_SWAY;
        let alpha = 1.0 - (1.0 - CAMERA_FOLLOW_PER_FRAME).powf(baseline_frames(dt_sec));
        self.offset = self.offset.lerp(target, alpha);
        camera.eye = Vec3::new(self.offset.x, self.offset.y, camera.eye.z);
        camera.target = Vec3::ZERO;
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

/// Reports `true` only when the observed flag goes from false to true.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeTrigger {
    previous: bool,
}

impl EdgeTrigger {
    pub fn rising(&mut self, current: bool) -> bool {
        let fired = current && !self.previous;
        self.previous = current;
        fired
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShakePhase {
    Idle,
    Shaking { started_at: f64, revealed: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionTiming {
    pub duration_sec: f64,
    pub reveal_delay_sec: f64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            duration_sec: SHAKE_DURATION_SEC,
            reveal_delay_sec: PREDICTION_DELAY_SEC,
        }
    }
}

/// What happened during one [`ShakeSession::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionEvents {
    /// Shaking started since the previous frame: inject the snow impulse.
    pub impulse: bool,
    /// The prediction delay elapsed: pick and show a fortune.
    pub reveal: bool,
    /// The shake ran its full duration and the globe is idle again.
    pub finished: bool,
}

/// Two-state {idle, shaking} machine fed by gestures and frame time.
#[derive(Clone, Debug)]
pub struct ShakeSession {
    timing: SessionTiming,
    phase: ShakePhase,
    edge: EdgeTrigger,
}

impl Default for ShakeSession {
    fn default() -> Self {
        Self::new(SessionTiming::default())
    }
}

impl ShakeSession {
    pub fn new(timing: SessionTiming) -> Self {
        Self {
            timing,
            phase: ShakePhase::Idle,
            edge: EdgeTrigger::default(),
        }
    }

    pub fn phase(&self) -> ShakePhase {
        self.phase
    }

    pub fn timing(&self) -> &SessionTiming {
        &self.timing
    }

    pub fn is_shaking(&self) -> bool {
        matches!(self.phase, ShakePhase::Shaking { .. })
    }

    /// Start shaking at `now_sec`. Ignored (returns false) while already shaking.
    pub fn trigger(&mut self, now_sec: f64) -> bool {
        if self.is_shaking() {
            return false;
        }
        self.phase = ShakePhase::Shaking {
            started_at: now_sec,
            revealed: false,
        };
        true
    }

    pub fn advance(&mut self, now_sec: f64) -> SessionEvents {
        let mut events = SessionEvents::default();
        if let ShakePhase::Shaking {
            started_at,
            revealed,
        } = &mut self.phase
        {
            let elapsed = now_sec - *started_at;
            if !*revealed && elapsed >= self.timing.reveal_delay_sec {
                *revealed = true;
                events.reveal = true;
            }
            if elapsed >= self.timing.duration_sec {
                self.phase = ShakePhase::Idle;
                events.finished = true;
            }
        }
        events.impulse = self.edge.rising(self.is_shaking());
        events
    }
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Globe orientation: one eased revolution per shake, a slow drift otherwise.
#[derive(Clone, Debug)]
pub struct GlobeSpin {
    rotation: Vec3,
    spin_from: f32,
    spin_started_at: Option<f64>,
    spin_duration_sec: f64,
}

impl Default for GlobeSpin {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            spin_from: 0.0,
            spin_started_at: None,
            spin_duration_sec: SHAKE_DURATION_SEC,
        }
    }
}

impl GlobeSpin {
    /// Start a revolution. `kick` in [-1, 1] per axis tilts the globe around x and z.
    pub fn begin(&mut self, now_sec: f64, kick: Vec2) {
        self.spin_from = self.rotation.y;
        self.spin_started_at = Some(now_sec);
        self.rotation.x += kick.x.clamp(-1.0, 1.0) * TILT_KICK_X;
        self.rotation.z += kick.y.clamp(-1.0, 1.0) * TILT_KICK_Z;
    }

    pub fn update(&mut self, shaking: bool, now_sec: f64, dt_sec: f32) {
        let frames = baseline_frames(dt_sec);
        match self.spin_started_at {
            Some(t0) if shaking => {
                let t = ((now_sec - t0) / self.spin_duration_sec) as f32;
                self.rotation.y = self.spin_from + std::f32::consts::TAU * ease_in_out_cubic(t);
                let settle = TILT_SETTLE_SHAKING.powf(frames);
                self.rotation.x *= settle;
                self.rotation.z *= settle;
            }
            _ => {
                self.spin_started_at = None;
                self.rotation.y += IDLE_SPIN_PER_FRAME * frames;
                let settle = TILT_SETTLE_IDLE.powf(frames);
                self.rotation.x *= settle;
                self.rotation.z *= settle;
            }
        }
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }
}

/// Pose of the prediction text relative to the globe centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPose {
    pub position: Vec3,
    /// Rotation about x in radians; 0 is upright.
    pub tilt: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl RevealPose {
    pub fn start() -> Self {
        Self {
            position: Vec3::from_array(REVEAL_START_POSITION),
            tilt: REVEAL_START_TILT,
            scale: REVEAL_START_SCALE,
            opacity: 0.0,
        }
    }
}

/// Floats the fortune up from the bottom of the globe and fades it in.
#[derive(Clone, Debug, Default)]
pub struct PredictionReveal {
    text: Option<&'static str>,
    pose: Option<RevealPose>,
}

impl PredictionReveal {
    pub fn show(&mut self, text: &'static str) {
        self.text = Some(text);
        self.pose = Some(RevealPose::start());
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.pose = None;
    }

    pub fn text(&self) -> Option<&'static str> {
        self.text
    }

    pub fn pose(&self) -> Option<RevealPose> {
        self.pose
    }

    pub fn advance(&mut self, dt_sec: f32) -> Option<RevealPose> {
        let pose = self.pose.as_mut()?;
        let dt = dt_sec.max(0.0);
        let move_alpha = (REVEAL_MOVE_RATE * dt).min(1.0);
        let fade_alpha = (REVEAL_FADE_RATE * dt).min(1.0);
        pose.position = pose.position.lerp(Vec3::ZERO, move_alpha);
        pose.tilt += (0.0 - pose.tilt) * move_alpha;
        pose.scale += (1.0 - pose.scale) * move_alpha;
        if pose.opacity < 1.0 {
            pose.opacity = (pose.opacity + (1.0 - pose.opacity) * fade_alpha).min(1.0);
        }
        Some(*pose)
    }
}
