//! Snow particle field living inside the globe.
//!
//! Particles are stored as parallel arrays indexed by particle id so the
//! per-frame step touches flat buffers only and never allocates. All forces are
//! tuned per 60 Hz frame and scaled by the elapsed time, which keeps the motion
//! independent of the display refresh rate.

use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

/// Construction parameters of a [`ParticleField`].
///
/// These are fixed for the lifetime of a field; use
/// [`ParticleField::reconfigure`] to swap them, which reallocates every buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnowConfig {
    pub particle_count: usize,
    pub container_radius: f32,
    /// World-space billboard size used by the renderer.
    pub particle_size: f32,
    /// Multiplier applied to every shake impulse.
    pub impulse_strength: f32,
    /// Edge length in pixels of the generated snow sprite.
    pub texture_resolution: u32,
}

impl Default for SnowConfig {
    fn default() -> Self {
        Self {
            particle_count: 1500,
            container_radius: CONTAINER_RADIUS,
            particle_size: 0.05,
            impulse_strength: 1.0,
            texture_resolution: 64,
        }
    }
}

pub struct ParticleField {
    config: SnowConfig,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    gravity_factors: Vec<f32>,
    settle_radii: Vec<f32>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: SnowConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = config.particle_count;
        let r = config.container_radius;

        let mut positions = Vec::with_capacity(n);
        let mut gravity_factors = Vec::with_capacity(n);
        let mut settle_radii = Vec::with_capacity(n);
        for _ in 0..n {
            // Uniform inside the sphere: uniform direction, cube-root radius
            let theta = rng.gen::<f32>() * std::f32::consts::TAU;
            let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
            let radial = r * rng.gen::<f32>().cbrt();
            positions.push(Vec3::new(
                radial * phi.sin() * theta.cos(),
                radial * phi.cos(),
                radial * phi.sin() * theta.sin(),
            ));
            gravity_factors.push(rng.gen_range(GRAVITY_FACTOR_MIN..GRAVITY_FACTOR_MAX));
            // sqrt keeps the resting pile uniform over the floor disc instead of clumping
            settle_radii.push(rng.gen::<f32>().sqrt() * r * SETTLE_RADIUS_FRACTION);
        }

        Self {
            config,
            positions,
            velocities: vec![Vec3::ZERO; n],
            gravity_factors,
            settle_radii,
            rng,
        }
    }

    /// Discard every particle buffer and allocate a fresh field for `config`.
    pub fn reconfigure(&mut self, config: SnowConfig) {
        let seed = self.rng.gen();
        *self = Self::new(config, seed);
    }

    pub fn config(&self) -> &SnowConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn gravity_factors(&self) -> &[f32] {
        &self.gravity_factors
    }

    pub fn settle_radii(&self) -> &[f32] {
        &self.settle_radii
    }

    /// Overwrite the state of one particle. Out-of-range indices are ignored.
    pub fn place(&mut self, index: usize, position: Vec3, velocity: Vec3) {
        if let (Some(p), Some(v)) = (
            self.positions.get_mut(index),
            self.velocities.get_mut(index),
        ) {
            *p = position;
            *v = velocity;
        }
    }

    /// Advance every particle by `dt_sec`.
    ///
    /// `triggered` must only be true on the frame a shake starts; the impulse is
    /// applied once per call with it set.
    pub fn step(&mut self, triggered: bool, dt_sec: f32) {
        let frames = baseline_frames(dt_sec);
        let gravity = GRAVITY_PER_FRAME * frames;
        let drag = DRAG_PER_FRAME.powf(frames);
        let slide = SETTLE_SLIDE_PER_FRAME.powf(frames);
        let r = self.config.container_radius;
        let r_sq = r * r;

        let event_strength = if triggered {
            self.rng
                .gen_range(IMPULSE_EVENT_STRENGTH_MIN..IMPULSE_EVENT_STRENGTH_MAX)
                * self.config.impulse_strength
        } else {
            0.0
        };

        for i in 0..self.positions.len() {
            let mut vel = self.velocities[i];

            if triggered {
                vel.x += (self.rng.gen::<f32>() - 0.5) * IMPULSE_SPREAD * event_strength;
                vel.y += (IMPULSE_LAUNCH_MIN + self.rng.gen::<f32>() * IMPULSE_LAUNCH_RANGE)
                    * event_strength;
                vel.z += (self.rng.gen::<f32>() - 0.5) * IMPULSE_SPREAD * event_strength;
            }

            vel.y -= gravity * self.gravity_factors[i];
            vel *= drag;

            let mut pos = self.positions[i] + vel * frames;

            let mut xz_sq = pos.x * pos.x + pos.z * pos.z;
            if xz_sq > r_sq {
                pos.x *= LATERAL_PULLBACK;
                pos.z *= LATERAL_PULLBACK;
                xz_sq = pos.x * pos.x + pos.z * pos.z;
                if xz_sq > r_sq {
                    let k = r / xz_sq.sqrt();
                    pos.x *= k;
                    pos.z *= k;
                    xz_sq = pos.x * pos.x + pos.z * pos.z;
                }
            }

            let surface = surface_height(r_sq, xz_sq);
            if pos.y > surface {
                // Hit the inside of the upper hemisphere; gravity takes over next frame
                pos.y = surface;
                vel.y = 0.0;
            } else if pos.y < -surface {
                let settle = self.settle_radii[i];
                let xz = xz_sq.sqrt();
                if xz > settle + SETTLE_EPSILON {
                    let k = slide.max(settle / xz);
                    pos.x *= k;
                    pos.z *= k;
                }
                pos.y = -surface_height(r_sq, pos.x * pos.x + pos.z * pos.z);
                vel = Vec3::ZERO;
            }

            self.positions[i] = pos;
            self.velocities[i] = vel;
        }
    }
}

/// Height of the container surface above the equator at squared horizontal offset `xz_sq`.
#[inline]
pub fn surface_height(radius_sq: f32, xz_sq: f32) -> f32 {
    (radius_sq - xz_sq).max(0.0).sqrt()
}

/// RGBA8 pixels of the soft round snow sprite, `resolution` x `resolution`.
pub fn snow_sprite_rgba(resolution: u32) -> Vec<u8> {
    let res = resolution.max(1);
    let half = res as f32 * 0.5;
    let mut pixels = Vec::with_capacity((res * res * 4) as usize);
    for y in 0..res {
        for x in 0..res {
            let dx = x as f32 + 0.5 - half;
            let dy = y as f32 + 0.5 - half;
            let t = ((dx * dx + dy * dy).sqrt() / half).min(1.0);
            let alpha = if t < 0.4 {
                1.0 - (t / 0.4) * 0.5
            } else {
                0.5 * (1.0 - (t - 0.4) / 0.6)
            };
            pixels.extend_from_slice(&[255, 255, 255, (alpha.clamp(0.0, 1.0) * 255.0) as u8]);
        }
    }
    pixels
}
