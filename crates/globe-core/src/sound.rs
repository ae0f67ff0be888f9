//! Volume envelope of the one-shot magic sound.
//!
//! The sound plays at a fixed volume, then steps down at a fixed interval and
//! stops once it reaches the floor. The frontend samples the envelope every frame.

use crate::constants::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundEnvelope {
    pub start_volume: f32,
    pub fade_delay_sec: f64,
    pub fade_step: f32,
    pub fade_interval_sec: f64,
    pub fade_floor: f32,
}

impl Default for SoundEnvelope {
    fn default() -> Self {
        Self {
            start_volume: SOUND_START_VOLUME,
            fade_delay_sec: SOUND_FADE_DELAY_SEC,
            fade_step: SOUND_FADE_STEP,
            fade_interval_sec: SOUND_FADE_INTERVAL_SEC,
            fade_floor: SOUND_FADE_FLOOR,
        }
    }
}

impl SoundEnvelope {
    /// Steps needed to bring the start volume down to the floor.
    pub fn fade_steps(&self) -> u32 {
        if self.fade_step <= 0.0 || self.start_volume <= self.fade_floor {
            return 0;
        }
        // Small slack so 0.45 / 0.05 does not round up to 10
        ((self.start_volume - self.fade_floor) / self.fade_step - 1e-4).ceil() as u32
    }

    /// Total time from start until playback stops.
    pub fn duration_sec(&self) -> f64 {
        self.fade_delay_sec + (self.fade_steps() + 1) as f64 * self.fade_interval_sec
    }

    /// Volume `elapsed_sec` after playback started, or `None` once stopped.
    pub fn volume_at(&self, elapsed_sec: f64) -> Option<f32> {
        if elapsed_sec < self.fade_delay_sec {
            return Some(self.start_volume);
        }
        let ticks = ((elapsed_sec - self.fade_delay_sec) / self.fade_interval_sec).floor() as u32;
        if ticks > self.fade_steps() {
            return None;
        }
        let volume = self.start_volume - ticks as f32 * self.fade_step;
        Some(volume.max(self.fade_floor.min(self.start_volume)).max(0.0))
    }
}
