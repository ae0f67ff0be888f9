//! Shake detection from accelerometer samples.
//!
//! The detector compares the summed acceleration of the current sample with
//! the last accepted one and reports a shake when the change per millisecond
//! crosses a threshold. Samples closer together than the minimum interval are
//! dropped without touching the baseline.

use crate::constants::{SHAKE_MIN_INTERVAL_MS, SHAKE_SPEED_SCALE, SHAKE_THRESHOLD};

/// One accelerometer reading (gravity included) and the time it was taken.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp_ms: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64, timestamp_ms: f64) -> Self {
        Self {
            x,
            y,
            z,
            timestamp_ms,
        }
    }

    #[inline]
    fn sum(&self) -> f64 {
        self.x + self.y + self.z
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeConfig {
    pub threshold: f64,
    pub min_interval_ms: f64,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold: SHAKE_THRESHOLD,
            min_interval_ms: SHAKE_MIN_INTERVAL_MS,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShakeDetector {
    config: ShakeConfig,
    baseline: Option<MotionSample>,
}

impl ShakeDetector {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            baseline: None,
        }
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }

    /// Forget the baseline; the next sample seeds it again.
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Composite delta speed between two samples.
    pub fn speed(last: &MotionSample, current: &MotionSample) -> f64 {
        let elapsed = current.timestamp_ms - last.timestamp_ms;
        if elapsed <= 0.0 {
            return 0.0;
        }
        (current.sum() - last.sum()).abs() / elapsed * SHAKE_SPEED_SCALE
    }

    /// Feed one sample. Returns true when it completes a shake.
    pub fn process(&mut self, sample: MotionSample) -> bool {
        let Some(last) = self.baseline else {
            self.baseline = Some(sample);
            return false;
        };
        if sample.timestamp_ms - last.timestamp_ms <= self.config.min_interval_ms {
            return false;
        }
        let speed = Self::speed(&last, &sample);
        self.baseline = Some(sample);
        speed > self.config.threshold
    }
}
