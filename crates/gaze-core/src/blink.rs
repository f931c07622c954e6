use crate::error::FaceError;
use crate::state::FrameState;

/// Seconds between automatic blinks.
const DEFAULT_INTERVAL: f32 = 3.0;
/// Seconds a full close-and-open takes.
const DEFAULT_DURATION: f32 = 0.15;
/// Bottom lid closes to this fraction of the top lid.
const BOTTOM_LID_RATIO: f32 = 0.3;

/// Timer-driven blink state machine.
///
/// Two states: idle (accumulating time toward the next automatic blink) and
/// blinking, where a single progress ramp in [0, 1] covers both the closing
/// and the opening half. The closure curve is quadratic on both sides of the
/// split at progress 0.5; that exact split is load-bearing for the look of
/// the blink and must not be "smoothed".
pub struct BlinkCycle {
    interval: f32,
    duration: f32,
    elapsed: f32,
    blinking: bool,
    progress: f32,
}

impl BlinkCycle {
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            duration: DEFAULT_DURATION,
            elapsed: 0.0,
            blinking: false,
            progress: 0.0,
        }
    }

    /// Seconds between automatic blinks.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds a full close-and-open takes.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Whether a blink is currently in progress.
    pub fn is_blinking(&self) -> bool {
        self.blinking
    }

    /// Set the automatic blink cadence. Fails fast for non-positive values;
    /// the interval is never silently clamped.
    pub fn set_interval(&mut self, seconds: f32) -> Result<(), FaceError> {
        if seconds > 0.0 {
            self.interval = seconds;
            Ok(())
        } else {
            Err(FaceError::InvalidBlinkInterval(seconds))
        }
    }

    /// Set how long a full blink takes. Same validation as the interval.
    pub fn set_duration(&mut self, seconds: f32) -> Result<(), FaceError> {
        if seconds > 0.0 {
            self.duration = seconds;
            Ok(())
        } else {
            Err(FaceError::InvalidBlinkInterval(seconds))
        }
    }

    /// Force a blink immediately. No-op while one is already running.
    pub fn trigger(&mut self) {
        if !self.blinking {
            self.blinking = true;
            self.progress = 0.0;
        }
    }

    /// Advance by `dt` seconds and write the eyelid closure into `state`.
    pub fn update(&mut self, dt: f32, state: &mut FrameState) {
        if !self.blinking {
            self.elapsed += dt;
            if self.elapsed >= self.interval {
                log::trace!("automatic blink after {:.2}s", self.elapsed);
                self.blinking = true;
                self.progress = 0.0;
            }
        }

        if self.blinking {
            self.progress += dt / self.duration;
            if self.progress >= 1.0 {
                // Blink complete: snap open and restart the idle timer.
                self.blinking = false;
                self.progress = 0.0;
                self.elapsed = 0.0;
                state.eyelid_top = 0.0;
                state.eyelid_btm = 0.0;
            } else {
                let top = closure(self.progress).clamp(0.0, 1.0);
                state.eyelid_top = top;
                state.eyelid_btm = top * BOTTOM_LID_RATIO;
            }
        }
    }
}

impl Default for BlinkCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Closure curve over blink progress: accelerating quadratic close for the
/// first half, decelerating quadratic open for the second. The second half
/// remaps progress to [0, 1] before easing.
fn closure(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let t = (t - 0.5) * 2.0;
        1.0 - 2.0 * t * t
    }
}
