//! Head-tracking front-end: turns raw face detections into a smoothed gaze
//! snapshot the controller consumes once per frame.
//!
//! Detection itself (camera, face model) is a collaborator behind the
//! [`FaceDetector`] capability; this module owns only the smoothing,
//! prediction and fallback behavior.

use crate::state::FrameState;

/// Movement threshold separating fast head motion from drift.
const MOVEMENT_THRESHOLD: f32 = 0.02;
/// Blend factors: how much of the previous value is kept per frame.
const FAST_FACTOR: f32 = 0.5;
const SLOW_FACTOR: f32 = 0.9;
/// Velocity low-pass blend and prediction gains.
const VELOCITY_KEEP: f32 = 0.7;
const VELOCITY_GAIN: f32 = 0.3;
const FACE_PREDICTION: f32 = 0.3;
const GAZE_PREDICTION: f32 = 0.2;
/// Frames a face may go undetected before the fallback decay kicks in.
const MAX_LOST_FRAMES: u32 = 10;
/// Face area range (fraction of the frame) mapped onto the aperture ratio.
const MIN_FACE_RATIO: f32 = 0.1;
const MAX_FACE_RATIO: f32 = 0.5;
/// Aperture ratio range: far face -> 0.5, close face -> 0.85.
const RING_RATIO_BASE: f32 = 0.5;
const RING_RATIO_SPAN: f32 = 0.35;
const RING_RATIO_SMOOTHING: f32 = 0.1;

/// One normalized face detection: center in [0, 1]² frame coordinates and
/// the face's area as a fraction of the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePosition {
    pub center_x: f32,
    pub center_y: f32,
    pub area_fraction: f32,
}

/// Capability interface for a face-detection backend. Implementations wrap
/// whatever camera/model stack the integration uses; `None` means no face
/// was found this frame.
pub trait FaceDetector {
    fn detect(&mut self) -> Option<FacePosition>;
}

/// The gaze snapshot published once per frame for the update phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerOutput {
    pub gaze_x: f32,
    pub gaze_y: f32,
    /// Face-proximity-driven aperture ratio, already smoothed and clamped.
    pub ring_inner_ratio: f32,
}

impl TrackerOutput {
    /// Write this snapshot into the frame state. Called by the controller at
    /// the start of the update phase, never mid-frame.
    pub fn apply_to(&self, state: &mut FrameState) {
        state.gaze_x = self.gaze_x;
        state.gaze_y = self.gaze_y;
        state.ring_inner_ratio = self.ring_inner_ratio;
    }
}

/// Adaptive smoothing pipeline between a [`FaceDetector`] and the controller.
///
/// Fast head motion gets a snappier blend, drift gets a smoother one; a
/// simple velocity term predicts slightly ahead of the raw detection. When
/// the face is lost for more than [`MAX_LOST_FRAMES`] frames the published
/// gaze decays toward center rather than freezing.
pub struct HeadTracker<D> {
    detector: D,
    face_center: [f32; 2],
    face_velocity: [f32; 2],
    gaze: [f32; 2],
    gaze_velocity: [f32; 2],
    face_size: f32,
    face_size_velocity: f32,
    ring_ratio: f32,
    lost_frames: u32,
}

impl<D: FaceDetector> HeadTracker<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            face_center: [0.5, 0.5],
            face_velocity: [0.0; 2],
            gaze: [0.0; 2],
            gaze_velocity: [0.0; 2],
            face_size: 0.5,
            face_size_velocity: 0.0,
            ring_ratio: 0.65,
            lost_frames: 0,
        }
    }

    /// Poll the detector once and produce the frame's gaze snapshot.
    pub fn update(&mut self) -> TrackerOutput {
        match self.detector.detect() {
            Some(face) => {
                self.lost_frames = 0;
                self.track_face(face);
                self.smooth_ring_ratio();
            }
            None => {
                self.lost_frames += 1;
                if self.lost_frames == MAX_LOST_FRAMES + 1 {
                    log::debug!("face lost, decaying gaze toward center");
                }
                if self.lost_frames > MAX_LOST_FRAMES {
                    self.decay_toward_center();
                    self.smooth_ring_ratio();
                }
            }
        }
        TrackerOutput {
            gaze_x: self.gaze[0],
            gaze_y: self.gaze[1],
            ring_inner_ratio: self.ring_ratio,
        }
    }

    fn track_face(&mut self, face: FacePosition) {
        // Head position: adaptive smoothing with velocity prediction.
        let delta = [
            face.center_x - self.face_center[0],
            face.center_y - self.face_center[1],
        ];
        let factor = adaptive_factor(delta[0].abs() + delta[1].abs(), MOVEMENT_THRESHOLD);
        for axis in 0..2 {
            self.face_velocity[axis] =
                self.face_velocity[axis] * VELOCITY_KEEP + delta[axis] * VELOCITY_GAIN;
            let raw = [face.center_x, face.center_y][axis];
            let predicted = raw + self.face_velocity[axis] * FACE_PREDICTION;
            self.face_center[axis] =
                factor * self.face_center[axis] + (1.0 - factor) * predicted;
        }

        // Head offset from frame center becomes the raw gaze, clamped to the
        // normalized range before smoothing.
        let raw_gaze = [
            ((self.face_center[0] - 0.5) * 2.0).clamp(-1.0, 1.0),
            ((self.face_center[1] - 0.5) * 2.0).clamp(-1.0, 1.0),
        ];
        let gaze_delta = [raw_gaze[0] - self.gaze[0], raw_gaze[1] - self.gaze[1]];
        let gaze_factor =
            adaptive_factor(gaze_delta[0].abs() + gaze_delta[1].abs(), MOVEMENT_THRESHOLD);
        for axis in 0..2 {
            self.gaze_velocity[axis] =
                self.gaze_velocity[axis] * VELOCITY_KEEP + gaze_delta[axis] * VELOCITY_GAIN;
            let predicted = raw_gaze[axis] + self.gaze_velocity[axis] * GAZE_PREDICTION;
            self.gaze[axis] = gaze_factor * self.gaze[axis] + (1.0 - gaze_factor) * predicted;
        }

        // Face size: same pattern, driving the aperture ratio target.
        let normalized = ((face.area_fraction - MIN_FACE_RATIO)
            / (MAX_FACE_RATIO - MIN_FACE_RATIO))
            .clamp(0.0, 1.0);
        let size_delta = normalized - self.face_size;
        let size_factor = adaptive_factor(size_delta.abs(), 0.05);
        self.face_size_velocity =
            self.face_size_velocity * VELOCITY_KEEP + size_delta * VELOCITY_GAIN;
        let predicted = normalized + self.face_size_velocity * GAZE_PREDICTION;
        self.face_size = size_factor * self.face_size + (1.0 - size_factor) * predicted;
    }

    /// Fallback contract for prolonged detection loss: damp the velocities
    /// and ease everything back to its resting value so the eyes drift home
    /// instead of staring at the last known position.
    fn decay_toward_center(&mut self) {
        for axis in 0..2 {
            self.face_velocity[axis] *= 0.9;
            self.gaze_velocity[axis] *= 0.9;
            self.face_center[axis] = 0.5 + (self.face_center[axis] - 0.5) * 0.95;
            self.gaze[axis] *= 0.95;
        }
        self.face_size = 0.5 + (self.face_size - 0.5) * 0.95;
    }

    fn smooth_ring_ratio(&mut self) {
        let target = RING_RATIO_BASE + self.face_size * RING_RATIO_SPAN;
        let next = self.ring_ratio + (target - self.ring_ratio) * RING_RATIO_SMOOTHING;
        self.ring_ratio = next.clamp(0.0, 1.0);
    }
}

/// Pick the blend factor for the observed movement magnitude: fast motion
/// keeps less of the previous value.
fn adaptive_factor(movement: f32, threshold: f32) -> f32 {
    if movement > threshold {
        FAST_FACTOR
    } else {
        SLOW_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Detector fed from a prerecorded sequence of frames.
    struct Scripted {
        frames: Vec<Option<FacePosition>>,
        cursor: usize,
    }

    impl Scripted {
        fn new(frames: Vec<Option<FacePosition>>) -> Self {
            Self { frames, cursor: 0 }
        }
    }

    impl FaceDetector for Scripted {
        fn detect(&mut self) -> Option<FacePosition> {
            let frame = self.frames.get(self.cursor).copied().flatten();
            self.cursor += 1;
            frame
        }
    }

    fn face_at(x: f32, y: f32, area: f32) -> Option<FacePosition> {
        Some(FacePosition {
            center_x: x,
            center_y: y,
            area_fraction: area,
        })
    }

    #[test]
    fn off_center_face_pulls_gaze_in_its_direction() {
        let frames = vec![face_at(0.9, 0.5, 0.2); 120];
        let mut tracker = HeadTracker::new(Scripted::new(frames));

        let mut output = tracker.update();
        for _ in 0..119 {
            output = tracker.update();
        }
        assert!(output.gaze_x > 0.5);
        assert!(output.gaze_x <= 1.0 + 1e-3);
        assert!(output.gaze_y.abs() < 0.05);
    }

    #[test]
    fn lost_face_decays_gaze_toward_center() {
        let mut frames = vec![face_at(0.9, 0.5, 0.2); 60];
        frames.extend(vec![None; 200]);
        let mut tracker = HeadTracker::new(Scripted::new(frames));

        for _ in 0..60 {
            let _ = tracker.update();
        }
        let engaged = tracker.update().gaze_x;
        assert!(engaged > 0.3);

        // Inside the grace window the published gaze holds steady.
        let mut held = engaged;
        for _ in 0..MAX_LOST_FRAMES - 1 {
            held = tracker.update().gaze_x;
        }
        assert_eq!(held, engaged);

        // Past it, the gaze drifts home instead of freezing.
        let mut prev = held;
        for _ in 0..150 {
            let now = tracker.update().gaze_x;
            assert!(now <= prev);
            prev = now;
        }
        assert!(prev < 0.05);
    }

    #[test]
    fn close_face_widens_the_aperture() {
        let frames = vec![face_at(0.5, 0.5, 0.5); 300];
        let mut tracker = HeadTracker::new(Scripted::new(frames));

        let mut output = tracker.update();
        for _ in 0..299 {
            output = tracker.update();
        }
        assert!((output.ring_inner_ratio - 0.85).abs() < 0.01);
        assert!(output.ring_inner_ratio < 1.0);
    }

    #[test]
    fn far_face_narrows_the_aperture() {
        let frames = vec![face_at(0.5, 0.5, 0.05); 300];
        let mut tracker = HeadTracker::new(Scripted::new(frames));

        let mut output = tracker.update();
        for _ in 0..299 {
            output = tracker.update();
        }
        assert!((output.ring_inner_ratio - 0.5).abs() < 0.01);
    }

    #[test]
    fn snapshot_applies_to_frame_state() {
        let output = TrackerOutput {
            gaze_x: 0.4,
            gaze_y: -0.2,
            ring_inner_ratio: 0.7,
        };
        let mut state = FrameState::default();
        output.apply_to(&mut state);
        assert_eq!(state.gaze_x, 0.4);
        assert_eq!(state.gaze_y, -0.2);
        assert_eq!(state.ring_inner_ratio, 0.7);
    }
}
