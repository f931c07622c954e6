use crate::animator::MotionAnimator;
use crate::blink::BlinkCycle;
use crate::effects::{self, EffectDescriptor};
use crate::error::FaceError;
use crate::geometry::EyeGeometry;
use crate::presets::PresetLibrary;
use crate::state::FrameState;
use crate::tracking::TrackerOutput;
use crate::transition::{transition_toward, EmotionTarget};

/// Fraction of the remaining distance the emotion transition covers per frame.
const DEFAULT_TRANSITION_SPEED: f32 = 0.1;

/// High-level controller owning the frame state and every animation
/// subsystem.
///
/// Collaborators never reach into the state directly between frames; they
/// submit intents ([`set_gaze`](Self::set_gaze),
/// [`apply_tracking`](Self::apply_tracking), [`set_emotion`](Self::set_emotion),
/// ...) which the single update phase applies in a fixed order: pending input,
/// motion animator, blink machine, effect dispatcher, emotion transition.
/// The render phase then reads the state once. One writer, one reader, per
/// frame.
pub struct Face {
    state: FrameState,
    geometry: EyeGeometry,
    animator: MotionAnimator,
    blink: BlinkCycle,
    presets: PresetLibrary,
    current_emotion: String,
    target: EmotionTarget,
    active_effects: Vec<EffectDescriptor>,
    transition_speed: f32,
    pending_gaze: Option<[f32; 2]>,
    pending_tracking: Option<TrackerOutput>,
}

impl Face {
    /// Create a controller for the given screen size, starting in the
    /// `neutral` emotion with its target values applied instantly.
    pub fn new(width: f32, height: f32) -> Self {
        let presets = PresetLibrary::builtin();
        // Unwrap is safe: the builtin library always contains "neutral".
        let neutral = presets
            .get("neutral")
            .map(|preset| (preset.values.clone(), preset.effects.clone()))
            .unwrap_or_default();

        let mut state = FrameState::default();
        transition_toward(&mut state, &neutral.0, 1.0);

        Self {
            state,
            geometry: EyeGeometry::new(width, height),
            animator: MotionAnimator::new(),
            blink: BlinkCycle::new(),
            presets,
            current_emotion: "neutral".to_owned(),
            target: neutral.0,
            active_effects: neutral.1,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            pending_gaze: None,
            pending_tracking: None,
        }
    }

    // ============================================================
    // Intents
    // ============================================================

    /// Submit a gaze target for the next frame. Values are consumed as-is;
    /// callers normalize to [-1, 1].
    pub fn set_gaze(&mut self, x: f32, y: f32) {
        self.pending_gaze = Some([x, y]);
    }

    /// Submit a head-tracking snapshot for the next frame. Takes precedence
    /// over [`set_gaze`](Self::set_gaze) and also drives the aperture ratio.
    pub fn apply_tracking(&mut self, output: TrackerOutput) {
        self.pending_tracking = Some(output);
    }

    /// Select the target emotion. The new preset is approached gradually by
    /// the per-frame transition; offsets and effect state are never reset, so
    /// emotions cross-fade. Unknown names and the already-active name are
    /// no-ops by design.
    pub fn set_emotion(&mut self, name: &str) {
        if name == self.current_emotion {
            return;
        }
        match self.presets.get(name) {
            Some(preset) => {
                log::info!("emotion -> {name}");
                self.current_emotion = name.to_owned();
                self.target = preset.values.clone();
                self.active_effects = preset.effects.clone();
            }
            None => log::debug!("ignoring unknown emotion {name:?}"),
        }
    }

    /// Force a blink now. No-op while one is already running.
    pub fn trigger_blink(&mut self) {
        self.blink.trigger();
    }

    /// Set the automatic blink cadence in seconds. Must be > 0.
    pub fn set_blink_interval(&mut self, seconds: f32) -> Result<(), FaceError> {
        self.blink.set_interval(seconds)
    }

    // ============================================================
    // Frame update
    // ============================================================

    /// The once-per-frame update phase. `dt` is the elapsed time in seconds
    /// since the previous call; it drives the blink timer, while the motion
    /// layers advance one filter step per call.
    pub fn update(&mut self, dt: f32) {
        if let Some(tracking) = self.pending_tracking.take() {
            tracking.apply_to(&mut self.state);
            self.pending_gaze = None;
        } else if let Some([x, y]) = self.pending_gaze.take() {
            self.state.gaze_x = x;
            self.state.gaze_y = y;
        }

        self.animator.update(&mut self.state);
        self.blink.update(dt, &mut self.state);
        effects::dispatch(&mut self.state, &self.active_effects, &mut rand::rng());
        transition_toward(&mut self.state, &self.target, self.transition_speed);
    }

    // ============================================================
    // Accessors
    // ============================================================

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Direct mutable access for UI tuning controls. Render-phase code should
    /// use [`state`](Self::state).
    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    pub fn geometry(&self) -> &EyeGeometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut EyeGeometry {
        &mut self.geometry
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.geometry.resize(width, height);
    }

    pub fn current_emotion(&self) -> &str {
        &self.current_emotion
    }

    pub fn target(&self) -> &EmotionTarget {
        &self.target
    }

    pub fn presets(&self) -> &PresetLibrary {
        &self.presets
    }

    pub fn presets_mut(&mut self) -> &mut PresetLibrary {
        &mut self.presets
    }

    pub fn blink(&self) -> &BlinkCycle {
        &self.blink
    }

    pub(crate) fn blink_mut(&mut self) -> &mut BlinkCycle {
        &mut self.blink
    }

    pub fn transition_speed(&self) -> f32 {
        self.transition_speed
    }

    pub fn set_transition_speed(&mut self, speed: f32) {
        self.transition_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EyebrowShape, Field};

    #[test]
    fn starts_with_neutral_applied_instantly() {
        let face = Face::new(800.0, 400.0);
        assert_eq!(face.current_emotion(), "neutral");
        assert_eq!(face.state().eye_scale, 1.0);
        assert_eq!(face.state().eyebrow_shape, EyebrowShape::Arc);
    }

    #[test]
    fn unknown_emotion_is_a_no_op() {
        let mut face = Face::new(800.0, 400.0);
        let target_before = face.target().clone();

        face.set_emotion("nonexistent");
        assert_eq!(face.current_emotion(), "neutral");
        assert_eq!(*face.target(), target_before);
    }

    #[test]
    fn emotion_switch_fades_instead_of_snapping() {
        let mut face = Face::new(800.0, 400.0);
        face.set_emotion("angry");
        assert_eq!(face.current_emotion(), "angry");
        // Shape switches immediately, scalars fade.
        face.update(1.0 / 60.0);
        assert_eq!(face.state().eyebrow_shape, EyebrowShape::Angry);
        let scale = face.state().eye_scale;
        assert!(scale > 1.0 && scale < 1.15);
    }

    #[test]
    fn shake_decays_after_leaving_angry() {
        let mut face = Face::new(800.0, 400.0);
        face.set_emotion("angry");
        for _ in 0..30 {
            face.update(1.0 / 60.0);
        }
        face.set_emotion("neutral");

        // Shake may be anywhere in [-2, 2] now; once inactive it must decay
        // monotonically rather than snapping to zero.
        let mut prev = (face.state().shake_x.abs(), face.state().shake_y.abs());
        for _ in 0..60 {
            face.update(1.0 / 60.0);
            let now = (face.state().shake_x.abs(), face.state().shake_y.abs());
            assert!(now.0 <= prev.0);
            assert!(now.1 <= prev.1);
            prev = now;
        }
        assert!(prev.0 < 1e-3);
        assert!(prev.1 < 1e-3);
    }

    #[test]
    fn gaze_intent_is_applied_at_update() {
        let mut face = Face::new(800.0, 400.0);
        face.set_gaze(0.8, -0.4);
        assert_eq!(face.state().gaze_x, 0.0);

        face.update(1.0 / 60.0);
        assert_eq!(face.state().gaze_x, 0.8);
        // The motion layers started moving toward the new target.
        assert!(face.state().inner_hole_offset_x > 0.0);
    }

    #[test]
    fn tracking_snapshot_wins_over_plain_gaze() {
        let mut face = Face::new(800.0, 400.0);
        face.set_gaze(0.8, 0.0);
        face.apply_tracking(TrackerOutput {
            gaze_x: -0.5,
            gaze_y: 0.1,
            ring_inner_ratio: 0.7,
        });

        face.update(1.0 / 60.0);
        assert_eq!(face.state().gaze_x, -0.5);
        // The aperture ratio drifts toward 0.7 (the transition also touches
        // nothing ring-related for neutral, so the write survives).
        assert_eq!(face.state().ring_inner_ratio, 0.7);
    }

    #[test]
    fn blink_interval_validation_propagates() {
        let mut face = Face::new(800.0, 400.0);
        assert!(face.set_blink_interval(0.0).is_err());
        assert!(face.set_blink_interval(-1.0).is_err());
        assert!(face.set_blink_interval(2.5).is_ok());
    }

    #[test]
    fn angry_gaze_target_feeds_the_animator() {
        let mut face = Face::new(800.0, 400.0);
        face.set_emotion("angry");
        for _ in 0..240 {
            face.update(1.0 / 60.0);
        }
        // The preset pulls gaze_y toward -0.15; the layered offsets follow.
        assert!((face.state().gaze_y - -0.15).abs() < 0.01);
        assert!(face.state().inner_hole_offset_y < 0.0);
        // Scalar targets converged too.
        assert!((face.state().eye_scale - 1.15).abs() < 0.01);
        assert_eq!(
            face.target().values.get(&Field::EyeScale),
            Some(&1.15)
        );
    }
}
