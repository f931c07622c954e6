use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::{EyebrowShape, Field, FrameState};

/// Linear interpolation.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + t * (end - start)
}

/// A partial target configuration: the numeric fields to approach and an
/// optional eyebrow shape to switch to. Fields absent from the map are left
/// untouched by [`transition_toward`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionTarget {
    #[serde(default)]
    pub values: BTreeMap<Field, f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyebrow_shape: Option<EyebrowShape>,
}

impl EmotionTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: f32) -> Self {
        self.values.insert(field, value);
        self
    }

    pub fn with_eyebrow(mut self, shape: EyebrowShape) -> Self {
        self.eyebrow_shape = Some(shape);
        self
    }
}

/// Move `state` toward `target` by the fraction `speed` per call.
///
/// Each numeric field present in the target is replaced with
/// `current + speed * (target - current)` — an exponential approach whose
/// convergence rate depends only on call frequency. The eyebrow shape, if
/// present, is applied immediately. Nothing is clamped here; extreme values
/// and NaN propagate so the utility stays generic.
pub fn transition_toward(state: &mut FrameState, target: &EmotionTarget, speed: f32) {
    for (&field, &value) in &target.values {
        field.set(state, lerp(field.get(state), value, speed));
    }
    if let Some(shape) = target.eyebrow_shape {
        state.eyebrow_shape = shape;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_monotonically_at_low_speed() {
        let mut state = FrameState::default();
        let target = EmotionTarget::new().with(Field::EyeScale, 2.0);

        let mut prev_distance = (2.0 - state.eye_scale).abs();
        let mut iterations = 0;
        while (2.0 - state.eye_scale).abs() > 1e-6 {
            transition_toward(&mut state, &target, 0.1);
            let distance = (2.0 - state.eye_scale).abs();
            assert!(distance < prev_distance, "distance must shrink every call");
            prev_distance = distance;
            iterations += 1;
            assert!(iterations < 500, "failed to converge within 1e-6");
        }
    }

    #[test]
    fn full_speed_snaps_exactly() {
        let mut state = FrameState::default();
        let target = EmotionTarget::new().with(Field::EyebrowLift, -0.6);
        transition_toward(&mut state, &target, 1.0);
        assert_eq!(state.eyebrow_lift, -0.6);
    }

    #[test]
    fn eyebrow_shape_switches_immediately() {
        let mut state = FrameState::default();
        let target = EmotionTarget::new()
            .with(Field::EyelidTop, 0.1)
            .with_eyebrow(EyebrowShape::Angry);
        transition_toward(&mut state, &target, 0.1);
        assert_eq!(state.eyebrow_shape, EyebrowShape::Angry);
        // Numeric fields only moved by a fraction.
        assert!((state.eyelid_top - 0.01).abs() < 1e-6);
    }

    #[test]
    fn absent_fields_are_untouched() {
        let mut state = FrameState::default();
        state.highlight_scale = 1.7;
        let target = EmotionTarget::new().with(Field::EyeScale, 1.2);
        transition_toward(&mut state, &target, 0.5);
        assert_eq!(state.highlight_scale, 1.7);
        assert_eq!(state.eyebrow_shape, EyebrowShape::Arc);
    }

    #[test]
    fn nan_target_propagates_without_panicking() {
        let mut state = FrameState::default();
        let target = EmotionTarget::new().with(Field::GazeX, f32::NAN);
        transition_toward(&mut state, &target, 0.5);
        assert!(state.gaze_x.is_nan());
    }
}
