use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Eyebrow rendering style. `Arc` is the default rounded brow; `Angry`
/// draws a straight slanted bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyebrowShape {
    #[default]
    Arc,
    Angry,
}

/// The full visual configuration of one rendered frame.
///
/// Mutated in place every frame by the update phase and read once by the
/// renderer; there is no history beyond the previous-frame memory kept
/// privately by [`MotionAnimator`](crate::MotionAnimator) and
/// [`BlinkCycle`](crate::BlinkCycle).
#[derive(Clone, Debug)]
pub struct FrameState {
    // Orientation
    /// Normalized look direction, -1.0 (left) to 1.0 (right).
    pub gaze_x: f32,
    /// Normalized look direction, -1.0 (up) to 1.0 (down).
    pub gaze_y: f32,

    // Eye geometry
    /// Overall size multiplier, > 0.
    pub eye_scale: f32,
    /// Width/height ratio. 1.0 = circular, > 1.0 = wide.
    pub eye_eccentricity: f32,
    /// Aperture-to-outer-ring size ratio in [0, 1). 0 = solid disc.
    pub ring_inner_ratio: f32,

    // Highlight
    pub highlight_scale: f32,
    /// Highlight offset within the aperture, in aperture-relative units.
    pub highlight_x: f32,
    pub highlight_y: f32,
    /// Transient overshoot offset driven by the motion animator. Not user-set.
    pub highlight_bounce_x: f32,
    pub highlight_bounce_y: f32,

    // Layered motion offsets, driven by the motion animator. Not user-set.
    pub inner_hole_offset_x: f32,
    pub inner_hole_offset_y: f32,
    pub outer_ring_offset_x: f32,
    pub outer_ring_offset_y: f32,

    // Expression
    pub eyebrow_lift: f32,
    pub eyebrow_shape: EyebrowShape,
    /// Top eyelid closure, 0.0 (open) to 1.0 (fully closed).
    pub eyelid_top: f32,
    /// Bottom eyelid closure, 0.0 (open) to 1.0 (fully closed).
    pub eyelid_btm: f32,

    // Transient overlay, pixel-space jitter. Decays to zero when inactive.
    pub shake_x: f32,
    pub shake_y: f32,

    // Appearance
    /// Main eye color, linear RGB in 0..1.
    pub color: [f32; 3],
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            gaze_x: 0.0,
            gaze_y: 0.0,
            eye_scale: 1.0,
            eye_eccentricity: 1.0,
            ring_inner_ratio: 0.65,
            highlight_scale: 1.0,
            highlight_x: 0.3,
            highlight_y: -0.3,
            highlight_bounce_x: 0.0,
            highlight_bounce_y: 0.0,
            inner_hole_offset_x: 0.0,
            inner_hole_offset_y: 0.0,
            outer_ring_offset_x: 0.0,
            outer_ring_offset_y: 0.0,
            eyebrow_lift: 0.0,
            eyebrow_shape: EyebrowShape::Arc,
            eyelid_top: 0.0,
            eyelid_btm: 0.0,
            shake_x: 0.0,
            shake_y: 0.0,
            color: [0.7, 0.7, 0.7],
        }
    }
}

/// Closed table of the user-settable numeric fields of [`FrameState`].
///
/// Presets and generic UI controls address fields through this enum instead
/// of by attribute name; each variant carries a typed accessor/mutator pair.
/// Serde names match the snake_case field names, so preset JSON reads
/// `{"eye_scale": 1.15}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    GazeX,
    GazeY,
    EyeScale,
    EyeEccentricity,
    RingInnerRatio,
    HighlightScale,
    HighlightX,
    HighlightY,
    EyebrowLift,
    EyelidTop,
    EyelidBtm,
}

impl Field {
    /// Every addressable field, in display order.
    pub const ALL: [Field; 11] = [
        Field::GazeX,
        Field::GazeY,
        Field::EyeScale,
        Field::EyeEccentricity,
        Field::RingInnerRatio,
        Field::HighlightScale,
        Field::HighlightX,
        Field::HighlightY,
        Field::EyebrowLift,
        Field::EyelidTop,
        Field::EyelidBtm,
    ];

    pub fn get(self, state: &FrameState) -> f32 {
        match self {
            Field::GazeX => state.gaze_x,
            Field::GazeY => state.gaze_y,
            Field::EyeScale => state.eye_scale,
            Field::EyeEccentricity => state.eye_eccentricity,
            Field::RingInnerRatio => state.ring_inner_ratio,
            Field::HighlightScale => state.highlight_scale,
            Field::HighlightX => state.highlight_x,
            Field::HighlightY => state.highlight_y,
            Field::EyebrowLift => state.eyebrow_lift,
            Field::EyelidTop => state.eyelid_top,
            Field::EyelidBtm => state.eyelid_btm,
        }
    }

    pub fn set(self, state: &mut FrameState, value: f32) {
        match self {
            Field::GazeX => state.gaze_x = value,
            Field::GazeY => state.gaze_y = value,
            Field::EyeScale => state.eye_scale = value,
            Field::EyeEccentricity => state.eye_eccentricity = value,
            Field::RingInnerRatio => state.ring_inner_ratio = value,
            Field::HighlightScale => state.highlight_scale = value,
            Field::HighlightX => state.highlight_x = value,
            Field::HighlightY => state.highlight_y = value,
            Field::EyebrowLift => state.eyebrow_lift = value,
            Field::EyelidTop => state.eyelid_top = value,
            Field::EyelidBtm => state.eyelid_btm = value,
        }
    }

    /// Human-readable label for UI controls.
    pub fn label(self) -> &'static str {
        match self {
            Field::GazeX => "Gaze X",
            Field::GazeY => "Gaze Y",
            Field::EyeScale => "Eye Scale",
            Field::EyeEccentricity => "Eccentricity",
            Field::RingInnerRatio => "Ring Thickness",
            Field::HighlightScale => "Highlight Size",
            Field::HighlightX => "Highlight X",
            Field::HighlightY => "Highlight Y",
            Field::EyebrowLift => "Eyebrow Lift",
            Field::EyelidTop => "Eyelid Top",
            Field::EyelidBtm => "Eyelid Bottom",
        }
    }

    /// Sensible tuning range for a generic slider bound to this field.
    pub fn slider_range(self) -> RangeInclusive<f32> {
        match self {
            Field::GazeX | Field::GazeY => -1.0..=1.0,
            Field::EyeScale => 0.5..=1.5,
            Field::EyeEccentricity => 0.8..=1.4,
            Field::RingInnerRatio => 0.3..=0.9,
            Field::HighlightScale => 0.5..=2.0,
            Field::HighlightX | Field::HighlightY => -0.5..=0.5,
            Field::EyebrowLift => -1.0..=1.0,
            Field::EyelidTop | Field::EyelidBtm => 0.0..=1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_accessors_round_trip() {
        let mut state = FrameState::default();
        for (i, field) in Field::ALL.iter().enumerate() {
            let value = 0.01 * i as f32 + 0.1;
            field.set(&mut state, value);
            assert_eq!(field.get(&state), value, "{field:?}");
        }
    }

    #[test]
    fn field_serde_names_are_snake_case() {
        let json = serde_json::to_string(&Field::RingInnerRatio).unwrap();
        assert_eq!(json, "\"ring_inner_ratio\"");
        let back: Field = serde_json::from_str("\"eye_scale\"").unwrap();
        assert_eq!(back, Field::EyeScale);
    }

    #[test]
    fn default_state_matches_reference_values() {
        let state = FrameState::default();
        assert_eq!(state.ring_inner_ratio, 0.65);
        assert_eq!(state.highlight_x, 0.3);
        assert_eq!(state.highlight_y, -0.3);
        assert_eq!(state.eyebrow_shape, EyebrowShape::Arc);
    }
}
