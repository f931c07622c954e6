use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::state::FrameState;
use crate::transition::lerp;

/// Per-frame decay rate applied to shake jitter while the effect is inactive.
const SHAKE_CLEAR_SPEED: f32 = 0.2;

/// A continuous effect as declared by an emotion preset.
///
/// Serializes as the tagged form `{"type": "shake", "intensity": 2.0}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectDescriptor {
    Shake { intensity: f32 },
}

impl EffectDescriptor {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectDescriptor::Shake { .. } => EffectKind::Shake,
        }
    }
}

/// The closed registry of stateful continuous effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Shake,
}

impl EffectKind {
    pub const ALL: [EffectKind; 1] = [EffectKind::Shake];
}

/// Run one dispatch pass over every registered effect.
///
/// For each kind: if the active preset lists a descriptor of that kind, its
/// `apply` runs with the descriptor's parameters; otherwise its `clear` runs
/// unconditionally, so a deactivated effect decays smoothly instead of
/// snapping off.
pub fn dispatch<R: Rng>(state: &mut FrameState, active: &[EffectDescriptor], rng: &mut R) {
    for kind in EffectKind::ALL {
        // First descriptor of the matching kind wins.
        match active.iter().find(|effect| effect.kind() == kind) {
            Some(descriptor) => apply(state, descriptor, rng),
            None => clear(state, kind),
        }
    }
}

fn apply<R: Rng>(state: &mut FrameState, descriptor: &EffectDescriptor, rng: &mut R) {
    match *descriptor {
        EffectDescriptor::Shake { intensity } => {
            // Re-randomized every active frame, not smoothed: that is what
            // reads as jitter.
            let amplitude = intensity.abs();
            state.shake_x = rng.random_range(-amplitude..=amplitude);
            state.shake_y = rng.random_range(-amplitude..=amplitude);
        }
    }
}

fn clear(state: &mut FrameState, kind: EffectKind) {
    match kind {
        EffectKind::Shake => {
            state.shake_x = lerp(state.shake_x, 0.0, SHAKE_CLEAR_SPEED);
            state.shake_y = lerp(state.shake_y, 0.0, SHAKE_CLEAR_SPEED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn active_shake_stays_within_intensity_bounds() {
        let mut state = FrameState::default();
        let mut rng = StdRng::seed_from_u64(7);
        let active = [EffectDescriptor::Shake { intensity: 2.0 }];

        for _ in 0..200 {
            dispatch(&mut state, &active, &mut rng);
            assert!(state.shake_x.abs() <= 2.0);
            assert!(state.shake_y.abs() <= 2.0);
        }
    }

    #[test]
    fn inactive_shake_decays_monotonically_toward_zero() {
        let mut state = FrameState::default();
        state.shake_x = 2.0;
        state.shake_y = -1.5;
        let mut rng = StdRng::seed_from_u64(7);

        let mut prev = (state.shake_x.abs(), state.shake_y.abs());
        for _ in 0..60 {
            dispatch(&mut state, &[], &mut rng);
            let now = (state.shake_x.abs(), state.shake_y.abs());
            assert!(now.0 < prev.0 || now.0 == 0.0);
            assert!(now.1 < prev.1 || now.1 == 0.0);
            prev = now;
        }
        assert!(prev.0 < 1e-3);
        assert!(prev.1 < 1e-3);
    }

    #[test]
    fn descriptor_json_matches_tagged_form() {
        let descriptor = EffectDescriptor::Shake { intensity: 2.0 };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(json, r#"{"type":"shake","intensity":2.0}"#);
        let back: EffectDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
    }
}
