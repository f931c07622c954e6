use serde::{Deserialize, Serialize};

use crate::controller::Face;
use crate::error::FaceError;
use crate::presets::EmotionPreset;

// ============================================================
// Serializable config types
// ============================================================

/// Tuning configuration for a [`Face`]: appearance ratios, timing, and
/// optional user presets. This is static setup data, not animation state;
/// the motion and blink memories are never persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaceConfig {
    pub version: u32,
    /// Main eye color, linear RGB in 0..1.
    pub color: [f32; 3],
    /// Eye spacing as a fraction of screen width.
    pub spacing_ratio: f32,
    /// Eye radius as a fraction of the smaller screen dimension.
    pub radius_ratio: f32,
    /// Seconds between automatic blinks. Must be > 0.
    pub blink_interval: f32,
    /// Seconds a full blink takes. Must be > 0.
    pub blink_duration: f32,
    /// Emotion transition speed, fraction per frame.
    pub transition_speed: f32,
    /// Extra emotion presets merged over the built-ins.
    #[serde(default)]
    pub presets: Vec<EmotionPreset>,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            color: [0.7, 0.7, 0.7],
            spacing_ratio: 0.22,
            radius_ratio: 0.22,
            blink_interval: 3.0,
            blink_duration: 0.15,
            transition_speed: 0.1,
            presets: Vec::new(),
        }
    }
}

impl FaceConfig {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Snapshot the tunable parts of a running face.
    pub fn from_face(face: &Face) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            color: face.state().color,
            spacing_ratio: face.geometry().spacing_ratio,
            radius_ratio: face.geometry().radius_ratio,
            blink_interval: face.blink().interval(),
            blink_duration: face.blink().duration(),
            transition_speed: face.transition_speed(),
            presets: Vec::new(),
        }
    }

    /// Apply this configuration to a running face. Fails fast on invalid
    /// timing values; validation runs before any field is written.
    pub fn apply_to(&self, face: &mut Face) -> Result<(), FaceError> {
        if self.blink_interval <= 0.0 {
            return Err(FaceError::InvalidBlinkInterval(self.blink_interval));
        }
        if self.blink_duration <= 0.0 {
            return Err(FaceError::InvalidBlinkInterval(self.blink_duration));
        }

        face.state_mut().color = self.color;
        face.geometry_mut().spacing_ratio = self.spacing_ratio;
        face.geometry_mut().radius_ratio = self.radius_ratio;
        face.blink_mut().set_interval(self.blink_interval)?;
        face.blink_mut().set_duration(self.blink_duration)?;
        face.set_transition_speed(self.transition_speed);
        for preset in &self.presets {
            face.presets_mut().insert(preset.clone());
        }
        log::info!("applied face config v{}", self.version);
        Ok(())
    }
}
