use serde::{Deserialize, Serialize};

use crate::effects::EffectDescriptor;
use crate::state::{EyebrowShape, Field};
use crate::transition::EmotionTarget;

/// A named emotion: a set of target values plus the continuous effects that
/// stay active while the emotion is selected. Presets are static
/// configuration; they are never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionPreset {
    pub name: String,
    pub values: EmotionTarget,
    #[serde(default)]
    pub effects: Vec<EffectDescriptor>,
}

/// Lookup table of emotion presets, seeded with the built-ins and extensible
/// with user-defined presets loaded from JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PresetLibrary {
    presets: Vec<EmotionPreset>,
}

impl PresetLibrary {
    /// The built-in presets: `neutral` and `angry`.
    pub fn builtin() -> Self {
        let neutral = EmotionPreset {
            name: "neutral".to_owned(),
            values: EmotionTarget::new()
                .with(Field::EyeScale, 1.0)
                .with(Field::EyeEccentricity, 1.0)
                .with(Field::EyelidTop, 0.0)
                .with(Field::EyelidBtm, 0.0)
                .with(Field::EyebrowLift, 0.0)
                .with(Field::GazeY, 0.0)
                .with_eyebrow(EyebrowShape::Arc),
            effects: Vec::new(),
        };
        let angry = EmotionPreset {
            name: "angry".to_owned(),
            values: EmotionTarget::new()
                .with(Field::EyeScale, 1.15)
                .with(Field::EyeEccentricity, 1.1)
                .with(Field::EyelidTop, 0.1)
                .with(Field::EyelidBtm, 0.0)
                .with(Field::EyebrowLift, -0.6)
                .with(Field::GazeY, -0.15)
                .with_eyebrow(EyebrowShape::Angry),
            effects: vec![EffectDescriptor::Shake { intensity: 2.0 }],
        };
        Self {
            presets: vec![neutral, angry],
        }
    }

    pub fn get(&self, name: &str) -> Option<&EmotionPreset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|preset| preset.name.as_str())
    }

    /// Add or replace a preset. A preset with the same name is overwritten,
    /// so user presets can shadow the built-ins.
    pub fn insert(&mut self, preset: EmotionPreset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(slot) => *slot = preset,
            None => self.presets.push(preset),
        }
    }

    /// Merge presets parsed from a JSON array of [`EmotionPreset`] objects.
    pub fn merge_json(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let parsed: Vec<EmotionPreset> = serde_json::from_str(json)?;
        for preset in parsed {
            self.insert(preset);
        }
        Ok(())
    }
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_has_neutral_and_angry() {
        let library = PresetLibrary::builtin();
        let neutral = library.get("neutral").unwrap();
        assert!(neutral.effects.is_empty());
        assert_eq!(neutral.values.eyebrow_shape, Some(EyebrowShape::Arc));

        let angry = library.get("angry").unwrap();
        assert_eq!(
            angry.effects,
            vec![EffectDescriptor::Shake { intensity: 2.0 }]
        );
        assert_eq!(angry.values.values.get(&Field::EyebrowLift), Some(&-0.6));
        assert_eq!(angry.values.values.get(&Field::GazeY), Some(&-0.15));
    }

    #[test]
    fn unknown_name_yields_none() {
        assert!(PresetLibrary::builtin().get("nonexistent").is_none());
    }

    #[test]
    fn merge_json_adds_and_shadows() {
        let mut library = PresetLibrary::builtin();
        let json = r#"[{
            "name": "sleepy",
            "values": {
                "values": { "eyelid_top": 0.6, "eyebrow_lift": 0.2 }
            },
            "effects": []
        }]"#;
        library.merge_json(json).unwrap();

        let sleepy = library.get("sleepy").unwrap();
        assert_eq!(sleepy.values.values.get(&Field::EyelidTop), Some(&0.6));
        assert_eq!(sleepy.values.eyebrow_shape, None);
        // Built-ins survive the merge.
        assert!(library.get("angry").is_some());
    }
}
