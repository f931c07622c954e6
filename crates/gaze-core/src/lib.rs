pub mod animator;
pub mod blink;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod presets;
pub mod renderer;
pub mod state;
pub mod tracking;
pub mod transition;

#[cfg(feature = "gui")]
pub mod gui;

pub use animator::MotionAnimator;
pub use blink::BlinkCycle;
pub use config::FaceConfig;
pub use controller::Face;
pub use effects::{EffectDescriptor, EffectKind};
pub use error::FaceError;
pub use geometry::{EyeGeometry, Side};
pub use presets::{EmotionPreset, PresetLibrary};
pub use renderer::{EyeParams, EyeRenderer};
pub use state::{EyebrowShape, Field, FrameState};
pub use tracking::{FaceDetector, FacePosition, HeadTracker, TrackerOutput};
pub use transition::{lerp, transition_toward, EmotionTarget};
