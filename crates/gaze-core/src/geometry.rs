use crate::state::FrameState;

/// Gaze pan travel caps as fractions of screen width/height.
const MAX_PAN_X_RATIO: f32 = 0.3;
const MAX_PAN_Y_RATIO: f32 = 0.2;

/// Which eye a computation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Resolution-independent mapping from frame state to screen-space eye
/// centers and dimensions. Stateless; safe to call any number of times.
#[derive(Clone, Copy, Debug)]
pub struct EyeGeometry {
    width: f32,
    height: f32,
    /// Eye spacing as a fraction of screen width.
    pub spacing_ratio: f32,
    /// Eye radius as a fraction of the smaller screen dimension.
    pub radius_ratio: f32,
}

impl EyeGeometry {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            spacing_ratio: 0.22,
            radius_ratio: 0.22,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn base_radius(&self) -> f32 {
        self.width.min(self.height) * self.radius_ratio
    }

    /// Screen-space center of one eye: base spacing around the screen center
    /// plus the gaze pan, scaled linearly and capped at 30% width / 20%
    /// height of travel.
    pub fn eye_center(&self, side: Side, state: &FrameState) -> [f32; 2] {
        let spacing = self.width * self.spacing_ratio;
        let center_offset = match side {
            Side::Right => spacing,
            Side::Left => -spacing,
        };
        let cx = self.width / 2.0 + center_offset + state.gaze_x * self.width * MAX_PAN_X_RATIO;
        let cy = self.height / 2.0 + state.gaze_y * self.height * MAX_PAN_Y_RATIO;
        [cx, cy]
    }

    /// Full width and height of one eye's outer ellipse.
    pub fn eye_dimensions(&self, state: &FrameState) -> [f32; 2] {
        let r = self.base_radius();
        let w = r * 2.0 * state.eye_eccentricity * state.eye_scale;
        let h = r * 2.0 * state.eye_scale;
        [w, h]
    }
}
