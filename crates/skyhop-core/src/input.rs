use serde::{Deserialize, Serialize};

/// Width of the virtual GUI screen pointer positions are expressed in.
pub const GUI_WIDTH: f32 = 320.0;
/// Height of the virtual GUI screen pointer positions are expressed in.
pub const GUI_HEIGHT: f32 = 480.0;
/// Horizontal acceleration produced by holding one half of the screen.
pub const TOUCH_ACCEL: f32 = 5.0;

/// Pointer state sampled once per frame by the host.
///
/// `position` is already unprojected into the 320x480 GUI space with the origin
/// at the bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Pointer is held down this frame.
    pub pressed: bool,
    /// Pointer went down this frame.
    pub just_pressed: bool,
    pub position: (f32, f32),
}

impl PointerInput {
    /// Pointer held at `(x, y)`, without a fresh press.
    pub fn held_at(x: f32, y: f32) -> Self {
        Self {
            pressed: true,
            just_pressed: false,
            position: (x, y),
        }
    }

    /// Pointer pressed this frame at `(x, y)`.
    pub fn tap_at(x: f32, y: f32) -> Self {
        Self {
            pressed: true,
            just_pressed: true,
            position: (x, y),
        }
    }

    /// Horizontal acceleration selected by the pointer.
    ///
    /// Left half gives `+TOUCH_ACCEL`, right half `-TOUCH_ACCEL`. Both halves
    /// include the centre line; the right half is tested last so it wins there.
    /// Released or off-screen pointers give zero.
    pub fn accel(&self) -> f32 {
        if !self.pressed {
            return 0.0;
        }
        let (x, y) = self.position;
        if !x.is_finite() || !y.is_finite() {
            return 0.0;
        }
        let half = GUI_WIDTH / 2.0;
        let mut accel = 0.0;
        if contains(0.0, half, x, y) {
            accel = TOUCH_ACCEL;
        }
        if contains(half, half, x, y) {
            accel = -TOUCH_ACCEL;
        }
        accel
    }
}

/// Closed-interval containment for a full-height column of the GUI screen.
fn contains(left: f32, width: f32, x: f32, y: f32) -> bool {
    x >= left && x <= left + width && (0.0..=GUI_HEIGHT).contains(&y)
}
