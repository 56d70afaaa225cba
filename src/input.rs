use glam::Vec2;

use crate::events::{HostEvent, Listener};
use crate::state::AppState;

/// Scale applied to the pointer offset to get the aim target.
pub const AIM_SCALE: f32 = 0.001;

/// Where the sphere eases towards, derived fresh from the pointer offset
/// every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AimTarget {
    pub x: f32,
    pub y: f32,
}

impl AimTarget {
    pub fn from_offset(offset: Vec2) -> Self {
        Self {
            x: offset.x * AIM_SCALE,
            y: offset.y * AIM_SCALE,
        }
    }
}

/// Stores the pointer position relative to the viewport center.
///
/// Each move overwrites the previous offset; nothing is queued or clamped,
/// so positions outside the window give offsets beyond half the viewport.
#[derive(Default)]
pub struct PointerSampler;

impl Listener for PointerSampler {
    fn on_event(&mut self, event: &HostEvent, state: &mut AppState) {
        if let HostEvent::PointerMoved { x, y } = *event {
            state.pointer = Vec2::new(x, y) - state.viewport.center();
        }
    }
}
