use glam::Vec2;

use crate::events::{HostEvent, Listener};
use crate::state::AppState;

/// Clamps a device pixel ratio to `max`.
pub fn clamp_pixel_ratio(device_pixel_ratio: f32, max: f32) -> f32 {
    device_pixel_ratio.min(max)
}

/// The visible area in logical pixels and the pixel ratio used to size the
/// render buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// `min(device pixel ratio, max_pixel_ratio)`.
    pub pixel_ratio: f32,
    pub max_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, max_pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio, max_pixel_ratio),
            max_pixel_ratio,
        }
    }

    /// Applies a new size. Zero or negative sizes are ignored and return
    /// `false`; the previous state is kept.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        if width <= 0.0 || height <= 0.0 {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixel_ratio = clamp_pixel_ratio(device_pixel_ratio, self.max_pixel_ratio);
        true
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Render buffer size in physical pixels.
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: f32| ((v * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

/// Keeps the viewport and camera projection in step with the window.
///
/// The renderer reads [`Viewport::buffer_size`] every frame and reallocates
/// its targets only when that changes, so repeated identical resizes are
/// no-ops end to end.
#[derive(Default)]
pub struct ResizeHandler;

impl Listener for ResizeHandler {
    fn on_event(&mut self, event: &HostEvent, state: &mut AppState) {
        let HostEvent::Resized {
            width,
            height,
            device_pixel_ratio,
        } = *event
        else {
            return;
        };

        if state.viewport.resize(width, height, device_pixel_ratio) {
            state.scene.camera.set_aspect(state.viewport.aspect());
            log::debug!(
                "Viewport {}x{} @ {} -> buffer {:?}",
                width,
                height,
                state.viewport.pixel_ratio,
                state.viewport.buffer_size()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), Viewport::new(800.0, 600.0, 1.0, 2.0))
    }

    fn resized(width: f32, height: f32, device_pixel_ratio: f32) -> HostEvent {
        HostEvent::Resized {
            width,
            height,
            device_pixel_ratio,
        }
    }

    #[test]
    fn pixel_ratio_never_exceeds_two() {
        assert_eq!(clamp_pixel_ratio(1.0, 2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(1.5, 2.0), 1.5);
        assert_eq!(clamp_pixel_ratio(2.0, 2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(3.0, 2.0), 2.0);
        assert_eq!(clamp_pixel_ratio(4.5, 2.0), 2.0);
    }

    #[test]
    fn buffer_size_uses_clamped_ratio() {
        let viewport = Viewport::new(800.0, 600.0, 3.0, 2.0);
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.buffer_size(), (1600, 1200));
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut state = state();
        ResizeHandler.on_event(&resized(1920.0, 1080.0, 1.0), &mut state);

        assert_eq!(state.viewport.width, 1920.0);
        assert_eq!(state.viewport.height, 1080.0);
        assert_eq!(state.scene.camera.aspect, 1920.0 / 1080.0);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut once = state();
        ResizeHandler.on_event(&resized(1024.0, 768.0, 2.5), &mut once);

        let mut twice = state();
        ResizeHandler.on_event(&resized(1024.0, 768.0, 2.5), &mut twice);
        ResizeHandler.on_event(&resized(1024.0, 768.0, 2.5), &mut twice);

        assert_eq!(once.viewport, twice.viewport);
        assert_eq!(once.viewport.buffer_size(), twice.viewport.buffer_size());
        assert_eq!(
            once.scene.camera.projection_matrix(),
            twice.scene.camera.projection_matrix()
        );
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut state = state();
        let before = state.viewport;
        ResizeHandler.on_event(&resized(0.0, 600.0, 1.0), &mut state);
        assert_eq!(state.viewport, before);
        assert_eq!(state.scene.camera.aspect, 800.0 / 600.0);
    }
}
