use crate::events::{HostEvent, Listener};
use crate::state::AppState;

/// World units the sphere moves per logical pixel of scroll.
pub const SCROLL_SCALE: f32 = 0.001;

/// Lifts the sphere as the page scrolls down.
///
/// The offset is absolute, so the resulting height depends only on the
/// latest scroll position.
#[derive(Default)]
pub struct ScrollHandler;

impl Listener for ScrollHandler {
    fn on_event(&mut self, event: &HostEvent, state: &mut AppState) {
        if let HostEvent::Scrolled { offset_y } = *event {
            state.scene.sphere.transform.position.y = offset_y * SCROLL_SCALE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::viewport::Viewport;

    fn scroll(state: &mut AppState, offset_y: f32) {
        ScrollHandler.on_event(&HostEvent::Scrolled { offset_y }, state);
    }

    #[test]
    fn scroll_is_absolute() {
        let config = AppConfig::default();
        let viewport = Viewport::new(800.0, 600.0, 1.0, 2.0);

        let mut direct = AppState::new(&config, viewport);
        scroll(&mut direct, 400.0);

        let mut wandering = AppState::new(&config, viewport);
        for offset in [100.0, 900.0, 0.0, 400.0] {
            scroll(&mut wandering, offset);
        }

        assert_eq!(
            direct.scene.sphere.transform.position.y,
            wandering.scene.sphere.transform.position.y
        );
        assert!((direct.scene.sphere.transform.position.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn scroll_leaves_other_fields_alone() {
        let mut state = AppState::new(&AppConfig::default(), Viewport::new(800.0, 600.0, 1.0, 2.0));
        state.scene.sphere.transform.position.z = -0.3;
        state.scene.sphere.transform.rotation.x = 0.2;

        scroll(&mut state, 120.0);

        assert_eq!(state.scene.sphere.transform.position.z, -0.3);
        assert_eq!(state.scene.sphere.transform.rotation.x, 0.2);
    }
}
