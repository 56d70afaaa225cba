use glam::Vec2;

use crate::config::AppConfig;
use crate::scene::Scene;
use crate::viewport::Viewport;

/// All mutable demo state, owned by the application and lent to listeners
/// and the frame loop one at a time.
#[derive(Clone, Debug)]
pub struct AppState {
    pub viewport: Viewport,
    /// Pointer position minus viewport center, in logical pixels.
    pub pointer: Vec2,
    pub scene: Scene,
}

impl AppState {
    pub fn new(config: &AppConfig, viewport: Viewport) -> Self {
        Self {
            viewport,
            pointer: Vec2::ZERO,
            scene: Scene::new(config, viewport.aspect()),
        }
    }
}
