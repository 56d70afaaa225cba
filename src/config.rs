use std::path::PathBuf;

/// Configuration for the window and renderer.
///
/// # Example
/// ```
/// use sphere_glow::AppConfig;
///
/// let config = AppConfig::new()
///     .title("Glow")
///     .size(1280, 720)
///     .normal_map("textures/normalMap.png")
///     .max_pixel_ratio(2.0);
/// assert_eq!(config.width, 1280);
/// ```
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Image used as the sphere's normal map; `None` shades with flat normals.
    pub normal_map: Option<PathBuf>,
    /// Upper bound applied to the window's scale factor when sizing the
    /// render buffer.
    pub max_pixel_ratio: f32,
    /// Largest virtual scroll offset in logical pixels.
    pub max_scroll: f32,
    pub vsync: bool,
    pub debug_panel: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sphere Glow".to_string(),
            width: 1280,
            height: 800,
            normal_map: Some(PathBuf::from("textures/normalMap.png")),
            max_pixel_ratio: 2.0,
            max_scroll: 1000.0,
            vsync: true,
            debug_panel: true,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn normal_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.normal_map = Some(path.into());
        self
    }

    pub fn max_pixel_ratio(mut self, ratio: f32) -> Self {
        self.max_pixel_ratio = ratio.max(f32::MIN_POSITIVE);
        self
    }

    pub fn max_scroll(mut self, offset: f32) -> Self {
        self.max_scroll = offset.max(0.0);
        self
    }

    pub fn vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    pub fn debug_panel(mut self, visible: bool) -> Self {
        self.debug_panel = visible;
        self
    }
}
