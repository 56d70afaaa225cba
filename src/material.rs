use std::path::PathBuf;

use glam::Vec2;

use crate::color::Color;

/// Metallic-roughness surface description.
///
/// `normal_map` names the image to perturb normals with. The renderer loads
/// it in the background and shades with flat normals until it arrives, or for
/// good if it fails to load.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub normal_scale: Vec2,
    pub normal_map: Option<PathBuf>,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            normal_scale: Vec2::ONE,
            normal_map: None,
        }
    }
}

impl StandardMaterial {
    /// Dark polished metal used for the sphere.
    pub fn sphere(normal_map: Option<PathBuf>) -> Self {
        Self {
            color: Color::from_hex(0x292929),
            metalness: 0.7,
            roughness: 0.2,
            normal_map,
            ..Default::default()
        }
    }
}
