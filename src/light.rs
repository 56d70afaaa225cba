use glam::Vec3;

use crate::color::Color;

/// Number of point lights the shading pass accepts.
pub const MAX_LIGHTS: usize = 3;

/// A light that emits equally in all directions from `position`.
///
/// `distance == 0.0` means unlimited range. With a positive `distance`,
/// influence falls to zero at that range, shaped by `decay`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            color,
            intensity,
            distance: 0.0,
            decay: 1.0,
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }
}

/// The three lights around the sphere: a dim white key, a strong red rim
/// behind-left and a cyan contrast light below-right.
pub fn sphere_lights() -> [PointLight; MAX_LIGHTS] {
    let white = PointLight::new(Color::from_hex(0xffffff), 0.1).at(2.0, 3.0, 4.0);

    let mut red = PointLight::new(Color::from_hex(0xff0000), 2.0).at(-1.86, 1.0, -1.65);
    red.intensity = 10.0;

    let mut contrast = PointLight::new(Color::from_hex(0xe1ff), 2.0).at(2.13, -3.0, -1.98);
    contrast.intensity = 6.8;

    [white, red, contrast]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_light_literals() {
        let [white, red, contrast] = sphere_lights();

        assert_eq!(white.color.to_hex(), 0xffffff);
        assert_eq!(white.intensity, 0.1);
        assert_eq!(white.position, Vec3::new(2.0, 3.0, 4.0));

        assert_eq!(red.color.to_hex(), 0xff0000);
        assert_eq!(red.intensity, 10.0);
        assert_eq!(red.position, Vec3::new(-1.86, 1.0, -1.65));

        assert_eq!(contrast.color.to_hex(), 0x00e1ff);
        assert_eq!(contrast.intensity, 6.8);
        assert_eq!(contrast.position, Vec3::new(2.13, -3.0, -1.98));
    }

    #[test]
    fn lights_have_unlimited_range() {
        for light in sphere_lights() {
            assert_eq!(light.distance, 0.0);
            assert_eq!(light.decay, 1.0);
        }
    }
}
