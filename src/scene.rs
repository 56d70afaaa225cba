//! The objects drawn each frame: one sphere, three lights, one camera.

use crate::camera::PerspectiveCamera;
use crate::config::AppConfig;
use crate::input::AimTarget;
use crate::light::{MAX_LIGHTS, PointLight, sphere_lights};
use crate::material::StandardMaterial;
use crate::mesh::{SphereGeometry, Transform};

/// Radians per second of baseline spin around Y.
pub const SPIN_SPEED: f32 = 0.5;
/// Fraction of the remaining yaw error closed each frame.
pub const YAW_EASE: f32 = 0.5;
/// Fraction of the remaining pitch error closed each frame.
pub const PITCH_EASE: f32 = 0.05;
/// Depth drift per unit of remaining pitch error.
pub const DEPTH_EASE: f32 = -0.05;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub geometry: SphereGeometry,
    pub material: StandardMaterial,
    pub transform: Transform,
}

impl Sphere {
    /// Advances the sphere one frame towards `aim`.
    ///
    /// Yaw is reset to the clock-driven spin before easing, so it never
    /// accumulates. The depth step reads pitch after it has been eased this
    /// frame; the order of these four statements is load-bearing.
    pub fn follow(&mut self, aim: AimTarget, elapsed: f32) {
        let rotation = &mut self.transform.rotation;
        let position = &mut self.transform.position;

        rotation.y = SPIN_SPEED * elapsed;
        rotation.y += YAW_EASE * (aim.x - rotation.y);
        rotation.x += PITCH_EASE * (aim.y - rotation.x);
        position.z += DEPTH_EASE * (aim.y - rotation.x);
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub sphere: Sphere,
    pub lights: [PointLight; MAX_LIGHTS],
    pub camera: PerspectiveCamera,
}

impl Scene {
    pub fn new(config: &AppConfig, aspect: f32) -> Self {
        Self {
            sphere: Sphere {
                geometry: SphereGeometry::new(0.5, 64, 64),
                material: StandardMaterial::sphere(config.normal_map.clone()),
                transform: Transform::new(),
            },
            lights: sphere_lights(),
            camera: PerspectiveCamera::new(75.0, aspect, 0.1, 100.0).at(0.0, 0.0, 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn scene() -> Scene {
        Scene::new(&AppConfig::default(), 1.5)
    }

    #[test]
    fn sphere_starts_at_rest() {
        let scene = scene();
        assert_eq!(scene.sphere.transform, Transform::new());
        assert_eq!(scene.sphere.material.metalness, 0.7);
        assert_eq!(scene.sphere.material.roughness, 0.2);
        assert_eq!(scene.sphere.material.color.to_hex(), 0x292929);
        assert_eq!(scene.sphere.geometry.vertex_count(), 65 * 65);
    }

    #[test]
    fn camera_matches_configuration() {
        let camera = scene().camera;
        assert_eq!(camera.fov, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 100.0);
        assert_eq!(camera.aspect, 1.5);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn worked_example_at_two_seconds() {
        let mut sphere = scene().sphere;
        sphere.follow(AimTarget::default(), 2.0);

        let t = sphere.transform;
        assert!((t.rotation.y - 0.5).abs() < 1e-6);
        assert_eq!(t.rotation.x, 0.0);
        assert_eq!(t.position.z, 0.0);
    }

    #[test]
    fn yaw_does_not_accumulate() {
        let mut sphere = scene().sphere;
        for _ in 0..10 {
            sphere.follow(AimTarget { x: 0.2, y: 0.0 }, 1.0);
        }
        // 0.5 * 1.0 eased halfway to 0.2, every time.
        assert!((sphere.transform.rotation.y - 0.35).abs() < 1e-6);
    }

    #[test]
    fn depth_uses_freshly_eased_pitch() {
        let mut sphere = scene().sphere;
        sphere.follow(AimTarget { x: 0.0, y: 1.0 }, 0.0);

        let pitch = 0.05;
        assert!((sphere.transform.rotation.x - pitch).abs() < 1e-6);
        // -0.05 * (1.0 - 0.05), not -0.05 * (1.0 - 0.0).
        assert!((sphere.transform.position.z - (-0.05 * (1.0 - pitch))).abs() < 1e-6);
    }

    #[test]
    fn pitch_converges_and_depth_keeps_drifting() {
        let mut sphere = scene().sphere;
        let aim = AimTarget { x: 0.0, y: 0.4 };
        for _ in 0..500 {
            sphere.follow(aim, 0.0);
        }
        assert!((sphere.transform.rotation.x - 0.4).abs() < 1e-4);
        assert!(sphere.transform.position.z < 0.0);
    }

    #[test]
    fn follow_leaves_scroll_height_alone() {
        let mut sphere = scene().sphere;
        sphere.transform.position.y = 0.3;
        sphere.follow(AimTarget { x: 0.1, y: -0.1 }, 3.0);
        assert_eq!(sphere.transform.position.y, 0.3);
    }
}
