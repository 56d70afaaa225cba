use glam::{Mat4, Vec3};

/// A perspective camera with a cached projection matrix.
///
/// The projection is only rebuilt by [`update_projection_matrix`], so
/// changing `aspect` or `fov` has no visible effect until that is called.
/// The resize handler does both in one step.
///
/// [`update_projection_matrix`]: PerspectiveCamera::update_projection_matrix
#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: fov_degrees,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Sets the aspect ratio and rebuilds the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_stale_until_updated() {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let before = camera.projection_matrix();

        camera.aspect = 2.0;
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
    }

    #[test]
    fn set_aspect_matches_manual_update() {
        let mut a = PerspectiveCamera::default();
        let mut b = PerspectiveCamera::default();
        a.set_aspect(16.0 / 9.0);
        b.aspect = 16.0 / 9.0;
        b.update_projection_matrix();
        assert_eq!(a.projection_matrix(), b.projection_matrix());
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = PerspectiveCamera::default().at(0.0, 0.0, 2.0);
        let clip = camera.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
