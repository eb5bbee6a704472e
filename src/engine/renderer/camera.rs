// Perspective camera for 3D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Vertical field of view of the game camera, in degrees
pub const DEFAULT_FOV_Y_DEGREES: f32 = 75.0;
/// Near clip plane
pub const DEFAULT_NEAR: f32 = 0.1;
/// Far clip plane
pub const DEFAULT_FAR: f32 = 1000.0;

/// 3D perspective camera looking at a target point
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    position: Vec3,
    /// Point the camera looks at
    target: Vec3,
    /// Vertical field of view in degrees
    fov_y_degrees: f32,
    /// Viewport width / height
    aspect: f32,
    near: f32,
    far: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera for a viewport of the given size
    pub fn new(position: Vec3, target: Vec3, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            target,
            fov_y_degrees: DEFAULT_FOV_Y_DEGREES,
            aspect: 1.0,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            view_proj: Mat4::IDENTITY,
        };
        camera.resize(viewport_width, viewport_height);
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        self.view_proj = self.projection_matrix() * self.view_matrix();
    }

    /// Set camera position, keeping the current target
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_proj();
    }

    /// Point the camera at `target`
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_view_proj();
    }

    /// Resize the viewport, recomputing the aspect ratio and projection
    ///
    /// A zero height (minimized window) keeps the previous aspect.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
        self.update_view_proj();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fov_y_degrees(&self) -> f32 {
        self.fov_y_degrees
    }

    /// World-to-view matrix (right handed, +Y up)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// View-to-clip matrix (wgpu depth range 0..1)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
            eye: camera.position().extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn game_camera() -> Camera {
        Camera::new(
            Vec3::new(0.0, 8.0, -15.0),
            Vec3::new(0.0, 0.0, 20.0),
            800.0,
            600.0,
        )
    }

    #[test]
    fn test_aspect_from_viewport() {
        let camera = game_camera();
        assert_relative_eq!(camera.aspect(), 800.0 / 600.0);
        assert_eq!(camera.fov_y_degrees(), 75.0);
    }

    #[test]
    fn test_resize_updates_aspect_and_projection() {
        let mut camera = game_camera();
        let before = camera.view_proj_matrix();

        // 4:3 to 16:9 widens the view
        camera.resize(1280.0, 720.0);

        assert_relative_eq!(camera.aspect(), 1280.0 / 720.0);
        assert_ne!(camera.view_proj_matrix(), before);
        assert_eq!(
            camera.view_proj_matrix(),
            camera.projection_matrix() * camera.view_matrix()
        );

        // Same aspect, different size: the projection does not change
        let widescreen = camera.view_proj_matrix();
        camera.resize(1920.0, 1080.0);
        assert_relative_eq!(camera.aspect(), 16.0 / 9.0);
        assert!(camera.view_proj_matrix().abs_diff_eq(widescreen, 1e-6));
    }

    #[test]
    fn test_zero_height_resize_keeps_aspect() {
        let mut camera = game_camera();
        camera.resize(800.0, 0.0);
        assert_relative_eq!(camera.aspect(), 800.0 / 600.0);
        assert!(camera.view_proj_matrix().is_finite());
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = game_camera();
        let clip = camera.view_proj_matrix() * camera.target().extend(1.0);
        let ndc = clip.truncate() / clip.w;

        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_uniform_carries_eye() {
        let camera = game_camera();
        let uniform = CameraUniform::new(&camera);
        assert_eq!(uniform.eye, [0.0, 8.0, -15.0, 1.0]);
    }
}
