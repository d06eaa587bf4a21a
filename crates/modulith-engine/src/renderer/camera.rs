use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use super::traits::Renderer;

/// Perspective camera looking at a target point.
/// Produces view and projection matrices and projects world points to the canvas.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Canvas width in CSS pixels.
    pub viewport_width: f32,
    /// Canvas height in CSS pixels.
    pub viewport_height: f32,
}

impl Camera3D {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 900.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_3,
            near: 0.5,
            far: 10_000.0,
            viewport_width,
            viewport_height,
        }
    }

    /// Place the eye and look at `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        self.eye = eye;
        self.target = target;
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    pub fn aspect(&self) -> f32 {
        self.viewport_width / self.viewport_height.max(1.0)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Renderer for Camera3D {
    fn project(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        // Perspective divide to NDC, then map to canvas pixels (Y down)
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport_width,
            (1.0 - ndc.y) * 0.5 * self.viewport_height,
        ))
    }

    fn camera_eye(&self) -> Vec3 {
        self.eye
    }
}
