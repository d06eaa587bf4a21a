//! Capability interface the simulation uses to look at the scene.
//!
//! Picking and depth sorting only ever need two things from whatever draws
//! the frame: where a world point lands on screen, and where the eye is.
//! Keeping the contract this narrow lets the game logic run headless in
//! tests with a stub implementation.

use glam::{Vec2, Vec3};

/// Screen-projection capability.
pub trait Renderer {
    /// Project a world-space point to canvas coordinates (origin top-left, Y down).
    /// Returns `None` when the point is at or behind the eye plane.
    fn project(&self, point: Vec3) -> Option<Vec2>;

    /// World-space position of the camera eye.
    fn camera_eye(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Orthographic stand-in: drops Z, eye far down +Z.
    struct FlatRenderer;

    impl Renderer for FlatRenderer {
        fn project(&self, point: Vec3) -> Option<Vec2> {
            Some(Vec2::new(point.x, point.y))
        }

        fn camera_eye(&self) -> Vec3 {
            Vec3::new(0.0, 0.0, 1000.0)
        }
    }

    #[test]
    fn trait_is_object_safe() {
        let r: &dyn Renderer = &FlatRenderer;
        assert_eq!(r.project(Vec3::new(1.0, 2.0, 3.0)), Some(Vec2::new(1.0, 2.0)));
        assert_eq!(r.camera_eye().z, 1000.0);
    }
}
