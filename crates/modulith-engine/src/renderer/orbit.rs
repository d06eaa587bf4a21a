//! Orbit-style camera controller.
//!
//! Drag rotates around the origin, the wheel and two-finger pinch zoom, and
//! the camera eases toward the requested spherical position every frame.
//! The controller owns only camera-local state: it never reads or writes
//! game state.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::camera::Camera3D;
use crate::extensions::easing::lerp_vec3;
use crate::input::queue::InputEvent;

/// Controller configuration. Every field has a default so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitConfig {
    pub start_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag.
    pub rotation_speed: f32,
    /// Distance units per wheel delta unit.
    pub zoom_speed: f32,
    /// Distance units per pixel of pinch change.
    pub pinch_zoom_speed: f32,
    /// Pixels the pinch distance must change before zooming starts.
    pub pinch_threshold: f32,
    /// Per-frame lerp factor toward the target eye position.
    pub damping: f32,
    pub allow_zoom_while_dragging: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            start_distance: 900.0,
            min_distance: 1.0,
            max_distance: 1200.0,
            rotation_speed: 0.005,
            zoom_speed: 0.5,
            pinch_zoom_speed: 2.0,
            pinch_threshold: 15.0,
            damping: 0.1,
            allow_zoom_while_dragging: false,
        }
    }
}

impl OrbitConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Converts pointer/wheel/pinch input into a smoothed spherical camera position.
#[derive(Debug, Clone)]
pub struct OrbitController {
    config: OrbitConfig,
    /// Elevation, clamped to [-PI/2, PI/2].
    angle_x: f32,
    /// Azimuth.
    angle_y: f32,
    target_distance: f32,
    dragging: bool,
    last_pointer: Option<Vec2>,
    pinch_active: bool,
    pinch_started: bool,
    last_pinch: f32,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        let target_distance = config
            .start_distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            config,
            angle_x: 0.0,
            angle_y: 0.0,
            target_distance,
            dragging: false,
            last_pointer: None,
            pinch_active: false,
            pinch_started: false,
            last_pinch: 0.0,
        }
    }

    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    fn clamp_distance(&mut self) {
        self.target_distance = self
            .target_distance
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Feed one input event (the wiring `attach` does for a DOM surface).
    /// Returns true if the event changed camera state.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::PointerDown { x, y } => {
                if self.pinch_active {
                    return false;
                }
                self.dragging = true;
                self.last_pointer = Some(Vec2::new(x, y));
                false
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Vec2::new(x, y);
                let moved = match (self.dragging, self.last_pointer) {
                    (true, Some(last)) if !self.pinch_active => {
                        let delta = pos - last;
                        self.angle_y += delta.x * self.config.rotation_speed;
                        self.angle_x -= delta.y * self.config.rotation_speed;
                        self.angle_x = self
                            .angle_x
                            .clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
                        delta != Vec2::ZERO
                    }
                    _ => false,
                };
                if self.dragging {
                    self.last_pointer = Some(pos);
                }
                moved
            }
            InputEvent::PointerUp { .. } => {
                self.dragging = false;
                self.last_pointer = None;
                false
            }
            InputEvent::Wheel { delta } => {
                if self.dragging && !self.config.allow_zoom_while_dragging {
                    return false;
                }
                self.target_distance += delta * self.config.zoom_speed;
                self.clamp_distance();
                true
            }
            InputEvent::Pinch { distance } => self.on_pinch(distance),
            InputEvent::PinchEnd => {
                self.pinch_active = false;
                self.pinch_started = false;
                false
            }
            _ => false,
        }
    }

    fn on_pinch(&mut self, distance: f32) -> bool {
        if !self.pinch_active {
            // Second finger landed: stop rotating, remember the baseline.
            self.pinch_active = true;
            self.pinch_started = false;
            self.dragging = false;
            self.last_pointer = None;
            self.last_pinch = distance;
            return false;
        }

        if !self.pinch_started {
            if (distance - self.last_pinch).abs() <= self.config.pinch_threshold {
                return false;
            }
            // Reset the baseline so zoom does not jump by the threshold.
            self.pinch_started = true;
            self.last_pinch = distance;
            return false;
        }

        let delta = self.last_pinch - distance;
        self.target_distance += delta * self.config.pinch_zoom_speed;
        self.clamp_distance();
        self.last_pinch = distance;
        true
    }

    /// Where the eye is heading given the current angles and distance.
    pub fn target_eye(&self) -> Vec3 {
        let r = self.target_distance;
        Vec3::new(
            r * self.angle_y.sin() * self.angle_x.cos(),
            r * self.angle_x.sin(),
            r * self.angle_y.cos() * self.angle_x.cos(),
        )
    }

    /// Ease the camera toward the target position and aim it at the origin.
    pub fn update_camera(&self, camera: &mut Camera3D) {
        let eye = lerp_vec3(camera.eye, self.target_eye(), self.config.damping);
        camera.look_at(eye, Vec3::ZERO);
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_configured_distance() {
        let orbit = OrbitController::default();
        assert_eq!(orbit.target_distance(), 900.0);
        let eye = orbit.target_eye();
        assert!((eye - Vec3::new(0.0, 0.0, 900.0)).length() < 1e-3);
    }

    #[test]
    fn wheel_zoom_is_clamped() {
        let mut orbit = OrbitController::default();
        orbit.handle_input(&InputEvent::Wheel { delta: 10_000.0 });
        assert_eq!(orbit.target_distance(), 1200.0);
        orbit.handle_input(&InputEvent::Wheel { delta: -10_000.0 });
        assert_eq!(orbit.target_distance(), 1.0);
    }

    #[test]
    fn wheel_ignored_while_dragging() {
        let mut orbit = OrbitController::default();
        orbit.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert!(!orbit.handle_input(&InputEvent::Wheel { delta: 100.0 }));
        assert_eq!(orbit.target_distance(), 900.0);
    }

    #[test]
    fn wheel_allowed_while_dragging_when_configured() {
        let mut orbit = OrbitController::new(OrbitConfig {
            allow_zoom_while_dragging: true,
            ..OrbitConfig::default()
        });
        orbit.handle_input(&InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert!(orbit.handle_input(&InputEvent::Wheel { delta: 100.0 }));
        assert_eq!(orbit.target_distance(), 950.0);
    }

    #[test]
    fn drag_rotates_and_clamps_elevation() {
        let mut orbit = OrbitController::default();
        orbit.handle_input(&InputEvent::PointerDown { x: 100.0, y: 100.0 });
        orbit.handle_input(&InputEvent::PointerMove { x: 200.0, y: 100.0 });
        assert!((orbit.angle_y - 0.5).abs() < 1e-5);

        orbit.handle_input(&InputEvent::PointerMove { x: 200.0, y: -100_000.0 });
        assert!((orbit.angle_x - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn hover_moves_do_not_rotate() {
        let mut orbit = OrbitController::default();
        assert!(!orbit.handle_input(&InputEvent::PointerMove { x: 50.0, y: 50.0 }));
        assert_eq!((orbit.angle_x, orbit.angle_y), (0.0, 0.0));
    }

    #[test]
    fn pinch_waits_for_threshold_then_zooms() {
        let mut orbit = OrbitController::default();
        orbit.handle_input(&InputEvent::Pinch { distance: 200.0 });
        orbit.handle_input(&InputEvent::Pinch { distance: 190.0 });
        assert_eq!(orbit.target_distance(), 900.0);

        // Crosses the threshold: baseline resets, no jump.
        orbit.handle_input(&InputEvent::Pinch { distance: 150.0 });
        assert_eq!(orbit.target_distance(), 900.0);

        // Fingers closing by 10px zooms out by 20 units.
        orbit.handle_input(&InputEvent::Pinch { distance: 140.0 });
        assert!((orbit.target_distance() - 920.0).abs() < 1e-4);

        orbit.handle_input(&InputEvent::PinchEnd);
        orbit.handle_input(&InputEvent::Pinch { distance: 10.0 });
        assert!((orbit.target_distance() - 920.0).abs() < 1e-4);
    }

    #[test]
    fn update_camera_eases_toward_target() {
        let mut orbit = OrbitController::default();
        orbit.handle_input(&InputEvent::Wheel { delta: -800.0 });
        assert_eq!(orbit.target_distance(), 500.0);
        let mut cam = Camera3D::new(800.0, 600.0);
        orbit.update_camera(&mut cam);
        assert!(cam.eye.z < 900.0 && cam.eye.z > 500.0, "z was {}", cam.eye.z);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn config_from_partial_json() {
        let config = OrbitConfig::from_json(r#"{ "startDistance": 400, "damping": 0.2 }"#).unwrap();
        assert_eq!(config.start_distance, 400.0);
        assert_eq!(config.damping, 0.2);
        assert_eq!(config.max_distance, 1200.0);
    }
}
