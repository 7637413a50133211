//! Camera location/direction and the keyboard + pointer movement policy.
//!
//! # Coordinate System
//!
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into screen)
//!
//! # Orientation
//!
//! The camera stores a facing direction. It converts to and from pitch/yaw
//! angles for the movement policy, and yields auxiliary rotation and view
//! matrices. The render pipeline itself only translates by the camera
//! location; the direction is not applied to vertices.

use crate::input::{InputState, Key};
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Pitch (rotation about X) and yaw (rotation about Y), in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    pub pitch: f32,
    pub yaw: f32,
}

/// Viewer position and facing direction (expected normalized).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub location: Vec3,
    pub direction: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::FORWARD)
    }
}

impl Camera {
    pub fn new(location: Vec3, direction: Vec3) -> Self {
        Self {
            location,
            direction,
        }
    }

    /// Derives pitch/yaw from the direction vector.
    ///
    /// Yaw is measured from +Z towards +X, pitch from the horizontal plane
    /// towards +Y.
    pub fn to_angle(&self) -> Angles {
        let d = self.direction;
        let horizontal_len = (d.x * d.x + d.z * d.z).sqrt();
        Angles {
            pitch: d.y.atan2(horizontal_len),
            yaw: d.x.atan2(d.z),
        }
    }

    /// Unit direction for the given angles; inverse of [`Camera::to_angle`].
    pub fn from_angle(angles: Angles) -> Vec3 {
        let (sin_p, cos_p) = angles.pitch.sin_cos();
        let (sin_y, cos_y) = angles.yaw.sin_cos();
        Vec3::new(cos_p * sin_y, sin_p, cos_p * cos_y)
    }

    /// Rotation that turns +Z into the camera's direction.
    ///
    /// Not applied by the render pipeline.
    pub fn rotation_matrix(&self) -> Mat4 {
        let Angles { pitch, yaw } = self.to_angle();
        // rotation_x maps +z towards -y, so pitch goes in negated.
        Mat4::rotation_x(-pitch).then(&Mat4::rotation_y(yaw))
    }

    /// World-to-camera transform built from location, direction and world up.
    ///
    /// Not applied by the render pipeline.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_inverse(self.location, self.location + self.direction, Vec3::UP)
    }
}

/// Configuration and input handling for camera movement.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Pointer sensitivity in radians per pixel.
    pub look_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            look_sensitivity: 0.002,
        }
    }
}

impl CameraController {
    /// Creates a new camera controller with the given speed and sensitivity.
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
        }
    }

    /// Updates the camera based on input state.
    ///
    /// # Input Mapping
    /// - W/S: Move along +Z/-Z
    /// - A/D: Move along -X/+X
    /// - Space/Shift: Move up/down
    /// - Pointer: Turn the facing direction (pitch clamped to ±89°)
    pub fn update(&self, camera: &mut Camera, input: &InputState, delta_time: f32) {
        let step = self.move_speed * delta_time;
        let axes = [
            (Key::W, Vec3::FORWARD),
            (Key::S, -Vec3::FORWARD),
            (Key::D, Vec3::RIGHT),
            (Key::A, -Vec3::RIGHT),
            (Key::Space, Vec3::UP),
            (Key::Shift, -Vec3::UP),
        ];
        for (key, axis) in axes {
            if input.is_pressed(key) {
                camera.location = camera.location + axis * step;
            }
        }

        let (dx, dy) = input.pointer_delta();
        if dx != 0.0 || dy != 0.0 {
            let angles = camera.to_angle();
            camera.direction = Camera::from_angle(Angles {
                pitch: (angles.pitch - dy * self.look_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT),
                yaw: angles.yaw + dx * self.look_sensitivity,
            });
        }
    }
}
