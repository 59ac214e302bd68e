//! Free camera with a yaw/pitch orientation and screen-to-world ray support.

use bauwerk_geom::{Ray, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,   // degrees
    pub pitch: f32, // degrees
    pub fov_y: f32, // degrees, vertical
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: -45.0,
            pitch: -15.0,
            fov_y: 70.0,
        }
    }

    /// Points the camera. Pitch is clamped short of straight up/down so the
    /// basis vectors stay well defined.
    pub fn set_look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-89.9, 89.9);
    }

    pub fn forward(&self) -> Vec3 {
        let yaw_rad = self.yaw.to_radians();
        let pitch_rad = self.pitch.to_radians();
        Vec3::new(
            yaw_rad.cos() * pitch_rad.cos(),
            pitch_rad.sin(),
            yaw_rad.sin() * pitch_rad.cos(),
        )
        .normalized()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::UP).normalized()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalized()
    }

    /// Unprojects a screen pixel into a world-space ray through the camera.
    /// Screen origin is the top-left corner, y grows downward.
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (2.0 * screen_x) / width - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y) / height;
        let tan_half = (self.fov_y.to_radians() * 0.5).tan();
        let aspect = width / height;
        let dir = self.forward()
            + self.right() * (ndc_x * tan_half * aspect)
            + self.up() * (ndc_y * tan_half);
        Ray::new(self.position, dir.normalized())
    }
}
