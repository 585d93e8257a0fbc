use macroquad::camera::Camera3D;
use macroquad::math::{Vec2, Vec3};

pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 230.0;
const FOVY_DEGREES: f32 = 75.0;
/// Radians of orbit per pixel of drag
const ORBIT_SPEED: f32 = 0.005;
const MAX_PITCH: f32 = 1.5;
/// How quickly the target height catches up with the focused layer (1/s)
const FOLLOW_RATE: f32 = 4.0;
const HOME_POSITION: Vec3 = Vec3::new(46.0, 0.0, 46.0);

/// Orbit camera around the voxel stack.
///
/// The target's height eases toward the focused layer so the selected
/// generation stays in the middle of the view.
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl OrbitCamera {
    pub fn new() -> Self {
        let mut camera = Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            target: Vec3::ZERO,
        };
        camera.reset();
        camera
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.distance = (self.distance / factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Rotate by a pointer drag in pixels
    pub fn orbit(&mut self, drag: Vec2) {
        self.yaw += drag.x * ORBIT_SPEED;
        self.pitch = (self.pitch + drag.y * ORBIT_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Ease the target height toward `layer` over `delta_time` seconds
    pub fn follow(&mut self, layer: f32, delta_time: f32) {
        let t = 1.0 - (-FOLLOW_RATE * delta_time).exp();
        self.target.y += (layer - self.target.y) * t;
    }

    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
    }

    /// Camera for drawing the 3D scene
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            target: self.target,
            up: Vec3::Y,
            fovy: FOVY_DEGREES.to_radians(),
            ..Default::default()
        }
    }

    /// Reset camera to default
    pub fn reset(&mut self) {
        self.yaw = HOME_POSITION.z.atan2(HOME_POSITION.x);
        self.pitch = 0.0;
        self.distance = HOME_POSITION.length();
        self.target = Vec3::ZERO;
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_position() {
        let camera = OrbitCamera::new();
        assert!((camera.position() - HOME_POSITION).length() < 1e-3);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.zoom_in(1.1);
        }
        assert_eq!(camera.distance, MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom_out(1.1);
        }
        assert_eq!(camera.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new();
        camera.orbit(Vec2::new(0.0, 10_000.0));
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.orbit(Vec2::new(0.0, -20_000.0));
        assert_eq!(camera.pitch, -MAX_PITCH);
    }

    #[test]
    fn test_follow_converges_on_layer() {
        let mut camera = OrbitCamera::new();
        for _ in 0..300 {
            camera.follow(12.0, 1.0 / 60.0);
        }
        assert!((camera.target.y - 12.0).abs() < 0.01);
        // Distance to the target is unaffected
        assert!(((camera.position() - camera.target).length() - camera.distance).abs() < 1e-3);
    }
}
