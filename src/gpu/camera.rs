//! Orbit camera for the attractor view.

use glam::{Mat4, Vec3};

/// Vertical field of view in degrees.
const FOV_Y_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

const ROTATE_SPEED: f32 = 0.005;
const PITCH_LIMIT: f32 = 1.5;
const ZOOM_STEP: f32 = 0.1;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 500.0;

/// Orbit camera circling a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Camera on the +Z axis, 50 units out, looking at the origin.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 50.0,
            target: Vec3::ZERO,
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, NEAR, FAR)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Rotate around the target by a mouse drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * ROTATE_SPEED;
        self.pitch = (self.pitch + dy * ROTATE_SPEED).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Slide the target in the view plane by a mouse drag in pixels.
    ///
    /// Pan speed scales with distance so the drag feels the same at any zoom.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let forward = (self.target - self.position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        let visible_height = 2.0 * self.distance * (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        let units_per_pixel = visible_height / viewport_height.max(1.0);

        self.target += (-right * dx + up * dy) * units_per_pixel;
    }

    /// Move toward (positive `scroll`) or away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance * (1.0 - scroll * ZOOM_STEP)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
