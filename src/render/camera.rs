use glam::{Mat4, Vec3};
use std::f32::consts::PI;

/// Default perspective view of a `width × height` canvas: the z = 0 plane
/// exactly fills the frame, with y pointing down the screen.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye_distance: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let fov_y = PI / 3.0;
        let eye_distance = (height as f32 / 2.0) / (fov_y / 2.0).tan();
        Self {
            eye_distance,
            fov_y,
            aspect: width as f32 / height.max(1) as f32,
            near: eye_distance / 10.0,
            far: eye_distance * 10.0,
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let eye = Vec3::new(0.0, 0.0, self.eye_distance);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        // Canvas y grows downward
        let flip_y = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));
        proj * view * flip_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ndc(camera: &Camera, p: Vec3) -> Vec3 {
        camera.view_proj().project_point3(p)
    }

    #[test]
    fn canvas_plane_fills_the_frame() {
        let camera = Camera::for_canvas(800, 500);
        let center = ndc(&camera, Vec3::ZERO);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);

        let right = ndc(&camera, Vec3::new(400.0, 0.0, 0.0));
        assert!((right.x - 1.0).abs() < 1e-4);

        // Positive y is the bottom edge
        let bottom = ndc(&camera, Vec3::new(0.0, 250.0, 0.0));
        assert!((bottom.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn nearer_points_have_smaller_depth() {
        let camera = Camera::for_canvas(500, 500);
        let near = ndc(&camera, Vec3::new(0.0, 0.0, 300.0));
        let far = ndc(&camera, Vec3::new(0.0, 0.0, -300.0));
        assert!(near.z < far.z);
        assert!((0.0..=1.0).contains(&near.z) && (0.0..=1.0).contains(&far.z));
    }

    #[test]
    fn default_canvas_eye_distance() {
        let camera = Camera::for_canvas(500, 500);
        assert!((camera.eye_distance - 433.0127).abs() < 1e-2);
    }
}
