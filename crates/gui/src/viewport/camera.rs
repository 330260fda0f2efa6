use glam::{Mat4, Vec3, Vec4};

use super::picking::{Aabb, Ray};

/// Orbit camera for the vehicle showroom: circles the model, stays above
/// the floor and zooms within limits set when a model is framed.
#[derive(Clone, Copy, Debug)]
pub struct TurntableCamera {
    /// Angle around the vertical axis (radians), 0 looks along -Z
    pub yaw: f32,
    /// Elevation above the floor plane (radians)
    pub pitch: f32,
    pub distance: f32,
    /// Orbit center
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    zoom_range: (f32, f32),
}

const PITCH_RANGE: (f32, f32) = (-0.05, 1.45);

impl TurntableCamera {
    /// Front three-quarter view, the usual first look at a car
    pub fn new() -> Self {
        Self {
            yaw: -0.7,
            pitch: 0.3,
            distance: 6.0,
            target: Vec3::ZERO,
            fov: 40.0_f32.to_radians(),
            zoom_range: (0.5, 100.0),
        }
    }

    /// Orbit by a drag delta in degrees
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw = (self.yaw + dx.to_radians()) % std::f32::consts::TAU;
        self.pitch = (self.pitch + dy.to_radians()).clamp(PITCH_RANGE.0, PITCH_RANGE.1);
    }

    pub fn zoom(&mut self, delta: f32) {
        let (near, far) = self.zoom_range;
        self.distance = (self.distance * (1.0 - delta)).clamp(near, far);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.basis();
        self.target += right * dx + up * dy;
    }

    /// Center on the model and back off until it fits the view
    pub fn frame(&mut self, bounds: &Aabb) {
        if bounds.is_empty() {
            *self = Self::new();
            return;
        }
        let extent = bounds.max_dimension().max(0.1);
        let fit = extent / (self.fov * 0.5).tan();
        self.target = bounds.center();
        self.distance = fit;
        self.zoom_range = (fit * 0.25, fit * 4.0);
    }

    /// Idle turntable spin
    pub fn spin(&mut self, dt: f32) {
        self.rotate(dt * 17.0, 0.0);
    }

    pub fn eye_position(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Clip planes follow the orbit distance so small and large models
    /// both keep depth precision
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let near = (self.distance * 0.01).max(0.01);
        let far = self.distance * 20.0 + 10.0;
        Mat4::perspective_rh_gl(self.fov, aspect, near, far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Screen-aligned right and up vectors
    fn basis(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.eye_position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        (right, right.cross(forward).normalize_or_zero())
    }

    /// World point to screen position; None behind the camera
    pub fn project(&self, point: Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
        let clip = self.view_projection(rect.aspect_ratio()) * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(egui::pos2(
            rect.center().x + ndc.x * rect.width() * 0.5,
            rect.center().y - ndc.y * rect.height() * 0.5,
        ))
    }

    /// Ray from the eye through a screen position, for hover picking
    pub fn screen_ray(&self, screen_pos: egui::Pos2, rect: egui::Rect) -> Ray {
        let ndc_x = (screen_pos.x - rect.center().x) / (rect.width() * 0.5);
        let ndc_y = (rect.center().y - screen_pos.y) / (rect.height() * 0.5);

        let inverse = self.view_projection(rect.aspect_ratio()).inverse();
        let unproject = |z: f32| {
            let p = inverse * Vec4::new(ndc_x, ndc_y, z, 1.0);
            p.truncate() / p.w
        };
        let near = unproject(-1.0);
        let far = unproject(1.0);

        Ray {
            origin: self.eye_position(),
            direction: (far - near).normalize_or_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_center() {
        let camera = TurntableCamera::new();
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let p = camera.project(Vec3::ZERO, rect).unwrap();
        assert!((p - rect.center()).length() < 1e-3);
    }

    #[test]
    fn test_frame_centers_on_bounds() {
        let mut camera = TurntableCamera::new();
        let bounds = Aabb::from_points([Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 1.0)]);
        camera.frame(&bounds);
        assert_eq!(camera.target, Vec3::new(2.0, 1.0, 0.5));
        assert!(camera.distance > bounds.max_dimension());

        // Zoom stays within the framed range
        let framed = camera.distance;
        for _ in 0..100 {
            camera.zoom(0.5);
        }
        assert!((camera.distance - framed * 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_stays_above_floor() {
        let mut camera = TurntableCamera::new();
        camera.rotate(0.0, -180.0);
        assert!(camera.eye_position().y > camera.target.y - camera.distance * 0.06);
        camera.rotate(0.0, 360.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_center_ray_hits_target() {
        let camera = TurntableCamera::new();
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(640.0, 480.0));
        let ray = camera.screen_ray(rect.center(), rect);
        let to_target = (camera.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.999);
    }
}
