use glam::{vec3, Mat4, Vec3};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub position: Vec3,
    pub world_up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub zoom: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub constrain_pitch: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 5.0, 30.0),
            world_up: Vec3::Y,
            yaw: -90.0,
            pitch: -5.0,
            speed: 10.0,
            sensitivity: 0.1,
            zoom: 45.0,
            z_near: 0.1,
            z_far: 500.0,
            constrain_pitch: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Fly camera driven by yaw/pitch angles (degrees). The basis vectors are always
/// derived from the angles, never stored independently of them.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub zoom: f32,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    config: CameraConfig,
}

impl Default for Camera {
    fn default() -> Self { Self::new(CameraConfig::default()) }
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        let pitch = match config.constrain_pitch {
            true => config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            false => config.pitch,
        };
        let mut camera = Self {
            position: config.position,
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            yaw: config.yaw,
            pitch,
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            config,
        };
        camera.update_vectors();
        camera
    }

    pub fn yaw(&self) -> f32 { self.yaw }

    pub fn pitch(&self) -> f32 { self.pitch }

    pub fn front(&self) -> Vec3 { self.front }

    pub fn right(&self) -> Vec3 { self.right }

    pub fn up(&self) -> Vec3 { self.up }

    pub fn config(&self) -> &CameraConfig { &self.config }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.zoom.to_radians(),
            aspect_ratio,
            self.config.z_near,
            self.config.z_far,
        )
    }

    pub fn process_keyboard(&mut self, direction: Movement, delta_time: f32) {
        let velocity = self.config.speed * delta_time;
        let world_up = self.config.world_up;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
            Movement::Up => self.position += world_up * velocity,
            Movement::Down => self.position -= world_up * velocity,
        }
    }

    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.config.sensitivity;
        self.pitch += y_offset * self.config.sensitivity;

        if self.config.constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = vec3(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());

        self.front = front.normalize();
        self.right = self.front.cross(self.config.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, EPSILON), "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_orientation() {
        let camera = Camera::new(CameraConfig {
            pitch: 0.0,
            ..Default::default()
        });

        assert_vec_eq(camera.front(), Vec3::NEG_Z);
        assert_vec_eq(camera.right(), Vec3::X);
        assert_vec_eq(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_keyboard_moves_along_basis() {
        let mut camera = Camera::default();
        let speed = camera.config().speed;
        let dt = 0.016;
        let cases = [
            (Movement::Forward, camera.front()),
            (Movement::Backward, -camera.front()),
            (Movement::Left, -camera.right()),
            (Movement::Right, camera.right()),
            (Movement::Up, Vec3::Y),
            (Movement::Down, Vec3::NEG_Y),
        ];

        for (direction, axis) in cases {
            let start = camera.position;
            camera.process_keyboard(direction, dt);
            assert_vec_eq(camera.position - start, axis * speed * dt);
        }
    }

    #[test]
    fn test_keyboard_movement_commutes() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        let dt = 0.05;

        a.process_keyboard(Movement::Forward, dt);
        a.process_keyboard(Movement::Right, dt);
        a.process_keyboard(Movement::Up, dt);

        b.process_keyboard(Movement::Up, dt);
        b.process_keyboard(Movement::Right, dt);
        b.process_keyboard(Movement::Forward, dt);

        assert_vec_eq(a.position, b.position);
    }

    #[test]
    fn test_keyboard_does_not_rotate() {
        let mut camera = Camera::default();
        let front = camera.front();
        camera.process_keyboard(Movement::Left, 1.0);

        assert_eq!(camera.front(), front);
    }

    #[test]
    fn test_zero_mouse_movement_is_noop() {
        let mut camera = Camera::default();
        let before = camera.clone();
        camera.process_mouse_movement(0.0, 0.0);

        assert_eq!(camera.yaw(), before.yaw());
        assert_eq!(camera.pitch(), before.pitch());
        assert_eq!(camera.front(), before.front());
        assert_eq!(camera.right(), before.right());
        assert_eq!(camera.up(), before.up());
    }

    #[test]
    fn test_mouse_movement_scales_by_sensitivity() {
        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());
        camera.process_mouse_movement(10.0, -20.0);

        assert!((camera.yaw() - (yaw + 1.0)).abs() < EPSILON);
        assert!((camera.pitch() - (pitch - 2.0)).abs() < EPSILON);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(camera.pitch(), PITCH_LIMIT);

        camera.process_mouse_movement(0.0, -100_000.0);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
        assert!(camera.up().y > 0.0);
    }

    #[test]
    fn test_pitch_unconstrained() {
        let mut camera = Camera::new(CameraConfig {
            constrain_pitch: false,
            ..Default::default()
        });
        camera.process_mouse_movement(0.0, 1_000.0);

        assert!(camera.pitch() > PITCH_LIMIT);
    }

    #[test]
    fn test_scroll_clamps_zoom() {
        let mut camera = Camera::default();
        camera.process_mouse_scroll(10.0);
        assert_eq!(camera.zoom, 35.0);

        camera.process_mouse_scroll(100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);

        camera.process_mouse_scroll(-100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_scroll_leaves_orientation() {
        let mut camera = Camera::default();
        let (position, front) = (camera.position, camera.front());
        camera.process_mouse_scroll(3.0);

        assert_eq!(camera.position, position);
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn test_view_matrix_is_pure() {
        let mut camera = Camera::default();
        camera.process_mouse_movement(37.0, 12.0);
        camera.process_keyboard(Movement::Forward, 0.3);

        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn test_view_matrix_maps_position_to_origin() {
        let camera = Camera::default();
        let eye = camera.view_matrix().transform_point3(camera.position);
        let ahead = camera
            .view_matrix()
            .transform_point3(camera.position + camera.front());

        assert_vec_eq(eye, Vec3::ZERO);
        assert_vec_eq(ahead, Vec3::NEG_Z);
    }
}
