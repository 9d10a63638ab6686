use {
    glam::Vec2,
    mipview_core::{constants::LOD_BIAS_STEP, Input, Key, KeyState},
    mipview_gfx::RenderSettings,
    mipview_scene::{Camera, Movement},
};

const MOVEMENT_KEYS: [(Key, Movement); 6] = [
    (Key::KeyW, Movement::Forward),
    (Key::KeyS, Movement::Backward),
    (Key::KeyA, Movement::Left),
    (Key::KeyD, Movement::Right),
    (Key::Space, Movement::Up),
    (Key::ShiftLeft, Movement::Down),
];

/// Requests from input handling that only the app can carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Grab and hide the cursor (true) or release it (false).
    SetCameraControl(bool),
}

/// Mouse-look and control-mode state. The camera and settings are borrowed per
/// call.
#[derive(Debug, Clone, PartialEq)]
pub struct InputContext {
    camera_control: bool,
    first_mouse: bool,
    last_cursor: Vec2,
}

impl InputContext {
    pub fn new(cursor: Vec2) -> Self {
        Self {
            camera_control: false,
            first_mouse: true,
            last_cursor: cursor,
        }
    }

    pub fn camera_control(&self) -> bool { self.camera_control }

    /// Dispatches the previous frame's input. Returns the actions raised, in
    /// event order.
    pub fn update(
        &mut self,
        input: &Input,
        camera: &mut Camera,
        settings: &mut RenderSettings,
        delta_time: f32,
    ) -> Vec<Action> {
        let actions = input
            .key_events()
            .iter()
            .filter_map(|(key, state)| self.handle_key(*key, *state, settings))
            .collect();

        if input.mouse_delta().is_some() {
            self.handle_cursor(input.cursor_position(), camera);
        }
        if let Some(scroll) = input.mouse_scroll_delta() {
            camera.process_mouse_scroll(scroll.y);
        }
        self.apply_movement(|key| input.key_held(key), camera, delta_time);

        actions
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        state: KeyState,
        settings: &mut RenderSettings,
    ) -> Option<Action> {
        match (key, state) {
            (Key::Escape, KeyState::Down) => Some(Action::Quit),
            (Key::Tab, KeyState::Down) => {
                self.camera_control = !self.camera_control;
                self.first_mouse = true;
                log::debug!("Camera control: {}", self.camera_control);
                Some(Action::SetCameraControl(self.camera_control))
            }
            (Key::F1, KeyState::Down) => {
                settings.toggle_ui();
                None
            }
            (Key::ArrowLeft, KeyState::Down | KeyState::Repeat) => {
                settings.adjust_lod_bias(-LOD_BIAS_STEP);
                None
            }
            (Key::ArrowRight, KeyState::Down | KeyState::Repeat) => {
                settings.adjust_lod_bias(LOD_BIAS_STEP);
                None
            }
            _ => None,
        }
    }

    /// Turns an absolute cursor position into a look offset. The first position
    /// after enabling camera control only sets the baseline.
    pub fn handle_cursor(&mut self, position: Vec2, camera: &mut Camera) {
        if !self.camera_control {
            return;
        }

        if self.first_mouse {
            self.last_cursor = position;
            self.first_mouse = false;
        }

        // Screen y grows downwards.
        let x_offset = position.x - self.last_cursor.x;
        let y_offset = self.last_cursor.y - position.y;
        self.last_cursor = position;

        camera.process_mouse_movement(x_offset, y_offset);
    }

    /// Moves the camera for every held movement key.
    pub fn apply_movement(
        &self,
        held: impl Fn(&Key) -> bool,
        camera: &mut Camera,
        delta_time: f32,
    ) {
        if !self.camera_control {
            return;
        }

        MOVEMENT_KEYS
            .iter()
            .filter(|(key, _)| held(key))
            .for_each(|(_, movement)| camera.process_keyboard(*movement, delta_time));
    }
}

#[cfg(test)]
mod tests {
    use {super::*, glam::vec2};

    fn enabled() -> InputContext {
        let mut context = InputContext::new(vec2(960.0, 540.0));
        context.handle_key(Key::Tab, KeyState::Down, &mut RenderSettings::default());
        context
    }

    #[test]
    fn test_cursor_ignored_without_camera_control() {
        let mut context = InputContext::new(vec2(960.0, 540.0));
        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        context.handle_cursor(vec2(1000.0, 500.0), &mut camera);
        context.handle_cursor(vec2(1100.0, 400.0), &mut camera);

        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);
    }

    #[test]
    fn test_first_move_sets_baseline() {
        let mut context = enabled();
        let mut camera = Camera::default();
        let (yaw, pitch) = (camera.yaw(), camera.pitch());

        context.handle_cursor(vec2(100.0, 100.0), &mut camera);
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);

        context.handle_cursor(vec2(110.0, 90.0), &mut camera);
        assert!((camera.yaw() - (yaw + 1.0)).abs() < 1e-5);
        assert!((camera.pitch() - (pitch + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_tab_toggles_and_resets_first_mouse() {
        let mut settings = RenderSettings::default();
        let mut context = InputContext::new(Vec2::ZERO);
        let mut camera = Camera::default();

        let action = context.handle_key(Key::Tab, KeyState::Down, &mut settings);
        assert_eq!(action, Some(Action::SetCameraControl(true)));
        context.handle_cursor(vec2(10.0, 10.0), &mut camera);
        assert_eq!(context.first_mouse, false);

        let action = context.handle_key(Key::Tab, KeyState::Down, &mut settings);
        assert_eq!(action, Some(Action::SetCameraControl(false)));
        assert_eq!(context.camera_control(), false);
        assert_eq!(context.first_mouse, true);

        assert_eq!(context.handle_key(Key::Tab, KeyState::Repeat, &mut settings), None);
        assert_eq!(context.handle_key(Key::Tab, KeyState::Up, &mut settings), None);
        assert_eq!(context.camera_control(), false);
    }

    #[test]
    fn test_escape_quits() {
        let mut context = InputContext::new(Vec2::ZERO);
        let action = context.handle_key(Key::Escape, KeyState::Down, &mut RenderSettings::default());
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_lod_arrows_clamp() {
        let mut settings = RenderSettings::default();
        let mut context = InputContext::new(Vec2::ZERO);

        for _ in 0..50 {
            context.handle_key(Key::ArrowRight, KeyState::Repeat, &mut settings);
        }
        assert_eq!(settings.lod_bias, 3.0);

        for _ in 0..100 {
            context.handle_key(Key::ArrowLeft, KeyState::Down, &mut settings);
        }
        assert_eq!(settings.lod_bias, -3.0);

        context.handle_key(Key::ArrowRight, KeyState::Up, &mut settings);
        assert_eq!(settings.lod_bias, -3.0);
    }

    #[test]
    fn test_f1_toggles_ui() {
        let mut settings = RenderSettings::default();
        let mut context = InputContext::new(Vec2::ZERO);

        context.handle_key(Key::F1, KeyState::Down, &mut settings);
        assert_eq!(settings.show_ui, false);
        context.handle_key(Key::F1, KeyState::Down, &mut settings);
        assert_eq!(settings.show_ui, true);
    }

    #[test]
    fn test_pitch_clamped_under_large_moves() {
        let mut context = enabled();
        let mut camera = Camera::default();

        context.handle_cursor(Vec2::ZERO, &mut camera);
        context.handle_cursor(vec2(0.0, -100_000.0), &mut camera);
        assert_eq!(camera.pitch(), 89.0);

        context.handle_cursor(vec2(0.0, 100_000.0), &mut camera);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn test_movement_requires_camera_control() {
        let held = |key: &Key| *key == Key::KeyW;
        let mut camera = Camera::default();
        let start = camera.position;

        InputContext::new(Vec2::ZERO).apply_movement(held, &mut camera, 1.0);
        assert_eq!(camera.position, start);

        enabled().apply_movement(held, &mut camera, 1.0);
        assert!(camera.position.distance(start + camera.front() * 10.0) < 1e-4);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let held = |key: &Key| matches!(key, Key::KeyA | Key::KeyD | Key::Space);
        let mut camera = Camera::default();
        let start = camera.position;

        enabled().apply_movement(held, &mut camera, 0.5);
        assert!(camera.position.distance(start + glam::Vec3::Y * 5.0) < 1e-4);
    }

    #[test]
    fn test_update_scrolls_without_camera_control() {
        let mut input = Input::default();
        input.handle_window_event(&winit::event::WindowEvent::MouseWheel {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            delta: winit::event::MouseScrollDelta::LineDelta(0.0, 5.0),
            phase: winit::event::TouchPhase::Moved,
        });
        input.next_frame();

        let mut camera = Camera::default();
        let mut settings = RenderSettings::default();
        let actions = InputContext::new(Vec2::ZERO).update(&input, &mut camera, &mut settings, 0.0);

        assert_eq!(actions.is_empty(), true);
        assert_eq!(camera.zoom, 40.0);
    }
}
