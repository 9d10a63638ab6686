use {
    glam::{vec2, Vec2},
    std::collections::HashSet,
    winit::{
        event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
        keyboard::{KeyCode, PhysicalKey},
    },
};

// Scroll deltas reported in pixels are scaled down to roughly one line per notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Per-frame input state. Events are accumulated into the current frame and
/// become visible to readers after `next_frame`.
#[derive(Default, Debug)]
pub struct Input {
    current_frame: InputState,
    last_frame: InputState,
    cursor_position: Vec2,
}

impl Input {
    pub fn new(cursor_position: Vec2) -> Self {
        Self {
            cursor_position,
            ..Default::default()
        }
    }

    pub fn next_frame(&mut self) {
        let last = std::mem::take(&mut self.current_frame);
        self.current_frame = InputState::from_last(&last);
        self.last_frame = last;
    }

    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.handle_mouse_move(delta)
        }
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        repeat,
                        ..
                    },
                ..
            } => self.handle_key(physical_key, state, *repeat),
            WindowEvent::MouseWheel { delta, .. } => self.handle_mouse_scroll(delta),
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, delta: &(f64, f64)) {
        let delta = vec2(delta.0 as f32, delta.1 as f32);
        self.current_frame.mouse_move_delta += delta;
        self.cursor_position += delta;
    }

    fn handle_mouse_scroll(&mut self, delta: &MouseScrollDelta) {
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => vec2(*x, *y),
            MouseScrollDelta::PixelDelta(pos) => {
                vec2(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
            }
        };

        self.current_frame.mouse_scroll_delta += delta;
    }

    fn handle_key(&mut self, key: &PhysicalKey, state: &ElementState, repeat: bool) {
        let key = match key {
            PhysicalKey::Code(code) => Key::from_winit(code),
            PhysicalKey::Unidentified(code) => {
                log::warn!("Unhandled key input: {code:?}");
                return;
            }
        };
        match state {
            ElementState::Pressed if repeat => {
                self.current_frame.key_events.push((key, KeyState::Repeat));
            }
            ElementState::Pressed => {
                self.current_frame.keys_pressed.insert(key);
                self.current_frame.keys_held.insert(key);
                self.current_frame.key_events.push((key, KeyState::Down));
            }
            ElementState::Released => {
                self.current_frame.keys_held.remove(&key);
                self.current_frame.keys_released.insert(key);
                self.current_frame.key_events.push((key, KeyState::Up));
            }
        }
    }

    fn release_all(&mut self) {
        let held = std::mem::take(&mut self.current_frame.keys_held);
        self.current_frame.keys_released.extend(held);
    }

    pub fn key_events(&self) -> &[(Key, KeyState)] { &self.last_frame.key_events }

    pub fn key_pressed(&self, key: &Key) -> bool { self.last_frame.keys_pressed.contains(key) }

    pub fn key_held(&self, key: &Key) -> bool { self.last_frame.keys_held.contains(key) }

    pub fn key_released(&self, key: &Key) -> bool { self.last_frame.keys_released.contains(key) }

    pub fn mouse_delta(&self) -> Option<Vec2> {
        let delta = self.last_frame.mouse_move_delta;
        (delta != Vec2::ZERO).then_some(delta)
    }

    /// Unbounded cursor position built from raw motion, unaffected by cursor grabs.
    pub fn cursor_position(&self) -> Vec2 { self.cursor_position }

    pub fn mouse_scroll_delta(&self) -> Option<Vec2> {
        let delta = self.last_frame.mouse_scroll_delta;
        (delta != Vec2::ZERO).then_some(delta)
    }
}

#[derive(Default, Debug)]
pub struct InputState {
    key_events: Vec<(Key, KeyState)>,
    keys_pressed: HashSet<Key>,
    keys_held: HashSet<Key>,
    keys_released: HashSet<Key>,
    mouse_move_delta: Vec2,
    mouse_scroll_delta: Vec2,
}

impl InputState {
    pub fn from_last(prev_state: &InputState) -> Self {
        Self {
            keys_held: prev_state.keys_held.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Down,
    Repeat,
    Up,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Hash)]
pub enum Key {
    KeyA,
    KeyD,
    KeyS,
    KeyW,
    Space,
    ShiftLeft,
    ShiftRight,
    Tab,
    Escape,
    F1,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Unidentified,
}

impl Key {
    fn from_winit(key: &KeyCode) -> Self {
        match key {
            KeyCode::KeyA => Key::KeyA,
            KeyCode::KeyD => Key::KeyD,
            KeyCode::KeyS => Key::KeyS,
            KeyCode::KeyW => Key::KeyW,
            KeyCode::Space => Key::Space,
            KeyCode::ShiftLeft => Key::ShiftLeft,
            KeyCode::ShiftRight => Key::ShiftRight,
            KeyCode::Tab => Key::Tab,
            KeyCode::Escape => Key::Escape,
            KeyCode::F1 => Key::F1,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::ArrowUp => Key::ArrowUp,
            _ => Key::Unidentified,
        }
    }
}
