use {
    crate::controls::{Action, InputContext},
    anyhow::{anyhow, Result},
    derive_more::Debug,
    glam::vec2,
    human_panic::setup_panic,
    mipview_core::{
        constants::{DEFAULT_APP_NAME, DEFAULT_WINDOW_SIZE, MAX_FRAME_TIME_S},
        logging, Input, Window,
    },
    mipview_gfx::{Gui, RenderSettings, Renderer, RendererConfig},
    mipview_gl::{Gpu, GpuConfig},
    mipview_scene::{Camera, CameraConfig},
    std::{path::PathBuf, time::Instant},
    winit::{
        application::ApplicationHandler,
        dpi::Size,
        event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
        event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
        keyboard::{KeyCode, PhysicalKey},
        window::{CursorGrabMode, WindowId},
    },
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub name: String,
    pub window_size: Size,
    pub gpu: GpuConfig,
    pub camera: CameraConfig,
    pub renderer: RendererConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            gpu: GpuConfig::default(),
            camera: CameraConfig::default(),
            renderer: RendererConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn window_size(mut self, size: impl Into<Size>) -> Self {
        self.window_size = size.into();
        self
    }

    pub fn scene_path(mut self, path: Option<PathBuf>) -> Self {
        self.renderer = self.renderer.scene_path(path);
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.gpu.vsync = vsync;
        self
    }
}

#[derive(Debug, Default)]
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self { Self { config } }

    pub fn run(self) -> Result<()> {
        logging::setup_logger()?;
        setup_panic!();

        log::info!("Starting {} with {:?}", self.config.name, self.config);
        let mut handler = AppHandler {
            config: self.config,
            state: None,
            exiting: false,
        };

        EventLoop::new()?
            .run_app(&mut handler)
            .map_err(|err| anyhow!(err))
    }
}

#[derive(Debug)]
struct AppState {
    gpu: Gpu,
    renderer: Renderer,
    gui: Gui,
    camera: Camera,
    settings: RenderSettings,
    input: Input,
    context: InputContext,
    last_frame: Instant,
}

impl AppState {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(&config.name)
            .with_inner_size(config.window_size);
        let gpu = Gpu::new(event_loop, attributes, config.gpu)?;
        log::info!("Created window: {:?}", gpu.window().id());

        let renderer = Renderer::new(gpu.gl(), config.renderer.clone())?;
        log::info!("Created renderer: {renderer:?}");

        let gui = Gui::new(event_loop, gpu.gl().clone(), gpu.window().clone());

        let size = gpu.size();
        let center = vec2(size.width as f32, size.height as f32) / 2.0;

        Ok(Self {
            gpu,
            renderer,
            gui,
            camera: Camera::new(config.camera),
            settings: RenderSettings::default(),
            input: Input::new(center),
            context: InputContext::new(center),
            last_frame: Instant::now(),
        })
    }

    /// Runs one frame. Returns false when the app should quit.
    fn frame(&mut self) -> Result<bool> {
        let now = Instant::now();
        let delta_time = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_TIME_S);
        self.last_frame = now;

        self.input.next_frame();
        let actions = self.context.update(
            &self.input,
            &mut self.camera,
            &mut self.settings,
            delta_time,
        );

        for action in actions {
            match action {
                Action::Quit => return Ok(false),
                Action::SetCameraControl(enabled) => set_cursor_grab(self.gpu.window(), enabled),
            }
        }

        self.renderer.render(
            self.gpu.gl(),
            &self.camera,
            &self.settings,
            self.gpu.aspect_ratio(),
            delta_time,
        );
        self.gui.draw(&mut self.settings, &self.renderer.texture_labels());
        self.gpu.swap_buffers()?;

        Ok(true)
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        let consumed = self.settings.show_ui && self.gui.handle_event(event);
        if reaches_input(event, consumed) {
            self.input.handle_window_event(event);
        }
    }

    fn destroy(mut self) {
        let gl = self.gpu.gl().clone();
        self.gui.destroy();
        self.renderer.destroy(&gl);
        log::debug!("Released GPU resources");
    }
}

struct AppHandler {
    config: AppConfig,
    state: Option<AppState>,
    exiting: bool,
}

impl AppHandler {
    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.exiting {
            self.exiting = true;
            log::info!("Exiting");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Resumed");
        if self.state.is_some() {
            return;
        }

        match AppState::new(event_loop, &self.config) {
            Ok(state) => {
                self.state = Some(state);
                event_loop.set_control_flow(ControlFlow::Poll);
            }
            Err(err) => {
                log::error!("Failed to initialize app state: {err:#}");
                self.exit(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut().filter(|_| !self.exiting) else {
            return;
        };

        match state.frame() {
            Ok(true) => {}
            Ok(false) => self.exit(event_loop),
            Err(err) => {
                log::error!("Error rendering frame: {err:#}");
                self.exit(event_loop);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.take() {
            state.destroy();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut().filter(|_| !self.exiting) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.exit(event_loop);
            }
            WindowEvent::Resized(size) => {
                log::debug!("Window resized: {size:?}");
                state.gpu.resize(size);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::info!("Window scale factor changed: {scale_factor}");
            }
            event => state.handle_window_event(&event),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = self.state.as_mut() {
            state.input.handle_device_event(&event);
        }
    }
}

/// Whether `event` reaches the input state after egui has seen it. Focus
/// changes and key releases always do, so held keys cannot get stuck.
fn reaches_input(event: &WindowEvent, consumed_by_ui: bool) -> bool {
    if !consumed_by_ui {
        return true;
    }

    match event {
        WindowEvent::Focused(_) => true,
        WindowEvent::KeyboardInput { event, .. } => bypasses_ui(event.physical_key, event.state),
        _ => false,
    }
}

/// App shortcuts stay active while a widget has keyboard focus.
fn bypasses_ui(key: PhysicalKey, state: ElementState) -> bool {
    state == ElementState::Released
        || matches!(
            key,
            PhysicalKey::Code(
                KeyCode::Escape
                    | KeyCode::Tab
                    | KeyCode::F1
                    | KeyCode::ArrowLeft
                    | KeyCode::ArrowRight
            )
        )
}

fn set_cursor_grab(window: &Window, grab: bool) {
    let result = match grab {
        true => window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked)),
        false => window.set_cursor_grab(CursorGrabMode::None),
    };

    if let Err(err) = result {
        log::warn!("Could not change cursor grab to {grab}: {err}");
    }
    window.set_cursor_visible(!grab);
}

#[cfg(test)]
mod tests {
    use {super::*, winit::dpi::PhysicalSize};

    #[test]
    fn test_key_releases_bypass_ui() {
        let w = PhysicalKey::Code(KeyCode::KeyW);
        assert_eq!(bypasses_ui(w, ElementState::Released), true);
        assert_eq!(bypasses_ui(w, ElementState::Pressed), false);
    }

    #[test]
    fn test_app_keys_bypass_ui() {
        for code in [
            KeyCode::Escape,
            KeyCode::Tab,
            KeyCode::F1,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
        ] {
            assert_eq!(bypasses_ui(PhysicalKey::Code(code), ElementState::Pressed), true);
        }
        assert_eq!(
            bypasses_ui(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed),
            false
        );
    }

    #[test]
    fn test_consumed_events_reaching_input() {
        let wheel = WindowEvent::MouseWheel {
            device_id: unsafe { DeviceId::dummy() },
            delta: winit::event::MouseScrollDelta::LineDelta(0.0, 1.0),
            phase: winit::event::TouchPhase::Moved,
        };

        assert_eq!(reaches_input(&wheel, false), true);
        assert_eq!(reaches_input(&wheel, true), false);
        assert_eq!(reaches_input(&WindowEvent::Focused(false), true), true);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.name, "Mipmapping");
        assert_eq!(config.window_size, Size::Physical(PhysicalSize::new(1920, 1080)));
        assert_eq!(config.renderer.scene_path, None);
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::default()
            .name("Demo")
            .vsync(false)
            .scene_path(Some("assets/models/scene.gltf".into()));

        assert_eq!(config.name, "Demo");
        assert_eq!(config.gpu.vsync, false);
        assert_eq!(
            config.renderer.scene_path,
            Some(PathBuf::from("assets/models/scene.gltf"))
        );
    }
}
