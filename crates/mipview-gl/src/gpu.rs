use {
    crate::debug,
    anyhow::{anyhow, Result},
    derive_more::Debug,
    glow::HasContext,
    glutin::{
        config::{Config, ConfigTemplateBuilder, GlConfig},
        context::{
            ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
            PossiblyCurrentContext, Version,
        },
        display::{GetGlDisplay, GlDisplay},
        surface::{GlSurface, Surface, SwapInterval, WindowSurface},
    },
    glutin_winit::{DisplayBuilder, GlWindow},
    mipview_core::Window,
    raw_window_handle::HasWindowHandle,
    std::{num::NonZeroU32, sync::Arc},
    tracing::instrument,
    winit::{dpi::PhysicalSize, event_loop::ActiveEventLoop, window::WindowAttributes},
};

const GL_VERSION: (u8, u8) = (3, 3);
const DEPTH_BITS: u8 = 24;

#[derive(Clone, Copy, Debug)]
pub struct GpuConfig {
    pub vsync: bool,
    pub debug_output: bool,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            debug_output: cfg!(debug_assertions),
        }
    }
}

/// Window plus a current OpenGL 3.3 core context drawing to it.
#[derive(Debug)]
pub struct Gpu {
    #[debug(skip)]
    gl: Arc<glow::Context>,
    #[debug(skip)]
    surface: Surface<WindowSurface>,
    #[debug(skip)]
    context: PossiblyCurrentContext,
    window: Arc<Window>,
}

impl Gpu {
    #[instrument(skip_all)]
    pub fn new(
        event_loop: &ActiveEventLoop,
        attributes: WindowAttributes,
        config: GpuConfig,
    ) -> Result<Self> {
        let template = ConfigTemplateBuilder::new().with_depth_size(DEPTH_BITS);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|err| anyhow!("Failed to create GL display: {err}"))?;
        let window = window.ok_or_else(|| anyhow!("Display did not create a window"))?;

        let display = gl_config.display();
        let raw_handle = window.window_handle()?.as_raw();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(GL_VERSION.0, GL_VERSION.1))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes)? };

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        let interval = match config.vsync {
            true => SwapInterval::Wait(NonZeroU32::MIN),
            false => SwapInterval::DontWait,
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            log::warn!("Could not set swap interval {interval:?}: {err}");
        }

        let mut gl =
            unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };
        if config.debug_output {
            debug::install_callback(&mut gl);
        }

        unsafe {
            log::info!(
                "Created GL context: {} ({})",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER),
            );
            gl.enable(glow::DEPTH_TEST);
        }

        Ok(Self {
            gl: Arc::new(gl),
            surface,
            context,
            window: Arc::new(window),
        })
    }

    #[inline]
    pub fn gl(&self) -> &Arc<glow::Context> { &self.gl }

    #[inline]
    pub fn window(&self) -> &Arc<Window> { &self.window }

    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> { self.window.inner_size() }

    pub fn aspect_ratio(&self) -> f32 { aspect_ratio(self.size()) }

    /// Resizes the surface and viewport. Zero-sized (minimized) windows are
    /// ignored.
    pub fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, width, height);
        unsafe { self.gl.viewport(0, 0, size.width as i32, size.height as i32) };
        log::debug!("Resized surface to {}x{}", size.width, size.height);
    }

    pub fn swap_buffers(&self) -> Result<()> {
        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }
}

/// Aspect ratio of a framebuffer, 1.0 for degenerate sizes.
pub fn aspect_ratio(size: PhysicalSize<u32>) -> f32 {
    match (size.width, size.height) {
        (0, _) | (_, 0) => 1.0,
        (w, h) => w as f32 / h as f32,
    }
}

/// glutin calls the picker only after finding at least one config that matches
/// the template; an empty set is reported as a `build` error instead.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    most_samples(configs, |config| config.num_samples())
        .expect("glutin offers at least one config to the picker")
}

/// The candidate with the most multisample samples, earliest on ties.
fn most_samples<T>(candidates: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    candidates.reduce(|best, candidate| match samples(&candidate) > samples(&best) {
        true => candidate,
        false => best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(aspect_ratio(PhysicalSize::new(1920, 1080)), 1920.0 / 1080.0);
        assert_eq!(aspect_ratio(PhysicalSize::new(800, 800)), 1.0);
        assert_eq!(aspect_ratio(PhysicalSize::new(0, 600)), 1.0);
        assert_eq!(aspect_ratio(PhysicalSize::new(800, 0)), 1.0);
    }

    #[test]
    fn test_most_samples() {
        let configs = [("a", 0u8), ("b", 4), ("c", 4), ("d", 2)];
        let best = most_samples(configs.into_iter(), |(_, samples)| *samples);

        assert_eq!(best, Some(("b", 4)));
        assert_eq!(most_samples(std::iter::empty::<u8>(), |s| *s), None);
    }

    #[test]
    fn test_default_config() {
        let config = GpuConfig::default();
        assert_eq!(config.vsync, true);
    }
}
