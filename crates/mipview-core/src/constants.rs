use winit::dpi::{PhysicalSize, Size};

pub const DEFAULT_WINDOW_WIDTH: u32 = 1920;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 1080;
pub const DEFAULT_WINDOW_SIZE: Size = Size::Physical(PhysicalSize {
    width: DEFAULT_WINDOW_WIDTH,
    height: DEFAULT_WINDOW_HEIGHT,
});
pub const DEFAULT_APP_NAME: &str = "Mipmapping";

pub const LOD_BIAS_STEP: f32 = 0.1;
pub const LOD_BIAS_MIN: f32 = -3.0;
pub const LOD_BIAS_MAX: f32 = 3.0;

// Frame delta time is clamped to this.
pub const MAX_FRAME_TIME_S: f32 = 0.25;
