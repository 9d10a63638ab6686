pub use {mipview_app, mipview_core, mipview_gfx, mipview_scene};

pub mod prelude {
    pub use {
        crate::mipview_app::{App, AppConfig},
        crate::mipview_gfx::{FilterMode, RenderSettings, RendererConfig},
        crate::mipview_scene::{Camera, CameraConfig, Model},
    };
}
