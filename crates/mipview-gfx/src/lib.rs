pub mod assets;
pub mod gui;
pub mod mesh;
pub mod renderer;
pub mod settings;

pub use {
    assets::Assets,
    gui::Gui,
    mesh::{GpuModel, Mesh},
    renderer::{Renderer, RendererConfig},
    settings::{FilterMode, RenderSettings},
};
