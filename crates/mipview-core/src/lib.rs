pub mod constants;
pub mod input;
pub mod logging;

pub use {
    input::{Input, Key, KeyState},
    winit::window::Window,
};
