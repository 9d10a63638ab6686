pub mod app;
pub mod controls;

pub use {
    app::{App, AppConfig},
    controls::{Action, InputContext},
};
