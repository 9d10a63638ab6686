use {
    crate::{FilterMode, RenderSettings},
    derive_more::Debug,
    egui_glow::EguiGlow,
    mipview_core::{
        constants::{LOD_BIAS_MAX, LOD_BIAS_MIN},
        Window,
    },
    std::sync::Arc,
    winit::{event::WindowEvent, event_loop::ActiveEventLoop},
};

const WINDOW_TITLE: &str = "Material Controls";
const WINDOW_WIDTH: f32 = 350.0;

#[derive(Debug)]
pub struct Gui {
    #[debug(skip)]
    egui: EguiGlow,
    window: Arc<Window>,
}

impl Gui {
    pub fn new(event_loop: &ActiveEventLoop, gl: Arc<glow::Context>, window: Arc<Window>) -> Self {
        let egui = EguiGlow::new(event_loop, gl, None, None, true);
        egui.egui_ctx.set_visuals(visuals());
        Self { egui, window }
    }

    /// Feeds a window event to egui. Returns true when egui consumed it and it
    /// should not reach the camera.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.on_window_event(&self.window, event).consumed
    }

    /// Builds and paints the panel. Nothing is drawn while the UI is hidden.
    pub fn draw(&mut self, settings: &mut RenderSettings, textures: &[&str]) {
        if !settings.show_ui {
            return;
        }

        self.egui.run(&self.window, |ctx| build_ui(ctx, settings, textures));
        self.egui.paint(&self.window);
    }

    pub fn destroy(&mut self) { self.egui.destroy(); }
}

/// Dark theme with a translucent window so the floor stays visible behind it.
fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = egui::Color32::from_rgba_unmultiplied(24, 24, 30, 230);
    visuals.panel_fill = egui::Color32::from_rgb(24, 24, 30);
    visuals.selection.bg_fill = egui::Color32::from_rgb(66, 150, 250);
    visuals.hyperlink_color = egui::Color32::from_rgb(66, 150, 250);
    visuals
}

fn build_ui(ctx: &egui::Context, settings: &mut RenderSettings, textures: &[&str]) {
    egui::Window::new(WINDOW_TITLE)
        .default_width(WINDOW_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            let mode = &mut settings.filter_mode;
            radio(ui, mode, FilterMode::Disabled);

            ui.separator();
            ui.label("Switch MipMap Modes.");
            ui.horizontal(|ui| {
                radio(ui, mode, FilterMode::LinearLinear);
                radio(ui, mode, FilterMode::NearestLinear);
            });
            ui.horizontal(|ui| {
                radio(ui, mode, FilterMode::LinearNearest);
                radio(ui, mode, FilterMode::NearestNearest);
            });

            ui.separator();
            ui.label("Toggle this and look at the far end of the floor.");
            ui.separator();
            ui.add(
                egui::Slider::new(&mut settings.lod_bias, LOD_BIAS_MIN..=LOD_BIAS_MAX)
                    .text("LOD bias")
                    .fixed_decimals(2),
            );

            if !textures.is_empty() {
                ui.separator();
                ui.label("Switch Textures.");
                for (index, label) in textures.iter().enumerate() {
                    ui.radio_value(&mut settings.texture_index, index, *label);
                }
            }

            ui.separator();
            ui.label("Use WASD + Space/Shift to move, mouse to look around.");
            ui.label("Press TAB to toggle camera control.");
            ui.label("Press LEFT/RIGHT to adjust LOD bias.");
            ui.label("Press F1 to toggle this UI.");
        });
}

fn radio(ui: &mut egui::Ui, current: &mut FilterMode, mode: FilterMode) {
    ui.radio_value(current, mode, mode.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals() {
        let visuals = visuals();
        assert_eq!(visuals.dark_mode, true);
        assert!(visuals.window_fill.a() < 255);
        assert_eq!(visuals.selection.bg_fill, egui::Color32::from_rgb(66, 150, 250));
    }
}
