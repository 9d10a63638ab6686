use {
    mipview_core::constants::{LOD_BIAS_MAX, LOD_BIAS_MIN},
    mipview_gl::MinFilter,
};

/// Sampler modes offered in the UI, in display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[default]
    Disabled,
    LinearLinear,
    NearestLinear,
    LinearNearest,
    NearestNearest,
}

impl FilterMode {
    pub const ALL: [FilterMode; 5] = [
        FilterMode::Disabled,
        FilterMode::LinearLinear,
        FilterMode::NearestLinear,
        FilterMode::LinearNearest,
        FilterMode::NearestNearest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::Disabled => "Disable Mipmapping",
            FilterMode::LinearLinear => "Linear-Linear",
            FilterMode::NearestLinear => "Nearest-Linear",
            FilterMode::LinearNearest => "Linear-Nearest",
            FilterMode::NearestNearest => "Nearest-Nearest",
        }
    }

    pub fn min_filter(&self) -> MinFilter {
        match self {
            FilterMode::Disabled => MinFilter::Linear,
            FilterMode::LinearLinear => MinFilter::LinearMipmapLinear,
            FilterMode::NearestLinear => MinFilter::NearestMipmapLinear,
            FilterMode::LinearNearest => MinFilter::LinearMipmapNearest,
            FilterMode::NearestNearest => MinFilter::NearestMipmapNearest,
        }
    }
}

/// User-tweakable render state shared by the input handlers, the UI and the
/// renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    pub filter_mode: FilterMode,
    pub lod_bias: f32,
    pub texture_index: usize,
    pub show_ui: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            filter_mode: FilterMode::default(),
            lod_bias: 0.0,
            texture_index: 0,
            show_ui: true,
        }
    }
}

impl RenderSettings {
    pub fn adjust_lod_bias(&mut self, delta: f32) {
        self.lod_bias = (self.lod_bias + delta).clamp(LOD_BIAS_MIN, LOD_BIAS_MAX);
    }

    pub fn toggle_ui(&mut self) { self.show_ui = !self.show_ui; }
}

#[cfg(test)]
mod tests {
    use {super::*, mipview_core::constants::LOD_BIAS_STEP};

    #[test]
    fn test_lod_bias_clamps() {
        let mut settings = RenderSettings::default();
        for _ in 0..100 {
            settings.adjust_lod_bias(LOD_BIAS_STEP);
        }
        assert_eq!(settings.lod_bias, LOD_BIAS_MAX);

        for _ in 0..100 {
            settings.adjust_lod_bias(-LOD_BIAS_STEP);
        }
        assert_eq!(settings.lod_bias, LOD_BIAS_MIN);
    }

    #[test]
    fn test_lod_bias_steps() {
        let mut settings = RenderSettings::default();
        settings.adjust_lod_bias(LOD_BIAS_STEP);
        settings.adjust_lod_bias(LOD_BIAS_STEP);
        settings.adjust_lod_bias(-LOD_BIAS_STEP);

        assert!((settings.lod_bias - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_filter_modes() {
        let filters = FilterMode::ALL.map(|mode| mode.min_filter());
        assert_eq!(
            filters,
            [
                MinFilter::Linear,
                MinFilter::LinearMipmapLinear,
                MinFilter::NearestMipmapLinear,
                MinFilter::LinearMipmapNearest,
                MinFilter::NearestMipmapNearest,
            ]
        );
        assert_eq!(FilterMode::default(), FilterMode::Disabled);
        assert_eq!(FilterMode::NearestLinear.label(), "Nearest-Linear");
    }

    #[test]
    fn test_toggle_ui() {
        let mut settings = RenderSettings::default();
        assert_eq!(settings.show_ui, true);
        settings.toggle_ui();
        assert_eq!(settings.show_ui, false);
    }
}
