use {
    crate::{Assets, GpuModel, Mesh, RenderSettings},
    anyhow::Result,
    derive_more::Debug,
    glam::{vec3, Mat4, Vec3},
    glow::HasContext,
    mipview_gl::{ShaderProgram, Texture},
    mipview_scene::{primitives, Camera, Model, TextureHandle},
    std::path::PathBuf,
    tracing::instrument,
};

const TEXTURE_UNIT: u32 = 0;

#[derive(Clone, Debug)]
pub struct RendererConfig {
    #[debug(skip)]
    pub vertex_shader: &'static str,
    #[debug(skip)]
    pub fragment_shader: &'static str,
    /// Selectable floor textures as (label, path), in UI order.
    pub textures: Vec<(String, PathBuf)>,
    pub scene_path: Option<PathBuf>,
    pub floor_half_extent: f32,
    pub floor_uv_repeat: f32,
    pub clear_color: Vec3,
    /// Degrees per second.
    pub floor_rotation_speed: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            vertex_shader: include_str!("../shaders/main.vert"),
            fragment_shader: include_str!("../shaders/main.frag"),
            textures: vec![
                ("Chess Board".into(), "assets/textures/chess_board.png".into()),
                ("UV Grid".into(), "assets/textures/uv_grid.png".into()),
                ("Line Grid".into(), "assets/textures/moire.png".into()),
            ],
            scene_path: None,
            floor_half_extent: 100.0,
            floor_uv_repeat: 50.0,
            clear_color: vec3(0.1, 0.1, 0.15),
            floor_rotation_speed: 10.0,
        }
    }
}

impl RendererConfig {
    pub fn scene_path(mut self, path: Option<PathBuf>) -> Self {
        self.scene_path = path;
        self
    }
}

#[derive(Debug)]
pub struct Renderer {
    shader: ShaderProgram,
    floor: Mesh,
    model: GpuModel,
    assets: Assets,
    textures: Vec<(String, TextureHandle)>,
    elapsed: f32,
    config: RendererConfig,
}

impl Renderer {
    #[instrument(skip_all)]
    pub fn new(gl: &glow::Context, config: RendererConfig) -> Result<Self> {
        let shader = ShaderProgram::new(gl, "main", config.vertex_shader, config.fragment_shader)?;
        let floor = Mesh::new(
            gl,
            &primitives::floor_plane(config.floor_half_extent, config.floor_uv_repeat),
        )?;

        let mut assets = Assets::new();
        let textures = config
            .textures
            .iter()
            .map(|(label, path)| (label.clone(), assets.load_texture_2d(gl, path)))
            .collect::<Vec<_>>();

        let model = match &config.scene_path {
            Some(path) => GpuModel::new(gl, &Model::load(path))?,
            None => GpuModel::default(),
        };

        log::info!(
            "Created renderer: {} texture(s), {} model mesh(es)",
            assets.len(),
            model.meshes().len()
        );

        Ok(Self {
            shader,
            floor,
            model,
            assets,
            textures,
            elapsed: 0.0,
            config,
        })
    }

    pub fn texture_labels(&self) -> Vec<&str> {
        self.textures.iter().map(|(label, _)| label.as_str()).collect()
    }

    pub fn config(&self) -> &RendererConfig { &self.config }

    pub fn render(
        &mut self,
        gl: &glow::Context,
        camera: &Camera,
        settings: &RenderSettings,
        aspect_ratio: f32,
        delta_time: f32,
    ) {
        self.elapsed += delta_time;
        let clear = self.config.clear_color;

        // The UI pass leaves depth testing off.
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.clear_color(clear.x, clear.y, clear.z, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.shader.bind(gl);
        self.shader.set_mat4(gl, "projection", &camera.projection(aspect_ratio));
        self.shader.set_mat4(gl, "view", &camera.view_matrix());
        self.shader.set_i32(gl, "tex", TEXTURE_UNIT as i32);

        let handle = select_texture(&self.textures, settings.texture_index);
        match self.assets.texture(handle) {
            Some(texture) => {
                texture.bind(gl, TEXTURE_UNIT);
                texture.set_min_filter(gl, settings.filter_mode.min_filter());
                texture.set_lod_bias(gl, settings.lod_bias);
            }
            None => Texture::unbind(gl, TEXTURE_UNIT),
        }

        let floor_transform = floor_transform(self.elapsed, self.config.floor_rotation_speed);
        self.shader.set_mat4(gl, "model", &floor_transform);
        self.floor.draw(gl);

        self.shader.set_mat4(gl, "model", &Mat4::IDENTITY);
        self.model.draw(gl);
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        self.model.destroy(gl);
        self.floor.destroy(gl);
        self.assets.destroy(gl);
        self.shader.destroy(gl);
    }
}

/// Texture at `index`, or the null handle when out of range.
fn select_texture(textures: &[(String, TextureHandle)], index: usize) -> TextureHandle {
    textures
        .get(index)
        .map(|(_, handle)| *handle)
        .unwrap_or_default()
}

fn floor_transform(elapsed: f32, degrees_per_second: f32) -> Mat4 {
    Mat4::from_rotation_y((elapsed * degrees_per_second).to_radians())
}
