use {
    anyhow::{anyhow, bail, Result},
    derive_more::Debug,
    glam::Mat4,
    glow::HasContext,
    std::collections::HashMap,
};

#[derive(Debug)]
pub struct ShaderProgram {
    name: String,
    handle: glow::Program,
    #[debug(skip)]
    uniforms: HashMap<String, Option<glow::UniformLocation>>,
}

impl ShaderProgram {
    pub fn new(gl: &glow::Context, name: &str, vertex: &str, fragment: &str) -> Result<Self> {
        let program = unsafe { gl.create_program() }.map_err(|err| anyhow!(err))?;
        let sources = [
            (glow::VERTEX_SHADER, vertex),
            (glow::FRAGMENT_SHADER, fragment),
        ];

        let mut shaders = Vec::with_capacity(sources.len());
        for (stage, source) in sources {
            match compile(gl, stage, source) {
                Ok(shader) => {
                    unsafe { gl.attach_shader(program, shader) };
                    shaders.push(shader);
                }
                Err(err) => {
                    delete(gl, program, &shaders);
                    return Err(err.context(format!("Failed to compile shader {name:?}")));
                }
            }
        }

        unsafe { gl.link_program(program) };
        if !unsafe { gl.get_program_link_status(program) } {
            let info = unsafe { gl.get_program_info_log(program) };
            delete(gl, program, &shaders);
            bail!("Failed to link shader {name:?}: {info}");
        }

        for shader in shaders {
            unsafe {
                gl.detach_shader(program, shader);
                gl.delete_shader(shader);
            }
        }

        log::debug!("Created shader program {name:?}");
        Ok(Self {
            name: name.to_string(),
            handle: program,
            uniforms: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn bind(&self, gl: &glow::Context) { unsafe { gl.use_program(Some(self.handle)) } }

    /// Looks a uniform up once and caches the result. Uniforms the linker
    /// optimized away resolve to `None` and writes to them are ignored.
    fn location(&mut self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        let handle = self.handle;
        self.uniforms
            .entry(name.to_string())
            .or_insert_with(|| {
                let location = unsafe { gl.get_uniform_location(handle, name) };
                if location.is_none() {
                    log::warn!("Uniform {name:?} not found in {:?}", self.name);
                }
                location
            })
            .clone()
    }

    pub fn set_mat4(&mut self, gl: &glow::Context, name: &str, value: &Mat4) {
        let location = self.location(gl, name);
        unsafe { gl.uniform_matrix_4_f32_slice(location.as_ref(), false, &value.to_cols_array()) };
    }

    pub fn set_i32(&mut self, gl: &glow::Context, name: &str, value: i32) {
        let location = self.location(gl, name);
        unsafe { gl.uniform_1_i32(location.as_ref(), value) };
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.handle) };
        log::trace!("Destroyed {self:?}");
    }
}

fn compile(gl: &glow::Context, stage: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(|err| anyhow!(err))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let info = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            bail!("{} stage: {info}", stage_name(stage));
        }

        Ok(shader)
    }
}

fn delete(gl: &glow::Context, program: glow::Program, shaders: &[glow::Shader]) {
    unsafe {
        for shader in shaders {
            gl.delete_shader(*shader);
        }
        gl.delete_program(program);
    }
}

fn stage_name(stage: u32) -> &'static str {
    match stage {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}
