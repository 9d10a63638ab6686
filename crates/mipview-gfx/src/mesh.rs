use {
    anyhow::{Context, Result},
    derive_more::Debug,
    glow::HasContext,
    mipview_gl::{Buffer, VertexArray, INDEX_TYPE},
    mipview_scene::{MeshData, Model, Vertex},
};

/// A `MeshData` uploaded to the GPU: vertex array plus exactly-sized vertex and
/// index buffers.
#[derive(Debug)]
pub struct Mesh {
    name: String,
    vertex_array: VertexArray,
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: usize,
}

impl Mesh {
    pub fn new(gl: &glow::Context, data: &MeshData) -> Result<Self> {
        let vertex_array = VertexArray::new(gl)?;
        vertex_array.bind(gl);

        let vertex_buffer = Buffer::vertex(gl, &data.vertices)?;
        vertex_array.set_layout(gl, Vertex::STRIDE, &Vertex::ATTRIBUTES);
        let index_buffer = Buffer::index(gl, &data.indices)?;

        VertexArray::unbind(gl);

        let mesh = Self {
            name: data.name.clone(),
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len(),
        };
        log::trace!("Created {mesh:?}");
        Ok(mesh)
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn index_count(&self) -> usize { self.index_count }

    pub fn draw(&self, gl: &glow::Context) {
        self.vertex_array.bind(gl);
        unsafe { gl.draw_elements(glow::TRIANGLES, self.index_count as i32, INDEX_TYPE, 0) };
        VertexArray::unbind(gl);
    }

    pub fn destroy(&self, gl: &glow::Context) {
        self.vertex_array.destroy(gl);
        self.vertex_buffer.destroy(gl);
        self.index_buffer.destroy(gl);
    }
}

/// GPU meshes of a loaded `Model`, drawn in model order.
#[derive(Debug, Default)]
pub struct GpuModel {
    #[debug("{}", meshes.len())]
    meshes: Vec<Mesh>,
}

impl GpuModel {
    pub fn new(gl: &glow::Context, model: &Model) -> Result<Self> {
        let meshes = model
            .meshes()
            .iter()
            .enumerate()
            .map(|(i, data)| {
                Mesh::new(gl, data).with_context(|| format!("Failed to upload mesh {i}"))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Uploaded {} mesh(es)", meshes.len());
        Ok(Self { meshes })
    }

    pub fn meshes(&self) -> &[Mesh] { &self.meshes }

    pub fn draw(&self, gl: &glow::Context) {
        for mesh in &self.meshes {
            mesh.draw(gl);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        for mesh in &self.meshes {
            mesh.destroy(gl);
        }
    }
}
