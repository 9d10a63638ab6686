use {
    anyhow::{anyhow, Result},
    bytemuck::Pod,
    derive_more::Debug,
    glow::HasContext,
    mipview_scene::VertexAttribute,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    pub fn target(&self) -> u32 {
        match self {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Immutable GPU buffer sized exactly to the data it was created with.
#[derive(Debug)]
pub struct Buffer {
    handle: glow::Buffer,
    kind: BufferKind,
    size: usize,
    len: usize,
}

impl Buffer {
    /// Creates and fills a buffer. The target stays bound, so index buffers
    /// should be created while their vertex array is bound.
    pub fn new<T: Pod>(gl: &glow::Context, kind: BufferKind, data: &[T]) -> Result<Self> {
        let bytes = bytemuck::cast_slice::<T, u8>(data);
        let handle = unsafe { gl.create_buffer() }.map_err(|err| anyhow!(err))?;

        unsafe {
            gl.bind_buffer(kind.target(), Some(handle));
            gl.buffer_data_u8_slice(kind.target(), bytes, glow::STATIC_DRAW);
        }

        let buffer = Self {
            handle,
            kind,
            size: bytes.len(),
            len: data.len(),
        };
        log::trace!("Created {buffer:?}");
        Ok(buffer)
    }

    pub fn vertex<T: Pod>(gl: &glow::Context, data: &[T]) -> Result<Self> {
        Self::new(gl, BufferKind::Vertex, data)
    }

    pub fn index(gl: &glow::Context, data: &[u32]) -> Result<Self> {
        Self::new(gl, BufferKind::Index, data)
    }

    pub fn handle(&self) -> glow::Buffer { self.handle }

    pub fn kind(&self) -> BufferKind { self.kind }

    /// Size in bytes.
    pub fn size(&self) -> usize { self.size }

    /// Number of elements.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_buffer(self.handle) };
        log::trace!("Destroyed {self:?}");
    }
}

#[derive(Debug)]
pub struct VertexArray {
    handle: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let handle = unsafe { gl.create_vertex_array() }.map_err(|err| anyhow!(err))?;
        Ok(Self { handle })
    }

    pub fn bind(&self, gl: &glow::Context) { unsafe { gl.bind_vertex_array(Some(self.handle)) } }

    pub fn unbind(gl: &glow::Context) { unsafe { gl.bind_vertex_array(None) } }

    /// Describes an interleaved float layout for the currently bound vertex
    /// buffer.
    pub fn set_layout(&self, gl: &glow::Context, stride: usize, attributes: &[VertexAttribute]) {
        for attribute in attributes {
            unsafe {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    stride as i32,
                    attribute.offset as i32,
                );
            }
        }
    }

    pub fn destroy(&self, gl: &glow::Context) { unsafe { gl.delete_vertex_array(self.handle) } }
}

pub const INDEX_TYPE: u32 = glow::UNSIGNED_INT;
