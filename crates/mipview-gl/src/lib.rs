pub mod buffer;
pub mod debug;
pub mod gpu;
pub mod shader;
pub mod texture;

pub use {
    crate::{
        buffer::{Buffer, BufferKind, VertexArray, INDEX_TYPE},
        gpu::{Gpu, GpuConfig},
        shader::ShaderProgram,
        texture::{MinFilter, Texture},
    },
    glow::{self, HasContext},
};
