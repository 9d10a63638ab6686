pub mod assets;
pub mod camera;
pub mod import;
pub mod model;
pub mod primitives;
pub mod texture;

pub use crate::{
    assets::AssetHandle,
    camera::{Camera, CameraConfig, Movement},
    import::{PostProcess, SceneImporter},
    model::{MeshData, Model, Vertex, VertexAttribute},
    texture::{PixelFormat, TextureData},
};

pub type TextureHandle = AssetHandle<TextureData>;
