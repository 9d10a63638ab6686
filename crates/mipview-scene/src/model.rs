use {
    crate::import::{self, ImportedMesh, ImportedScene, PostProcess},
    anyhow::{bail, Result},
    bytemuck::{Pod, Zeroable},
    derive_more::Debug,
    glam::{Vec2, Vec3},
    std::{mem, path::Path},
    tracing::instrument,
};

pub const DEFAULT_NORMAL: Vec3 = Vec3::Y;
pub const DEFAULT_TANGENT: Vec3 = Vec3::X;
pub const DEFAULT_BITANGENT: Vec3 = Vec3::Y;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub uv: Vec2,
}

/// One interleaved float attribute of `Vertex`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub offset: usize,
}

impl Vertex {
    pub const STRIDE: usize = mem::size_of::<Vertex>();

    pub const ATTRIBUTES: [VertexAttribute; 5] = [
        VertexAttribute {
            location: 0,
            components: 3,
            offset: mem::offset_of!(Vertex, position),
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: mem::offset_of!(Vertex, normal),
        },
        VertexAttribute {
            location: 2,
            components: 3,
            offset: mem::offset_of!(Vertex, tangent),
        },
        VertexAttribute {
            location: 3,
            components: 3,
            offset: mem::offset_of!(Vertex, bitangent),
        },
        VertexAttribute {
            location: 4,
            components: 2,
            offset: mem::offset_of!(Vertex, uv),
        },
    ];

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            tangent: DEFAULT_TANGENT,
            bitangent: DEFAULT_BITANGENT,
            uv,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    #[debug("{}", vertices.len())]
    pub vertices: Vec<Vertex>,
    #[debug("{}", indices.len())]
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn vertices(mut self, vertices: Vec<Vertex>) -> Self {
        self.vertices = vertices;
        self
    }

    pub fn indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Flattens an imported mesh into vertices, filling absent channels with
    /// the defaults (normal up, uv origin, tangent frame +X/+Y).
    pub fn from_imported(mesh: &ImportedMesh) -> Self {
        let vertices = mesh
            .positions
            .iter()
            .enumerate()
            .map(|(i, position)| {
                let normal = mesh
                    .normals
                    .as_ref()
                    .and_then(|normals| normals.get(i))
                    .copied()
                    .unwrap_or(DEFAULT_NORMAL);
                let uv = mesh
                    .tex_coords
                    .as_ref()
                    .and_then(|coords| coords.get(i))
                    .copied()
                    .unwrap_or(Vec2::ZERO);
                let frame = mesh.tangents.as_ref().and_then(|frames| frames.get(i));

                Vertex {
                    position: *position,
                    normal,
                    tangent: frame.map_or(DEFAULT_TANGENT, |f| f.tangent),
                    bitangent: frame.map_or(DEFAULT_BITANGENT, |f| f.bitangent),
                    uv,
                }
            })
            .collect();

        MeshData::default()
            .name(&mesh.name)
            .vertices(vertices)
            .indices(mesh.indices.clone())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    meshes: Vec<MeshData>,
}

impl Model {
    /// Imports a scene, logging and returning an empty model on failure.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(model) => model,
            Err(err) => {
                log::error!("Failed to load model {path:?}: {err:#}");
                Self::default()
            }
        }
    }

    #[instrument(level = "debug")]
    pub fn try_load(path: &Path) -> Result<Self> {
        let scene = import::import_scene(path, PostProcess::default())?;

        if scene.is_incomplete() {
            bail!("Scene {path:?} is incomplete");
        }
        if scene.root.is_none() {
            bail!("Scene {path:?} has no root node");
        }

        let model = Self::from_scene(&scene);
        log::info!(
            "Loaded model {:?} -> {} mesh(es), {} vertices, {} indices",
            path,
            model.meshes.len(),
            model.vertex_count(),
            model.index_count(),
        );

        Ok(model)
    }

    /// Pre-order walk of the node tree: a node's meshes are appended before any
    /// of its children are visited. Meshes referenced by several nodes are
    /// appended once per reference.
    pub fn from_scene(scene: &ImportedScene) -> Self {
        let mut meshes = vec![];
        let mut stack = scene.root.iter().collect::<Vec<_>>();

        while let Some(node) = stack.pop() {
            for &index in &node.meshes {
                let Some(mesh) = scene.meshes.get(index) else {
                    log::warn!("Node {:?} references missing mesh {index}", node.name);
                    continue;
                };
                match mesh.out_of_range_index() {
                    None => meshes.push(MeshData::from_imported(mesh)),
                    Some(bad) => log::warn!(
                        "Mesh {:?} index {bad} exceeds {} vertices, skipping",
                        mesh.name,
                        mesh.positions.len()
                    ),
                }
            }
            stack.extend(node.children.iter().rev());
        }

        Self { meshes }
    }

    pub fn meshes(&self) -> &[MeshData] { &self.meshes }

    pub fn is_empty(&self) -> bool { self.meshes.is_empty() }

    pub fn vertex_count(&self) -> usize { self.meshes.iter().map(|m| m.vertices.len()).sum() }

    pub fn index_count(&self) -> usize { self.meshes.iter().map(|m| m.indices.len()).sum() }
}
