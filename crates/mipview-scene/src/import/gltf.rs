use {
    super::{
        process, ImportedMesh, ImportedNode, ImportedScene, PostProcess, SceneImporter,
        TangentFrame,
    },
    anyhow::{anyhow, Result},
    glam::{Vec2, Vec3, Vec4},
    std::{collections::HashSet, path::Path},
};

/// glTF 2.0 (`.gltf` with external or embedded buffers, and `.glb`). Images are
/// never decoded; textures come from the application's own list.
pub struct GltfImporter;

impl SceneImporter for GltfImporter {
    fn name(&self) -> &'static str { "glTF" }

    fn extensions(&self) -> &'static [&'static str] { &["gltf", "glb"] }

    fn import(&self, path: &Path, _flags: PostProcess) -> Result<ImportedScene> {
        log::debug!("Reading glTF scene from {path:?}");

        let ::gltf::Gltf { document, blob } = ::gltf::Gltf::open(path)?;
        let buffers = ::gltf::import_buffers(&document, path.parent(), blob)?;

        let mut meshes = vec![];
        let mut mesh_primitives = vec![];
        for mesh in document.meshes() {
            let start = meshes.len();
            meshes.extend(read_mesh(&mesh, &buffers));
            mesh_primitives.push((start..meshes.len()).collect::<Vec<_>>());
        }

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| anyhow!("No scenes found in {path:?}"))?;

        let mut visited = HashSet::new();
        let root = ImportedNode {
            name: scene.name().unwrap_or("ROOT").to_string(),
            meshes: vec![],
            children: scene
                .nodes()
                .filter_map(|node| read_node(node, &mesh_primitives, &mut visited))
                .collect(),
        };

        log::debug!(
            "Read glTF scene {:?} -> {} node(s), {} mesh(es)",
            path,
            visited.len(),
            meshes.len(),
        );

        Ok(ImportedScene {
            meshes,
            root: Some(root),
        })
    }
}

fn read_node(
    node: ::gltf::Node,
    mesh_primitives: &[Vec<usize>],
    visited: &mut HashSet<usize>,
) -> Option<ImportedNode> {
    let index = node.index();
    if !visited.insert(index) {
        log::warn!("Skipping glTF node {index}, already visited");
        return None;
    }

    let name = match node.name() {
        Some(name) => name.to_string(),
        None => format!("node-{index:02}"),
    };
    let meshes = node
        .mesh()
        .and_then(|mesh| mesh_primitives.get(mesh.index()))
        .cloned()
        .unwrap_or_default();
    let children = node
        .children()
        .filter_map(|child| read_node(child, mesh_primitives, visited))
        .collect();

    Some(ImportedNode {
        name,
        meshes,
        children,
    })
}

fn read_mesh(mesh: &::gltf::Mesh, buffers: &[::gltf::buffer::Data]) -> Vec<ImportedMesh> {
    let base = match mesh.name() {
        Some(name) => name.to_string(),
        None => format!("mesh-{:03}", mesh.index()),
    };

    mesh.primitives()
        .enumerate()
        .filter_map(|(i, primitive)| {
            let name = match mesh.primitives().len() {
                1 => base.clone(),
                _ => format!("{base}-{i}"),
            };
            read_primitive(&primitive, buffers, name)
        })
        .collect()
}

fn read_primitive(
    primitive: &::gltf::Primitive,
    buffers: &[::gltf::buffer::Data],
    name: String,
) -> Option<ImportedMesh> {
    use ::gltf::mesh::Mode;

    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data[..]));

    let Some(positions) = reader.read_positions() else {
        log::warn!("Primitive {name:?} has no positions, skipping");
        return None;
    };
    let positions = positions.map(Vec3::from).collect::<Vec<_>>();
    let count = positions.len();

    let indices = reader
        .read_indices()
        .map(|indices| indices.into_u32().collect::<Vec<_>>())
        .unwrap_or_else(|| (0..count as u32).collect());
    let indices = match primitive.mode() {
        Mode::Triangles => indices,
        Mode::TriangleStrip => process::strip_to_list(&indices),
        Mode::TriangleFan => process::fan_to_list(&indices),
        mode => {
            log::warn!("Primitive {name:?} has unsupported mode {mode:?}, skipping");
            return None;
        }
    };

    if let Some(index) = indices.iter().find(|&&index| index as usize >= count) {
        log::warn!("Primitive {name:?} index {index} exceeds {count} vertices, skipping");
        return None;
    }

    let normals = reader
        .read_normals()
        .map(|normals| normals.map(Vec3::from).collect::<Vec<_>>())
        .filter(|normals| normals.len() == count);
    // glTF puts the uv origin top-left, the renderer expects it bottom-left.
    let tex_coords = reader
        .read_tex_coords(0)
        .map(|coords| {
            coords
                .into_f32()
                .map(|[u, v]| Vec2::new(u, 1.0 - v))
                .collect::<Vec<_>>()
        })
        .filter(|coords| coords.len() == count);
    let tangents = match (&normals, reader.read_tangents()) {
        (Some(normals), Some(tangents)) => Some(
            tangents
                .map(Vec4::from)
                .zip(normals)
                .map(|(t, n)| TangentFrame {
                    tangent: t.truncate(),
                    bitangent: n.cross(t.truncate()) * t.w,
                })
                .collect::<Vec<_>>(),
        )
        .filter(|frames| frames.len() == count),
        _ => None,
    };

    log::debug!(
        "Read glTF primitive {name:?} -> {count} vertices, {} indices",
        indices.len()
    );

    Some(ImportedMesh {
        name,
        positions,
        normals,
        tex_coords,
        tangents,
        indices,
    })
}
