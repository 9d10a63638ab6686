use {
    super::{ImportedMesh, ImportedNode, ImportedScene, PostProcess, SceneImporter},
    anyhow::Result,
    glam::{Vec2, Vec3},
    std::path::Path,
};

/// Wavefront OBJ. Each object or group becomes one mesh under a single root
/// node; materials are ignored.
pub struct ObjImporter;

impl SceneImporter for ObjImporter {
    fn name(&self) -> &'static str { "OBJ" }

    fn extensions(&self) -> &'static [&'static str] { &["obj"] }

    fn import(&self, path: &Path, flags: PostProcess) -> Result<ImportedScene> {
        log::debug!("Reading OBJ scene from {path:?}");

        let triangulate = flags.contains(PostProcess::TRIANGULATE);
        let options = ::tobj::LoadOptions {
            single_index: true,
            triangulate,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _materials) = ::tobj::load_obj(path, &options)?;

        let meshes = models
            .into_iter()
            .filter_map(|model| read_model(model, triangulate))
            .collect::<Vec<_>>();
        let children = meshes
            .iter()
            .enumerate()
            .map(|(index, mesh)| ImportedNode {
                name: mesh.name.clone(),
                meshes: vec![index],
                children: vec![],
            })
            .collect();
        let root = ImportedNode {
            name: path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("ROOT")
                .to_string(),
            meshes: vec![],
            children,
        };

        log::debug!("Read OBJ scene {:?} -> {} mesh(es)", path, meshes.len());

        Ok(ImportedScene {
            meshes,
            root: Some(root),
        })
    }
}

fn read_model(model: ::tobj::Model, triangulate: bool) -> Option<ImportedMesh> {
    let ::tobj::Model { mesh, name, .. } = model;

    if mesh.positions.is_empty() || mesh.indices.is_empty() {
        log::warn!("OBJ object {name:?} has no faces, skipping");
        return None;
    }
    if !triangulate && mesh.face_arities.iter().any(|&arity| arity != 3) {
        log::warn!("OBJ object {name:?} has non-triangle faces, skipping");
        return None;
    }

    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(Vec3::from_slice)
        .collect::<Vec<_>>();
    let count = positions.len();
    let normals = Some(
        mesh.normals
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .collect::<Vec<_>>(),
    )
    .filter(|normals| normals.len() == count);
    let tex_coords = Some(
        mesh.texcoords
            .chunks_exact(2)
            .map(Vec2::from_slice)
            .collect::<Vec<_>>(),
    )
    .filter(|coords| coords.len() == count);

    Some(ImportedMesh {
        name,
        positions,
        normals,
        tex_coords,
        tangents: None,
        indices: mesh.indices,
    })
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::PathBuf};

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    #[test]
    fn test_import_triangle() {
        let scene = ObjImporter
            .import(&fixture("triangle.obj"), PostProcess::empty())
            .unwrap();

        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.name, "triangle");
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.normals, None);
        assert_eq!(mesh.tex_coords, None);
        assert_eq!(scene.root.unwrap().children.len(), 1);
    }

    #[test]
    fn test_import_objects_become_children() {
        let scene = ObjImporter
            .import(&fixture("two_objects.obj"), PostProcess::default())
            .unwrap();

        assert_eq!(scene.meshes.len(), 2);
        assert_eq!(scene.meshes[0].tex_coords.as_ref().map(Vec::len), Some(3));
        assert_eq!(scene.meshes[1].positions.len(), 4);
        assert_eq!(scene.meshes[1].indices.len(), 6);

        let root = scene.root.unwrap();
        let children = root.children.iter().map(|c| c.meshes.clone()).collect::<Vec<_>>();
        assert_eq!(children, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_quads_skipped_without_triangulation() {
        let scene = ObjImporter
            .import(&fixture("two_objects.obj"), PostProcess::empty())
            .unwrap();

        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].name, "first");
    }

    #[test]
    fn test_import_empty_file() {
        let scene = ObjImporter
            .import(&fixture("empty.obj"), PostProcess::default())
            .unwrap();

        assert_eq!(scene.is_incomplete(), true);
        assert_eq!(scene.root.is_some(), true);
    }

    #[test]
    fn test_import_missing_file() {
        let result = ObjImporter.import(&fixture("missing.obj"), PostProcess::default());
        assert!(result.is_err());
    }
}
