mod gltf;
mod obj;
pub mod process;

use {
    anyhow::{anyhow, Result},
    bitflags::bitflags,
    derive_more::Debug,
    glam::{Vec2, Vec3},
    std::path::Path,
    tracing::instrument,
};

pub use self::{gltf::GltfImporter, obj::ObjImporter};

bitflags! {
    /// Post-processing steps requested from an import.
    #[derive(Clone, Copy, std::fmt::Debug, PartialEq, Eq, Hash)]
    pub struct PostProcess: u32 {
        const TRIANGULATE = 1 << 0;
        const GEN_NORMALS = 1 << 1;
        const CALC_TANGENT_SPACE = 1 << 2;
    }
}

impl Default for PostProcess {
    fn default() -> Self {
        Self::TRIANGULATE | Self::GEN_NORMALS | Self::CALC_TANGENT_SPACE
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TangentFrame {
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

/// Importer-neutral mesh. Optional channels are either absent or hold exactly
/// one entry per position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedMesh {
    pub name: String,
    #[debug("{}", positions.len())]
    pub positions: Vec<Vec3>,
    #[debug("{:?}", normals.as_ref().map(Vec::len))]
    pub normals: Option<Vec<Vec3>>,
    #[debug("{:?}", tex_coords.as_ref().map(Vec::len))]
    pub tex_coords: Option<Vec<Vec2>>,
    #[debug("{:?}", tangents.as_ref().map(Vec::len))]
    pub tangents: Option<Vec<TangentFrame>>,
    #[debug("{}", indices.len())]
    pub indices: Vec<u32>,
}

impl ImportedMesh {
    /// First index that does not name a vertex of this mesh.
    pub fn out_of_range_index(&self) -> Option<u32> {
        let count = self.positions.len();
        self.indices.iter().copied().find(|&index| index as usize >= count)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedNode {
    pub name: String,
    pub meshes: Vec<usize>,
    #[debug("{}", children.len())]
    pub children: Vec<ImportedNode>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportedScene {
    pub meshes: Vec<ImportedMesh>,
    pub root: Option<ImportedNode>,
}

impl ImportedScene {
    /// A scene without any mesh data is treated like a partial import.
    pub fn is_incomplete(&self) -> bool { self.meshes.is_empty() }
}

pub trait SceneImporter {
    fn name(&self) -> &'static str;

    fn extensions(&self) -> &'static [&'static str];

    fn import(&self, path: &Path, flags: PostProcess) -> Result<ImportedScene>;

    fn can_import(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

pub fn importers() -> [&'static dyn SceneImporter; 2] { [&GltfImporter, &ObjImporter] }

/// Imports `path` with the importer matching its extension, then applies the
/// format-independent post-processing steps in `flags`.
#[instrument(level = "debug")]
pub fn import_scene(path: &Path, flags: PostProcess) -> Result<ImportedScene> {
    let importer = importers()
        .into_iter()
        .find(|importer| importer.can_import(path))
        .ok_or_else(|| anyhow!("No importer for {path:?}"))?;

    log::debug!("Importing {path:?} with {} importer", importer.name());
    let mut scene = importer.import(path, flags)?;
    process::apply(&mut scene, flags);

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_importer_selection() {
        let pick = |path: &str| {
            importers()
                .into_iter()
                .find(|i| i.can_import(Path::new(path)))
                .map(|i| i.name())
        };

        assert_eq!(pick("models/box.gltf"), Some("glTF"));
        assert_eq!(pick("models/box.GLB"), Some("glTF"));
        assert_eq!(pick("models/teapot.obj"), Some("OBJ"));
        assert_eq!(pick("models/teapot.fbx"), None);
        assert_eq!(pick("models/teapot"), None);
    }

    #[test]
    fn test_default_flags() {
        let flags = PostProcess::default();
        assert!(flags.contains(PostProcess::TRIANGULATE));
        assert!(flags.contains(PostProcess::GEN_NORMALS));
        assert!(flags.contains(PostProcess::CALC_TANGENT_SPACE));
    }

    #[test]
    fn test_unknown_extension_fails() {
        let result = import_scene(Path::new("scene.fbx"), PostProcess::default());
        assert!(result.is_err());
    }
}
