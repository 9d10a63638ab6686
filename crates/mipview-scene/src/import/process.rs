use {
    super::{ImportedMesh, ImportedScene, PostProcess, TangentFrame},
    crate::model::{DEFAULT_BITANGENT, DEFAULT_NORMAL, DEFAULT_TANGENT},
    glam::{Vec2, Vec3},
    itertools::Itertools,
};

const UV_EPSILON: f32 = 1e-8;

/// Runs the format-independent steps in `flags` over every mesh of `scene`.
/// Channels the importer already provided are never overwritten.
pub fn apply(scene: &mut ImportedScene, flags: PostProcess) {
    for mesh in &mut scene.meshes {
        apply_mesh(mesh, flags);
    }
}

fn apply_mesh(mesh: &mut ImportedMesh, flags: PostProcess) {
    if flags.contains(PostProcess::GEN_NORMALS) && mesh.normals.is_none() {
        log::debug!("Generating normals for mesh {:?}", mesh.name);
        mesh.normals = Some(generate_normals(&mesh.positions, &mesh.indices));
    }

    if flags.contains(PostProcess::CALC_TANGENT_SPACE) && mesh.tangents.is_none() {
        if let (Some(normals), Some(tex_coords)) = (&mesh.normals, &mesh.tex_coords) {
            log::debug!("Calculating tangent space for mesh {:?}", mesh.name);
            mesh.tangents = Some(calculate_tangents(
                &mesh.positions,
                normals,
                tex_coords,
                &mesh.indices,
            ));
        }
    }
}

fn triangles(indices: &[u32]) -> impl Iterator<Item = [usize; 3]> + '_ {
    indices
        .chunks_exact(3)
        .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
}

/// Smooth per-vertex normals. Face normals are accumulated unnormalized, so
/// larger faces weigh more.
pub fn generate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for [a, b, c] in triangles(indices) {
        let (Some(p0), Some(p1), Some(p2)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let face = (*p1 - *p0).cross(*p2 - *p0);
        for i in [a, b, c] {
            normals[i] += face;
        }
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(DEFAULT_NORMAL))
        .collect()
}

/// Tangent and bitangent per vertex from the uv gradient of each face,
/// orthogonalized against the vertex normal.
pub fn calculate_tangents(
    positions: &[Vec3],
    normals: &[Vec3],
    tex_coords: &[Vec2],
    indices: &[u32],
) -> Vec<TangentFrame> {
    let mut tangents = vec![Vec3::ZERO; positions.len()];
    let mut bitangents = vec![Vec3::ZERO; positions.len()];

    for [a, b, c] in triangles(indices) {
        if [a, b, c].iter().any(|&i| i >= positions.len() || i >= tex_coords.len()) {
            continue;
        }

        let (e1, e2) = (positions[b] - positions[a], positions[c] - positions[a]);
        let (d1, d2) = (tex_coords[b] - tex_coords[a], tex_coords[c] - tex_coords[a]);
        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < UV_EPSILON {
            continue;
        }

        let tangent = (e1 * d2.y - e2 * d1.y) / det;
        let bitangent = (e2 * d1.x - e1 * d2.x) / det;
        for i in [a, b, c] {
            tangents[i] += tangent;
            bitangents[i] += bitangent;
        }
    }

    tangents
        .into_iter()
        .zip(bitangents)
        .enumerate()
        .map(|(i, (t, b))| {
            let n = normals.get(i).copied().unwrap_or(DEFAULT_NORMAL);
            TangentFrame {
                tangent: (t - n * n.dot(t)).try_normalize().unwrap_or(DEFAULT_TANGENT),
                bitangent: (b - n * n.dot(b)).try_normalize().unwrap_or(DEFAULT_BITANGENT),
            }
        })
        .collect()
}

/// Triangle strip to list, flipping every other triangle to keep the winding.
pub fn strip_to_list(indices: &[u32]) -> Vec<u32> {
    indices
        .iter()
        .copied()
        .tuple_windows()
        .enumerate()
        .filter(|(_, (a, b, c))| a != b && b != c && a != c)
        .flat_map(|(i, (a, b, c))| match i % 2 {
            0 => [a, b, c],
            _ => [a, c, b],
        })
        .collect()
}

pub fn fan_to_list(indices: &[u32]) -> Vec<u32> {
    let Some((&first, rest)) = indices.split_first() else {
        return vec![];
    };

    rest.iter()
        .copied()
        .tuple_windows()
        .flat_map(|(b, c)| [first, b, c])
        .collect()
}
