use {
    crate::model::{MeshData, Vertex},
    glam::{vec2, vec3, Vec3},
};

/// Square in the XZ plane centred on the origin, facing +Y. Texture coordinates
/// run from 0 to `uv_repeat` so a repeating sampler tiles the texture.
pub fn floor_plane(half_extent: f32, uv_repeat: f32) -> MeshData {
    let (h, r) = (half_extent, uv_repeat);
    let vertices = vec![
        Vertex::new(vec3(-h, 0.0, h), Vec3::Y, vec2(0.0, 0.0)),
        Vertex::new(vec3(h, 0.0, h), Vec3::Y, vec2(r, 0.0)),
        Vertex::new(vec3(h, 0.0, -h), Vec3::Y, vec2(r, r)),
        Vertex::new(vec3(-h, 0.0, -h), Vec3::Y, vec2(0.0, r)),
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];

    MeshData::default()
        .name("primitive-floor")
        .vertices(vertices)
        .indices(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_plane() {
        let floor = floor_plane(100.0, 50.0);

        assert_eq!(floor.vertices.len(), 4);
        assert_eq!(floor.indices, vec![0, 1, 2, 0, 2, 3]);
        for vertex in &floor.vertices {
            assert_eq!(vertex.position.y, 0.0);
            assert_eq!(vertex.position.x.abs(), 100.0);
            assert_eq!(vertex.normal, Vec3::Y);
            assert!(vertex.uv.cmpge(vec2(0.0, 0.0)).all());
            assert!(vertex.uv.cmple(vec2(50.0, 50.0)).all());
        }
    }

    #[test]
    fn test_floor_plane_faces_up() {
        let floor = floor_plane(1.0, 1.0);
        let [a, b, c] = [0, 1, 2].map(|i| floor.vertices[floor.indices[i] as usize].position);

        assert!((b - a).cross(c - a).normalize().abs_diff_eq(Vec3::Y, 1e-6));
    }
}
