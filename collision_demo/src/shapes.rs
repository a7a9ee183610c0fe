//! Procedural meshes for the demo

use sphere_bvh::prelude::*;

/// Latitude/longitude sphere centered on the origin, shaded from pole to pole
pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Result<Mesh, MeshError> {
    let mesh = Mesh::uv_sphere(radius, rings, segments)?;
    let colors = mesh
        .vertices()
        .iter()
        .map(|vertex| {
            let shade = if radius > 0.0 { 0.5 + 0.5 * vertex.y / radius } else { 1.0 };
            Vec3::new(shade, 0.5, 1.0 - shade)
        })
        .collect();
    mesh.with_colors(colors)
}

/// Square grid in the XZ plane, centered on the origin, facing +Y
pub fn grid_plane(size: f32, divisions: u32) -> Result<Mesh, MeshError> {
    let divisions = divisions.max(1);
    let step = size / divisions as f32;
    let half = size / 2.0;
    let row = divisions + 1;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for z in 0..row {
        for x in 0..row {
            vertices.push(Point3::new(x as f32 * step - half, 0.0, z as f32 * step - half));
        }
    }

    let mut triangles = Vec::with_capacity((2 * divisions * divisions) as usize);
    for z in 0..divisions {
        for x in 0..divisions {
            let corner = z * row + x;
            triangles.push([corner, corner + row, corner + 1]);
            triangles.push([corner + 1, corner + row, corner + row + 1]);
        }
    }

    let colors = vec![Vec3::new(0.4, 0.4, 0.4); vertices.len()];
    Mesh::new(vertices, triangles)?.with_colors(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_sphere_is_shaded_pole_to_pole() {
        let mesh = uv_sphere(1.5, 6, 10).unwrap();
        assert_eq!(mesh.colors().len(), mesh.vertex_count());
        assert_eq!(mesh.colors()[0], Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(mesh.colors()[mesh.vertex_count() - 1], Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_grid_plane_faces_up() {
        let mesh = grid_plane(4.0, 4).unwrap();
        assert_eq!(mesh.triangle_count(), 32);
        let area: f32 = mesh.triangles_iter().map(|t| t.area()).sum();
        assert!((area - 16.0).abs() < 1e-4);
        for triangle in mesh.triangles_iter() {
            assert!(triangle.normal().y > 0.0);
        }
    }
}
