//! Per-vertex normals from an indexed triangle list.

use glam::Vec3;

/// Area-weighted vertex normals.
///
/// Each face contributes its unnormalized cross product `(b - a) x (c - a)`
/// to its three vertices, so larger triangles weigh more. Vertices with no
/// incident face keep a zero normal.
pub fn vertex_normals(positions: &[Vec3], faces: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for &[a, b, c] in faces {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let n = face_normal(positions[a], positions[b], positions[c]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }

    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}

/// Unnormalized face normal; sign follows the winding of `a, b, c`.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}
