//! Marker sphere geometry.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Vertex of the marker mesh.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Unit UV sphere with `width_segments` around and `height_segments` from
/// pole to pole.
///
/// Vertices form a `(width_segments + 1) x (height_segments + 1)` grid with a
/// duplicated seam column; the degenerate triangles at the poles are skipped.
pub fn uv_sphere(width_segments: u16, height_segments: u16) -> (Vec<MeshVertex>, Vec<u16>) {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let row = width_segments + 1;

    let mut vertices = Vec::with_capacity(row as usize * (height_segments as usize + 1));
    for iy in 0..=height_segments {
        let theta = iy as f32 / height_segments as f32 * PI;
        for ix in 0..=width_segments {
            let phi = ix as f32 / width_segments as f32 * TAU;
            let p = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            let n = p.normalize_or_zero();
            vertices.push(MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
    }

    let mut indices = Vec::new();
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        let (vertices, indices) = uv_sphere(16, 16);
        assert_eq!(vertices.len(), 17 * 17);
        // Two triangles per quad, minus one per quad on each polar row.
        assert_eq!(indices.len(), 16 * 15 * 2 * 3);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let (vertices, _) = uv_sphere(16, 16);
        for v in &vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_poles() {
        let (vertices, _) = uv_sphere(8, 4);
        assert!((vertices[0].position[1] - 1.0).abs() < 1e-6);
        assert!((vertices.last().unwrap().position[1] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_segment_minimums() {
        let (vertices, indices) = uv_sphere(0, 0);
        assert_eq!(vertices.len(), 4 * 3);
        assert!(!indices.is_empty());
    }
}
