//! Unit meshes the canvas scales into place.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

pub const SPHERE_DETAIL: (usize, usize) = (24, 16);
pub const CONE_DETAIL: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Triangle list.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
}

/// Radius-1 sphere, `detail_x` slices around and `detail_y` stacks from pole to pole.
pub fn unit_sphere(detail_x: usize, detail_y: usize) -> Mesh {
    let detail_x = detail_x.max(3);
    let detail_y = detail_y.max(2);
    let point = |i: usize, j: usize| {
        let theta = PI * j as f32 / detail_y as f32;
        let phi = TAU * i as f32 / detail_x as f32;
        let p = Vec3::new(theta.sin() * phi.sin(), theta.cos(), theta.sin() * phi.cos());
        MeshVertex {
            position: p,
            normal: p,
        }
    };

    let mut vertices = Vec::with_capacity(detail_x * detail_y * 6);
    for j in 0..detail_y {
        for i in 0..detail_x {
            let (a, b, c, d) = (point(i, j), point(i + 1, j), point(i + 1, j + 1), point(i, j + 1));
            vertices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }
    Mesh { vertices }
}

/// Radius-1, height-1 cone centered on the origin: apex at y = -0.5, closed
/// base at y = +0.5.
pub fn unit_cone(detail: usize) -> Mesh {
    let detail = detail.max(3);
    let apex = Vec3::new(0.0, -0.5, 0.0);
    let base_center = Vec3::new(0.0, 0.5, 0.0);
    let rim = |i: usize| {
        let phi = TAU * i as f32 / detail as f32;
        (
            Vec3::new(phi.cos(), 0.5, phi.sin()),
            Vec3::new(phi.cos(), -1.0, phi.sin()).normalize(),
        )
    };

    let mut vertices = Vec::with_capacity(detail * 6);
    for i in 0..detail {
        let (p0, n0) = rim(i);
        let (p1, n1) = rim(i + 1);
        vertices.extend_from_slice(&[
            MeshVertex { position: apex, normal: (n0 + n1).normalize() },
            MeshVertex { position: p1, normal: n1 },
            MeshVertex { position: p0, normal: n0 },
            MeshVertex { position: base_center, normal: Vec3::Y },
            MeshVertex { position: p0, normal: Vec3::Y },
            MeshVertex { position: p1, normal: Vec3::Y },
        ]);
    }
    Mesh { vertices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = unit_sphere(24, 16);
        assert_eq!(mesh.vertices.len(), 24 * 16 * 6);
        for v in &mesh.vertices {
            assert!((v.position.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.position, v.normal);
        }
    }

    #[test]
    fn cone_fits_unit_box() {
        let mesh = unit_cone(CONE_DETAIL);
        assert_eq!(mesh.vertices.len(), CONE_DETAIL * 6);
        for v in &mesh.vertices {
            assert!((-0.5..=0.5).contains(&v.position.y));
            assert!(v.position.x.hypot(v.position.z) <= 1.0 + 1e-5);
            assert!((v.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn low_detail_is_raised_to_a_closed_mesh() {
        assert_eq!(unit_sphere(0, 0).vertices.len(), 3 * 2 * 6);
        assert_eq!(unit_cone(1).vertices.len(), 3 * 6);
    }
}
