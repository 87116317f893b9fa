//! Closed, consistently wound triangle soups
//!
//! All generators produce outward-facing counter-clockwise triangles, so
//! every directed edge appears exactly once and has a reversed partner.

use crate::point::Point3f;
use crate::soup::TriangleSoup;
use std::f32::consts::PI;

/// Tetrahedron with one face on the `z = 0` plane (volume 1/6)
pub fn tetrahedron() -> TriangleSoup {
    TriangleSoup::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.5, 1.0, 0.0),
            Point3f::new(0.5, 0.5, 1.0),
        ],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
}

/// Unit cube `[0, 1]^3`, each side split along a diagonal (12 triangles)
pub fn cube() -> TriangleSoup {
    TriangleSoup::from_vertices_and_faces(
        vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(1.0, 1.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(1.0, 0.0, 1.0),
            Point3f::new(1.0, 1.0, 1.0),
            Point3f::new(0.0, 1.0, 1.0),
        ],
        vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 7, 6],
            [3, 6, 2],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ],
    )
}

/// Regular octahedron with unit circumradius
pub fn octahedron() -> TriangleSoup {
    TriangleSoup::from_vertices_and_faces(
        vec![
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(-1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, -1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
            Point3f::new(0.0, 0.0, -1.0),
        ],
        vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Latitude/longitude sphere with single-vertex poles.
///
/// `rings` is the number of latitude bands (at least 2) and `segments` the
/// number of longitude steps (at least 3).
pub fn uv_sphere(rings: usize, segments: usize, radius: f32) -> TriangleSoup {
    let rings = rings.max(2);
    let segments = segments.max(3);

    let mut soup = TriangleSoup::new();
    let north = soup.add_vertex(Point3f::new(0.0, 0.0, radius));
    for i in 1..rings {
        let theta = PI * i as f32 / rings as f32;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f32 / segments as f32;
            soup.add_vertex(Point3f::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }
    let south = soup.add_vertex(Point3f::new(0.0, 0.0, -radius));

    let ring = |i: usize, j: usize| 1 + (i - 1) * segments + j % segments;

    for j in 0..segments {
        soup.add_face([north, ring(1, j), ring(1, j + 1)]);
    }
    for i in 1..rings - 1 {
        for j in 0..segments {
            let (a0, a1) = (ring(i, j), ring(i, j + 1));
            let (b0, b1) = (ring(i + 1, j), ring(i + 1, j + 1));
            soup.add_face([a0, b0, b1]);
            soup.add_face([a0, b1, a1]);
        }
    }
    for j in 0..segments {
        soup.add_face([south, ring(rings - 1, j + 1), ring(rings - 1, j)]);
    }

    soup
}

/// Torus around the z axis (genus 1).
///
/// `major` and `minor` are the sample counts around the central circle and
/// the tube (each at least 3).
pub fn torus(major: usize, minor: usize, major_radius: f32, minor_radius: f32) -> TriangleSoup {
    let major = major.max(3);
    let minor = minor.max(3);

    let mut soup = TriangleSoup::new();
    for i in 0..major {
        let u = 2.0 * PI * i as f32 / major as f32;
        for j in 0..minor {
            let v = 2.0 * PI * j as f32 / minor as f32;
            let r = major_radius + minor_radius * v.cos();
            soup.add_vertex(Point3f::new(r * u.cos(), r * u.sin(), minor_radius * v.sin()));
        }
    }

    let index = |i: usize, j: usize| (i % major) * minor + j % minor;
    for i in 0..major {
        for j in 0..minor {
            let (a, b) = (index(i, j), index(i + 1, j));
            let (c, d) = (index(i + 1, j + 1), index(i, j + 1));
            soup.add_face([a, b, c]);
            soup.add_face([a, c, d]);
        }
    }

    soup
}
