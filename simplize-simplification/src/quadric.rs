//! Quadric error metrics
//!
//! Each vertex stores the sum of the squared-distance quadrics of the planes
//! of its incident faces. An edge is scored by adding the quadrics of its two
//! endpoints and minimizing the resulting quadratic form.

use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use simplize_core::{to_f64, EdgeId, HalfEdgeMesh, Point3f, VertexId};

/// Below this determinant the 3x3 system is treated as singular.
const SINGULAR_EPSILON: f64 = 1e-10;

/// Fundamental error quadric `p p^T` of the plane through a triangle.
/// Degenerate triangles contribute nothing.
pub fn plane_quadric(p0: &Point3f, p1: &Point3f, p2: &Point3f) -> Matrix4<f64> {
    let (p0, p1, p2) = (to_f64(p0), to_f64(p1), to_f64(p2));
    let n = (p1 - p0).cross(&(p2 - p0));
    let len = n.norm();
    if !len.is_finite() || len <= f64::EPSILON {
        return Matrix4::zeros();
    }
    let n = n / len;
    let plane = Vector4::new(n.x, n.y, n.z, -n.dot(&p0.coords));
    plane * plane.transpose()
}

/// Quadratic form `v^T Q v` at a point, clamped to be non-negative.
pub fn quadric_error(q: &Matrix4<f64>, p: &Point3f) -> f64 {
    let p = to_f64(p);
    let v = Vector4::new(p.x, p.y, p.z, 1.0);
    (v.transpose() * q * v)[0].max(0.0)
}

/// Sum of the plane quadrics of every face around a vertex.
pub fn vertex_quadric(mesh: &HalfEdgeMesh, v: VertexId) -> Matrix4<f64> {
    mesh.outgoing_half_edges(v)
        .into_iter()
        .map(|h| {
            let [p0, p1, p2] = mesh.face_positions(mesh.half_edge(h).face);
            plane_quadric(&p0, &p1, &p2)
        })
        .fold(Matrix4::zeros(), |acc, q| acc + q)
}

/// Cache the quadric of every live vertex.
pub fn compute_vertex_quadrics(mesh: &mut HalfEdgeMesh) {
    let snapshot: &HalfEdgeMesh = mesh;
    let quadrics: Vec<(VertexId, Matrix4<f64>)> = snapshot
        .live_vertices()
        .map(|v| (v.id, vertex_quadric(snapshot, v.id)))
        .collect();
    for (v, q) in quadrics {
        mesh.vertex_mut(v).quadric = q;
    }
}

/// Optimal contraction point and its cost for an edge, from the cached
/// endpoint quadrics.
///
/// When the combined quadric cannot be inverted the cheapest of the
/// midpoint and the two endpoints is used instead.
pub fn evaluate_contraction(mesh: &HalfEdgeMesh, edge: EdgeId) -> (Point3f, f64) {
    let (a, b) = mesh.edge_vertices(edge);
    let (va, vb) = (mesh.vertex(a), mesh.vertex(b));
    let q = va.quadric + vb.quadric;

    let system: Matrix3<f64> = q.fixed_view::<3, 3>(0, 0).into_owned();
    let rhs: Vector3<f64> = q.fixed_view::<3, 1>(0, 3).into_owned();

    if system.determinant().abs() > SINGULAR_EPSILON {
        if let Some(inv) = system.try_inverse() {
            let p = -(inv * rhs);
            let optimal = Point3f::new(p.x as f32, p.y as f32, p.z as f32);
            if optimal.iter().all(|c| c.is_finite()) {
                return (optimal, quadric_error(&q, &optimal));
            }
        }
    }

    let midpoint = Point3f::from((va.position.coords + vb.position.coords) * 0.5);
    [midpoint, va.position, vb.position]
        .into_iter()
        .map(|p| (p, quadric_error(&q, &p)))
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .unwrap_or((midpoint, 0.0))
}

/// Recompute the contraction target and cost of one edge and mark the
/// cached values fresh.
pub fn update_contraction(mesh: &mut HalfEdgeMesh, edge: EdgeId) {
    let (target, cost) = evaluate_contraction(mesh, edge);
    let e = mesh.edge_mut(edge);
    e.target = target;
    e.cost = cost;
    e.visited = false;
}

/// Cache the contraction target and cost of every live edge.
pub fn compute_edge_contractions(mesh: &mut HalfEdgeMesh) {
    let edges: Vec<EdgeId> = mesh.live_edges().map(|e| e.id).collect();
    for edge in edges {
        update_contraction(mesh, edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use simplize_core::primitives;

    #[test]
    fn test_plane_quadric_measures_squared_distance() {
        let q = plane_quadric(
            &Point3f::new(0.0, 0.0, 0.0),
            &Point3f::new(1.0, 0.0, 0.0),
            &Point3f::new(0.0, 1.0, 0.0),
        );
        assert_relative_eq!(quadric_error(&q, &Point3f::new(3.0, -2.0, 0.0)), 0.0);
        assert_relative_eq!(quadric_error(&q, &Point3f::new(0.5, 0.5, 2.0)), 4.0, epsilon = 1e-9);
        assert_relative_eq!(q, q.transpose());
    }

    #[test]
    fn test_degenerate_triangle_has_zero_quadric() {
        let p = Point3f::new(1.0, 1.0, 1.0);
        let q = plane_quadric(&p, &p, &Point3f::new(2.0, 2.0, 2.0));
        assert_eq!(q, Matrix4::zeros());
    }

    #[test]
    fn test_cube_corner_has_zero_error_at_itself() {
        let mut mesh = HalfEdgeMesh::from_soup(&primitives::cube()).unwrap();
        compute_vertex_quadrics(&mut mesh);
        for v in mesh.vertices() {
            assert_relative_eq!(quadric_error(&v.quadric, &v.position), 0.0, epsilon = 1e-9);
            // Three orthogonal planes meet at a corner: moving off it costs.
            let off = v.position + simplize_core::Vector3f::new(0.1, 0.1, 0.1);
            assert!(quadric_error(&v.quadric, &off) > 0.0);
        }
    }

    #[test]
    fn test_cube_edge_contraction_targets() {
        let mut mesh = HalfEdgeMesh::from_soup(&primitives::cube()).unwrap();
        compute_vertex_quadrics(&mut mesh);
        compute_edge_contractions(&mut mesh);
        for e in mesh.edges() {
            assert!(e.cost > 0.0, "corners of a cube never merge for free");
            assert!(e.cost.is_finite());
            for c in e.target.iter() {
                assert!((-1e-4..=1.0 + 1e-4).contains(c), "target {:?} left the cube", e.target);
            }
        }
    }

    #[test]
    fn test_flat_region_falls_back_to_candidates() {
        // A nearly flat octahedron: the equator vertices see almost
        // coplanar faces, so the combined systems are close to singular.
        let mut soup = primitives::octahedron();
        soup.vertices[4].z = 1e-3;
        soup.vertices[5].z = -1e-3;
        let mut mesh = HalfEdgeMesh::from_soup(&soup).unwrap();
        compute_vertex_quadrics(&mut mesh);
        compute_edge_contractions(&mut mesh);
        for e in mesh.edges() {
            assert!(e.cost.is_finite());
            assert!(e.target.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn test_singular_system_picks_cheapest_candidate() {
        // With zeroed quadrics the system is singular and every candidate
        // costs zero, so the midpoint wins.
        let mut mesh = HalfEdgeMesh::from_soup(&primitives::tetrahedron()).unwrap();
        let edge = mesh.edges()[0].id;
        let (a, b) = mesh.edge_vertices(edge);
        let (target, cost) = evaluate_contraction(&mesh, edge);
        let mid = Point3f::from((mesh.vertex(a).position.coords + mesh.vertex(b).position.coords) * 0.5);
        assert_eq!(cost, 0.0);
        assert_relative_eq!(target, mid);

        mesh.edge_mut(edge).visited = true;
        update_contraction(&mut mesh, edge);
        assert_relative_eq!(mesh.edge(edge).target, mid);
        assert!(!mesh.edge(edge).visited);
    }
}
