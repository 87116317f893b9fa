//! Edge contraction on a closed half-edge mesh
//!
//! Contracting the edge `v0 -> v1` merges `v1` into `v0`, kills the two
//! triangles on the edge and pairs up the four outer half-edges that used
//! to border them:
//!
//! ```text
//!         c                      c
//!       /   \                    |
//!   a2 / A   \ a1            a2  |  a1
//!     /       \                  |
//!   v0 ------- v1     ==>        v0
//!     \       /                  |
//!   b1 \  B  / b2            b1  |  b2
//!       \   /                    |
//!         d                      d
//! ```

use simplize_core::{EdgeId, HalfEdgeMesh, VertexId};

/// Whether contracting `edge` keeps the mesh a closed 2-manifold.
///
/// The endpoints must share exactly two neighbors, and those must be the
/// two distinct apices of the triangles on the edge.
pub fn check_link_condition(mesh: &HalfEdgeMesh, edge: EdgeId) -> bool {
    let h = mesh.edge(edge).he;
    let t = mesh.half_edge(h).twin;
    let c = mesh.destination(mesh.half_edge(h).next);
    let d = mesh.destination(mesh.half_edge(t).next);
    if c == d {
        return false;
    }

    let (v0, v1) = mesh.edge_vertices(edge);
    let n0 = mesh.neighbor_vertices(v0);
    let n1 = mesh.neighbor_vertices(v1);
    let common = n0.iter().filter(|v| n1.binary_search(v).is_ok()).count();
    common == 2
}

/// Contract `edge` into its origin vertex, placed at the cached target.
///
/// Kills one vertex, three edges, two faces and six half-edges. The caller
/// is responsible for checking the link condition first. Returns the
/// surviving vertex.
pub fn collapse_edge(mesh: &mut HalfEdgeMesh, edge: EdgeId) -> VertexId {
    let h = mesh.edge(edge).he;
    let hn = mesh.half_edge(h).next;
    let hp = mesh.half_edge(hn).next;
    let t = mesh.half_edge(h).twin;
    let tn = mesh.half_edge(t).next;
    let tp = mesh.half_edge(tn).next;

    let v0 = mesh.half_edge(h).vertex;
    let v1 = mesh.half_edge(t).vertex;
    let c = mesh.half_edge(hp).vertex;
    let d = mesh.half_edge(tp).vertex;

    // c -> v1, v0 -> c, d -> v0, v1 -> d
    let a1 = mesh.half_edge(hn).twin;
    let a2 = mesh.half_edge(hp).twin;
    let b1 = mesh.half_edge(tn).twin;
    let b2 = mesh.half_edge(tp).twin;

    // Must be gathered while the one-ring of v1 is still intact.
    let v1_outgoing = mesh.outgoing_half_edges(v1);

    let target = mesh.edge(edge).target;
    let merged = mesh.vertex(v0).quadric + mesh.vertex(v1).quadric;
    {
        let survivor = mesh.vertex_mut(v0);
        survivor.position = target;
        survivor.quadric = merged;
    }
    for he in v1_outgoing {
        mesh.half_edge_mut(he).vertex = v0;
    }

    mesh.half_edge_mut(a1).twin = a2;
    mesh.half_edge_mut(a2).twin = a1;
    mesh.half_edge_mut(b1).twin = b2;
    mesh.half_edge_mut(b2).twin = b1;

    // c-v1 folds onto c-v0 and v1-d onto v0-d.
    let keep_a = mesh.half_edge(hp).edge;
    let keep_b = mesh.half_edge(tn).edge;
    let dead_edges = [edge, mesh.half_edge(hn).edge, mesh.half_edge(tp).edge];
    mesh.half_edge_mut(a1).edge = keep_a;
    mesh.edge_mut(keep_a).he = a2;
    mesh.half_edge_mut(b2).edge = keep_b;
    mesh.edge_mut(keep_b).he = b1;

    for face in [mesh.half_edge(h).face, mesh.half_edge(t).face] {
        mesh.face_mut(face).exists = false;
    }
    for he in [h, hn, hp, t, tn, tp] {
        mesh.half_edge_mut(he).exists = false;
    }
    for e in dead_edges {
        mesh.edge_mut(e).exists = false;
    }
    mesh.vertex_mut(v1).exists = false;

    mesh.vertex_mut(v0).he = a2;
    if !mesh.half_edge(mesh.vertex(c).he).exists {
        mesh.vertex_mut(c).he = a1;
    }
    if !mesh.half_edge(mesh.vertex(d).he).exists {
        mesh.vertex_mut(d).he = b1;
    }

    tracing::trace!(%edge, survivor = %v0, removed = %v1, "contracted edge");
    v0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadric::{compute_edge_contractions, compute_vertex_quadrics};
    use approx::assert_relative_eq;
    use simplize_core::{primitives, HalfEdgeMesh, Point3f, TriangleSoup};

    fn build(soup: &TriangleSoup) -> HalfEdgeMesh {
        let mut mesh = HalfEdgeMesh::from_soup(soup).unwrap();
        compute_vertex_quadrics(&mut mesh);
        compute_edge_contractions(&mut mesh);
        mesh
    }

    #[test]
    fn test_link_condition_tetrahedron() {
        let mesh = build(&primitives::tetrahedron());
        for e in mesh.edges() {
            assert!(check_link_condition(&mesh, e.id));
        }
    }

    #[test]
    fn test_tetrahedron_collapses_to_pillow() {
        let mut mesh = build(&primitives::tetrahedron());
        let edge = EdgeId(0);
        let (v0, v1) = mesh.edge_vertices(edge);
        let survivor = collapse_edge(&mut mesh, edge);

        assert_eq!(survivor, v0);
        assert!(!mesh.vertex(v1).exists);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.half_edge_count(), 6);
        assert!(mesh.verify().is_empty());
        assert_eq!(mesh.compute_genus(), 0);

        // Two triangles over the same three vertices: nothing left to contract.
        for e in mesh.live_edges() {
            assert!(!check_link_condition(&mesh, e.id));
        }
    }

    #[test]
    fn test_collapse_moves_survivor_and_merges_quadrics() {
        let mut mesh = build(&primitives::cube());
        let edge = EdgeId(3);
        let (v0, v1) = mesh.edge_vertices(edge);
        let expected = mesh.vertex(v0).quadric + mesh.vertex(v1).quadric;
        let target = mesh.edge(edge).target;

        let survivor = collapse_edge(&mut mesh, edge);
        assert_eq!(survivor, v0);
        assert_relative_eq!(mesh.vertex(v0).position, target);
        assert_relative_eq!(mesh.vertex(v0).quadric, expected);
    }

    #[test]
    fn test_collapse_rewires_one_ring() {
        let mut mesh = build(&primitives::octahedron());
        let edge = EdgeId(0);
        let (v0, v1) = mesh.edge_vertices(edge);
        assert!(check_link_condition(&mesh, edge));

        let mut expected: Vec<VertexId> = mesh
            .neighbor_vertices(v0)
            .into_iter()
            .chain(mesh.neighbor_vertices(v1))
            .filter(|&v| v != v0 && v != v1)
            .collect();
        expected.sort_unstable();
        expected.dedup();

        collapse_edge(&mut mesh, edge);
        assert_eq!(mesh.neighbor_vertices(v0), expected);
        for h in mesh.live_half_edges() {
            assert_ne!(h.vertex, v1);
            assert_eq!(mesh.half_edge(h.twin).twin, h.id);
            assert!(mesh.edge(h.edge).exists);
        }
        assert!(mesh.verify().is_empty());
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn test_repeated_collapses_on_cube() {
        let mut mesh = build(&primitives::cube());
        for _ in 0..3 {
            let edge = mesh
                .live_edges()
                .map(|e| e.id)
                .find(|&e| check_link_condition(&mesh, e))
                .unwrap();
            collapse_edge(&mut mesh, edge);
            assert!(mesh.verify().is_empty());
        }
        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.compute_genus(), 0);

        mesh.compact();
        assert_eq!(mesh.faces().len(), 6);
        assert!(mesh.verify().is_empty());
    }

    #[test]
    fn test_link_condition_rejects_shared_apex() {
        // Triangular bipyramid: contracting an equator edge would pinch the
        // remaining equator vertex between the two poles.
        let mesh = build(&TriangleSoup::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
                Point3f::new(0.3, 0.3, 1.0),
                Point3f::new(0.3, 0.3, -1.0),
            ],
            vec![
                [0, 1, 3],
                [1, 2, 3],
                [2, 0, 3],
                [1, 0, 4],
                [2, 1, 4],
                [0, 2, 4],
            ],
        ));
        assert!(mesh.verify().is_empty());
        for e in mesh.edges() {
            let (a, b) = mesh.edge_vertices(e.id);
            let equator = a.index() < 3 && b.index() < 3;
            // Equator edges see both poles and the third equator vertex.
            assert_eq!(check_link_condition(&mesh, e.id), !equator);
        }
    }
}
