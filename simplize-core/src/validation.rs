//! Invariant checking for HalfEdgeMesh.
//!
//! Local consistency problems are reported as a bitmask of violated
//! invariant classes. The global counting invariants are asserted instead:
//! when they fail the connectivity graph itself is corrupted, which is a bug
//! in construction or contraction rather than a property of the input.

use crate::mesh::HalfEdgeMesh;

bitflags::bitflags! {
    /// Classes of local invariant violations found by [`HalfEdgeMesh::verify`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InvariantViolations: u32 {
        /// A live vertex anchors on a dead half-edge.
        const VERTEX_ANCHOR = 1 << 0;
        /// A live face anchors on a dead half-edge.
        const FACE_ANCHOR = 1 << 1;
        /// Walking `he -> next -> next -> next` does not return to a face's anchor.
        const FACE_CLOSURE = 1 << 2;
        /// A live half-edge originates from a dead vertex.
        const HALF_EDGE_VERTEX = 1 << 3;
        /// A live half-edge belongs to a dead edge.
        const HALF_EDGE_EDGE = 1 << 4;
        /// A live half-edge belongs to a dead face.
        const HALF_EDGE_FACE = 1 << 5;
        /// `twin(twin(h)) != h` for a live half-edge.
        const TWIN_SYMMETRY = 1 << 6;
        /// A live edge anchors on a dead half-edge.
        const EDGE_ANCHOR = 1 << 7;
    }
}

impl HalfEdgeMesh {
    /// Scan all live entities and report which invariant classes are violated.
    /// A valid mesh yields an empty set.
    ///
    /// # Panics
    ///
    /// Panics if `2 * |E| != |H|` or if the Euler characteristic is odd or
    /// greater than 2, either of which means the connectivity is corrupted.
    pub fn verify(&self) -> InvariantViolations {
        self.assert_counting_invariants();

        let mut violations = InvariantViolations::empty();

        for v in self.live_vertices() {
            if !self.half_edge(v.he).exists {
                violations |= InvariantViolations::VERTEX_ANCHOR;
            }
        }

        for f in self.live_faces() {
            if !self.half_edge(f.he).exists {
                violations |= InvariantViolations::FACE_ANCHOR;
            }
            let third = self.half_edge(self.half_edge(f.he).next).next;
            if self.half_edge(third).next != f.he {
                violations |= InvariantViolations::FACE_CLOSURE;
            }
        }

        for h in self.live_half_edges() {
            if !self.vertex(h.vertex).exists {
                violations |= InvariantViolations::HALF_EDGE_VERTEX;
            }
            if !self.edge(h.edge).exists {
                violations |= InvariantViolations::HALF_EDGE_EDGE;
            }
            if !self.face(h.face).exists {
                violations |= InvariantViolations::HALF_EDGE_FACE;
            }
            if self.half_edge(h.twin).twin != h.id {
                violations |= InvariantViolations::TWIN_SYMMETRY;
            }
        }

        for e in self.live_edges() {
            if !self.half_edge(e.he).exists {
                violations |= InvariantViolations::EDGE_ANCHOR;
            }
        }

        violations
    }

    fn assert_counting_invariants(&self) {
        let edges = self.edge_count();
        let half_edges = self.half_edge_count();
        assert_eq!(
            edges * 2,
            half_edges,
            "corrupted connectivity: {edges} edges but {half_edges} half-edges"
        );

        let chi = self.euler_characteristic();
        assert!(
            chi <= 2 && chi % 2 == 0,
            "corrupted connectivity: Euler characteristic {chi} is not 2 - 2g"
        );
    }
}
