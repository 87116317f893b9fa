//! Greedy quadric error simplification
//!
//! Edges wait in a min-cost queue. A contraction only marks the edges around
//! the surviving vertex as `visited` instead of rescoring them; stale entries
//! are rescored and pushed back when they reach the front of the queue.

use crate::edge_collapse::{check_link_condition, collapse_edge};
use crate::quadric::{compute_edge_contractions, compute_vertex_quadrics, update_contraction};
use crate::MeshSimplifier;
use priority_queue::PriorityQueue;
use simplize_core::{EdgeId, Error, HalfEdgeMesh, Result, VertexId};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy)]
struct CollapseCost {
    id: EdgeId,
    cost: f64,
}

impl PartialEq for CollapseCost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for CollapseCost {}

impl PartialOrd for CollapseCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CollapseCost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smallest cost first, lower edge id on ties
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// What one pass over the front of the queue did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// The cheapest edge was contracted into the returned vertex
    Contracted(VertexId),
    /// A dead, stale or link-rejected entry left the front of the queue
    Skipped,
    /// The cheapest valid contraction is over the error threshold
    OverThreshold,
    /// The queue ran dry
    Exhausted,
}

/// Outcome of one simplification run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplificationStats {
    /// Live faces before simplification
    pub original_faces: usize,
    /// `round(original_faces * ratio)`
    pub target_faces: usize,
    /// Live faces after simplification
    pub remaining_faces: usize,
    /// Successful edge contractions
    pub contractions: usize,
    /// Stale queue entries that were rescored
    pub recomputed: usize,
    /// Cheapest edges dropped by the link condition
    pub rejected: usize,
}

impl fmt::Display for SimplificationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} faces (target {}), {} contractions, {} rescored, {} rejected",
            self.original_faces,
            self.remaining_faces,
            self.target_faces,
            self.contractions,
            self.recomputed,
            self.rejected
        )
    }
}

/// Quadric error metric simplifier with lazily invalidated edge costs.
///
/// Repeatedly contracts the cheapest edge that keeps the mesh manifold until
/// the live face count reaches the target or no valid contraction is left.
/// The mesh is compacted once at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadricErrorSimplifier {
    /// Stop when the cheapest valid contraction costs more than this
    pub error_threshold: Option<f64>,
}

impl QuadricErrorSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(error_threshold: Option<f64>) -> Self {
        Self { error_threshold }
    }

    /// Seed quadrics and costs, then queue every live edge.
    fn build_queue(mesh: &mut HalfEdgeMesh) -> PriorityQueue<EdgeId, CollapseCost> {
        compute_vertex_quadrics(mesh);
        compute_edge_contractions(mesh);
        let mut queue = PriorityQueue::with_capacity(mesh.edges().len());
        for e in mesh.live_edges() {
            queue.push(e.id, CollapseCost { id: e.id, cost: e.cost });
        }
        queue
    }

    /// Mark the edges around `survivor` stale, and give edges whose link may
    /// have changed another chance.
    fn invalidate_neighborhood(
        mesh: &mut HalfEdgeMesh,
        queue: &mut PriorityQueue<EdgeId, CollapseCost>,
        survivor: VertexId,
    ) {
        for h in mesh.outgoing_half_edges(survivor) {
            let edge = mesh.half_edge(h).edge;
            let e = mesh.edge_mut(edge);
            e.visited = true;
            if queue.get(&edge).is_none() {
                queue.push(edge, CollapseCost { id: edge, cost: e.cost });
            }
        }

        // Only the survivor and its neighbors gained or lost neighbors, so
        // an edge dropped by the link condition can only turn valid here.
        for n in mesh.neighbor_vertices(survivor) {
            for h in mesh.outgoing_half_edges(n) {
                let e = mesh.edge(mesh.half_edge(h).edge);
                if queue.get(&e.id).is_none() {
                    queue.push(e.id, CollapseCost { id: e.id, cost: e.cost });
                }
            }
        }
    }

    /// Handle the front of the queue: drop dead entries, rescore stale ones,
    /// drop link-rejected ones, otherwise contract it.
    fn step(
        &self,
        mesh: &mut HalfEdgeMesh,
        queue: &mut PriorityQueue<EdgeId, CollapseCost>,
        stats: &mut SimplificationStats,
    ) -> Step {
        let Some((&id, _)) = queue.peek() else {
            return Step::Exhausted;
        };

        if !mesh.edge(id).exists {
            queue.pop();
            return Step::Skipped;
        }

        if mesh.edge(id).visited {
            queue.pop();
            update_contraction(mesh, id);
            queue.push(id, CollapseCost { id, cost: mesh.edge(id).cost });
            stats.recomputed += 1;
            return Step::Skipped;
        }

        if !check_link_condition(mesh, id) {
            queue.pop();
            stats.rejected += 1;
            return Step::Skipped;
        }

        let cost = mesh.edge(id).cost;
        if let Some(threshold) = self.error_threshold {
            if cost > threshold {
                tracing::debug!(
                    cost,
                    threshold,
                    "cheapest contraction exceeds the error threshold"
                );
                return Step::OverThreshold;
            }
        }

        queue.pop();
        let survivor = collapse_edge(mesh, id);
        Self::invalidate_neighborhood(mesh, queue, survivor);
        stats.contractions += 1;
        Step::Contracted(survivor)
    }
}

impl MeshSimplifier for QuadricErrorSimplifier {
    fn simplify(&self, mesh: &mut HalfEdgeMesh, ratio: f32) -> Result<SimplificationStats> {
        if mesh.is_empty() {
            return Err(Error::InvalidData("Mesh is empty".to_string()));
        }
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(Error::InvalidData(format!(
                "Simplification ratio must be in (0, 1], got {ratio}"
            )));
        }

        let original_faces = mesh.face_count();
        let target_faces = (original_faces as f64 * ratio as f64).round() as usize;
        let mut stats = SimplificationStats {
            original_faces,
            target_faces,
            ..Default::default()
        };

        let mut queue = Self::build_queue(mesh);
        let mut live_faces = original_faces;

        while live_faces > target_faces {
            match self.step(mesh, &mut queue, &mut stats) {
                Step::Contracted(_) => live_faces -= 2,
                Step::Skipped => {}
                Step::OverThreshold => break,
                Step::Exhausted => {
                    tracing::debug!(
                        live_faces,
                        target_faces,
                        "no valid contraction left before reaching the target"
                    );
                    break;
                }
            }
        }

        mesh.compact();
        stats.remaining_faces = mesh.face_count();

        tracing::info!(
            original_faces = stats.original_faces,
            remaining_faces = stats.remaining_faces,
            contractions = stats.contractions,
            "simplification finished"
        );
        Ok(stats)
    }
}
