//! Arena-backed half-edge mesh
//!
//! The mesh exclusively owns four dense collections. All connectivity is
//! expressed as typed indices into them, so liveness (`exists`) is the only
//! deletion signal and ids stay stable until [`HalfEdgeMesh::compact`].

use crate::entity::*;
use crate::point::Point3f;
use crate::soup::TriangleSoup;
use std::fmt;

const INVALID: usize = usize::MAX;

/// Half-edge connectivity over a closed, manifold triangle mesh
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) half_edges: Vec<HalfEdge>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
}

/// Live entity counts of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub faces: usize,
    pub half_edges: usize,
    pub edges: usize,
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "number of faces: {}", self.faces)?;
        writeln!(f, "number of vertices: {}", self.vertices)?;
        writeln!(f, "number of half edges: {}", self.half_edges)?;
        write!(f, "number of edges: {}", self.edges)
    }
}

impl HalfEdgeMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    // ---- raw arenas (dead records included) ----

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id.0]
    }

    #[inline]
    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }

    #[inline]
    pub fn half_edge_mut(&mut self, id: HalfEdgeId) -> &mut HalfEdge {
        &mut self.half_edges[id.0]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.0]
    }

    // ---- live views ----

    pub fn live_vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.iter().filter(|v| v.exists)
    }

    pub fn live_half_edges(&self) -> impl Iterator<Item = &HalfEdge> + '_ {
        self.half_edges.iter().filter(|h| h.exists)
    }

    pub fn live_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(|e| e.exists)
    }

    pub fn live_faces(&self) -> impl Iterator<Item = &Face> + '_ {
        self.faces.iter().filter(|f| f.exists)
    }

    pub fn vertex_count(&self) -> usize {
        self.live_vertices().count()
    }

    pub fn half_edge_count(&self) -> usize {
        self.live_half_edges().count()
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges().count()
    }

    pub fn face_count(&self) -> usize {
        self.live_faces().count()
    }

    /// Check if the mesh has no live faces
    pub fn is_empty(&self) -> bool {
        self.live_faces().next().is_none()
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            vertices: self.vertex_count(),
            faces: self.face_count(),
            half_edges: self.half_edge_count(),
            edges: self.edge_count(),
        }
    }

    // ---- traversal ----

    /// The vertex a half-edge points to
    #[inline]
    pub fn destination(&self, he: HalfEdgeId) -> VertexId {
        self.half_edge(self.half_edge(he).next).vertex
    }

    /// The three half-edges of a face in traversal order
    pub fn face_half_edges(&self, face: FaceId) -> [HalfEdgeId; 3] {
        let h0 = self.face(face).he;
        let h1 = self.half_edge(h0).next;
        let h2 = self.half_edge(h1).next;
        [h0, h1, h2]
    }

    /// The three corner vertices of a face, walking `he -> next -> next`
    pub fn face_vertices(&self, face: FaceId) -> [VertexId; 3] {
        self.face_half_edges(face).map(|h| self.half_edge(h).vertex)
    }

    pub fn face_positions(&self, face: FaceId) -> [Point3f; 3] {
        self.face_vertices(face).map(|v| self.vertex(v).position)
    }

    /// Both endpoints of an edge, origin of its canonical half-edge first
    pub fn edge_vertices(&self, edge: EdgeId) -> (VertexId, VertexId) {
        let he = self.edge(edge).he;
        (self.half_edge(he).vertex, self.destination(he))
    }

    /// All half-edges leaving a vertex, found by rotating `h -> twin(h).next`
    /// from the vertex anchor.
    pub fn outgoing_half_edges(&self, v: VertexId) -> Vec<HalfEdgeId> {
        let start = self.vertex(v).he;
        let mut result = Vec::new();
        let mut current = start;
        loop {
            result.push(current);
            current = self.half_edge(self.half_edge(current).twin).next;
            if current == start {
                break;
            }
        }
        result
    }

    /// Distinct one-ring neighbors of a vertex, sorted by id
    pub fn neighbor_vertices(&self, v: VertexId) -> Vec<VertexId> {
        let mut neighbors: Vec<VertexId> = self
            .outgoing_half_edges(v)
            .into_iter()
            .map(|h| self.destination(h))
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    // ---- export ----

    /// Export live vertex positions (collection order) and live faces as
    /// corner triples indexing into that position list.
    pub fn to_soup(&self) -> TriangleSoup {
        let mut remap = vec![INVALID; self.vertices.len()];
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for v in self.live_vertices() {
            remap[v.id.0] = vertices.len();
            vertices.push(v.position);
        }

        let faces = self
            .live_faces()
            .map(|f| self.face_vertices(f.id).map(|v| remap[v.0]))
            .collect();

        TriangleSoup::from_vertices_and_faces(vertices, faces)
    }

    // ---- compaction ----

    /// Physically drop every dead entity, preserving the relative order of
    /// survivors, and rewrite all ids and cross references.
    pub fn compact(&mut self) {
        let vertex_map = live_remap(self.vertices.iter().map(|v| v.exists));
        let half_edge_map = live_remap(self.half_edges.iter().map(|h| h.exists));
        let edge_map = live_remap(self.edges.iter().map(|e| e.exists));
        let face_map = live_remap(self.faces.iter().map(|f| f.exists));

        self.vertices.retain(|v| v.exists);
        self.half_edges.retain(|h| h.exists);
        self.edges.retain(|e| e.exists);
        self.faces.retain(|f| f.exists);

        for v in &mut self.vertices {
            v.id = VertexId(vertex_map[v.id.0]);
            v.he = HalfEdgeId(half_edge_map[v.he.0]);
        }
        for h in &mut self.half_edges {
            h.id = HalfEdgeId(half_edge_map[h.id.0]);
            h.vertex = VertexId(vertex_map[h.vertex.0]);
            h.next = HalfEdgeId(half_edge_map[h.next.0]);
            h.twin = HalfEdgeId(half_edge_map[h.twin.0]);
            h.edge = EdgeId(edge_map[h.edge.0]);
            h.face = FaceId(face_map[h.face.0]);
        }
        for e in &mut self.edges {
            e.id = EdgeId(edge_map[e.id.0]);
            e.he = HalfEdgeId(half_edge_map[e.he.0]);
        }
        for f in &mut self.faces {
            f.id = FaceId(face_map[f.id.0]);
            f.he = HalfEdgeId(half_edge_map[f.he.0]);
        }
    }
}

/// Old index -> new index for live entries, `INVALID` for dead ones.
fn live_remap(alive: impl Iterator<Item = bool>) -> Vec<usize> {
    let mut next = 0;
    alive
        .map(|exists| {
            if exists {
                next += 1;
                next - 1
            } else {
                INVALID
            }
        })
        .collect()
}
