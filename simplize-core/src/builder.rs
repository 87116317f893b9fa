//! Connectivity construction from an indexed triangle soup
//!
//! One vertex is created per input point and one face plus three half-edges
//! per input triangle. Twins are discovered through a map keyed by the
//! directed vertex pair, so twin resolution costs O(1) amortized per
//! half-edge.

use crate::entity::*;
use crate::error::{Error, Result};
use crate::mesh::HalfEdgeMesh;
use crate::point::Point3f;
use crate::soup::TriangleSoup;
use std::collections::HashMap;

impl HalfEdgeMesh {
    /// Build a mesh from a triangle soup
    pub fn from_soup(soup: &TriangleSoup) -> Result<Self> {
        let mut mesh = Self::new();
        mesh.build_from_soup(&soup.vertices, &soup.faces)?;
        Ok(mesh)
    }

    /// Replace the contents of this mesh with the connectivity of the given
    /// soup. Ids are assigned sequentially from 0 within each entity kind.
    ///
    /// The input must describe a closed, consistently oriented manifold:
    /// out-of-range or repeated corner indices, directed edges used twice,
    /// half-edges left without a twin, points used by no triangle, vertices
    /// whose triangles form more than one fan and soups with more than one
    /// connected component are all rejected. On error the mesh is left
    /// unchanged.
    pub fn build_from_soup(&mut self, points: &[Point3f], triangles: &[[usize; 3]]) -> Result<()> {
        let nv = points.len();
        let nf = triangles.len();

        let mut anchors: Vec<Option<HalfEdgeId>> = vec![None; nv];
        let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(nf * 3);
        let mut edges: Vec<Edge> = Vec::with_capacity(nf * 3 / 2);
        let mut faces: Vec<Face> = Vec::with_capacity(nf);
        let mut directed: HashMap<(usize, usize), HalfEdgeId> = HashMap::with_capacity(nf * 3);

        for (fi, tri) in triangles.iter().enumerate() {
            validate_triangle(fi, tri, nv)?;

            let face_id = FaceId(fi);
            let base = half_edges.len();
            faces.push(Face::new(face_id, HalfEdgeId(base)));

            for j in 0..3usize {
                let he_id = HalfEdgeId(base + j);
                let (a, b) = (tri[j], tri[(j + 1) % 3]);

                if anchors[a].is_none() {
                    anchors[a] = Some(he_id);
                }

                if directed.insert((a, b), he_id).is_some() {
                    return Err(Error::Topology(format!(
                        "directed edge ({a} -> {b}) is used by more than one face; \
                         the input is non-manifold or inconsistently oriented"
                    )));
                }

                // A half-edge without a twin yet points to itself.
                let (twin, edge) = match directed.get(&(b, a)) {
                    Some(&twin_id) => {
                        let twin = &mut half_edges[twin_id.0];
                        twin.twin = he_id;
                        (twin_id, twin.edge)
                    }
                    None => {
                        let edge_id = EdgeId(edges.len());
                        edges.push(Edge::new(edge_id, he_id));
                        (he_id, edge_id)
                    }
                };

                half_edges.push(HalfEdge {
                    id: he_id,
                    vertex: VertexId(a),
                    next: HalfEdgeId(base + (j + 1) % 3),
                    twin,
                    edge,
                    face: face_id,
                    exists: true,
                });
            }
        }

        if let Some(open) = half_edges.iter().find(|h| h.twin == h.id) {
            let a = open.vertex.0;
            let b = half_edges[open.next.0].vertex.0;
            return Err(Error::Topology(format!(
                "half-edge ({a} -> {b}) has no twin; the surface is not closed"
            )));
        }

        let mut vertices = Vec::with_capacity(nv);
        for (i, (position, anchor)) in points.iter().zip(anchors).enumerate() {
            let he = anchor.ok_or_else(|| {
                Error::InvalidData(format!("vertex {i} is not referenced by any triangle"))
            })?;
            vertices.push(Vertex::new(VertexId(i), *position, he));
        }

        check_vertex_fans(&half_edges, &vertices)?;
        check_connected(&half_edges, nf)?;

        self.vertices = vertices;
        self.half_edges = half_edges;
        self.edges = edges;
        self.faces = faces;

        tracing::debug!(
            vertices = self.vertices.len(),
            faces = self.faces.len(),
            half_edges = self.half_edges.len(),
            edges = self.edges.len(),
            "built half-edge mesh"
        );

        Ok(())
    }
}

/// Every outgoing half-edge of a vertex must be reachable by rotating around
/// its anchor, otherwise the vertex pinches two fans together.
fn check_vertex_fans(half_edges: &[HalfEdge], vertices: &[Vertex]) -> Result<()> {
    let mut outgoing = vec![0usize; vertices.len()];
    for h in half_edges {
        outgoing[h.vertex.0] += 1;
    }

    for v in vertices {
        let mut fan = 0;
        let mut h = v.he;
        loop {
            fan += 1;
            h = half_edges[half_edges[h.0].twin.0].next;
            if h == v.he {
                break;
            }
        }
        if fan != outgoing[v.id.0] {
            return Err(Error::Topology(format!(
                "vertex {} is non-manifold: its {} outgoing half-edges form more than one fan",
                v.id.0,
                outgoing[v.id.0]
            )));
        }
    }
    Ok(())
}

/// Flood fill across twins from face 0; every face must be reached.
fn check_connected(half_edges: &[HalfEdge], face_count: usize) -> Result<()> {
    if face_count == 0 {
        return Ok(());
    }

    let mut seen = vec![false; face_count];
    let mut stack = vec![0usize];
    seen[0] = true;
    let mut reached = 1;
    while let Some(f) = stack.pop() {
        for h in &half_edges[f * 3..f * 3 + 3] {
            let g = half_edges[h.twin.0].face.0;
            if !seen[g] {
                seen[g] = true;
                reached += 1;
                stack.push(g);
            }
        }
    }

    if reached < face_count {
        return Err(Error::Topology(format!(
            "surface has more than one connected component: {reached} of {face_count} faces \
             reachable from face 0"
        )));
    }
    Ok(())
}

fn validate_triangle(fi: usize, tri: &[usize; 3], vertex_count: usize) -> Result<()> {
    if let Some(&idx) = tri.iter().find(|&&idx| idx >= vertex_count) {
        return Err(Error::InvalidData(format!(
            "triangle {fi} references vertex {idx}, but only {vertex_count} vertices exist"
        )));
    }
    if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
        return Err(Error::InvalidData(format!(
            "triangle {fi} repeats a corner: {tri:?}"
        )));
    }
    Ok(())
}
