//! Topological and geometric measures of a closed mesh

use crate::entity::FaceId;
use crate::mesh::HalfEdgeMesh;
use crate::point::to_f64;

impl HalfEdgeMesh {
    /// `V - E + F` over live entities
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Genus of a closed orientable surface, `(2 - chi) / 2`
    pub fn compute_genus(&self) -> i64 {
        (2 - self.euler_characteristic()) / 2
    }

    /// Area of a single triangle
    pub fn face_area(&self, face: FaceId) -> f64 {
        let [p0, p1, p2] = self.face_positions(face).map(|p| to_f64(&p));
        (p1 - p0).cross(&(p2 - p0)).norm() * 0.5
    }

    /// Signed volume of the tetrahedron spanned by the origin and a triangle
    pub fn face_signed_volume(&self, face: FaceId) -> f64 {
        let [p0, p1, p2] = self.face_positions(face).map(|p| to_f64(&p));
        p0.coords.dot(&p1.coords.cross(&p2.coords)) / 6.0
    }

    /// Sum of all live face areas
    pub fn compute_surface_area(&self) -> f64 {
        self.live_faces().map(|f| self.face_area(f.id)).sum()
    }

    /// Enclosed volume by the divergence theorem; positive for outward winding
    pub fn compute_volume(&self) -> f64 {
        self.live_faces().map(|f| self.face_signed_volume(f.id)).sum()
    }

    /// Mean number of distinct neighbors over live vertices
    pub fn compute_average_degree(&self) -> f64 {
        let (count, total) = self
            .live_vertices()
            .fold((0usize, 0usize), |(count, total), v| {
                (count + 1, total + self.neighbor_vertices(v.id).len())
            });
        if count == 0 {
            return 0.0;
        }
        total as f64 / count as f64
    }
}
