//! Wavefront OBJ support
//!
//! Only positions and triangular faces are kept. Texture coordinates,
//! normals, groups and materials are ignored on read and never written.

use crate::{SoupReader, SoupWriter};
use simplize_core::{Error, Point3f, Result, TriangleSoup};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub struct ObjReader;
pub struct ObjWriter;

impl ObjReader {
    /// Parse an OBJ document. Every polygon must be a triangle.
    pub fn read_from<R: BufRead>(reader: R) -> Result<TriangleSoup> {
        let data = ::obj::ObjData::load_buf(reader)
            .map_err(|e| Error::InvalidData(format!("Failed to parse OBJ: {e}")))?;

        let vertices: Vec<Point3f> = data
            .position
            .iter()
            .map(|&[x, y, z]| Point3f::new(x, y, z))
            .collect();

        let mut faces = Vec::new();
        for group in data.objects.iter().flat_map(|o| &o.groups) {
            for (i, poly) in group.polys.iter().enumerate() {
                match poly.0.as_slice() {
                    [a, b, c] => faces.push([a.0, b.0, c.0]),
                    corners => {
                        return Err(Error::InvalidData(format!(
                            "Face {} in group '{}' has {} corners, expected a triangle",
                            i,
                            group.name,
                            corners.len()
                        )))
                    }
                }
            }
        }

        tracing::debug!(
            vertices = vertices.len(),
            faces = faces.len(),
            "read OBJ triangle soup"
        );
        Ok(TriangleSoup::from_vertices_and_faces(vertices, faces))
    }
}

impl ObjWriter {
    /// Emit `v` records followed by 1-based `f` records.
    pub fn write_to<W: Write>(soup: &TriangleSoup, mut writer: W) -> Result<()> {
        writeln!(writer, "# simplize")?;
        writeln!(
            writer,
            "# {} vertices, {} faces",
            soup.vertex_count(),
            soup.face_count()
        )?;
        for v in &soup.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b, c] in &soup.faces {
            writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SoupReader for ObjReader {
    fn read_soup<P: AsRef<Path>>(path: P) -> Result<TriangleSoup> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

impl SoupWriter for ObjWriter {
    fn write_soup<P: AsRef<Path>>(soup: &TriangleSoup, path: P) -> Result<()> {
        let file = File::create(path)?;
        Self::write_to(soup, BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use simplize_core::primitives;
    use std::io::Cursor;

    #[test]
    fn test_read_triangles() {
        let text = "\
# a single tetrahedron
v 0 0 0
v 1 0 0
v 0.5 1 0
v 0.5 0.5 1
vn 0 0 1
f 1 3 2
f 1//1 2//1 4//1
f 1 4 3
f 2 3 4
";
        let soup = ObjReader::read_from(Cursor::new(text)).unwrap();
        assert_eq!(soup.vertex_count(), 4);
        assert_eq!(soup.faces, vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]);
        assert_relative_eq!(soup.vertices[2], Point3f::new(0.5, 1.0, 0.0));
    }

    #[test]
    fn test_rejects_quads() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";
        let err = ObjReader::read_from(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("4 corners"));
    }

    #[test]
    fn test_write_format() {
        let mut out = Vec::new();
        ObjWriter::write_to(&primitives::tetrahedron(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "v 0 0 0");
        assert_eq!(lines[3], "v 0.5 0.5 1");
        assert_eq!(lines[4], "f 1 3 2");
        assert_eq!(lines[7], "f 2 3 4");
    }

    #[test]
    fn test_in_memory_roundtrip() {
        let soup = primitives::torus(6, 4, 2.0, 0.5);
        let mut out = Vec::new();
        ObjWriter::write_to(&soup, &mut out).unwrap();
        let loaded = ObjReader::read_from(Cursor::new(out)).unwrap();

        assert_eq!(loaded.faces, soup.faces);
        for (a, b) in loaded.vertices.iter().zip(&soup.vertices) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_empty_document() {
        let soup = ObjReader::read_from(Cursor::new("")).unwrap();
        assert!(soup.is_empty());
    }
}
