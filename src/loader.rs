//! Parser for the line-oriented plain-text mesh format.
//!
//! ```text
//! # comment
//! v 0 0 0
//! v 1 0 0
//! v 0 1 0
//! f 1 2 3
//! ```
//!
//! Each line starts with a one-character tag. `v` appends a vertex, `f`
//! builds a triangle from three 1-based vertex indices, `#` is a comment.
//! Lines with any other tag are skipped with a warning. Lines end at `\n`,
//! `\r` or `\r\n`.

use std::fmt;
use std::path::Path;

use log::{debug, info, warn};

use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::triangle::Triangle;

/// Errors produced while loading a mesh.
#[derive(Debug)]
pub enum LoadError {
    /// The mesh file could not be read.
    Io(std::io::Error),
    /// A field on a `v` or `f` line is not a valid number.
    InvalidNumber { line: usize, field: String },
    /// A `v` or `f` line has fewer than three fields.
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A face references a vertex that has not been declared (yet).
    FaceIndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read mesh file: {e}"),
            LoadError::InvalidNumber { line, field } => {
                write!(f, "line {line}: {field:?} is not a valid number")
            }
            LoadError::MissingField {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} fields, found {found}"),
            LoadError::FaceIndexOutOfRange {
                line,
                index,
                vertex_count,
            } => write!(
                f,
                "line {line}: face index {index} out of range (1..={vertex_count})"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Read a mesh file from disk and parse it.
pub fn load_mesh_file<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let mesh = parse_mesh(&bytes)?;
    info!(
        "loaded {} surfaces from {}",
        mesh.len(),
        path.display()
    );
    Ok(mesh)
}

/// Parse a mesh from an in-memory buffer.
///
/// Surfaces come out in file order with the default white color.
pub fn parse_mesh(bytes: &[u8]) -> Result<Mesh, LoadError> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();

    for (index, raw) in Lines::new(bytes).enumerate() {
        let line_number = index + 1;
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let Some((&tag, rest)) = raw.split_first() else {
            continue;
        };

        // A tag must be a single character; "vn", "vt" and friends fall
        // through to the unknown-tag path.
        let glued = rest.first().is_some_and(|b| !b.is_ascii_whitespace());
        let rest = String::from_utf8_lossy(rest);

        match tag {
            b'#' => {}
            b'v' if !glued => {
                let [x, y, z] = parse_fields(&rest, line_number, |s| s.parse::<f32>().ok())?;
                vertices.push(Vec3::new(x, y, z));
            }
            b'f' if !glued => {
                let indices = parse_fields(&rest, line_number, parse_face_index)?;
                let [a, b, c] = indices.map(|i| resolve(i, &vertices, line_number));
                triangles.push(Triangle::new(a?, b?, c?));
            }
            _ => {
                let shown = String::from_utf8_lossy(raw);
                warn!(
                    "line {line_number}: skipping unknown tag in {:?}",
                    shown.trim_end()
                );
            }
        }
    }

    debug!(
        "parsed mesh: {} vertices, {} triangles",
        vertices.len(),
        triangles.len()
    );
    Ok(Mesh::from_triangles(triangles))
}

/// Parse the first three whitespace-separated fields; extra fields are ignored.
fn parse_fields<T: Copy + Default>(
    rest: &str,
    line: usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<[T; 3], LoadError> {
    let fields: Vec<&str> = rest.split_whitespace().take(3).collect();
    if fields.len() < 3 {
        return Err(LoadError::MissingField {
            line,
            expected: 3,
            found: fields.len(),
        });
    }

    let mut out = [T::default(); 3];
    for (slot, field) in out.iter_mut().zip(&fields) {
        *slot = parse(field).ok_or_else(|| LoadError::InvalidNumber {
            line,
            field: field.to_string(),
        })?;
    }
    Ok(out)
}

/// Face fields may carry `/texture/normal` suffixes; only the vertex index
/// before the first slash is used.
fn parse_face_index(field: &str) -> Option<usize> {
    let vertex = field.split('/').next()?;
    vertex.parse::<usize>().ok()
}

fn resolve(index: usize, vertices: &[Vec3], line: usize) -> Result<Vec3, LoadError> {
    index
        .checked_sub(1)
        .and_then(|i| vertices.get(i))
        .copied()
        .ok_or(LoadError::FaceIndexOutOfRange {
            line,
            index,
            vertex_count: vertices.len(),
        })
}

/// Splits a buffer into lines terminated by `\n`, `\r` or `\r\n`.
struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Lines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let line = &self.rest[..end];
                let crlf = self.rest[end] == b'\r' && self.rest.get(end + 1) == Some(&b'\n');
                let skip = if crlf { 2 } else { 1 };
                self.rest = &self.rest[end + skip..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = &[];
                Some(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;

    #[test]
    fn parses_single_triangle() {
        let mesh = parse_mesh(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.len(), 1);

        let surface = mesh.surfaces()[0];
        assert_eq!(
            surface.triangle.vertices,
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ]
        );
        assert_eq!(surface.color, Color::WHITE);
    }

    #[test]
    fn unknown_tag_is_skipped() {
        let mesh = parse_mesh(b"x foo\nv 1 2 3\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn accepts_every_line_terminator() {
        let input = b"v 0 0 0\rv 1 0 0\r\nv 0 1 0\nf 3 2 1";
        let mesh = parse_mesh(input).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.surfaces()[0].triangle.vertices[0], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn crlf_counts_as_one_terminator() {
        let lines: Vec<&[u8]> = Lines::new(b"a\r\nb\n\nc").collect();
        assert_eq!(
            lines,
            vec![
                b"a".as_slice(),
                b"b".as_slice(),
                b"".as_slice(),
                b"c".as_slice()
            ]
        );
    }

    #[test]
    fn comments_blank_lines_and_extra_whitespace_are_tolerated() {
        let input = b"# a triangle\n\n  \nv   0\t0  0  \nv 1 0 0\nv 0 1 0\nf  1 2 3 \n";
        let mesh = parse_mesh(input).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn surfaces_keep_file_order() {
        let input = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 2 3\nf 1 3 4\nf 2 3 4\n";
        let mesh = parse_mesh(input).unwrap();
        let firsts: Vec<Vec3> = mesh.iter().map(|s| s.triangle.vertices[0]).collect();
        assert_eq!(
            firsts,
            vec![Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn multi_character_tags_are_unknown() {
        let input = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvt 0 0\nf 1 2 3\n";
        let mesh = parse_mesh(input).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn face_fields_with_slashes_use_vertex_index() {
        let input = b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2//2 3/3\n";
        let mesh = parse_mesh(input).unwrap();
        assert_eq!(mesh.surfaces()[0].triangle.vertices[2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn forward_reference_is_an_error() {
        let err = parse_mesh(b"v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::FaceIndexOutOfRange {
                line: 3,
                index: 3,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn zero_index_is_an_error() {
        let err = parse_mesh(b"v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, LoadError::FaceIndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn malformed_vertex_is_an_error() {
        let err = parse_mesh(b"v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { line: 1, .. }));
        assert_eq!(err.to_string(), "line 1: \"zero\" is not a valid number");

        let err = parse_mesh(b"# header\nv 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_mesh_file("definitely/not/here.mesh").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
