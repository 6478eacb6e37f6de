//! Wavefront OBJ export.
//!
//! Writes `v`, `vt` and `f` lines only: no normals, materials or groups.
//! Position and UV arrays are index-aligned, so each face corner uses the
//! same 1-based index for both (`f 1/1 2/2 3/3`).

use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use hydro_decode::Mesh;
use tempfile::NamedTempFile;

/// OBJ text of a mesh, produced through [`fmt::Display`].
///
/// Floats use the shortest representation that reads back to the same
/// value (`1.0`, `0.5`, `inf`); NaN is written as `nan`. Indices are not
/// checked against the vertex count.
#[derive(Debug, Clone, Copy)]
pub struct ObjText<'a>(pub &'a Mesh);

impl fmt::Display for ObjText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mesh = self.0;
        for p in &mesh.positions {
            writeln!(f, "v {} {} {}", Float(p.x), Float(p.y), Float(p.z))?;
        }
        for uv in &mesh.uvs {
            writeln!(f, "vt {} {}", Float(uv.x), Float(uv.y))?;
        }
        for [a, b, c] in mesh.triangles() {
            let (a, b, c) = (u32::from(a) + 1, u32::from(b) + 1, u32::from(c) + 1);
            writeln!(f, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
        Ok(())
    }
}

struct Float(f32);

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

/// Serialize `mesh` as OBJ text into `writer`.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    write!(writer, "{}", ObjText(mesh))
}

/// Serialize `mesh` as an OBJ string.
#[must_use]
pub fn to_obj_string(mesh: &Mesh) -> String {
    ObjText(mesh).to_string()
}

/// Write `mesh` to `path`, replacing it only once the whole file is written.
///
/// The OBJ goes to a temporary file next to `path` and is renamed into place,
/// so a failure never leaves a truncated OBJ behind.
pub fn write_obj_file(mesh: &Mesh, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write_obj(mesh, &mut writer)?;
        writer.flush()?;
    }
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydro_decode::glam::{Vec2, Vec3};

    fn quad() -> Mesh {
        Mesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, -2.5),
            ],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 0.5),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn writes_vertices_uvs_then_faces() {
        let expected = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 -2.5
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 0.5
f 1/1 2/2 3/3
f 1/1 3/3 4/4
";
        assert_eq!(to_obj_string(&quad()), expected);
    }

    #[test]
    fn empty_mesh_is_empty_file() {
        assert_eq!(to_obj_string(&Mesh::default()), "");
    }

    #[test]
    fn non_finite_values() {
        let mesh = Mesh {
            positions: vec![Vec3::new(f32::NAN, f32::INFINITY, f32::NEG_INFINITY)],
            uvs: vec![Vec2::new(-f32::NAN, 0.0)],
            indices: Vec::new(),
        };
        assert_eq!(to_obj_string(&mesh), "v nan inf -inf\nvt nan 0.0\n");
    }

    #[test]
    fn writer_and_string_agree() {
        let mut out = Vec::new();
        write_obj(&quad(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), to_obj_string(&quad()));
    }

    #[test]
    fn largest_index_does_not_overflow() {
        let mesh = Mesh {
            indices: vec![u16::MAX, 0, 1],
            ..Mesh::default()
        };
        assert_eq!(to_obj_string(&mesh), "f 65536/65536 1/1 2/2\n");
    }

    #[test]
    fn file_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(&path, "stale").unwrap();

        write_obj_file(&quad(), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), to_obj_string(&quad()));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quad.obj");
        assert!(write_obj_file(&quad(), &path).is_err());
        assert!(!path.exists());
    }
}
