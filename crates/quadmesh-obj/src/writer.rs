//! OBJ writer: one `v` per vertex, one `vn` per face corner, `f v//vn` quads.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quadmesh_topo::QuadMesh;
use tracing::debug;

use crate::error::Result;

/// Write `mesh` to an OBJ file.
pub fn write_obj(mesh: &QuadMesh, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj_to(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Render `mesh` as OBJ text.
pub fn write_obj_to_string(mesh: &QuadMesh) -> Result<String> {
    let mut out = Vec::new();
    write_obj_to(mesh, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Stream `mesh` as OBJ records into `writer`.
///
/// Coordinates use the shortest representation that parses back to the same
/// `f64`, so reading the output reproduces the mesh exactly.
pub fn write_obj_to<W: Write>(mesh: &QuadMesh, writer: &mut W) -> std::io::Result<()> {
    writeln!(
        writer,
        "# quadmesh: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    )?;

    for vertex in mesh.vertices() {
        let p = vertex.position();
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for face in mesh.faces() {
        for n in face.normals() {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    for (f, face) in mesh.faces().iter().enumerate() {
        let [a, b, c, d] = face.vertices().map(|v| v.index() + 1);
        let n = f * 4 + 1;
        writeln!(
            writer,
            "f {}//{} {}//{} {}//{} {}//{}",
            a,
            n,
            b,
            n + 1,
            c,
            n + 2,
            d,
            n + 3
        )?;
    }

    debug!(
        "Wrote OBJ: {} vertices, {} normals, {} faces",
        mesh.num_vertices(),
        mesh.num_faces() * 4,
        mesh.num_faces()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{read_obj, read_obj_from_str, ImportOptions};
    use quadmesh_topo::primitives::{grid, unit_cube};

    #[test]
    fn test_record_counts() {
        let mesh = unit_cube().unwrap();
        let text = write_obj_to_string(&mesh).unwrap();
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 8);
        assert_eq!(count("vn "), 24);
        assert_eq!(count("f "), 6);
        assert!(text.starts_with("# quadmesh: 8 vertices, 6 faces"));
    }

    #[test]
    fn test_first_face_record() {
        let mesh = grid(1).unwrap();
        let text = write_obj_to_string(&mesh).unwrap();
        let face = text.lines().find(|l| l.starts_with("f ")).unwrap();
        assert_eq!(face, "f 1//1 2//2 3//3 4//4");
    }

    #[test]
    fn test_string_round_trip() {
        let mesh = unit_cube().unwrap();
        let text = write_obj_to_string(&mesh).unwrap();
        let back = read_obj_from_str(&text, &ImportOptions::default()).unwrap();
        assert_eq!(back.stats(), mesh.stats());
        assert_eq!(back.buffers(), mesh.buffers());
        assert_eq!(back.vertices(), mesh.vertices());
    }

    struct Full;

    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::WriteZero.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let mesh = unit_cube().unwrap();
        let err = write_obj_to(&mesh, &mut Full).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::WriteZero);
    }

    #[test]
    fn test_file_round_trip() {
        let mesh = grid(3).unwrap();
        let path = std::env::temp_dir().join(format!("quadmesh-writer-{}.obj", std::process::id()));
        write_obj(&mesh, &path).unwrap();
        let back = read_obj(&path, &ImportOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.faces(), mesh.faces());
    }
}
