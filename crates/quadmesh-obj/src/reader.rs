//! OBJ reader: parses `v`, `vn` and quad `f` records into a [`QuadMesh`].

use std::path::Path;

use quadmesh_math::{Point3, Vec3};
use quadmesh_topo::{QuadMesh, QuadMeshBuilder, VertexId, VertexRef};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ObjError, Result};

/// Options controlling how an OBJ file becomes a mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportOptions {
    /// Use `vn` normals referenced by faces as per-corner normals.
    /// When false, every face gets its flat normal.
    pub use_file_normals: bool,
    /// Centre the mesh on the origin and scale it into a unit box.
    pub unitize: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            use_file_normals: true,
            unitize: false,
        }
    }
}

/// Read a quad mesh from an OBJ file.
pub fn read_obj(path: impl AsRef<Path>, options: &ImportOptions) -> Result<QuadMesh> {
    let text = std::fs::read_to_string(path)?;
    read_obj_from_str(&text, options)
}

/// Read a quad mesh from OBJ text.
///
/// Vertices are registered in file order before any face is added, so the
/// vertex with OBJ index `i` gets id `i - 1` (unless it repeats an earlier
/// position). Any malformed record fails the whole import.
pub fn read_obj_from_str(text: &str, options: &ImportOptions) -> Result<QuadMesh> {
    let file = ObjFile::parse(text)?;

    let mut builder = QuadMeshBuilder::with_capacity(
        file.positions.len(),
        file.faces.len() * 2,
        file.faces.len(),
    );
    let mut ids = Vec::with_capacity(file.positions.len());
    for (line, p) in &file.positions {
        let id = builder
            .vertex_id(*p)
            .map_err(|source| ObjError::Topology { line: *line, source })?;
        ids.push(id);
    }

    for face in &file.faces {
        let mut corners = [VertexRef::Id(VertexId::new(0)); 4];
        for (corner, &index) in corners.iter_mut().zip(&face.vertices) {
            let i = resolve(face.line, "vertex", index, ids.len())?;
            *corner = VertexRef::Id(ids[i]);
        }

        let normals = match (&face.normals, options.use_file_normals) {
            (Some(indices), true) => {
                let mut normals = [Vec3::zeros(); 4];
                for (n, &index) in normals.iter_mut().zip(indices) {
                    *n = file.normals[resolve(face.line, "normal", index, file.normals.len())?];
                }
                Some(normals)
            }
            _ => None,
        };

        builder
            .add_face(corners, normals)
            .map_err(|source| ObjError::Topology {
                line: face.line,
                source,
            })?;
    }

    if file.texcoords > 0 {
        warn!("Ignoring {} texture coordinates", file.texcoords);
    }
    debug!(
        "Imported OBJ: {} vertices, {} normals, {} faces",
        file.positions.len(),
        file.normals.len(),
        file.faces.len()
    );

    let mesh = builder.build();
    if options.unitize {
        mesh.unitized().map_err(ObjError::Unitize)
    } else {
        Ok(mesh)
    }
}

/// A face record with indices already made 1-based and positive.
struct FaceRecord {
    line: usize,
    vertices: [i64; 4],
    normals: Option<[i64; 4]>,
}

/// Raw records of an OBJ file.
#[derive(Default)]
struct ObjFile {
    positions: Vec<(usize, Point3)>,
    normals: Vec<Vec3>,
    faces: Vec<FaceRecord>,
    texcoords: usize,
}

impl ObjFile {
    fn parse(text: &str) -> Result<Self> {
        let mut file = ObjFile::default();

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            let mut tokens = content.split_whitespace();
            let Some(keyword) = tokens.next() else {
                continue;
            };
            let args: Vec<&str> = tokens.collect();

            match keyword {
                "v" => {
                    let [x, y, z] = parse_triple(line, &args)?;
                    file.positions.push((line, Point3::new(x, y, z)));
                }
                "vn" => {
                    let [x, y, z] = parse_triple(line, &args)?;
                    file.normals.push(Vec3::new(x, y, z));
                }
                "vt" => file.texcoords += 1,
                "f" => {
                    let face = file.parse_face(line, &args)?;
                    file.faces.push(face);
                }
                "o" | "g" | "s" | "usemtl" | "mtllib" => {}
                other => debug!("Skipping unsupported OBJ record '{}' on line {}", other, line),
            }
        }

        Ok(file)
    }

    /// Parse `f a b c d`, where each corner is `v`, `v/t`, `v//n` or `v/t/n`.
    fn parse_face(&self, line: usize, args: &[&str]) -> Result<FaceRecord> {
        if args.len() != 4 {
            return Err(ObjError::NotQuad {
                line,
                count: args.len(),
            });
        }

        let mut vertices = [0i64; 4];
        let mut normals = [0i64; 4];
        let mut with_normals = 0;
        for (i, token) in args.iter().enumerate() {
            let parts: Vec<&str> = token.split('/').collect();
            if parts.len() > 3 {
                return Err(ObjError::parse(line, format!("malformed face corner '{token}'")));
            }
            vertices[i] = absolute(parse_index(line, parts[0])?, self.positions.len());
            if let Some(n) = parts.get(2).filter(|n| !n.is_empty()) {
                normals[i] = absolute(parse_index(line, n)?, self.normals.len());
                with_normals += 1;
            }
        }

        let normals = match with_normals {
            0 => None,
            4 => Some(normals),
            _ => {
                return Err(ObjError::parse(
                    line,
                    "face mixes corners with and without normals",
                ))
            }
        };
        Ok(FaceRecord {
            line,
            vertices,
            normals,
        })
    }
}

fn parse_triple(line: usize, args: &[&str]) -> Result<[f64; 3]> {
    if args.len() != 3 {
        return Err(ObjError::parse(
            line,
            format!("expected 3 coordinates, found {}", args.len()),
        ));
    }
    let mut out = [0.0; 3];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token
            .parse()
            .map_err(|_| ObjError::parse(line, format!("'{token}' is not a number")))?;
    }
    Ok(out)
}

fn parse_index(line: usize, token: &str) -> Result<i64> {
    match token.parse::<i64>() {
        Ok(0) => Err(ObjError::parse(line, "OBJ indices start at 1")),
        Ok(i) => Ok(i),
        Err(_) => Err(ObjError::parse(line, format!("'{token}' is not an index"))),
    }
}

/// Turn a negative (relative) index into its absolute 1-based form.
fn absolute(index: i64, declared: usize) -> i64 {
    if index < 0 {
        declared as i64 + index + 1
    } else {
        index
    }
}

/// Map a 1-based index to a 0-based slot of a sequence of length `len`.
fn resolve(line: usize, kind: &'static str, index: i64, len: usize) -> Result<usize> {
    if index >= 1 && (index as usize) <= len {
        Ok(index as usize - 1)
    } else {
        Err(ObjError::IndexOutOfRange {
            line,
            kind,
            index,
            len,
        })
    }
}
