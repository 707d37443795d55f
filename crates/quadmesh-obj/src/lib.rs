#![warn(missing_docs)]

//! Wavefront OBJ import and export for quad meshes.
//!
//! Only the geometry records matter here: `v` positions, `vn` normals and
//! `f` faces with exactly four corners. Texture coordinates are counted and
//! ignored; grouping and material records are skipped.
//!
//! ```no_run
//! use quadmesh_obj::{read_obj, write_obj, ImportOptions};
//!
//! let mesh = read_obj("model.obj", &ImportOptions::default())?;
//! write_obj(&mesh, "copy.obj")?;
//! # Ok::<(), quadmesh_obj::ObjError>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ObjError, Result};
pub use reader::{read_obj, read_obj_from_str, ImportOptions};
pub use writer::{write_obj, write_obj_to, write_obj_to_string};
