#![warn(missing_docs)]

//! Catmull-Clark subdivision for quad meshes.
//!
//! One pass computes a face point per face, an edge point per edge and a
//! vertex point per vertex ([`SubdivisionPoints`]), then reconnects them into
//! four quads per original face. Every pass produces a new [`QuadMesh`];
//! the input is never modified.
//!
//! [`QuadMesh`]: quadmesh_topo::QuadMesh

mod error;
mod params;
mod points;
mod subdivide;

pub use error::{SubdivideError, SubdivideResult};
pub use params::{NormalRule, SubdivideParams};
pub use points::SubdivisionPoints;
pub use subdivide::{subdivide, subdivide_levels};
