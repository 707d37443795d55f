#![warn(missing_docs)]

//! quadmesh: quad meshes with Catmull-Clark subdivision
//!
//! Imports quad-only Wavefront OBJ models into an index-based quad mesh with
//! shared vertices and edges, refines them with Catmull-Clark subdivision and hands out flat
//! position/normal buffers for rendering.
//!
//! # Example
//!
//! ```rust,no_run
//! use quadmesh::{read_obj, Config, Scene};
//!
//! let config = Config::default();
//! let mesh = read_obj("model.obj", &config.import)?;
//! let mut scene = Scene::new(mesh, config.subdivide.params());
//! let refined = scene.set_level(2)?;
//! println!("{} quads", refined.buffers().num_quads());
//! # Ok::<(), quadmesh::Error>(())
//! ```

mod config;
mod error;
mod scene;

pub use config::{Config, ConfigError, LogLevel, SubdivideConfig};
pub use error::{Error, Result};
pub use scene::Scene;

pub use quadmesh_math::{Point3, PositionKey, Transform, Vec3};
pub use quadmesh_obj::{
    read_obj, read_obj_from_str, write_obj, write_obj_to, write_obj_to_string, ImportOptions,
    ObjError,
};
pub use quadmesh_subdiv::{
    subdivide, subdivide_levels, NormalRule, SubdivideError, SubdivideParams, SubdivisionPoints,
};
pub use quadmesh_topo::{
    primitives, Edge, EdgeId, Face, FaceId, MeshStats, QuadBuffers, QuadMesh, QuadMeshBuilder,
    TopologyError, Vertex, VertexId, VertexRef,
};
