#![warn(missing_docs)]

//! Quad mesh topology for quadmesh.
//!
//! Vertices, edges and faces live in per-mesh arenas and refer to each
//! other by typed index:
//! - vertices are deduplicated by exact position,
//! - edges by their unordered vertex pair,
//! - every edge carries at most two faces.
//!
//! Meshes are assembled through [`QuadMeshBuilder`] and exported as flat
//! quad buffers with [`QuadMesh::buffers`].

mod buffers;
mod builder;
mod entity;
mod error;
mod ids;
mod mesh;
pub mod primitives;

pub use buffers::QuadBuffers;
pub use builder::{QuadMeshBuilder, VertexRef};
pub use entity::{edge_key, Edge, Face, Vertex};
pub use error::{Result, TopologyError};
pub use ids::{EdgeId, FaceId, VertexId};
pub use mesh::{MeshStats, QuadMesh};
