//! Error types for mesh subdivision.

use quadmesh_topo::{EdgeId, FaceId, TopologyError};
use thiserror::Error;

/// Errors that can occur during subdivision.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubdivideError {
    /// Mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// An edge with no incident face cannot be averaged into an edge point.
    #[error("edge {0} has no incident faces")]
    IsolatedEdge(EdgeId),

    /// Renormalizing a face point normal hit a zero-length vector.
    #[error("face point normal of {0} has zero length")]
    DegenerateFaceNormal(FaceId),

    /// Renormalizing an edge point normal hit a zero-length vector.
    #[error("edge point normal of {0} has zero length")]
    DegenerateEdgeNormal(EdgeId),

    /// Resulting mesh would be too large.
    #[error("subdivision would produce {projected} faces from {current} (max {max})")]
    MeshTooLarge {
        /// Current face count.
        current: usize,
        /// Projected face count.
        projected: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// The refined mesh violates a topology invariant.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),
}

/// Result type for subdivision operations.
pub type SubdivideResult<T> = std::result::Result<T, SubdivideError>;
