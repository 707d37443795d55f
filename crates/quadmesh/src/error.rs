use thiserror::Error;

use crate::config::ConfigError;
use quadmesh_obj::ObjError;
use quadmesh_subdiv::SubdivideError;
use quadmesh_topo::TopologyError;

/// Errors returned by the quadmesh pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Loading the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Reading or writing an OBJ file failed.
    #[error(transparent)]
    Obj(#[from] ObjError),
    /// A subdivision pass failed.
    #[error(transparent)]
    Subdivide(#[from] SubdivideError),
    /// A mesh violated a topology invariant.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Result type for quadmesh operations.
pub type Result<T> = std::result::Result<T, Error>;
