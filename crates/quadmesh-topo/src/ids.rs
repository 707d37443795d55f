//! Typed indices into a mesh's vertex, edge and face sequences.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(usize);

        impl $name {
            /// Wrap a raw index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// The raw index into the owning sequence.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Index of a vertex within its mesh.
    VertexId,
    "v"
);
define_id!(
    /// Index of an edge within its mesh.
    EdgeId,
    "e"
);
define_id!(
    /// Index of a face within its mesh.
    FaceId,
    "f"
);
