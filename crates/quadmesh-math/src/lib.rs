#![warn(missing_docs)]

//! Math types for quadmesh.
//!
//! Thin wrappers around nalgebra providing the geometric vector types
//! used by the mesh: points, vectors, an exact totally-ordered position
//! key for deduplication, and affine transforms.

use std::cmp::Ordering;

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// Vectors shorter than this cannot be renormalized.
pub const MIN_NORM: f64 = 1e-12;

/// Scale `v` to unit length, or `None` if it is (numerically) zero or not finite.
pub fn unit(v: &Vec3) -> Option<Vec3> {
    let norm = v.norm();
    if !norm.is_finite() || norm < MIN_NORM {
        return None;
    }
    Some(v / norm)
}

/// Arithmetic mean of a set of points, or `None` for an empty set.
pub fn centroid<I>(points: I) -> Option<Point3>
where
    I: IntoIterator<Item = Point3>,
{
    let mut sum = Vec3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    (count > 0).then(|| Point3::from(sum / count as f64))
}

/// Exact, totally ordered key for a position.
///
/// Components compare lexicographically (x, then y, then z) with no
/// tolerance: two positions map to the same key only if every component is
/// bitwise equal after folding `-0.0` into `0.0`.
#[derive(Debug, Clone, Copy)]
pub struct PositionKey([f64; 3]);

impl PositionKey {
    /// Build the key for `p`.
    pub fn new(p: &Point3) -> Self {
        // -0.0 + 0.0 == +0.0, every other value is unchanged
        Self([p.x + 0.0, p.y + 0.0, p.z + 0.0])
    }

    /// The position this key was built from.
    pub fn point(&self) -> Point3 {
        Point3::new(self.0[0], self.0[1], self.0[2])
    }
}

impl From<&Point3> for PositionKey {
    fn from(p: &Point3) -> Self {
        Self::new(p)
    }
}

impl Ord for PositionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for PositionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PositionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PositionKey {}

/// Axis-aligned affine map `p -> scale * p + offset` (component-wise).
///
/// Covers the translations and per-axis scales needed to place a mesh; there
/// is no rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Per-axis scale factors.
    pub scale: Vec3,
    /// Translation applied after scaling.
    pub offset: Vec3,
}

impl Transform {
    /// The map leaving every point in place.
    pub fn identity() -> Self {
        Self {
            scale: Vec3::repeat(1.0),
            offset: Vec3::zeros(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            offset: Vec3::new(dx, dy, dz),
            ..Self::identity()
        }
    }

    /// Per-axis scale about the origin.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            scale: Vec3::new(sx, sy, sz),
            ..Self::identity()
        }
    }

    /// Uniform scale about the origin.
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s, s)
    }

    /// Composition applying `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            scale: self.scale.component_mul(&other.scale),
            offset: self.scale.component_mul(&other.offset) + self.offset,
        }
    }

    /// Map a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        Point3::from(self.scale.component_mul(&p.coords) + self.offset)
    }

    /// Map a direction: scaled, never translated.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.scale.component_mul(v)
    }

    /// Whether the map flips orientation (an odd number of negative scales).
    pub fn is_reflection(&self) -> bool {
        self.scale.iter().product::<f64>() < 0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
