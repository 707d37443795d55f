//! Subdivision parameters.

use serde::{Deserialize, Serialize};

/// How normals of new points are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalRule {
    /// Face point normal is the plain mean of the face's corner normals;
    /// edge point normal is the sum of the endpoint vertex normals divided
    /// by `2 + n`. Neither is rescaled to unit length.
    #[default]
    Literal,
    /// Face point normals and edge point normals (endpoint vertex normals
    /// plus incident face point normals) are renormalized to unit length.
    Renormalized,
}

/// Parameters for Catmull-Clark subdivision.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdivideParams {
    /// Rule for new point normals.
    pub normal_rule: NormalRule,

    /// Compute face, edge and vertex points on the rayon thread pool.
    pub parallel: bool,

    /// Refuse to produce more faces than this.
    pub max_faces: usize,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            normal_rule: NormalRule::Literal,
            parallel: true,
            max_faces: 10_000_000,
        }
    }
}

impl SubdivideParams {
    /// Default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normal rule.
    #[must_use]
    pub const fn with_normal_rule(mut self, rule: NormalRule) -> Self {
        self.normal_rule = rule;
        self
    }

    /// Enable or disable parallel point computation.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the face budget.
    #[must_use]
    pub const fn with_max_faces(mut self, max: usize) -> Self {
        self.max_faces = max;
        self
    }

    /// Face count after `levels` passes over a mesh with `faces` quads.
    pub fn expected_faces(faces: usize, levels: u32) -> usize {
        faces.saturating_mul(4usize.saturating_pow(levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SubdivideParams::default();
        assert_eq!(params.normal_rule, NormalRule::Literal);
        assert!(params.parallel);
    }

    #[test]
    fn test_builder_methods() {
        let params = SubdivideParams::new()
            .with_normal_rule(NormalRule::Renormalized)
            .with_parallel(false)
            .with_max_faces(64);
        assert_eq!(params.normal_rule, NormalRule::Renormalized);
        assert!(!params.parallel);
        assert_eq!(params.max_faces, 64);
    }

    #[test]
    fn test_expected_faces() {
        assert_eq!(SubdivideParams::expected_faces(6, 0), 6);
        assert_eq!(SubdivideParams::expected_faces(6, 2), 96);
        assert_eq!(SubdivideParams::expected_faces(usize::MAX, 3), usize::MAX);
    }
}
