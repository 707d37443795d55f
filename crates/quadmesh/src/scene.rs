//! Subdivision level driver.

use quadmesh_subdiv::{subdivide, subdivide_levels, SubdivideParams, SubdivideResult};
use quadmesh_topo::{QuadBuffers, QuadMesh};
use tracing::{debug, info};

/// Holds an imported mesh and its refinement at the current level.
///
/// The original mesh is never modified; every level is derived from it.
#[derive(Debug, Clone)]
pub struct Scene {
    original: QuadMesh,
    /// Refined mesh, `None` at level 0.
    current: Option<QuadMesh>,
    level: u32,
    params: SubdivideParams,
}

impl Scene {
    /// A scene at level 0.
    pub fn new(original: QuadMesh, params: SubdivideParams) -> Self {
        Self {
            original,
            current: None,
            level: 0,
            params,
        }
    }

    /// Current subdivision level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// The mesh as imported.
    pub fn original(&self) -> &QuadMesh {
        &self.original
    }

    /// The mesh at the current level.
    pub fn current(&self) -> &QuadMesh {
        self.current.as_ref().unwrap_or(&self.original)
    }

    /// Render buffers of the current mesh.
    pub fn buffers(&self) -> &QuadBuffers {
        self.current().buffers()
    }

    /// Subdivision parameters used for every level.
    pub fn params(&self) -> &SubdivideParams {
        &self.params
    }

    /// Move to `level` and return the mesh at that level.
    ///
    /// Requesting the current level does nothing. Going up continues from
    /// the current mesh; going down recomputes from the original. On error
    /// the scene stays at its previous level.
    pub fn set_level(&mut self, level: u32) -> SubdivideResult<&QuadMesh> {
        if level == self.level {
            return Ok(self.current());
        }

        let refined = if level == 0 {
            None
        } else if level > self.level {
            let mut mesh = subdivide(self.current(), &self.params)?;
            if level - self.level > 1 {
                mesh = subdivide_levels(&mesh, level - self.level - 1, &self.params)?;
            }
            Some(mesh)
        } else {
            debug!("Recomputing level {} from the original mesh", level);
            Some(subdivide_levels(&self.original, level, &self.params)?)
        };

        self.current = refined;
        self.level = level;
        info!(
            "Subdivision level {}: {} faces",
            level,
            self.current().num_faces()
        );
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadmesh_topo::primitives::unit_cube;

    fn scene() -> Scene {
        Scene::new(
            unit_cube().unwrap(),
            SubdivideParams::default().with_parallel(false),
        )
    }

    #[test]
    fn test_level_zero_is_original() {
        let mut scene = scene();
        assert_eq!(scene.level(), 0);
        assert!(std::ptr::eq(scene.current(), scene.original()));
        scene.set_level(0).unwrap();
        assert!(std::ptr::eq(scene.current(), scene.original()));
    }

    #[test]
    fn test_levels_up_and_down() {
        let mut scene = scene();
        assert_eq!(scene.set_level(2).unwrap().num_faces(), 96);
        assert_eq!(scene.level(), 2);
        assert_eq!(scene.set_level(1).unwrap().num_faces(), 24);
        assert_eq!(scene.set_level(3).unwrap().num_faces(), 384);
        assert_eq!(scene.set_level(0).unwrap().num_faces(), 6);
        assert_eq!(scene.original().num_faces(), 6);
    }

    #[test]
    fn test_same_level_is_noop() {
        let mut scene = scene();
        scene.set_level(1).unwrap();
        let before: *const QuadMesh = scene.current();
        scene.set_level(1).unwrap();
        assert!(std::ptr::eq(before, scene.current()));
    }

    #[test]
    fn test_incremental_matches_direct() {
        let mut stepped = scene();
        stepped.set_level(1).unwrap();
        stepped.set_level(2).unwrap();

        let mut direct = scene();
        direct.set_level(2).unwrap();

        assert_eq!(stepped.buffers(), direct.buffers());
    }

    #[test]
    fn test_failed_level_keeps_state() {
        let mut scene = Scene::new(
            unit_cube().unwrap(),
            SubdivideParams::default().with_max_faces(100),
        );
        scene.set_level(1).unwrap();
        assert!(scene.set_level(3).is_err());
        assert_eq!(scene.level(), 1);
        assert_eq!(scene.current().num_faces(), 24);
    }
}
