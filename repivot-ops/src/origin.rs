//! Batch origin relocation
//!
//! The operations here move the origin of every selected mesh object to a
//! face center of its world-space bounding box, computed from evaluated
//! (modifier-applied) geometry. A batch is best-effort over a mixed
//! selection, borrows the viewport state and always hands it back, and
//! lands in the undo history as a single step.

use tracing::{debug, info};

use repivot_core::{Aabb, Point3f, Result, Scene, SceneObject, UndoStep, ViewportState};

/// Which face center of the bounding box the origin moves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMode {
    /// Bottom-center: X/Y center at the minimum Z of the bounds
    Bottom,
    /// Top-center: X/Y center at the maximum Z of the bounds
    Top,
}

impl OriginMode {
    /// The target point this mode picks on `bounds`
    pub fn target_of(&self, bounds: &Aabb) -> Point3f {
        match self {
            OriginMode::Bottom => bounds.bottom_center(),
            OriginMode::Top => bounds.top_center(),
        }
    }

    /// Human-readable label, also used for the undo step
    pub fn label(&self) -> &'static str {
        match self {
            OriginMode::Bottom => "Set Origin to Bottom",
            OriginMode::Top => "Set Origin to Top",
        }
    }
}

/// Where an object's origin would move under `mode`
///
/// Computes the world-space bounding box of the object's evaluated
/// geometry and picks the mode's face center. Returns `None` for objects
/// the batch skips: non-mesh objects and meshes without vertices.
pub fn origin_target(object: &SceneObject, mode: OriginMode) -> Option<Point3f> {
    let bounds = object.world_bounds()?;
    Some(mode.target_of(&bounds))
}

/// Outcome counts for one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchReport {
    /// Objects whose origin moved
    pub relocated: usize,
    /// Selected objects without mesh data
    pub skipped_non_mesh: usize,
    /// Selected meshes without vertices
    pub skipped_empty: usize,
}

impl BatchReport {
    /// Total number of skipped objects
    pub fn skipped(&self) -> usize {
        self.skipped_non_mesh + self.skipped_empty
    }
}

/// Move the origin of every selected mesh object per `mode`
///
/// Non-mesh objects and meshes without vertices are skipped and counted,
/// never errors. All relocations land in the undo history as one step
/// labeled after the mode. The 3D cursor and the active object are
/// restored to their prior state whether the batch succeeds or fails.
///
/// # Arguments
/// * `scene` - The scene whose selection is processed
/// * `mode` - Which bounding box face center to move origins to
///
/// # Returns
/// A [`BatchReport`] with relocation and skip counts, or the first
/// primitive error encountered. On error, objects already processed stay
/// relocated and remain undoable as one step.
///
/// # Example
/// ```
/// use repivot_core::{Point3f, Scene, SceneObject, TriangleMesh};
/// use repivot_ops::{relocate_origins, OriginMode};
///
/// let mesh = TriangleMesh::from_vertices_and_faces(
///     vec![
///         Point3f::new(-0.5, -0.5, -0.5),
///         Point3f::new(0.5, -0.5, -0.5),
///         Point3f::new(0.0, 0.5, 0.5),
///     ],
///     vec![[0, 1, 2]],
/// );
/// let mut scene = Scene::new();
/// let id = scene.add_object(SceneObject::mesh("wedge", mesh));
/// scene.select(id);
///
/// let report = relocate_origins(&mut scene, OriginMode::Bottom).unwrap();
/// assert_eq!(report.relocated, 1);
/// assert_eq!(
///     scene.object(id).unwrap().transform.translation_part(),
///     repivot_core::Vector3f::new(0.0, 0.0, -0.5)
/// );
/// ```
pub fn relocate_origins(scene: &mut Scene, mode: OriginMode) -> Result<BatchReport> {
    let viewport = ViewportState::capture(scene);
    let result = relocate_selection(scene, mode);
    viewport.restore(scene);
    result
}

/// Convenience wrapper for [`OriginMode::Bottom`]
pub fn relocate_origins_to_bottom(scene: &mut Scene) -> Result<BatchReport> {
    relocate_origins(scene, OriginMode::Bottom)
}

/// Convenience wrapper for [`OriginMode::Top`]
pub fn relocate_origins_to_top(scene: &mut Scene) -> Result<BatchReport> {
    relocate_origins(scene, OriginMode::Top)
}

fn relocate_selection(scene: &mut Scene, mode: OriginMode) -> Result<BatchReport> {
    let selection: Vec<_> = scene.selection().to_vec();
    let mut report = BatchReport::default();
    let mut step = UndoStep::new(mode.label());
    let mut failure = None;

    for id in selection {
        let object = match scene.object(id) {
            Some(object) => object,
            None => {
                // Stale id from a hand-edited scene document.
                debug!(%id, "skipping unknown selection entry");
                report.skipped_non_mesh += 1;
                continue;
            }
        };
        if !object.is_mesh() {
            debug!(object = %object.name, kind = %object.kind(), "skipping non-mesh object");
            report.skipped_non_mesh += 1;
            continue;
        }
        let target = match origin_target(object, mode) {
            Some(target) => target,
            None => {
                debug!(object = %object.name, "skipping mesh without vertices");
                report.skipped_empty += 1;
                continue;
            }
        };

        let saved = object.saved_state();
        match scene.set_object_origin(id, target) {
            Ok(()) => {
                step.record(id, saved);
                report.relocated += 1;
            }
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    scene.push_undo_step(step);
    match failure {
        Some(err) => Err(err),
        None => {
            info!(
                mode = mode.label(),
                relocated = report.relocated,
                skipped = report.skipped(),
                "origin batch finished"
            );
            Ok(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repivot_core::{Modifier, Vector3f};

    fn triangle() -> repivot_core::TriangleMesh {
        repivot_core::TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(2.0, 0.0, 0.0),
                Point3f::new(0.0, 2.0, 2.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn mode_picks_opposite_face_centers() {
        let bounds = Aabb::new(Point3f::new(-1.0, -2.0, -3.0), Point3f::new(1.0, 2.0, 3.0));

        assert_eq!(
            OriginMode::Bottom.target_of(&bounds),
            Point3f::new(0.0, 0.0, -3.0)
        );
        assert_eq!(
            OriginMode::Top.target_of(&bounds),
            Point3f::new(0.0, 0.0, 3.0)
        );
    }

    #[test]
    fn target_follows_evaluated_geometry() {
        let mut object = SceneObject::mesh("tri", triangle());
        object
            .modifiers
            .push(Modifier::Offset(Vector3f::new(0.0, 0.0, 10.0)));

        let target = origin_target(&object, OriginMode::Bottom).unwrap();

        assert_eq!(target, Point3f::new(1.0, 1.0, 10.0));
    }

    #[test]
    fn target_missing_for_ineligible_objects() {
        let camera = SceneObject::new("cam", repivot_core::ObjectData::Camera);
        let hollow = SceneObject::mesh("hollow", repivot_core::TriangleMesh::new());

        assert!(origin_target(&camera, OriginMode::Bottom).is_none());
        assert!(origin_target(&hollow, OriginMode::Top).is_none());
    }
}
