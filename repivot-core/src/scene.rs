//! Scene model: objects, selection, viewport state, and origin primitives
//!
//! A [`Scene`] is a flat table of named objects, each carrying a payload
//! (mesh or non-mesh), a world transform, and a modifier stack. Alongside
//! the objects it holds the ambient viewport state that batch operations
//! borrow and must hand back: the 3D cursor and the active object, plus an
//! ordered selection and the undo history.
//!
//! The origin primitive lives here because it is host surface, not
//! operation logic: [`Scene::set_object_origin`] moves an object's local
//! origin to a world-space point while leaving its world-space base
//! geometry exactly where it was.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounds::Aabb;
use crate::error::{Error, Result};
use crate::history::{History, ObjectState, UndoStep};
use crate::mesh::TriangleMesh;
use crate::point::{Point3f, Vector3f};
use crate::transform::Transform3D;

/// Stable handle to an object in a [`Scene`]
///
/// Objects are never destroyed, so an id stays valid for the lifetime of
/// the scene that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(usize);

impl ObjectId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What kind of payload an object carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Mesh,
    Empty,
    Camera,
    Light,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Empty => "empty",
            ObjectKind::Camera => "camera",
            ObjectKind::Light => "light",
        };
        f.write_str(name)
    }
}

/// The data payload of a scene object
///
/// Only meshes carry geometry; the other kinds exist so selections can
/// contain objects the origin machinery must skip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectData {
    Mesh(TriangleMesh),
    Empty,
    Camera,
    Light,
}

impl ObjectData {
    /// The kind tag for this payload
    pub fn kind(&self) -> ObjectKind {
        match self {
            ObjectData::Mesh(_) => ObjectKind::Mesh,
            ObjectData::Empty => ObjectKind::Empty,
            ObjectData::Camera => ObjectKind::Camera,
            ObjectData::Light => ObjectKind::Light,
        }
    }
}

/// A procedural deformation applied to mesh data at evaluation time
///
/// Modifiers never touch the stored base mesh; they shape the evaluated
/// geometry that bounds are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    /// Translate every vertex in local space
    Offset(Vector3f),
    /// Scale component-wise about the local origin
    Scale(Vector3f),
}

impl Modifier {
    fn apply(&self, mesh: &mut TriangleMesh) {
        match self {
            Modifier::Offset(offset) => mesh.translate(offset),
            Modifier::Scale(factors) => {
                for vertex in &mut mesh.vertices {
                    vertex.x *= factors.x;
                    vertex.y *= factors.y;
                    vertex.z *= factors.z;
                }
            }
        }
    }
}

/// An object in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
    pub transform: Transform3D,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    /// Create an object with an identity transform and no modifiers
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
            transform: Transform3D::identity(),
            modifiers: Vec::new(),
        }
    }

    /// Create a mesh object
    pub fn mesh(name: impl Into<String>, mesh: TriangleMesh) -> Self {
        Self::new(name, ObjectData::Mesh(mesh))
    }

    /// The kind tag of this object
    pub fn kind(&self) -> ObjectKind {
        self.data.kind()
    }

    /// True when the object carries mesh data
    pub fn is_mesh(&self) -> bool {
        matches!(self.data, ObjectData::Mesh(_))
    }

    /// The stored base mesh, if any
    pub fn base_mesh(&self) -> Option<&TriangleMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The base mesh with the modifier stack applied, in local space
    ///
    /// Borrows the base mesh when the stack is empty; otherwise evaluates
    /// a fresh copy. This is the geometry every bound computation must use,
    /// since it reflects the object's current deformed shape.
    pub fn evaluated_mesh(&self) -> Option<Cow<'_, TriangleMesh>> {
        let base = self.base_mesh()?;
        if self.modifiers.is_empty() {
            return Some(Cow::Borrowed(base));
        }
        let mut mesh = base.clone();
        for modifier in &self.modifiers {
            modifier.apply(&mut mesh);
        }
        Some(Cow::Owned(mesh))
    }

    /// World-space bounds of the evaluated geometry
    ///
    /// `None` for non-mesh objects and for meshes without vertices.
    pub fn world_bounds(&self) -> Option<Aabb> {
        let mesh = self.evaluated_mesh()?;
        Aabb::from_points(
            mesh.vertices
                .iter()
                .map(|vertex| self.transform.transform_point(vertex)),
        )
    }

    /// Snapshot of the mutable state an edit may change
    pub fn saved_state(&self) -> ObjectState {
        ObjectState {
            transform: self.transform,
            data: self.data.clone(),
        }
    }
}

/// The two pieces of ambient viewport state a batch operation borrows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub cursor: Point3f,
    pub active: Option<ObjectId>,
}

impl ViewportState {
    /// Capture the current cursor position and active object
    pub fn capture(scene: &Scene) -> Self {
        Self {
            cursor: scene.cursor(),
            active: scene.active(),
        }
    }

    /// Write the captured state back to the scene
    pub fn restore(self, scene: &mut Scene) {
        scene.set_cursor(self.cursor);
        scene.set_active(self.active);
    }
}

/// A flat scene of objects plus the ambient viewport state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selection: Vec<ObjectId>,
    active: Option<ObjectId>,
    cursor: Point3f,
    #[serde(skip)]
    history: History,
}

impl Scene {
    /// Create an empty scene with the cursor at the world origin
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            selection: Vec::new(),
            active: None,
            cursor: Point3f::origin(),
            history: History::default(),
        }
    }

    /// Add an object and return its id
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId::new(self.objects.len());
        self.objects.push(object);
        id
    }

    /// Number of objects in the scene
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    /// Look up an object mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.index())
    }

    /// Iterate objects with their ids, in insertion order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId::new(index), object))
    }

    /// Find an object by name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    /// The current selection, in selection order
    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    /// Replace the selection; unknown ids and duplicates are dropped
    pub fn set_selection(&mut self, ids: Vec<ObjectId>) {
        self.selection.clear();
        for id in ids {
            self.select(id);
        }
    }

    /// Append an object to the selection if it exists and is not selected
    pub fn select(&mut self, id: ObjectId) {
        if id.index() < self.objects.len() && !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    /// Empty the selection
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The active object, if one is set
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Set or clear the active object
    pub fn set_active(&mut self, id: Option<ObjectId>) {
        self.active = id;
    }

    /// The 3D cursor position
    pub fn cursor(&self) -> Point3f {
        self.cursor
    }

    /// Move the 3D cursor
    pub fn set_cursor(&mut self, cursor: Point3f) {
        self.cursor = cursor;
    }

    /// Move an object's local origin to `origin` (world space), keeping its
    /// world-space base geometry fixed
    ///
    /// The base mesh is rewritten in local space and the transform's
    /// translation lands on `origin`; the linear part (rotation, scale,
    /// shear) is untouched. Fails for unknown ids, for objects without mesh
    /// data, and for objects whose transform cannot be inverted (e.g. a
    /// zero scale).
    pub fn set_object_origin(&mut self, id: ObjectId, origin: Point3f) -> Result<()> {
        let object = self.object_mut(id).ok_or(Error::NoSuchObject(id))?;
        let inverse = object
            .transform
            .inverse()
            .ok_or_else(|| Error::DegenerateTransform(object.name.clone()))?;
        let mesh = match &mut object.data {
            ObjectData::Mesh(mesh) => mesh,
            _ => return Err(Error::NotAMesh(object.name.clone())),
        };

        // The new origin in the object's current local frame; shifting all
        // vertices by its negation and composing the same shift into the
        // transform cancels out in world space.
        let local = inverse.transform_point(&origin);
        mesh.translate(&(-local.coords));
        object.transform = object.transform * Transform3D::translation(local.coords);

        debug!(object = %object.name, origin = %origin, "origin relocated");
        Ok(())
    }

    /// Move an object's local origin to the current 3D cursor position
    pub fn set_object_origin_to_cursor(&mut self, id: ObjectId) -> Result<()> {
        let cursor = self.cursor;
        self.set_object_origin(id, cursor)
    }

    /// Record a completed edit as one undoable step; empty steps are dropped
    pub fn push_undo_step(&mut self, step: UndoStep) {
        if !step.is_empty() {
            self.history.record(step);
        }
    }

    /// Undo the most recent step; returns its label
    pub fn undo(&mut self) -> Option<String> {
        let mut step = self.history.pop_undo()?;
        step.swap_with(&mut self.objects);
        let label = step.label().to_owned();
        self.history.stash_redo(step);
        Some(label)
    }

    /// Redo the most recently undone step; returns its label
    pub fn redo(&mut self) -> Option<String> {
        let mut step = self.history.pop_redo()?;
        step.swap_with(&mut self.objects);
        let label = step.label().to_owned();
        self.history.stash_undo(step);
        Some(label)
    }

    /// The undo history
    pub fn history(&self) -> &History {
        &self.history
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn quad_mesh() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(1.0, 1.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn world_vertices(object: &SceneObject) -> Vec<Point3f> {
        object
            .base_mesh()
            .unwrap()
            .vertices
            .iter()
            .map(|v| object.transform.transform_point(v))
            .collect()
    }

    #[test]
    fn set_object_origin_preserves_world_geometry() {
        let mut scene = Scene::new();
        let mut object = SceneObject::mesh("quad", quad_mesh());
        object.transform = Transform3D::from_translation_rotation(
            Vector3f::new(3.0, -1.0, 2.0),
            UnitQuaternion::from_axis_angle(&Vector3f::z_axis(), 0.7),
        );
        let id = scene.add_object(object);

        let before = world_vertices(scene.object(id).unwrap());
        let target = Point3f::new(0.5, 0.5, 1.5);
        scene.set_object_origin(id, target).unwrap();

        let object = scene.object(id).unwrap();
        let after = world_vertices(object);
        for (old, new) in before.iter().zip(after.iter()) {
            assert_relative_eq!(*old, *new, epsilon = 1e-5);
        }
        assert_relative_eq!(
            Point3f::from(object.transform.translation_part()),
            target,
            epsilon = 1e-5
        );
    }

    #[test]
    fn set_object_origin_is_exact_noop_when_already_there() {
        let mut scene = Scene::new();
        let mut object = SceneObject::mesh("quad", quad_mesh());
        object.transform = Transform3D::translation(Vector3f::new(2.0, 3.0, 0.0));
        let id = scene.add_object(object);

        let current = Point3f::new(2.0, 3.0, 0.0);
        let before = scene.object(id).unwrap().clone();
        scene.set_object_origin(id, current).unwrap();

        assert_eq!(scene.object(id).unwrap(), &before);
    }

    #[test]
    fn set_object_origin_rejects_bad_targets() {
        let mut scene = Scene::new();
        let empty = scene.add_object(SceneObject::new("probe", ObjectData::Empty));
        let mut squashed = SceneObject::mesh("flat", quad_mesh());
        squashed.transform = Transform3D::uniform_scaling(0.0);
        let squashed = scene.add_object(squashed);

        let target = Point3f::origin();
        assert!(matches!(
            scene.set_object_origin(ObjectId::new(99), target),
            Err(Error::NoSuchObject(_))
        ));
        assert!(matches!(
            scene.set_object_origin(empty, target),
            Err(Error::NotAMesh(_))
        ));
        assert!(matches!(
            scene.set_object_origin(squashed, target),
            Err(Error::DegenerateTransform(_))
        ));
    }

    #[test]
    fn origin_to_cursor_uses_current_cursor() {
        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::mesh("quad", quad_mesh()));
        scene.set_cursor(Point3f::new(0.5, 0.5, 0.0));

        scene.set_object_origin_to_cursor(id).unwrap();

        let object = scene.object(id).unwrap();
        assert_eq!(
            object.transform.translation_part(),
            Vector3f::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn modifiers_shape_evaluated_geometry_only() {
        let mut object = SceneObject::mesh("quad", quad_mesh());
        object.modifiers.push(Modifier::Scale(Vector3f::new(2.0, 2.0, 1.0)));
        object.modifiers.push(Modifier::Offset(Vector3f::new(0.0, 0.0, 4.0)));

        // Applied in stack order: scaled first, then shifted.
        let bounds = object.world_bounds().unwrap();
        assert_eq!(bounds.max.x, 2.0);
        assert_eq!(bounds.max.y, 2.0);
        assert_eq!(bounds.min.z, 4.0);
        assert_eq!(bounds.max.z, 4.0);

        // Base mesh stays untouched.
        assert_eq!(object.base_mesh().unwrap().vertices[2].x, 1.0);
    }

    #[test]
    fn world_bounds_missing_without_vertices() {
        let empty_mesh = SceneObject::mesh("hollow", TriangleMesh::new());
        let camera = SceneObject::new("cam", ObjectData::Camera);

        assert!(empty_mesh.world_bounds().is_none());
        assert!(camera.world_bounds().is_none());
    }

    #[test]
    fn selection_drops_unknown_and_duplicate_ids() {
        let mut scene = Scene::new();
        let a = scene.add_object(SceneObject::new("a", ObjectData::Empty));
        let b = scene.add_object(SceneObject::new("b", ObjectData::Empty));

        scene.set_selection(vec![b, a, b, ObjectId::new(17)]);
        assert_eq!(scene.selection(), &[b, a]);

        scene.clear_selection();
        assert!(scene.selection().is_empty());
    }

    #[test]
    fn undo_and_redo_swap_object_state() {
        let mut scene = Scene::new();
        let id = scene.add_object(SceneObject::mesh("quad", quad_mesh()));
        let pristine = scene.object(id).unwrap().clone();

        let mut step = UndoStep::new("move origin");
        step.record(id, scene.object(id).unwrap().saved_state());
        scene
            .set_object_origin(id, Point3f::new(0.5, 0.5, 0.0))
            .unwrap();
        let moved = scene.object(id).unwrap().clone();
        scene.push_undo_step(step);

        assert_eq!(scene.undo().as_deref(), Some("move origin"));
        assert_eq!(scene.object(id).unwrap(), &pristine);

        assert_eq!(scene.redo().as_deref(), Some("move origin"));
        assert_eq!(scene.object(id).unwrap(), &moved);
    }
}
