//! Axis-aligned bounding boxes

use serde::{Deserialize, Serialize};

use crate::point::{Point3f, Vector3f};

/// An axis-aligned bounding box given by per-axis extrema
///
/// Always a transient value: recomputed from geometry per use, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3f,
    pub max: Point3f,
}

impl Aabb {
    /// Create a bounding box from explicit extrema
    pub fn new(min: Point3f, max: Point3f) -> Self {
        Self { min, max }
    }

    /// Fold a point sequence into its bounding box in a single pass
    ///
    /// Returns `None` when the sequence is empty. Ties on an axis are
    /// resolved by value, so the result does not depend on iteration order.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3f>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;

        for point in iter {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            min.z = min.z.min(point.z);

            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
            max.z = max.z.max(point.z);
        }

        Some(Self { min, max })
    }

    /// Center of the box
    pub fn center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    /// Center of the bottom face: x/y center, minimum z
    pub fn bottom_center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            self.min.z,
        )
    }

    /// Center of the top face: x/y center, maximum z
    pub fn top_center(&self) -> Point3f {
        Point3f::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            self.max.z,
        )
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3f {
        self.max - self.min
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Point3f::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3f::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_of_empty_sequence_is_none() {
        assert_eq!(Aabb::from_points(std::iter::empty()), None);
    }

    #[test]
    fn from_points_folds_extrema() {
        let bounds = Aabb::from_points(vec![
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(-1.0, 4.0, 0.0),
            Point3f::new(0.0, 0.0, 3.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Point3f::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn face_centers_share_xy_with_center() {
        let bounds = Aabb::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(2.0, 4.0, 6.0));

        assert_eq!(bounds.center(), Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(bounds.bottom_center(), Point3f::new(1.0, 2.0, 0.0));
        assert_eq!(bounds.top_center(), Point3f::new(1.0, 2.0, 6.0));
    }

    #[test]
    fn union_covers_both_boxes() {
        let a = Aabb::new(Point3f::new(-1.0, 0.0, 0.0), Point3f::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3f::new(0.0, -2.0, 0.5), Point3f::new(3.0, 0.5, 0.75));
        let joined = a.union(&b);

        assert_eq!(joined.min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(joined.max, Point3f::new(3.0, 1.0, 1.0));
    }
}
