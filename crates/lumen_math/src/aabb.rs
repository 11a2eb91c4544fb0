use crate::{Interval, Point3};

/// Axis-aligned bounding box, one [`Interval`] per axis.
///
/// Shapes report object- and world-space bounds through this type. An
/// unbounded shape (an infinite plane) reports [`Aabb::UNIVERSE`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    /// Create an AABB from two opposite corners, in any order.
    ///
    /// Flat boxes are padded so no axis has zero width.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        let mut aabb = Self {
            x: Interval::new(min.x(), max.x()),
            y: Interval::new(min.y(), max.y()),
            z: Interval::new(min.z(), max.z()),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    pub fn min(&self) -> Point3 {
        Point3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Point3 {
        Point3::new(self.x.max, self.y.max, self.z.max)
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// True if any axis extends to infinity.
    pub fn is_unbounded(&self) -> bool {
        [self.x, self.y, self.z]
            .iter()
            .any(|i| i.min.is_infinite() || i.max.is_infinite())
    }

    pub fn contains(&self, p: Point3) -> bool {
        self.x.contains(p.x()) && self.y.contains(p.y()) && self.z.contains(p.z())
    }

    /// The eight corners, x varying fastest.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Point3::new(lo.x(), lo.y(), lo.z()),
            Point3::new(hi.x(), lo.y(), lo.z()),
            Point3::new(lo.x(), hi.y(), lo.z()),
            Point3::new(hi.x(), hi.y(), lo.z()),
            Point3::new(lo.x(), lo.y(), hi.z()),
            Point3::new(hi.x(), lo.y(), hi.z()),
            Point3::new(lo.x(), hi.y(), hi.z()),
            Point3::new(hi.x(), hi.y(), hi.z()),
        ]
    }

    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points_any_order() {
        let aabb = Aabb::from_points(Point3::new(10.0, 0.0, 10.0), Point3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max(), Point3::new(10.0, 10.0, 10.0));
    }

    #[test]
    fn test_aabb_flat_box_is_padded() {
        let aabb = Aabb::from_points(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0));
        assert!(aabb.z.size() > 0.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Point3::ORIGIN, Point3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Point3::new(3.0, 3.0, 3.0), Point3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x.min, 0.0);
        assert_eq!(surrounding.x.max, 10.0);
        assert!(Aabb::surrounding(&Aabb::EMPTY, &box1) == box1);
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::from_points(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));

        assert!(aabb.contains(Point3::ORIGIN));
        assert!(aabb.contains(Point3::new(1.0, 1.0, 1.0)));
        assert!(!aabb.contains(Point3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_aabb_unbounded() {
        assert!(Aabb::UNIVERSE.is_unbounded());
        assert!(!Aabb::from_points(Point3::ORIGIN, Point3::new(1.0, 1.0, 1.0)).is_unbounded());
        assert!(Aabb::EMPTY.is_empty());
    }
}
