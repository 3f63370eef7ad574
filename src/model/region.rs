//! Axis-aligned page regions.
//!
//! Coordinates are PDF points with a top-left origin: `y` grows downwards,
//! `x0 <= x1` and `y0 <= y1` for well-formed regions.

use serde::{Deserialize, Serialize};

/// A rectangle on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Region {
    /// Create a region from its edges.
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a region from origin and size.
    pub fn from_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Width (may be negative for malformed regions).
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height (may be negative for malformed regions).
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Signed area.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Centre point `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Smallest region containing both.
    pub fn union(&self, other: &Region) -> Region {
        Region::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Area of the intersection, 0 when disjoint.
    pub fn intersection_area(&self, other: &Region) -> f32 {
        self.horizontal_overlap(other) * self.vertical_overlap(other)
    }

    /// Intersection over union; 0 when the union area is not positive.
    pub fn overlap_ratio(&self, other: &Region) -> f32 {
        let intersection = self.intersection_area(other);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }

    /// Length of the shared x-interval, 0 when disjoint.
    pub fn horizontal_overlap(&self, other: &Region) -> f32 {
        (self.x1.min(other.x1) - self.x0.max(other.x0)).max(0.0)
    }

    /// Length of the shared y-interval, 0 when disjoint.
    pub fn vertical_overlap(&self, other: &Region) -> f32 {
        (self.y1.min(other.y1) - self.y0.max(other.y0)).max(0.0)
    }

    /// Horizontal distance between the closest edges, 0 when the x-intervals touch or overlap.
    pub fn horizontal_gap(&self, other: &Region) -> f32 {
        if self.x1 < other.x0 {
            other.x0 - self.x1
        } else if other.x1 < self.x0 {
            self.x0 - other.x1
        } else {
            0.0
        }
    }

    /// Check for zero or negative extent.
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if `inner` lies inside this region grown by `tolerance` on every side.
    pub fn contains_with_tolerance(&self, inner: &Region, tolerance: f32) -> bool {
        inner.x0 >= self.x0 - tolerance
            && inner.y0 >= self.y0 - tolerance
            && inner.x1 <= self.x1 + tolerance
            && inner.y1 <= self.y1 + tolerance
    }

    /// Multiply every coordinate by `(sx, sy)`.
    pub fn scale(&self, sx: f32, sy: f32) -> Region {
        Region::new(self.x0 * sx, self.y0 * sy, self.x1 * sx, self.y1 * sy)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}, {:.1})",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

/// Vector-drawing primitives clustered together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingGroup {
    /// Bounding boxes of the member primitives
    pub members: Vec<Region>,
}

impl DrawingGroup {
    /// Union of all member boxes, `None` for an empty group.
    pub fn bounds(&self) -> Option<Region> {
        let (first, rest) = self.members.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
    }

    /// Number of primitives in the group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_ratio() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(5.0, 5.0, 15.0, 15.0);
        // 25 / (100 + 100 - 25)
        assert!((a.overlap_ratio(&b) - 25.0 / 175.0).abs() < 1e-6);
        assert_eq!(a.overlap_ratio(&a), 1.0);

        let far = Region::new(100.0, 100.0, 110.0, 110.0);
        assert_eq!(a.overlap_ratio(&far), 0.0);
    }

    #[test]
    fn test_overlap_ratio_zero_union() {
        let point = Region::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(point.overlap_ratio(&point), 0.0);
    }

    #[test]
    fn test_horizontal_gap() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.horizontal_gap(&Region::new(30.0, 0.0, 40.0, 10.0)), 20.0);
        assert_eq!(Region::new(30.0, 0.0, 40.0, 10.0).horizontal_gap(&a), 20.0);
        assert_eq!(a.horizontal_gap(&Region::new(5.0, 50.0, 40.0, 60.0)), 0.0);
    }

    #[test]
    fn test_union_and_center() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(20.0, 5.0, 30.0, 40.0);
        assert_eq!(a.union(&b), Region::new(0.0, 0.0, 30.0, 40.0));
        assert_eq!(b.center(), (25.0, 22.5));
    }

    #[test]
    fn test_degenerate() {
        assert!(Region::new(5.0, 0.0, 5.0, 10.0).is_degenerate());
        assert!(Region::new(0.0, 10.0, 5.0, 0.0).is_degenerate());
        assert!(!Region::from_size(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_contains_with_tolerance() {
        let outer = Region::new(10.0, 10.0, 100.0, 100.0);
        assert!(outer.contains_with_tolerance(&Region::new(5.0, 5.0, 105.0, 105.0), 10.0));
        assert!(!outer.contains_with_tolerance(&Region::new(-1.0, 5.0, 50.0, 50.0), 10.0));
    }

    #[test]
    fn test_group_bounds() {
        let group = DrawingGroup {
            members: vec![
                Region::new(0.0, 0.0, 10.0, 10.0),
                Region::new(40.0, -5.0, 45.0, 3.0),
            ],
        };
        assert_eq!(group.bounds(), Some(Region::new(0.0, -5.0, 45.0, 10.0)));
        assert_eq!(DrawingGroup::default().bounds(), None);
    }
}
