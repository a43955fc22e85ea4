use crate::distance::Positionable;
use crate::vector::NdVector;
use std::fmt;

/// Axis-aligned bounding box in n dimensions.
///
/// A new box is empty: `min` is `+inf` and `max` is `-inf` on every axis, so
/// the first `update` collapses it onto that point.
#[derive(Clone, Debug, PartialEq)]
pub struct NdAabb {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl NdAabb {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        NdAabb {
            min: vec![f64::INFINITY; dimension],
            max: vec![f64::NEG_INFINITY; dimension],
        }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.min.len()
    }

    #[must_use]
    pub fn min(&self, axis: usize) -> f64 {
        self.min[axis]
    }

    #[must_use]
    pub fn max(&self, axis: usize) -> f64 {
        self.max[axis]
    }

    pub fn set_min(&mut self, axis: usize, value: f64) {
        self.min[axis] = value;
    }

    pub fn set_max(&mut self, axis: usize, value: f64) {
        self.max[axis] = value;
    }

    pub fn set_min_all(&mut self, value: f64) {
        self.min.fill(value);
    }

    pub fn set_max_all(&mut self, value: f64) {
        self.max.fill(value);
    }

    /// Expands the box so it includes `point`.
    pub fn update<P: Positionable + ?Sized>(&mut self, point: &P) {
        for axis in 0..self.dimension() {
            let x = point.coordinate(axis);
            if x < self.min[axis] {
                self.min[axis] = x;
            }
            if x > self.max[axis] {
                self.max[axis] = x;
            }
        }
    }

    /// Half-open containment: `min <= p < max` on every axis.
    #[must_use]
    pub fn contains<P: Positionable + ?Sized>(&self, point: &P) -> bool {
        (0..self.dimension()).all(|axis| {
            let x = point.coordinate(axis);
            x >= self.min[axis] && x < self.max[axis]
        })
    }

    #[must_use]
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    #[must_use]
    pub fn center(&self, axis: usize) -> f64 {
        (self.min[axis] + self.max[axis]) * 0.5
    }

    #[must_use]
    pub fn center_point(&self) -> NdVector {
        let mut center = NdVector::new(self.dimension());
        for axis in 0..self.dimension() {
            center.set(axis, self.center(axis));
        }
        center
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        (0..self.dimension()).map(|axis| self.extent(axis)).product()
    }

    /// Returns the axis with the largest extent. Ties go to the lowest axis,
    /// and a zero-dimensional box reports axis 0.
    #[must_use]
    pub fn max_extent_axis(&self) -> usize {
        if self.dimension() == 0 {
            return 0;
        }
        let mut best_axis = 0;
        let mut best_extent = self.extent(0);
        for axis in 1..self.dimension() {
            let extent = self.extent(axis);
            if extent > best_extent {
                best_extent = extent;
                best_axis = axis;
            }
        }
        best_axis
    }

    /// Stores the overlap of `a` and `b` in `self`.
    ///
    /// Returns `false` at the first axis without overlap; `self` is then only
    /// partially written and must not be used.
    pub fn intersect(&mut self, a: &NdAabb, b: &NdAabb) -> bool {
        self.min.clone_from(&a.min);
        self.max.clone_from(&a.max);
        for axis in 0..self.dimension() {
            if b.min[axis] > self.min[axis] {
                self.min[axis] = b.min[axis];
            }
            if b.max[axis] < self.max[axis] {
                self.max[axis] = b.max[axis];
            }
            if self.min[axis] >= self.max[axis] {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for NdAabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( ")?;
        for x in &self.min {
            write!(f, "{x} ")?;
        }
        write!(f, ") ( ")?;
        for x in &self.max {
            write!(f, "{x} ")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::NdAabb;

    #[test]
    fn update_and_queries() {
        let mut aabb = NdAabb::new(3);
        aabb.update(&[1.0, 5.0, -2.0]);
        aabb.update(&[3.0, 1.0, 2.0]);

        for axis in 0..3 {
            assert!(aabb.min(axis) <= aabb.max(axis));
        }
        assert_eq!(aabb.extent(0), 2.0);
        assert_eq!(aabb.extent(1), 4.0);
        assert_eq!(aabb.extent(2), 4.0);
        assert_eq!(aabb.center(1), 3.0);
        assert_eq!(aabb.center_point().as_slice(), &[2.0, 3.0, 0.0]);
        assert_eq!(aabb.volume(), 32.0);

        // Axis 1 and 2 tie, the lower one wins.
        assert_eq!(aabb.max_extent_axis(), 1);
    }

    #[test]
    fn single_point_box() {
        let mut aabb = NdAabb::new(2);
        aabb.update(&[4.0, 4.0]);
        assert_eq!(aabb.extent(0), 0.0);
        assert_eq!(aabb.max_extent_axis(), 0);
        assert_eq!(aabb.center(0), 4.0);
    }

    #[test]
    fn zero_dimensional_box() {
        let aabb = NdAabb::new(0);
        assert_eq!(aabb.max_extent_axis(), 0);
        assert_eq!(aabb.volume(), 1.0);
    }

    #[test]
    fn contains_is_half_open() {
        let mut aabb = NdAabb::new(2);
        aabb.set_min_all(0.0);
        aabb.set_max_all(1.0);
        assert!(aabb.contains(&[0.0, 0.5]));
        assert!(!aabb.contains(&[1.0, 0.5]));
        assert!(!aabb.contains(&[-0.1, 0.5]));
    }

    #[test]
    fn intersection() {
        let mut a = NdAabb::new(2);
        a.update(&[0.0, 0.0]);
        a.update(&[2.0, 2.0]);
        let mut b = NdAabb::new(2);
        b.update(&[1.0, 1.0]);
        b.update(&[3.0, 3.0]);

        let mut overlap = NdAabb::new(2);
        assert!(overlap.intersect(&a, &b));
        assert_eq!(overlap.min(0), 1.0);
        assert_eq!(overlap.max(1), 2.0);

        let mut c = NdAabb::new(2);
        c.update(&[5.0, 0.0]);
        c.update(&[6.0, 2.0]);
        assert!(!overlap.intersect(&a, &c));
    }

    #[test]
    fn display() {
        let mut aabb = NdAabb::new(2);
        aabb.set_min(0, 0.0);
        aabb.set_min(1, 1.0);
        aabb.set_max(0, 2.0);
        aabb.set_max(1, 3.0);
        assert_eq!(aabb.to_string(), "( 0 1 ) ( 2 3 )");
    }
}
