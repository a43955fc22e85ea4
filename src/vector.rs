use crate::distance::Positionable;
use std::fmt;
use std::ops::{AddAssign, MulAssign};

/// A point or direction with a dimension chosen at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct NdVector {
    components: Vec<f64>,
}

impl NdVector {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self::filled(dimension, 0.0)
    }

    #[must_use]
    pub fn filled(dimension: usize, value: f64) -> Self {
        NdVector {
            components: vec![value; dimension],
        }
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn get(&self, axis: usize) -> f64 {
        self.components[axis]
    }

    pub fn set(&mut self, axis: usize, value: f64) {
        self.components[axis] = value;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.components
    }

    /// Component-wise addition. Both vectors must have the same dimension.
    pub fn add_in_place(&mut self, other: &NdVector) {
        for (x, y) in self.components.iter_mut().zip(other.components.iter()) {
            *x += y;
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for x in &mut self.components {
            *x *= factor;
        }
    }

    #[must_use]
    pub fn sum_components(&self) -> f64 {
        self.components.iter().sum()
    }

    #[must_use]
    pub fn sum_abs_components(&self) -> f64 {
        self.components.iter().map(|x| x.abs()).sum()
    }
}

impl Positionable for NdVector {
    fn dimension(&self) -> usize {
        self.components.len()
    }

    fn coordinate(&self, axis: usize) -> f64 {
        self.components[axis]
    }
}

impl From<Vec<f64>> for NdVector {
    fn from(components: Vec<f64>) -> Self {
        NdVector { components }
    }
}

impl<const D: usize> From<[f64; D]> for NdVector {
    fn from(components: [f64; D]) -> Self {
        NdVector {
            components: components.to_vec(),
        }
    }
}

impl AddAssign<&NdVector> for NdVector {
    fn add_assign(&mut self, other: &NdVector) {
        self.add_in_place(other);
    }
}

impl MulAssign<f64> for NdVector {
    fn mul_assign(&mut self, factor: f64) {
        self.scale(factor);
    }
}

impl fmt::Display for NdVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( ")?;
        for x in &self.components {
            write!(f, "{x} ")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::NdVector;
    use crate::distance::Positionable;

    #[test]
    fn arithmetic() {
        let mut v = NdVector::filled(3, 1.0);
        v += &NdVector::from([1.0, -2.0, 3.0]);
        assert_eq!(v.as_slice(), &[2.0, -1.0, 4.0]);

        v *= 0.5;
        assert_eq!(v.as_slice(), &[1.0, -0.5, 2.0]);
        assert_eq!(v.sum_components(), 2.5);
        assert_eq!(v.sum_abs_components(), 3.5);
    }

    #[test]
    fn positionable() {
        let mut a = NdVector::new(2);
        a.set(1, 4.0);
        let b = NdVector::from(vec![3.0, 0.0]);
        assert_eq!(a.dimension(), 2);
        assert_eq!(a.coordinate(1), 4.0);
        assert_eq!(a.squared_distance_to(&b), 25.0);
        assert_eq!(a.to_string(), "( 0 4 )");
    }
}
