/// An n-dimensional object with a location, such as a point.
///
/// The kd-tree prunes subtrees with the squared distance along a single
/// axis, so a custom `squared_distance_to` must never return less than
/// `(self[axis] - other[axis])^2` for any axis. Metrics that violate this
/// still run, but queries may miss the true nearest point.
pub trait Positionable {
    fn dimension(&self) -> usize;

    fn coordinate(&self, axis: usize) -> f64;

    fn squared_distance_to<O: Positionable + ?Sized>(&self, other: &O) -> f64 {
        squared_euclidean(self, other)
    }
}

pub fn squared_euclidean<A, B>(a: &A, b: &B) -> f64
where
    A: Positionable + ?Sized,
    B: Positionable + ?Sized,
{
    let mut sum = 0.0;
    for axis in 0..a.dimension() {
        sum += (b.coordinate(axis) - a.coordinate(axis)).powi(2);
    }
    sum
}

pub fn euclidean<A, B>(a: &A, b: &B) -> f64
where
    A: Positionable + ?Sized,
    B: Positionable + ?Sized,
{
    squared_euclidean(a, b).sqrt()
}

impl<const D: usize> Positionable for [f64; D] {
    fn dimension(&self) -> usize {
        D
    }

    fn coordinate(&self, axis: usize) -> f64 {
        self[axis]
    }
}

impl<T: Positionable + ?Sized> Positionable for &T {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn coordinate(&self, axis: usize) -> f64 {
        (**self).coordinate(axis)
    }

    fn squared_distance_to<O: Positionable + ?Sized>(&self, other: &O) -> f64 {
        (**self).squared_distance_to(other)
    }
}
