//! Worley cellular basis functions over the unit square.
//!
//! Feature points are scattered with a [`PointGenerator`], optionally
//! replicated across the borders so the pattern tiles, and stored in a
//! [`PointKdTree`]. Each evaluation is one nearest or k-nearest query.

use crate::{
    distance::Positionable,
    error::{KdTreeError, Result},
    sampling::{self, as_f64, PointGenerator},
    tree::PointKdTree,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::SQRT_2;

/// Which neighbor distance drives the pattern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellFunction {
    /// Distance to the nearest feature point.
    #[default]
    F1,
    /// Distance to the second nearest feature point.
    F2,
    /// Distance to the third nearest feature point.
    F3,
    /// Flat value per cell.
    Constant,
    /// Difference between the two nearest distances, bright along cell borders.
    F2MinusF1,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceFunction {
    #[default]
    Euclid,
    Manhattan,
    Max,
    /// Minkowski distance with exponent 0.5.
    Minkowski05,
}

impl DistanceFunction {
    #[must_use]
    pub fn distance(self, dx: f64, dy: f64) -> f64 {
        let (dx, dy) = (dx.abs(), dy.abs());
        match self {
            DistanceFunction::Euclid => (dx * dx + dy * dy).sqrt(),
            DistanceFunction::Manhattan => dx + dy,
            DistanceFunction::Max => dx.max(dy),
            DistanceFunction::Minkowski05 => (dx.sqrt() + dy.sqrt()).powi(2),
        }
    }

    /// Square of [`distance`](Self::distance). Every metric here is at least
    /// as large as the offset along either axis, so the square bounds the
    /// per-axis term used for pruning.
    #[must_use]
    pub fn squared_distance(self, dx: f64, dy: f64) -> f64 {
        match self {
            DistanceFunction::Euclid => dx * dx + dy * dy,
            _ => self.distance(dx, dy).powi(2),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellularParams {
    pub cell_function: CellFunction,
    pub distance_function: DistanceFunction,
    pub point_generator: PointGenerator,
    pub seed: u64,
    /// Multiplier applied before clamping. Must be non-negative.
    pub intensity: f64,
    /// Number of feature points, at least 2.
    pub num_points: usize,
    /// Random offset of the feature points, in `[0, 2]`.
    pub jitter: f64,
    /// Scale each cell by its own random value.
    pub random_color: bool,
    /// Replicate feature points across the borders so the pattern tiles.
    pub periodic: bool,
}

impl Default for CellularParams {
    fn default() -> Self {
        CellularParams {
            cell_function: CellFunction::F1,
            distance_function: DistanceFunction::Euclid,
            point_generator: PointGenerator::Random,
            seed: 0,
            intensity: 1.0,
            num_points: 16,
            jitter: 0.0,
            random_color: false,
            periodic: true,
        }
    }
}

/// A stored feature point. `index` identifies the generated point, shared
/// by all of its periodic copies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeaturePoint {
    pub x: f64,
    pub y: f64,
    pub index: usize,
}

impl Positionable for FeaturePoint {
    fn dimension(&self) -> usize {
        2
    }

    fn coordinate(&self, axis: usize) -> f64 {
        [self.x, self.y][axis]
    }
}

/// Lookup position carrying the pattern's metric.
struct Probe {
    x: f64,
    y: f64,
    metric: DistanceFunction,
}

impl Probe {
    fn distance_to(&self, point: &FeaturePoint) -> f64 {
        self.metric.distance(self.x - point.x, self.y - point.y)
    }
}

impl Positionable for Probe {
    fn dimension(&self) -> usize {
        2
    }

    fn coordinate(&self, axis: usize) -> f64 {
        [self.x, self.y][axis]
    }

    fn squared_distance_to<O: Positionable + ?Sized>(&self, other: &O) -> f64 {
        self.metric.squared_distance(
            self.x - other.coordinate(0),
            self.y - other.coordinate(1),
        )
    }
}

pub struct Cellular {
    params: CellularParams,
    points: PointKdTree<FeaturePoint>,
    random_values: Vec<f64>,
}

impl Cellular {
    pub fn new(params: CellularParams) -> Result<Self> {
        if params.num_points < 2 {
            return Err(KdTreeError::InvalidParameter(format!(
                "num_points must be at least 2, got {}",
                params.num_points
            )));
        }
        if params.intensity.is_nan() || params.intensity < 0.0 {
            return Err(KdTreeError::InvalidParameter(format!(
                "intensity must be non-negative, got {}",
                params.intensity
            )));
        }
        if !(0.0..=2.0).contains(&params.jitter) {
            return Err(KdTreeError::InvalidParameter(format!(
                "jitter must be within [0, 2], got {}",
                params.jitter
            )));
        }

        let mut points = PointKdTree::new(2)?;
        let positions = sampling::generate(
            params.point_generator,
            params.num_points,
            params.jitter,
            params.seed,
        );
        for (index, [x, y]) in positions.into_iter().enumerate() {
            points.insert(FeaturePoint { x, y, index })?;
        }
        if params.periodic {
            replicate_on_torus(&mut points)?;
        }
        if params.cell_function == CellFunction::F3 && points.len() < 3 {
            return Err(KdTreeError::InvalidParameter(format!(
                "F3 needs at least 3 stored points, got {}",
                points.len()
            )));
        }
        points.build();

        let mut rng = StdRng::seed_from_u64(params.seed);
        let random_values = (0..params.num_points).map(|_| rng.gen::<f64>()).collect();

        log::debug!(
            "cellular pattern: {} feature points, {} stored",
            params.num_points,
            points.len()
        );
        Ok(Cellular {
            params,
            points,
            random_values,
        })
    }

    #[must_use]
    pub fn params(&self) -> &CellularParams {
        &self.params
    }

    /// Stored feature points, including periodic copies.
    #[must_use]
    pub fn feature_points(&self) -> &PointKdTree<FeaturePoint> {
        &self.points
    }

    /// Evaluates the pattern at `(u, v)`.
    ///
    /// Distance based functions are normalized by the point density and
    /// clamped to `[0, 1]`; `Constant` returns the intensity unclamped.
    pub fn value(&self, u: f64, v: f64) -> Result<f64> {
        let probe = Probe {
            x: u,
            y: v,
            metric: self.params.distance_function,
        };

        let (nearest, distance) = match self.params.cell_function {
            CellFunction::F1 => {
                let nearest = self.points.nearest(&probe)?;
                (nearest, probe.distance_to(nearest))
            }
            CellFunction::F2 => {
                let farthest = self.farthest_of(&probe, 2)?;
                (farthest, probe.distance_to(farthest) / SQRT_2)
            }
            CellFunction::F3 => {
                let farthest = self.farthest_of(&probe, 3)?;
                (farthest, probe.distance_to(farthest) / 2.0)
            }
            CellFunction::Constant => {
                let nearest = self.points.nearest(&probe)?;
                return Ok(self.params.intensity * self.cell_scale(nearest));
            }
            CellFunction::F2MinusF1 => {
                let neighbors = self.points.k_nearest_sorted(&probe, 2)?;
                let (Some(&(first, _)), Some(&(second, _))) = (neighbors.first(), neighbors.get(1))
                else {
                    return Err(KdTreeError::EmptyIndex);
                };
                let gap = (probe.distance_to(second) - probe.distance_to(first)).abs();
                (first, gap * SQRT_2)
            }
        };

        let mut density = self.points.len();
        if self.params.periodic {
            density /= 4;
        }
        let value = (distance * self.params.intensity * as_f64(density).sqrt()).clamp(0.0, 1.0);
        Ok(value * self.cell_scale(nearest))
    }

    /// Evaluates the pattern at the pixel centers of a `width` x `height`
    /// image, row by row.
    pub fn sample_grid(&self, width: usize, height: usize) -> Result<Vec<f64>> {
        let Some(size) = width.checked_mul(height) else {
            return Err(KdTreeError::InvalidParameter(format!(
                "grid of {width} x {height} samples is too large"
            )));
        };
        let mut values = Vec::with_capacity(size);
        for row in 0..height {
            let v = (as_f64(row) + 0.5) / as_f64(height);
            for column in 0..width {
                let u = (as_f64(column) + 0.5) / as_f64(width);
                values.push(self.value(u, v)?);
            }
        }
        Ok(values)
    }

    /// The `k`-th nearest feature point.
    fn farthest_of(&self, probe: &Probe, k: usize) -> Result<&FeaturePoint> {
        let neighbors = self.points.k_nearest_sorted(probe, k)?;
        match k.checked_sub(1).and_then(|last| neighbors.get(last)) {
            Some(&(point, _)) => Ok(point),
            None => Err(KdTreeError::InvalidParameter(format!(
                "{k} neighbors requested, {} stored points",
                neighbors.len()
            ))),
        }
    }

    fn cell_scale(&self, point: &FeaturePoint) -> f64 {
        if self.params.random_color {
            self.random_values[point.index]
        } else {
            1.0
        }
    }
}

/// Adds three copies of every point, shifted by one unit towards the closer
/// border on x, on y, and on both.
fn replicate_on_torus(points: &mut PointKdTree<FeaturePoint>) -> Result<()> {
    let copies = points
        .iter()
        .flat_map(|p| {
            let x = if p.x < 0.5 { p.x + 1.0 } else { p.x - 1.0 };
            let y = if p.y < 0.5 { p.y + 1.0 } else { p.y - 1.0 };
            [
                FeaturePoint { x, y: p.y, ..*p },
                FeaturePoint { x: p.x, y, ..*p },
                FeaturePoint { x, y, ..*p },
            ]
        })
        .collect::<Vec<_>>();
    for copy in copies {
        points.insert(copy)?;
    }
    Ok(())
}
