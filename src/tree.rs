use crate::{
    aabb::NdAabb,
    distance::Positionable,
    error::{KdTreeError, Result},
    neighbors::KNearest,
    node::Node,
    stack::TraversalStack,
};
use ordered_float::OrderedFloat;
use std::time::Instant;

/// Traversal stack capacity used by [`PointKdTree::new`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// An n-dimensional kd-tree over points, stored as an implicit tree.
///
/// Points are appended with [`insert`](Self::insert), then
/// [`build`](Self::build) reorders them in place so that every slot holds a
/// node whose left subtree follows it directly. Splits use the axis of
/// largest extent and the point closest to the middle of that axis rather
/// than the median, so building is linear per level but the tree is not
/// guaranteed to be balanced.
///
/// Pruning compares the squared distance along the split axis against the
/// current best squared distance, so results are exact only for metrics
/// where that per-axis term is a lower bound (see [`Positionable`]).
#[derive(Clone, Debug)]
pub struct PointKdTree<P> {
    dimension: usize,
    max_depth: usize,
    nodes: Vec<Node<P>>,
    built: bool,
}

impl<P: Positionable> PointKdTree<P> {
    pub fn new(dimension: usize) -> Result<Self> {
        Self::with_max_depth(dimension, DEFAULT_MAX_DEPTH)
    }

    /// Creates a tree whose queries fail with
    /// [`KdTreeError::StackOverflow`] once more than `max_depth` subtrees
    /// are pending during a traversal.
    pub fn with_max_depth(dimension: usize, max_depth: usize) -> Result<Self> {
        if dimension < 2 {
            return Err(KdTreeError::InvalidDimension { dimension });
        }
        Ok(PointKdTree {
            dimension,
            max_depth,
            nodes: Vec::new(),
            built: false,
        })
    }

    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the layout reflects every inserted point.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&P> {
        self.nodes.get(i).map(|node| &node.point)
    }

    /// Points in their current sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.nodes.iter().map(|node| &node.point)
    }

    pub fn insert(&mut self, point: P) -> Result<()> {
        self.check_dimension(&point)?;
        self.nodes.push(Node::new(point));
        self.built = false;
        Ok(())
    }

    /// Inserts `point` unless an existing point lies within squared distance
    /// `epsilon` of it. Returns whether the point was inserted.
    ///
    /// This scans every point, so it is meant for small batches.
    pub fn insert_unique(&mut self, point: P, epsilon: f64) -> Result<bool> {
        self.check_dimension(&point)?;
        if self
            .nodes
            .iter()
            .any(|node| point.squared_distance_to(&node.point) <= epsilon)
        {
            return Ok(false);
        }
        self.nodes.push(Node::new(point));
        self.built = false;
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.built = false;
    }

    /// Partitions the points into the implicit tree layout.
    ///
    /// Must be called after inserting points and before querying. Building
    /// again starts over from the current sequence.
    pub fn build(&mut self) {
        let start = Instant::now();

        let mut ranges = Vec::new();
        if !self.nodes.is_empty() {
            ranges.push((0, self.nodes.len()));
        }
        while let Some((lo, hi)) = ranges.pop() {
            if hi - lo == 1 {
                self.nodes[lo].make_leaf();
                continue;
            }
            let mid = self.split(lo, hi);
            if mid < hi {
                ranges.push((mid, hi));
            }
            if lo + 1 < mid {
                ranges.push((lo + 1, mid));
            }
        }
        self.built = true;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "built kd-tree: {} points, dimension {}, depth {}, {:.3?}",
                self.nodes.len(),
                self.dimension,
                self.depth(),
                start.elapsed()
            );
        }
    }

    /// Splits `[lo, hi)` around the point nearest to the middle of its
    /// widest axis, stores that point at `lo` and returns where the right
    /// half begins.
    fn split(&mut self, lo: usize, hi: usize) -> usize {
        let mut aabb = NdAabb::new(self.dimension);
        for node in &self.nodes[lo..hi] {
            aabb.update(&node.point);
        }
        let axis = aabb.max_extent_axis();
        let center = aabb.center(axis);

        let mut pivot = lo;
        let mut pivot_distance = (center - self.nodes[lo].point.coordinate(axis)).abs();
        for i in lo + 1..hi {
            let distance = (center - self.nodes[i].point.coordinate(axis)).abs();
            if distance < pivot_distance {
                pivot_distance = distance;
                pivot = i;
            }
        }
        let plane = self.nodes[pivot].point.coordinate(axis);
        self.nodes.swap(lo, pivot);

        let mid = self.partition(lo + 1, hi, axis, plane);
        let node = &mut self.nodes[lo];
        node.split_axis = Some(axis);
        node.right_start = (mid < hi).then_some(mid);
        mid
    }

    /// Reorders `[start, end)` into points below `plane` on `axis` followed
    /// by the rest, returning the boundary.
    fn partition(&mut self, mut start: usize, mut end: usize, axis: usize, plane: f64) -> usize {
        while start < end {
            while start < end && self.nodes[start].point.coordinate(axis) < plane {
                start += 1;
            }
            while start < end && self.nodes[end - 1].point.coordinate(axis) >= plane {
                end -= 1;
            }
            if start + 1 < end {
                self.nodes.swap(start, end - 1);
                start += 1;
                end -= 1;
            } else {
                break;
            }
        }
        start
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.nodes.is_empty() || !self.built {
            return 0;
        }
        let mut deepest = 0_usize;
        let mut pending = vec![(0_usize, 1_usize)];
        while let Some((slot, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[slot];
            if let Some(left) = node.left_start(slot) {
                pending.push((left, depth + 1));
            }
            if let Some(right) = node.right_start {
                pending.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Returns the point closest to `query`.
    ///
    /// When several points are equally close, the first one reached by the
    /// near-side-first traversal wins. Queries with a NaN or infinite
    /// coordinate are rejected with [`KdTreeError::NonFiniteQuery`].
    pub fn nearest<Q: Positionable + ?Sized>(&self, query: &Q) -> Result<&P> {
        self.check_query(query)?;
        if self.nodes.is_empty() {
            return Err(KdTreeError::EmptyIndex);
        }
        self.check_built()?;

        let mut best: Option<&P> = None;
        let mut best_distance = f64::INFINITY;
        let mut stack = TraversalStack::new(self.max_depth);
        stack.push(0)?;
        while let Some(current) = stack.top() {
            let node = &self.nodes[current];
            let distance = query.squared_distance_to(&node.point);
            if best.is_none() || distance < best_distance {
                best = Some(&node.point);
                best_distance = distance;
            }
            self.descend(query, current, best_distance, &mut stack)?;
        }
        best.ok_or(KdTreeError::EmptyIndex)
    }

    /// Returns `k` slots holding the `k` points closest to `query`, in no
    /// particular order. Slots stay `None` when the tree holds fewer than
    /// `k` points.
    ///
    /// All `k` slots are allocated up front, so `k` must fit in memory. Use
    /// [`k_nearest_sorted`](Self::k_nearest_sorted) when `k` may exceed
    /// [`len`](Self::len) by a wide margin.
    pub fn k_nearest<Q: Positionable + ?Sized>(
        &self,
        query: &Q,
        k: usize,
    ) -> Result<Vec<Option<&P>>> {
        Ok(self.k_nearest_buffer(query, k)?.into_points())
    }

    /// Like [`k_nearest`](Self::k_nearest), but returns only the found
    /// points with their squared distances, closest first.
    pub fn k_nearest_sorted<Q: Positionable + ?Sized>(
        &self,
        query: &Q,
        k: usize,
    ) -> Result<Vec<(&P, f64)>> {
        let mut entries = self
            .k_nearest_buffer(query, k.min(self.nodes.len()))?
            .into_entries()
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        entries.sort_by_key(|(_, distance)| OrderedFloat(*distance));
        Ok(entries)
    }

    fn k_nearest_buffer<Q: Positionable + ?Sized>(
        &self,
        query: &Q,
        k: usize,
    ) -> Result<KNearest<'_, P>> {
        self.check_query(query)?;
        let mut neighbors = KNearest::new(k);
        if k == 0 || self.nodes.is_empty() {
            return Ok(neighbors);
        }
        self.check_built()?;

        let mut bound = f64::INFINITY;
        let mut stack = TraversalStack::new(self.max_depth);
        stack.push(0)?;
        while let Some(current) = stack.top() {
            let node = &self.nodes[current];
            let distance = query.squared_distance_to(&node.point);
            if distance < bound {
                bound = neighbors.insert(&node.point, distance);
            }
            self.descend(query, current, bound, &mut stack)?;
        }
        Ok(neighbors)
    }

    /// Moves the traversal past the node on top of the stack.
    ///
    /// The near child replaces the top. The far child is kept underneath it
    /// only if the splitting plane is closer than `bound`.
    fn descend<Q: Positionable + ?Sized>(
        &self,
        query: &Q,
        current: usize,
        bound: f64,
        stack: &mut TraversalStack,
    ) -> Result<()> {
        let node = &self.nodes[current];
        let Some(axis) = node.split_axis else {
            stack.pop();
            return Ok(());
        };

        let delta = query.coordinate(axis) - node.point.coordinate(axis);
        let left = node.left_start(current);
        let right = node.right_start;
        let (near, far) = if delta < 0.0 {
            (left, right)
        } else {
            (right, left)
        };
        let far = far.filter(|_| delta * delta < bound);

        match (near, far) {
            (Some(near), Some(far)) => {
                stack.replace_top(far);
                stack.push(near)?;
            }
            (Some(next), None) | (None, Some(next)) => stack.replace_top(next),
            (None, None) => {
                stack.pop();
            }
        }
        Ok(())
    }

    /// Linear scan for the closest point; the reference for
    /// [`nearest`](Self::nearest). Does not require a build.
    pub fn nearest_brute_force<Q: Positionable + ?Sized>(&self, query: &Q) -> Result<&P> {
        self.check_query(query)?;
        let mut best: Option<(&P, f64)> = None;
        for node in &self.nodes {
            let distance = query.squared_distance_to(&node.point);
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((&node.point, distance));
            }
        }
        best.map(|(point, _)| point).ok_or(KdTreeError::EmptyIndex)
    }

    /// Linear scan for the `k` closest points with their squared distances,
    /// closest first. Does not require a build.
    pub fn k_nearest_brute_force<Q: Positionable + ?Sized>(
        &self,
        query: &Q,
        k: usize,
    ) -> Result<Vec<(&P, f64)>> {
        self.check_query(query)?;
        let mut entries = self
            .nodes
            .iter()
            .map(|node| (&node.point, query.squared_distance_to(&node.point)))
            .collect::<Vec<_>>();
        entries.sort_by_key(|(_, distance)| OrderedFloat(*distance));
        entries.truncate(k);
        Ok(entries)
    }

    fn check_dimension<Q: Positionable + ?Sized>(&self, point: &Q) -> Result<()> {
        if point.dimension() != self.dimension {
            return Err(KdTreeError::DimensionMismatch {
                expected: self.dimension,
                actual: point.dimension(),
            });
        }
        Ok(())
    }

    fn check_query<Q: Positionable + ?Sized>(&self, query: &Q) -> Result<()> {
        self.check_dimension(query)?;
        match (0..self.dimension).find(|&axis| !query.coordinate(axis).is_finite()) {
            Some(axis) => Err(KdTreeError::NonFiniteQuery { axis }),
            None => Ok(()),
        }
    }

    fn check_built(&self) -> Result<()> {
        if self.built {
            Ok(())
        } else {
            Err(KdTreeError::NotBuilt)
        }
    }
}
