/// Fixed-size buffer of the `k` closest candidates seen so far.
///
/// Slots are unordered. The worst slot is found by a linear rescan on every
/// insertion, which is cheap for the small `k` the cellular patterns use.
pub struct KNearest<'a, P> {
    slots: Vec<Option<(&'a P, f64)>>,
    filled: usize,
}

impl<'a, P> KNearest<'a, P> {
    #[must_use]
    pub fn new(k: usize) -> Self {
        KNearest {
            slots: vec![None; k],
            filled: 0,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Squared distance a candidate must beat to enter the buffer:
    /// `+inf` while slots are empty, otherwise the worst buffered distance.
    #[must_use]
    pub fn bound(&self) -> f64 {
        if !self.is_full() {
            return f64::INFINITY;
        }
        self.worst().map_or(f64::INFINITY, |(_, distance)| distance)
    }

    /// Offers a candidate and returns the new bound.
    ///
    /// The first empty slot is filled. Once full, the worst entry is
    /// replaced when the candidate is strictly closer.
    pub fn insert(&mut self, point: &'a P, distance: f64) -> f64 {
        if !self.is_full() {
            if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
                *slot = Some((point, distance));
                self.filled += 1;
            }
        } else if let Some((worst, worst_distance)) = self.worst() {
            if distance < worst_distance {
                self.slots[worst] = Some((point, distance));
            }
        }
        self.bound()
    }

    fn worst(&self) -> Option<(usize, f64)> {
        let mut worst: Option<(usize, f64)> = None;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some((_, distance)) = slot {
                if worst.map_or(true, |(_, d)| *distance > d) {
                    worst = Some((i, *distance));
                }
            }
        }
        worst
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Option<&'a P>> {
        self.slots
            .into_iter()
            .map(|slot| slot.map(|(point, _)| point))
            .collect()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Option<(&'a P, f64)>> {
        self.slots
    }
}
