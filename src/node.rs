/// One slot of the implicit tree: a point plus its split record.
///
/// The left subtree, when present, always starts at the next slot, so only
/// the start of the right subtree is stored.
#[derive(Clone, Debug)]
pub struct Node<P> {
    pub point: P,
    pub split_axis: Option<usize>,
    pub right_start: Option<usize>,
}

impl<P> Node<P> {
    #[must_use]
    pub fn new(point: P) -> Node<P> {
        Node {
            point,
            split_axis: None,
            right_start: None,
        }
    }

    pub fn make_leaf(&mut self) {
        self.split_axis = None;
        self.right_start = None;
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.split_axis.is_none()
    }

    /// Start of the left subtree of the node stored at `slot`.
    #[must_use]
    pub fn left_start(&self, slot: usize) -> Option<usize> {
        if self.is_leaf() || self.right_start == Some(slot + 1) {
            None
        } else {
            Some(slot + 1)
        }
    }
}
