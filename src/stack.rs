use crate::error::{KdTreeError, Result};

/// Node stack for iterative tree traversal with a hard capacity.
///
/// The top of the stack is the node being visited. Each query owns its own
/// stack, so queries on a shared tree never contend.
pub struct TraversalStack {
    slots: Vec<usize>,
    max_depth: usize,
}

impl TraversalStack {
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        TraversalStack {
            slots: Vec::with_capacity(max_depth.min(64)),
            max_depth,
        }
    }

    pub fn push(&mut self, node: usize) -> Result<()> {
        if self.slots.len() >= self.max_depth {
            return Err(KdTreeError::StackOverflow {
                max_depth: self.max_depth,
            });
        }
        self.slots.push(node);
        Ok(())
    }

    #[must_use]
    pub fn top(&self) -> Option<usize> {
        self.slots.last().copied()
    }

    /// Replaces the top node without growing the stack.
    pub fn replace_top(&mut self, node: usize) {
        if let Some(top) = self.slots.last_mut() {
            *top = node;
        }
    }

    pub fn pop(&mut self) -> Option<usize> {
        self.slots.pop()
    }
}
