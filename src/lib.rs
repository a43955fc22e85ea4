//! Implicit n-dimensional kd-tree for nearest and k-nearest point queries.
//!
//! ```
//! use kdindex::PointKdTree;
//!
//! let mut tree = PointKdTree::new(2).unwrap();
//! for point in [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0], [5.0, 5.0]] {
//!     tree.insert(point).unwrap();
//! }
//! tree.build();
//!
//! assert_eq!(tree.nearest(&[4.0, 4.0]).unwrap(), &[5.0, 5.0]);
//! let neighbors = tree.k_nearest_sorted(&[0.0, 0.0], 2).unwrap();
//! assert_eq!(neighbors[0], (&[0.0, 0.0], 0.0));
//! assert_eq!(neighbors[1], (&[5.0, 5.0], 50.0));
//! ```

mod aabb;
pub mod cellular;
mod distance;
mod error;
mod neighbors;
mod node;
pub mod sampling;
mod stack;
mod tree;
mod vector;

pub use aabb::NdAabb;
pub use distance::{euclidean, squared_euclidean, Positionable};
pub use error::{KdTreeError, Result};
pub use tree::{PointKdTree, DEFAULT_MAX_DEPTH};
pub use vector::NdVector;
