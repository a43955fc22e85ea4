use kdindex::{KdTreeError, NdAabb, NdVector, PointKdTree};

#[test]
fn basic_usage() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");

    // Insert the corners and the center of a square
    for point in [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0], [5.0, 5.0]] {
        tree.insert(point).expect("2d point");
    }
    tree.build();

    // The center is closest to (4, 4)
    assert_eq!(tree.nearest(&[4.0, 4.0]), Ok(&[5.0, 5.0]));

    // (0, 0) is at distance 0 and the center at 50, the other corners at 100
    let neighbors = tree.k_nearest(&[0.0, 0.0], 2).expect("built tree");
    assert_eq!(neighbors.len(), 2);
    assert!(neighbors.contains(&Some(&[0.0, 0.0])));
    assert!(neighbors.contains(&Some(&[5.0, 5.0])));

    let expected = tree
        .k_nearest_brute_force(&[0.0, 0.0], 2)
        .expect("2d query");
    assert_eq!(expected, vec![(&[0.0, 0.0], 0.0), (&[5.0, 5.0], 50.0)]);
}

#[test]
fn empty_index() {
    let mut tree = PointKdTree::<[f64; 2]>::new(2).expect("valid dimension");
    assert_eq!(tree.nearest(&[0.0, 0.0]), Err(KdTreeError::EmptyIndex));
    assert_eq!(
        tree.nearest_brute_force(&[0.0, 0.0]),
        Err(KdTreeError::EmptyIndex)
    );
    assert_eq!(tree.k_nearest(&[0.0, 0.0], 0), Ok(Vec::new()));
    assert_eq!(tree.k_nearest(&[0.0, 0.0], 3), Ok(vec![None, None, None]));

    tree.build();
    assert!(tree.is_built());
    assert_eq!(tree.nearest(&[0.0, 0.0]), Err(KdTreeError::EmptyIndex));
}

#[test]
fn zero_neighbors() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    tree.insert([1.0, 1.0]).expect("2d point");
    tree.build();
    assert_eq!(tree.k_nearest(&[0.0, 0.0], 0), Ok(Vec::new()));
    assert_eq!(tree.k_nearest_sorted(&[0.0, 0.0], 0), Ok(Vec::new()));
}

#[test]
fn single_point() {
    let mut tree = PointKdTree::new(4).expect("valid dimension");
    tree.insert(NdVector::filled(4, 2.0)).expect("4d point");
    tree.build();
    let query = NdVector::new(4);
    assert_eq!(tree.nearest(&query), Ok(&NdVector::filled(4, 2.0)));
    assert_eq!(tree.depth(), 1);
}

#[test]
fn query_before_build() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    tree.insert([1.0, 1.0]).expect("2d point");
    assert_eq!(tree.nearest(&[0.0, 0.0]), Err(KdTreeError::NotBuilt));
    // The linear scan does not need a build.
    assert_eq!(tree.nearest_brute_force(&[0.0, 0.0]), Ok(&[1.0, 1.0]));
}

#[test]
fn duplicate_suppression() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    assert_eq!(tree.insert_unique([1.0, 1.0], 1e-6), Ok(true));
    assert_eq!(tree.insert_unique([1.0, 1.0], 1e-6), Ok(false));
    assert_eq!(tree.len(), 1);

    // epsilon bounds the squared distance
    assert_eq!(tree.insert_unique([1.5, 1.0], 0.25), Ok(false));
    assert_eq!(tree.insert_unique([1.6, 1.0], 0.25), Ok(true));
    assert_eq!(tree.len(), 2);

    tree.build();
    assert!(tree.is_built());
    // A rejected point leaves the layout untouched.
    assert_eq!(tree.insert_unique([1.0, 1.0], 1e-6), Ok(false));
    assert!(tree.is_built());
}

#[test]
fn clear_and_reuse() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    for i in 0..10 {
        tree.insert([f64::from(i), 0.0]).expect("2d point");
    }
    tree.build();
    tree.clear();
    assert_eq!(tree.len(), 0);

    tree.insert([3.0, 3.0]).expect("2d point");
    tree.build();
    assert_eq!(tree.nearest(&[0.0, 0.0]), Ok(&[3.0, 3.0]));
    assert_eq!(tree.get(0), Some(&[3.0, 3.0]));
    assert_eq!(tree.get(1), None);
}

#[test]
fn bounding_box_of_points() {
    let points = [[1.0, 4.0], [-2.0, 0.5], [3.0, 1.0]];
    let mut aabb = NdAabb::new(2);
    for point in &points {
        aabb.update(point);
    }
    assert_eq!(aabb.max_extent_axis(), 0);
    assert_eq!(aabb.center_point(), NdVector::from([0.5, 2.25]));

    let center = aabb.center_point();
    assert_eq!(center.dimension(), 2);
    assert!(aabb.contains(&center));
}

#[test]
fn huge_neighbor_count() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    tree.insert([1.0, 1.0]).expect("2d point");
    tree.insert([3.0, 3.0]).expect("2d point");
    tree.build();

    let expected = vec![(&[1.0, 1.0], 2.0), (&[3.0, 3.0], 18.0)];
    assert_eq!(
        tree.k_nearest_sorted(&[0.0, 0.0], usize::MAX),
        Ok(expected.clone())
    );
    assert_eq!(
        tree.k_nearest_brute_force(&[0.0, 0.0], usize::MAX),
        Ok(expected)
    );

    let empty = PointKdTree::<[f64; 2]>::new(2).expect("valid dimension");
    assert_eq!(empty.k_nearest_sorted(&[0.0, 0.0], usize::MAX), Ok(Vec::new()));
}

#[test]
fn non_finite_query() {
    let mut tree = PointKdTree::new(2).expect("valid dimension");
    for point in [[0.0, 0.0], [10.0, 0.0], [5.0, 5.0]] {
        tree.insert(point).expect("2d point");
    }
    tree.build();

    let nan = [f64::NAN, 0.0];
    assert_eq!(tree.nearest(&nan), Err(KdTreeError::NonFiniteQuery { axis: 0 }));
    assert_eq!(
        tree.k_nearest(&nan, 2),
        Err(KdTreeError::NonFiniteQuery { axis: 0 })
    );
    assert_eq!(
        tree.nearest_brute_force(&nan),
        Err(KdTreeError::NonFiniteQuery { axis: 0 })
    );

    let infinite = [0.0, f64::NEG_INFINITY];
    assert_eq!(
        tree.k_nearest_sorted(&infinite, 1),
        Err(KdTreeError::NonFiniteQuery { axis: 1 })
    );
    assert_eq!(
        tree.k_nearest_brute_force(&infinite, 1),
        Err(KdTreeError::NonFiniteQuery { axis: 1 })
    );

    // A wrong dimension is reported before the coordinates are inspected.
    assert_eq!(
        tree.nearest(&[f64::NAN; 3]),
        Err(KdTreeError::DimensionMismatch {
            expected: 2,
            actual: 3
        })
    );
}
