use conv::ValueFrom;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Layout of generated feature points in the unit square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointGenerator {
    /// Uniform random positions.
    #[default]
    Random,
    /// Row-major square grid.
    Regular,
    /// Halton sequence in bases 2 and 3.
    Halton23,
    /// Hammersley set: `i / count` against the base 2 radical inverse.
    Hammersley,
}

/// Van der Corput radical inverse of `i` in `base`.
#[must_use]
pub fn radical_inverse(base: usize, mut i: usize) -> f64 {
    let radical = 1.0 / as_f64(base);
    let mut digit = radical;
    let mut inverse = 0.0;
    while i != 0 {
        inverse += digit * as_f64(i % base);
        digit *= radical;
        i /= base;
    }
    inverse
}

/// Generates `count` points in (roughly) the unit square.
///
/// Each point is offset by up to `jitter / sqrt(count) / 2` on both axes.
/// Equal seeds produce equal point sets.
#[must_use]
pub fn generate(generator: PointGenerator, count: usize, jitter: f64, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter_scale = jitter / as_f64(count).sqrt();
    let mut side = 1;
    while side * side < count {
        side += 1;
    }

    (0..count)
        .map(|i| {
            let jitter_x = rng.gen_range(-0.5_f64..0.5) * jitter_scale;
            let jitter_y = rng.gen_range(-0.5_f64..0.5) * jitter_scale;
            let (x, y) = match generator {
                PointGenerator::Random => (rng.gen::<f64>(), rng.gen::<f64>()),
                PointGenerator::Regular => (
                    as_f64(i % side) / as_f64(side),
                    as_f64(i / side) / as_f64(side),
                ),
                PointGenerator::Halton23 => (radical_inverse(2, i), radical_inverse(3, i)),
                PointGenerator::Hammersley => (as_f64(i) / as_f64(count), radical_inverse(2, i)),
            };
            [x + jitter_x, y + jitter_y]
        })
        .collect()
}

pub(crate) fn as_f64(n: usize) -> f64 {
    f64::value_from(n).unwrap_or(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::{generate, radical_inverse, PointGenerator};

    #[test]
    fn van_der_corput() {
        assert_eq!(radical_inverse(2, 0), 0.0);
        assert_eq!(radical_inverse(2, 1), 0.5);
        assert_eq!(radical_inverse(2, 2), 0.25);
        assert_eq!(radical_inverse(2, 3), 0.75);
        assert!((radical_inverse(3, 1) - 1.0 / 3.0).abs() < 1e-12);
        // 5 = 12 in base 3, mirrored to 0.21
        assert!((radical_inverse(3, 5) - 7.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn regular_grid() {
        let points = generate(PointGenerator::Regular, 4, 0.0, 0);
        assert_eq!(points, vec![[0.0, 0.0], [0.5, 0.0], [0.0, 0.5], [0.5, 0.5]]);

        let points = generate(PointGenerator::Regular, 5, 0.0, 0);
        assert_eq!(points[3], [0.0, 1.0 / 3.0]);
    }

    #[test]
    fn low_discrepancy_sets() {
        let halton = generate(PointGenerator::Halton23, 3, 0.0, 7);
        assert_eq!(halton[1][0], 0.5);
        assert!((halton[2][1] - 2.0 / 3.0).abs() < 1e-12);

        let hammersley = generate(PointGenerator::Hammersley, 4, 0.0, 7);
        assert_eq!(hammersley[2], [0.5, 0.25]);
    }

    #[test]
    fn random_is_seeded() {
        let a = generate(PointGenerator::Random, 64, 0.5, 42);
        let b = generate(PointGenerator::Random, 64, 0.5, 42);
        let c = generate(PointGenerator::Random, 64, 0.5, 43);
        assert_eq!(a, b);
        assert_ne!(a, c);

        // Jitter of 0.5 over 8 points per side stays within 1/32 of the square.
        for [x, y] in a {
            assert!((-0.04..1.04).contains(&x));
            assert!((-0.04..1.04).contains(&y));
        }
    }

    #[test]
    fn jitter_bounds_offsets() {
        let plain = generate(PointGenerator::Halton23, 16, 0.0, 1);
        let jittered = generate(PointGenerator::Halton23, 16, 2.0, 1);
        for (p, q) in plain.iter().zip(jittered.iter()) {
            // 2.0 / sqrt(16) / 2 = 0.25
            assert!((p[0] - q[0]).abs() <= 0.25 + 1e-12);
            assert!((p[1] - q[1]).abs() <= 0.25 + 1e-12);
        }
    }
}
