use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Held-out fraction and shuffle seed for training.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainOptions {
    /// Share of labeled rows held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the shuffle that assigns rows to each side.
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

/// Shuffles `0..rows` and splits it into `(train, test)` index sets.
///
/// The test side gets `ceil(rows * test_fraction)` rows, clamped so both
/// sides keep at least one row when `rows >= 2`.
#[must_use]
pub fn train_test_split(rows: usize, options: &TrainOptions) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..rows).collect();
    if rows < 2 {
        return (indices, Vec::new());
    }
    indices.shuffle(&mut StdRng::seed_from_u64(options.seed));

    let fraction = options.test_fraction.clamp(0.0, 1.0);
    let test_rows = ((rows as f64 * fraction).ceil() as usize).clamp(1, rows - 1);
    let train = indices.split_off(test_rows);
    (train, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn default_holds_out_a_fifth() {
        let (train, test) = train_test_split(100, &TrainOptions::default());
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
    }

    #[test]
    fn seeded_shuffle_is_repeatable() {
        let options = TrainOptions::default();
        assert_eq!(train_test_split(37, &options), train_test_split(37, &options));
    }

    quickcheck! {
        fn prop_partition(rows: u8, percent: u8) -> bool {
            let rows = usize::from(rows);
            let options = TrainOptions {
                test_fraction: f64::from(percent % 101) / 100.0,
                seed: 7,
            };
            let (train, test) = train_test_split(rows, &options);
            let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
            all.sort_unstable();
            all == (0..rows).collect::<Vec<_>>()
                && (rows < 2 || (!train.is_empty() && !test.is_empty()))
        }
    }
}
