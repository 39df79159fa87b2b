// src/stats.rs
//! Per-file test counts and the merge that folds them into a build aggregate.

use serde::Serialize;

/// Outcome counts of one report file, or of a whole build once merged.
///
/// The all-zero value (`Default`) is the identity of [`TestStatistics::merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TestStatistics {
    pub passed: u64,
    pub skipped: u64,
    pub errors: u64,
    pub failed: u64,
}

/// Outcome categories in plot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Passed,
    Skipped,
    Errors,
    Failed,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [Self::Passed, Self::Skipped, Self::Errors, Self::Failed];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Skipped => "skipped",
            Self::Errors => "errors",
            Self::Failed => "failed",
        }
    }
}

impl TestStatistics {
    #[must_use]
    pub const fn new(passed: u64, skipped: u64, errors: u64, failed: u64) -> Self {
        Self {
            passed,
            skipped,
            errors,
            failed,
        }
    }

    /// Derives counts from a report that states a total alongside the
    /// non-passing categories. Passed is whatever the total leaves over.
    ///
    /// Returns `None` when the classified outcomes exceed the total.
    #[must_use]
    pub fn from_total(total: u64, failures: u64, errors: u64, skipped: u64) -> Option<Self> {
        let passed = total
            .checked_sub(failures)?
            .checked_sub(errors)?
            .checked_sub(skipped)?;
        Some(Self::new(passed, skipped, errors, failures))
    }

    /// Field-wise sum. Commutative and associative.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            passed: self.passed.saturating_add(other.passed),
            skipped: self.skipped.saturating_add(other.skipped),
            errors: self.errors.saturating_add(other.errors),
            failed: self.failed.saturating_add(other.failed),
        }
    }

    /// Number of reported outcomes across all categories.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.passed
            .saturating_add(self.skipped)
            .saturating_add(self.errors)
            .saturating_add(self.failed)
    }

    #[must_use]
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Passed => self.passed,
            Outcome::Skipped => self.skipped,
            Outcome::Errors => self.errors,
            Outcome::Failed => self.failed,
        }
    }
}

/// Folds any sequence of per-file statistics into one aggregate.
pub fn accumulate<I>(items: I) -> TestStatistics
where
    I: IntoIterator<Item = TestStatistics>,
{
    items
        .into_iter()
        .fold(TestStatistics::default(), TestStatistics::merge)
}

impl std::iter::Sum for TestStatistics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        accumulate(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TestStatistics> {
        vec![
            TestStatistics::new(4, 3, 2, 1),
            TestStatistics::new(17, 0, 1, 2),
            TestStatistics::new(0, 0, 0, 0),
            TestStatistics::new(100, 7, 0, 9),
        ]
    }

    #[test]
    fn zero_is_identity() {
        let x = TestStatistics::new(5, 6, 7, 8);
        assert_eq!(TestStatistics::default().merge(x), x);
        assert_eq!(x.merge(TestStatistics::default()), x);
    }

    #[test]
    fn merge_is_commutative_and_associative() {
        let [a, b, c, _] = <[TestStatistics; 4]>::try_from(sample()).unwrap();
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
    }

    #[test]
    fn fold_ignores_order() {
        let forward = sample();
        let mut backward = forward.clone();
        backward.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let expected = TestStatistics::new(121, 10, 3, 12);
        assert_eq!(accumulate(forward), expected);
        assert_eq!(accumulate(backward), expected);
        assert_eq!(rotated.into_iter().sum::<TestStatistics>(), expected);
    }

    #[test]
    fn empty_fold_is_zero() {
        assert_eq!(accumulate(Vec::new()), TestStatistics::default());
    }

    #[test]
    fn from_total_subtracts_classified() {
        assert_eq!(
            TestStatistics::from_total(10, 1, 2, 3),
            Some(TestStatistics::new(4, 3, 2, 1))
        );
        assert_eq!(TestStatistics::from_total(2, 1, 1, 1), None);
    }

    #[test]
    fn total_sums_all_fields() {
        assert_eq!(TestStatistics::new(4, 3, 2, 1).total(), 10);
    }

    #[test]
    fn total_saturates_like_merge() {
        let full = TestStatistics::new(u64::MAX, 0, 0, 0).merge(TestStatistics::new(0, 1, 0, 0));
        assert_eq!(full.total(), u64::MAX);
    }
}
