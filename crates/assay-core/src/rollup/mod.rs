//! Aggregation of verdicts up the Parameter → Specification → Portfolio chain.

pub mod parameter;
pub mod portfolio;
pub mod specification;

/// `count / total` as a whole percent, rounding half up. Zero when `total` is zero.
#[must_use]
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count * 100 + total / 2) / total) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(3, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_percentage_bounded(total in 0usize..10_000, part in 0usize..10_000) {
            let count = part.min(total);
            prop_assert!(percentage(count, total) <= 100);
        }
    }
}
