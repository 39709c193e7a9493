//! Completion percentage rule shared by goals and habits.

/// Upper bound of a completion percentage.
pub const MAX_PCT: i32 = 100;

/// Percentage of `total` reached by `done`, floored and capped to `0..=100`.
///
/// A non-positive `total` yields `0`. Creation rejects such targets, so this
/// only guards the division.
pub fn pct_done(done: i64, total: i64) -> i32 {
    if total <= 0 || done <= 0 {
        return 0;
    }
    let pct = done.saturating_mul(100) / total;
    // Lossless: clamped into 0..=100.
    pct.min(i64::from(MAX_PCT)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_progress_is_zero() {
        assert_eq!(pct_done(0, 15), 0);
    }

    #[test]
    fn floors_instead_of_rounding() {
        assert_eq!(pct_done(1, 3), 33);
        assert_eq!(pct_done(2, 3), 66);
        assert_eq!(pct_done(3, 15), 20);
        assert_eq!(pct_done(1, 2), 50);
    }

    #[test]
    fn caps_at_one_hundred() {
        for total in 1..=20 {
            for done in total..=total * 3 {
                assert_eq!(pct_done(done, total), 100, "done={done} total={total}");
            }
        }
    }

    #[test]
    fn negative_progress_floors_at_zero() {
        assert_eq!(pct_done(-4, 10), 0);
    }

    #[test]
    fn non_positive_total_is_guarded() {
        assert_eq!(pct_done(5, 0), 0);
        assert_eq!(pct_done(5, -1), 0);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        assert_eq!(pct_done(i64::MAX, 1), 100);
    }
}
