//! Leaderboard ordering shared by every [`ResultStore`] implementation.
//!
//! [`ResultStore`]: crate::repository::ResultStore

use std::cmp::Ordering;

use crate::models::ShootingResult;

/// Orders results by score, then accuracy, both descending.
pub fn leaderboard_order(a: &ShootingResult, b: &ShootingResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.accuracy.cmp(&a.accuracy))
}

/// Stable sort, so rows tied on both keys keep their insertion order.
pub fn sort_leaderboard(results: &mut [ShootingResult]) {
    results.sort_by(leaderboard_order);
}

/// Whether every adjacent pair satisfies [`leaderboard_order`].
pub fn is_leaderboard_ordered(results: &[ShootingResult]) -> bool {
    results
        .windows(2)
        .all(|pair| leaderboard_order(&pair[0], &pair[1]) != Ordering::Greater)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    use super::*;

    fn result(id: i32, score: i32, accuracy: i64) -> ShootingResult {
        ShootingResult {
            id,
            first_name: format!("Player {id}"),
            last_name: String::new(),
            study_group: String::new(),
            score,
            total_shots: 10,
            hits: 0,
            misses: 0,
            accuracy: Decimal::from(accuracy),
            game_duration: Decimal::ZERO,
            created_at: NaiveDateTime::default(),
        }
    }

    fn ids(results: &[ShootingResult]) -> Vec<i32> {
        results.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_higher_score_first() {
        let mut results = vec![result(1, 40, 100), result(2, 90, 10), result(3, 60, 50)];
        sort_leaderboard(&mut results);

        assert_eq!(ids(&results), vec![2, 3, 1]);
        assert!(is_leaderboard_ordered(&results));
    }

    #[test]
    fn test_accuracy_breaks_score_ties() {
        let mut results = vec![result(1, 85, 80), result(2, 85, 90)];
        sort_leaderboard(&mut results);

        assert_eq!(ids(&results), vec![2, 1]);
    }

    #[test]
    fn test_full_ties_keep_insertion_order() {
        let mut results = vec![result(1, 50, 50), result(2, 50, 50), result(3, 50, 50)];
        sort_leaderboard(&mut results);

        assert_eq!(ids(&results), vec![1, 2, 3]);
    }

    #[test]
    fn test_fractional_accuracy_is_compared_exactly() {
        let mut low = result(1, 70, 0);
        low.accuracy = Decimal::new(8049, 2);
        let mut high = result(2, 70, 0);
        high.accuracy = Decimal::new(8050, 2);

        let mut results = vec![low, high];
        sort_leaderboard(&mut results);

        assert_eq!(ids(&results), vec![2, 1]);
    }

    #[test]
    fn test_detects_unordered_sequence() {
        let results = vec![result(1, 10, 0), result(2, 20, 0)];
        assert!(!is_leaderboard_ordered(&results));
        assert!(is_leaderboard_ordered(&[]));
    }
}
