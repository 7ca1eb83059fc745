use std::cmp::Ordering;

use super::domain::RankingEntry;

/// Comparison matrix ordered by ascending rank, borrowing from the input.
///
/// The sort is stable, so tied ranks keep their received order. Entries
/// without a rank sort after every ranked entry.
pub fn rank_order(matrix: &[RankingEntry]) -> Vec<&RankingEntry> {
    let mut ordered: Vec<&RankingEntry> = matrix.iter().collect();
    ordered.sort_by(|left, right| compare_rank(left.rank, right.rank));
    ordered
}

fn compare_rank(left: Option<i64>, right: Option<i64>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
