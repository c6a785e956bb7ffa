//! Projection of native source records onto the public result shape

use crate::search::{RankedResult, SourceRecord, Strategy};
use tracing::debug;

/// Convert one native record into a [`RankedResult`].
///
/// Never fails: a record without a body projects to an empty body, and a
/// record produced by a different strategy than `strategy` is projected as is.
pub fn project(strategy: Strategy, record: SourceRecord) -> RankedResult {
    if record.strategy() != strategy {
        debug!(
            expected = %strategy,
            actual = %record.strategy(),
            id = record.id(),
            "Projecting record from a different strategy"
        );
    }

    match record {
        SourceRecord::BestMatch { id, rank, body } | SourceRecord::MatchAll { id, rank, body } => {
            RankedResult {
                id,
                rank,
                body: body.unwrap_or_default(),
            }
        }
        SourceRecord::BestMatchRanked { id, rank } | SourceRecord::BestMatchWeighted { id, rank } => {
            RankedResult {
                id,
                rank,
                body: String::new(),
            }
        }
    }
}

/// Project a whole page, preserving source order
pub fn project_all<I>(strategy: Strategy, records: I) -> Vec<RankedResult>
where
    I: IntoIterator<Item = SourceRecord>,
{
    records
        .into_iter()
        .map(|record| project(strategy, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_keeps_body() {
        let result = project(
            Strategy::MatchAll,
            SourceRecord::MatchAll {
                id: 11,
                rank: 3.25,
                body: Some("<p>Use Rc&lt;RefCell&gt;</p>".to_string()),
            },
        );
        assert_eq!(result.id, 11);
        assert_eq!(result.rank, 3.25);
        assert_eq!(result.body, "<p>Use Rc&lt;RefCell&gt;</p>");
    }

    #[test]
    fn test_project_missing_body_is_empty_for_every_strategy() {
        for strategy in Strategy::ALL {
            let record = SourceRecord::from_parts(strategy, 5, 0.1, None);
            let result = project(strategy, record);
            assert_eq!(result.id, 5);
            assert!(result.body.is_empty());
        }
    }

    #[test]
    fn test_project_mismatched_strategy_still_projects() {
        let result = project(
            Strategy::BestMatch,
            SourceRecord::BestMatchWeighted { id: 2, rank: 9.0 },
        );
        assert_eq!(result.id, 2);
        assert_eq!(result.rank, 9.0);
        assert!(result.body.is_empty());
    }

    #[test]
    fn test_project_all_preserves_order() {
        let records = vec![
            SourceRecord::BestMatchRanked { id: 3, rank: 0.9 },
            SourceRecord::BestMatchRanked { id: 1, rank: 0.5 },
            SourceRecord::BestMatchRanked { id: 2, rank: 0.5 },
        ];
        let ids: Vec<i64> = project_all(Strategy::BestMatchRanked, records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
