//! Result shapes produced by the ranked result source and emitted to callers

use crate::search::Strategy;
use serde::{Deserialize, Serialize};

/// A record as the result source returns it, tagged by the strategy that
/// produced it. Each variant carries only the fields that strategy supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SourceRecord {
    BestMatch {
        id: i64,
        rank: f64,
        body: Option<String>,
    },
    MatchAll {
        id: i64,
        rank: f64,
        body: Option<String>,
    },
    BestMatchRanked {
        id: i64,
        rank: f64,
    },
    BestMatchWeighted {
        id: i64,
        rank: f64,
    },
}

impl SourceRecord {
    /// Build the native record for `strategy` from a generic row. The body is
    /// dropped for strategies that do not carry one.
    pub fn from_parts(strategy: Strategy, id: i64, rank: f64, body: Option<String>) -> Self {
        match strategy {
            Strategy::BestMatch => Self::BestMatch { id, rank, body },
            Strategy::MatchAll => Self::MatchAll { id, rank, body },
            Strategy::BestMatchRanked => Self::BestMatchRanked { id, rank },
            Strategy::BestMatchWeighted => Self::BestMatchWeighted { id, rank },
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::BestMatch { .. } => Strategy::BestMatch,
            Self::MatchAll { .. } => Strategy::MatchAll,
            Self::BestMatchRanked { .. } => Strategy::BestMatchRanked,
            Self::BestMatchWeighted { .. } => Strategy::BestMatchWeighted,
        }
    }

    /// Post identifier
    pub fn id(&self) -> i64 {
        match self {
            Self::BestMatch { id, .. }
            | Self::MatchAll { id, .. }
            | Self::BestMatchRanked { id, .. }
            | Self::BestMatchWeighted { id, .. } => *id,
        }
    }

    /// Relevance score on the producing strategy's own scale
    pub fn rank(&self) -> f64 {
        match self {
            Self::BestMatch { rank, .. }
            | Self::MatchAll { rank, .. }
            | Self::BestMatchRanked { rank, .. }
            | Self::BestMatchWeighted { rank, .. } => *rank,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BestMatch { body, .. } | Self::MatchAll { body, .. } => body.as_deref(),
            Self::BestMatchRanked { .. } | Self::BestMatchWeighted { .. } => None,
        }
    }
}

/// One entry of a search result page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RankedResult {
    pub id: i64,
    pub rank: f64,
    /// Snippet or body text; empty when the strategy supplies none
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_drops_body_for_bodiless_strategies() {
        let record = SourceRecord::from_parts(
            Strategy::BestMatchRanked,
            7,
            0.4,
            Some("ignored".to_string()),
        );
        assert_eq!(record, SourceRecord::BestMatchRanked { id: 7, rank: 0.4 });
        assert_eq!(record.body(), None);
    }

    #[test]
    fn test_accessors() {
        for strategy in Strategy::ALL {
            let record = SourceRecord::from_parts(strategy, 42, 1.5, Some("text".into()));
            assert_eq!(record.strategy(), strategy);
            assert_eq!(record.id(), 42);
            assert_eq!(record.rank(), 1.5);
        }
    }

    #[test]
    fn test_ranked_result_wire_names() {
        let result = RankedResult {
            id: 19,
            rank: 0.75,
            body: "How do I borrow?".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["Id"], 19);
        assert_eq!(json["Rank"], 0.75);
        assert_eq!(json["Body"], "How do I borrow?");
    }

    #[test]
    fn test_source_record_tagging() {
        let json = r#"{"strategy":"match_all","id":3,"rank":2.0,"body":null}"#;
        let record: SourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.strategy(), Strategy::MatchAll);
        assert_eq!(record.body(), None);
    }
}
