//! Search strategy selection
//!
//! Callers pick a strategy with the `method` query parameter. Tokens arrive
//! wrapped in literal double quotes (`"matchall"`, quotes included) and are
//! matched verbatim: no trimming, no case folding. Selection is total; any
//! token that is not in the table falls back to [`Strategy::BestMatch`].

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// The full-text strategies the result source knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Any-term match ranked by relevance (the default)
    BestMatch,
    /// Every term must match
    MatchAll,
    /// Best match with the source's ranking function applied
    BestMatchRanked,
    /// Best match with per-term weights
    BestMatchWeighted,
}

/// Token table, matched verbatim against the caller's `method` value.
///
/// The ranked and weighted tokens follow the same quoting convention as the
/// original two; nothing upstream emits them yet.
const TOKENS: &[(&str, Strategy)] = &[
    ("\"\"", Strategy::BestMatch),
    ("\"bestmatch\"", Strategy::BestMatch),
    ("\"matchall\"", Strategy::MatchAll),
    ("\"bestmatchranked\"", Strategy::BestMatchRanked),
    ("\"bestmatchweighted\"", Strategy::BestMatchWeighted),
];

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Strategy; 4] = [
        Strategy::BestMatch,
        Strategy::MatchAll,
        Strategy::BestMatchRanked,
        Strategy::BestMatchWeighted,
    ];

    /// Strategy used when the token is absent or unrecognized
    pub const DEFAULT: Strategy = Strategy::BestMatch;

    /// Map a caller-supplied method token to a strategy
    ///
    /// # Examples
    ///
    /// ```
    /// use stackquery_core::search::Strategy;
    ///
    /// assert_eq!(Strategy::select(Some("\"matchall\"")), Strategy::MatchAll);
    /// assert_eq!(Strategy::select(Some("matchall")), Strategy::BestMatch);
    /// assert_eq!(Strategy::select(None), Strategy::BestMatch);
    /// ```
    pub fn select(token: Option<&str>) -> Strategy {
        let Some(token) = token else {
            return Self::DEFAULT;
        };

        match TOKENS.iter().find(|(candidate, _)| *candidate == token) {
            Some((_, strategy)) => *strategy,
            None => {
                debug!(token, "Unrecognized search method, using default strategy");
                Self::DEFAULT
            }
        }
    }

    /// Stable identifier used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BestMatch => "best_match",
            Self::MatchAll => "match_all",
            Self::BestMatchRanked => "best_match_ranked",
            Self::BestMatchWeighted => "best_match_weighted",
        }
    }

    /// Name of the set-returning SQL function backing this strategy
    pub fn procedure(&self) -> &'static str {
        self.as_str()
    }

    /// Whether the native record for this strategy carries a body snippet
    pub fn returns_body(&self) -> bool {
        matches!(self, Self::BestMatch | Self::MatchAll)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
