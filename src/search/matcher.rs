//! Candidate matching for the autocomplete dropdown.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An entry offered by the autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable identifier; empty for free-text input.
    pub id: String,
    /// Text the query is matched against.
    pub searchable_text: String,
    /// Text shown in the input once the candidate is chosen.
    pub display_label: String,
}

impl Candidate {
    /// Creates a candidate from its id, matched text, and label.
    pub fn new(
        id: impl Into<String>,
        searchable_text: impl Into<String>,
        display_label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            searchable_text: searchable_text.into(),
            display_label: display_label.into(),
        }
    }

    /// Synthetic candidate carrying raw typed text that matched nothing chosen.
    pub fn free_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: String::new(),
            searchable_text: text.clone(),
            display_label: text,
        }
    }

    /// Whether this is a [`Candidate::free_text`] entry.
    #[must_use]
    pub fn is_free_text(&self) -> bool {
        self.id.is_empty()
    }
}

/// How a query is matched against `searchable_text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Case-insensitive "starts with".
    #[default]
    Prefix,
    /// Every whitespace-separated token must fuzzy-match.
    Fuzzy,
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Ok(Self::Prefix),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown match strategy: {other}")),
        }
    }
}

/// Returns the candidates matching `query`, in candidate-list order, at most `limit`.
///
/// A blank query matches nothing.
///
/// ```rust
/// use recordview::search::{filter_candidates, Candidate, MatchStrategy};
///
/// let candidates = vec![
///     Candidate::new("1", "Location one", "Location one"),
///     Candidate::new("2", "Location two", "Location two"),
/// ];
/// let matches = filter_candidates(&candidates, "location t", MatchStrategy::Prefix, 10);
/// assert_eq!(matches.len(), 1);
/// ```
#[must_use]
pub fn filter_candidates(
    candidates: &[Candidate],
    query: &str,
    strategy: MatchStrategy,
    limit: usize,
) -> Vec<Candidate> {
    let query = query.to_lowercase();
    if query.trim().is_empty() {
        return vec![];
    }

    let matched: Vec<Candidate> = match strategy {
        MatchStrategy::Prefix => candidates
            .iter()
            .filter(|c| c.searchable_text.to_lowercase().starts_with(&query))
            .take(limit)
            .cloned()
            .collect(),
        MatchStrategy::Fuzzy => {
            let matcher = SkimMatcherV2::default();
            let tokens: Vec<&str> = query.split_whitespace().collect();
            candidates
                .iter()
                .filter(|c| {
                    let text = c.searchable_text.to_lowercase();
                    tokens.iter().all(|token| matcher.fuzzy_match(&text, token).is_some())
                })
                .take(limit)
                .cloned()
                .collect()
        }
    };

    tracing::trace!(
        query = %query,
        strategy = ?strategy,
        matched = matched.len(),
        "candidates filtered"
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.display_label.as_str()).collect()
    }

    fn locations() -> Vec<Candidate> {
        ["Location one", "Location two", "Location three"]
            .iter()
            .enumerate()
            .map(|(i, name)| Candidate::new(i.to_string(), *name, *name))
            .collect()
    }

    #[test]
    fn prefix_keeps_candidate_order() {
        let matches = filter_candidates(&locations(), "Location t", MatchStrategy::Prefix, 10);
        assert_eq!(labels(&matches), vec!["Location two", "Location three"]);
    }

    #[test]
    fn prefix_is_case_insensitive_and_anchored() {
        let candidates = locations();
        assert_eq!(filter_candidates(&candidates, "LOCATION O", MatchStrategy::Prefix, 10).len(), 1);
        assert!(filter_candidates(&candidates, "two", MatchStrategy::Prefix, 10).is_empty());
    }

    #[test]
    fn results_are_capped() {
        let candidates: Vec<Candidate> = (0..25)
            .map(|i| Candidate::new(i.to_string(), format!("Site {i}"), format!("Site {i}")))
            .collect();
        let matches = filter_candidates(&candidates, "site", MatchStrategy::Prefix, 10);
        assert_eq!(matches.len(), 10);
        assert_eq!(matches[0].id, "0");
        assert_eq!(matches[9].id, "9");
    }

    #[test]
    fn prefix_matches_typed_text_as_is() {
        let candidates = locations();
        assert!(filter_candidates(&candidates, " Location", MatchStrategy::Prefix, 10).is_empty());
        assert_eq!(filter_candidates(&candidates, "Location ", MatchStrategy::Prefix, 10).len(), 3);
    }

    #[test]
    fn blank_query_matches_nothing() {
        assert!(filter_candidates(&locations(), "", MatchStrategy::Prefix, 10).is_empty());
        assert!(filter_candidates(&locations(), "   ", MatchStrategy::Fuzzy, 10).is_empty());
    }

    #[test]
    fn fuzzy_matches_every_token() {
        let matches = filter_candidates(&locations(), "loc thr", MatchStrategy::Fuzzy, 10);
        assert_eq!(labels(&matches), vec!["Location three"]);
    }

    #[test]
    fn strategy_parses_from_config_text() {
        assert_eq!("Fuzzy".parse::<MatchStrategy>(), Ok(MatchStrategy::Fuzzy));
        assert!("regex".parse::<MatchStrategy>().is_err());
    }
}
