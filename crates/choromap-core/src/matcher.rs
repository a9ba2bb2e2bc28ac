//! Free-text place-name → feature-id matching.

use crate::alias::AliasIndex;
use crate::boundary::FeatureId;
use crate::normalize::{expand_aliases, normalize};
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Extra candidate tokens for query spellings the alias tables do not derive
/// from feature properties themselves.
const QUERY_OVERRIDES: &[(&str, &[&str])] = &[
    ("usa", &["unitedstatesofamerica"]),
    ("us", &["unitedstatesofamerica"]),
    ("uk", &["unitedkingdom"]),
    ("uae", &["unitedarabemirates"]),
    ("korea", &["southkorea"]),
    ("prc", &["china"]),
];

/// The matched-ids / unmatched-names partition for one query.
///
/// Unmatched names keep their original casing and input order, de-duplicated
/// by normalized key. An unmatched name is data for the caller to display,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
    pub matched: BTreeSet<FeatureId>,
    pub unmatched: Vec<String>,
}

impl MatchResult {
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched.is_empty()
    }
}

fn query_overrides(normalized: &str) -> &'static [&'static str] {
    QUERY_OVERRIDES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, tokens)| *tokens)
        .unwrap_or(&[])
}

/// Matches a list of free-text place names against one scope's alias index.
///
/// Each name expands into a candidate token set (normalized form,
/// suffix-stripped variants, static overrides); hits across all tokens are
/// unioned. A name is unmatched iff no candidate token produced any hit.
pub fn match_names<S: AsRef<str>>(names: &[S], index: &AliasIndex) -> MatchResult {
    let mut result = MatchResult::default();
    let mut seen: FxHashSet<String> = FxHashSet::default();

    for name in names {
        let original = name.as_ref().trim();
        if original.is_empty() {
            continue;
        }
        let normalized = normalize(original);
        if normalized.is_empty() || !seen.insert(normalized.clone()) {
            continue;
        }

        let mut tokens = vec![normalized.clone()];
        tokens.extend(expand_aliases(&normalized));
        tokens.extend(query_overrides(&normalized).iter().map(|t| t.to_string()));

        let mut hit = false;
        for token in &tokens {
            if let Some(ids) = index.lookup(token) {
                result.matched.extend(ids.iter().cloned());
                hit = true;
            }
        }
        if !hit {
            result.unmatched.push(original.to_string());
        }
    }

    tracing::debug!(
        scope = %index.scope(),
        matched = result.matched.len(),
        unmatched = result.unmatched.len(),
        "place-name match finished"
    );
    result
}
