//! Explicit session state for the matching/export flow.
//!
//! The session is the single writer of all shared state (loaded feature
//! sets, alias indices, active scope, highlight set). Matching and geometry
//! work is synchronous; the only suspension points are boundary fetches,
//! which the caller awaits. A scope reload replaces the feature set and its
//! alias index wholesale, never patches them incrementally.

use crate::alias::AliasIndex;
use crate::boundary::{Feature, FeatureId};
use crate::error::Result;
use crate::matcher::{self, MatchResult};
use crate::scope::Scope;
use crate::store::{BoundaryProvider, BoundaryStore};
use std::collections::{BTreeMap, BTreeSet};

pub struct MapSession<P> {
    provider: P,
    store: BoundaryStore,
    indices: BTreeMap<Scope, AliasIndex>,
    active_scope: Scope,
    highlight: BTreeSet<FeatureId>,
}

impl<P: BoundaryProvider> MapSession<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            store: BoundaryStore::new(),
            indices: BTreeMap::new(),
            active_scope: Scope::Global,
            highlight: BTreeSet::new(),
        }
    }

    pub fn active_scope(&self) -> Scope {
        self.active_scope
    }

    /// Switches the active scope, loading it on first use. Clears the
    /// highlight set: matched ids are scope-qualified and do not carry over.
    pub async fn set_scope(&mut self, scope: Scope) -> Result<()> {
        self.ensure_loaded(scope).await?;
        if scope != self.active_scope {
            self.active_scope = scope;
            self.highlight.clear();
        }
        Ok(())
    }

    /// Lazily fetches and indexes a scope. Loading the prefecture scope pulls
    /// in the province scope as well (synthesis dependency), so indices are
    /// rebuilt for every newly loaded scope here.
    pub async fn ensure_loaded(&mut self, scope: Scope) -> Result<()> {
        self.store.load(scope, &self.provider).await?;
        for s in Scope::ALL {
            if !self.indices.contains_key(&s) {
                if let Some(features) = self.store.features(s) {
                    self.indices.insert(s, AliasIndex::build(s, features));
                }
            }
        }
        Ok(())
    }

    pub fn features(&self, scope: Scope) -> Option<&[Feature]> {
        self.store.features(scope)
    }

    pub fn feature(&self, id: &FeatureId) -> Option<&Feature> {
        self.store.feature(id)
    }

    pub fn alias_index(&self, scope: Scope) -> Option<&AliasIndex> {
        self.indices.get(&scope)
    }

    /// Matches place names against the active scope and replaces the
    /// highlight set with the result.
    pub async fn match_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<MatchResult> {
        let scope = self.active_scope;
        self.ensure_loaded(scope).await?;
        let index = self
            .indices
            .get(&scope)
            .expect("index built by ensure_loaded");
        let result = matcher::match_names(names, index);
        self.highlight = result.matched.clone();
        Ok(result)
    }

    pub fn highlight(&self) -> &BTreeSet<FeatureId> {
        &self.highlight
    }

    pub fn set_highlight(&mut self, ids: BTreeSet<FeatureId>) {
        self.highlight = ids;
    }

    pub fn clear_highlight(&mut self) {
        self.highlight.clear();
    }

    /// Drops all cached collections and indices. The next access refetches
    /// from the provider.
    pub fn reset(&mut self) {
        self.store.reset();
        self.indices.clear();
        self.highlight.clear();
    }
}
