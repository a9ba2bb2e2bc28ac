//! In-memory boundary store with lazy, provider-backed loading.
//!
//! Feature sets are created once per scope on first access and persist for
//! the process lifetime; they are never mutated after load, only read.
//! Reloading replaces a scope's set wholesale so a render pass never observes
//! partial state.

use crate::boundary::{self, Feature, FeatureId};
use crate::error::{Error, Result};
use crate::scope::Scope;
use std::collections::BTreeMap;
use std::future::Future;

/// Province-level codes for the specially-administered regions that the
/// upstream prefecture-level dataset is known to omit (Taiwan, Hong Kong,
/// Macao).
pub const SPECIAL_REGION_CODES: [&str; 3] = ["710000", "810000", "820000"];

/// Read-only boundary-data source.
///
/// The trait exists so transports can be injected: the HTTP implementation
/// lives behind the facade's `fetch` feature, and tests supply fixture-backed
/// providers. A failed fetch is surfaced as [`Error::BoundaryFetch`] with the
/// response body as the message; there is no automatic retry.
pub trait BoundaryProvider {
    fn fetch(&self, scope: Scope) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

#[derive(Debug, Default)]
pub struct BoundaryStore {
    collections: BTreeMap<Scope, Vec<Feature>>,
}

impl BoundaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, scope: Scope) -> bool {
        self.collections.contains_key(&scope)
    }

    pub fn features(&self, scope: Scope) -> Option<&[Feature]> {
        self.collections.get(&scope).map(Vec::as_slice)
    }

    pub fn feature(&self, id: &FeatureId) -> Option<&Feature> {
        self.collections
            .get(&id.scope)?
            .iter()
            .find(|f| f.id == *id)
    }

    /// Loads a scope through the provider unless already cached.
    ///
    /// For [`Scope::ChinaPrefecture`] this also ensures the province-level set
    /// is present, then patches the prefecture set with synthetic clones of
    /// the special regions missing from upstream data.
    pub async fn load<P: BoundaryProvider>(&mut self, scope: Scope, provider: &P) -> Result<()> {
        if self.is_loaded(scope) {
            return Ok(());
        }
        if scope == Scope::ChinaPrefecture && !self.is_loaded(Scope::ChinaProvince) {
            let raw = provider.fetch(Scope::ChinaProvince).await?;
            self.install(Scope::ChinaProvince, &raw)?;
        }
        let raw = provider.fetch(scope).await?;
        self.install(scope, &raw)?;
        Ok(())
    }

    /// Parses and stores a raw payload for `scope`, replacing any previous
    /// set wholesale. Runs the special-region patch when both China scopes
    /// are present afterwards.
    pub fn install(&mut self, scope: Scope, raw: &[u8]) -> Result<usize> {
        let features = boundary::parse_collection(scope, raw)?;
        let count = features.len();
        self.collections.insert(scope, features);
        tracing::info!(%scope, features = count, "boundary collection loaded");
        if self.is_loaded(Scope::ChinaPrefecture) && self.is_loaded(Scope::ChinaProvince) {
            self.patch_special_prefectures();
        }
        Ok(count)
    }

    /// Drops every cached collection. The next access refetches.
    pub fn reset(&mut self) {
        self.collections.clear();
    }

    /// Clones province-level polygons into the prefecture set for special
    /// regions absent there, flagged synthetic. Guarantees the prefecture
    /// scope has full national coverage despite upstream gaps.
    fn patch_special_prefectures(&mut self) {
        let missing: Vec<Feature> = {
            let prefectures = &self.collections[&Scope::ChinaPrefecture];
            let provinces = &self.collections[&Scope::ChinaProvince];
            SPECIAL_REGION_CODES
                .iter()
                .filter(|code| {
                    !prefectures
                        .iter()
                        .any(|f| f.admin_code.as_deref() == Some(**code))
                })
                .filter_map(|code| {
                    provinces
                        .iter()
                        .find(|f| f.admin_code.as_deref() == Some(*code))
                })
                .cloned()
                .collect()
        };
        if missing.is_empty() {
            return;
        }

        let prefectures = self
            .collections
            .get_mut(&Scope::ChinaPrefecture)
            .expect("prefecture collection checked above");
        let mut seq = prefectures.iter().map(|f| f.id.seq).max().unwrap_or(0);
        for mut feature in missing {
            seq += 1;
            tracing::info!(
                code = feature.admin_code.as_deref().unwrap_or(""),
                name = %feature.display_name,
                "synthesizing prefecture-level feature from province polygon"
            );
            feature.id = FeatureId {
                scope: Scope::ChinaPrefecture,
                seq,
            };
            feature.is_synthetic = true;
            prefectures.push(feature);
        }
    }
}

/// Provider that serves pre-fetched payloads from memory. Useful for tests
/// and for offline exports from cached boundary files.
#[derive(Debug, Default)]
pub struct StaticBoundaryProvider {
    payloads: BTreeMap<Scope, Vec<u8>>,
}

impl StaticBoundaryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, scope: Scope, payload: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(scope, payload.into());
        self
    }

    pub fn insert(&mut self, scope: Scope, payload: impl Into<Vec<u8>>) {
        self.payloads.insert(scope, payload.into());
    }
}

impl BoundaryProvider for StaticBoundaryProvider {
    fn fetch(&self, scope: Scope) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let payload = self.payloads.get(&scope).cloned();
        async move {
            payload.ok_or(Error::BoundaryFetch {
                scope,
                message: "no payload configured for scope".to_string(),
            })
        }
    }
}
