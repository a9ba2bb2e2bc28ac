#![forbid(unsafe_code)]

//! HTTP-backed [`BoundaryProvider`].
//!
//! Boundary collections are served by the companion map server under
//! `/api/boundaries/<scope>`. Failures carry the response body so a caller
//! can surface the server's own message; there is no retry here.

use choromap_core::{BoundaryProvider, Error, Result, Scope};
use std::future::Future;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8765";

#[derive(Debug, Clone)]
pub struct HttpBoundaryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpBoundaryProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HttpBoundaryProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, scope: Scope) -> String {
        format!(
            "{}/api/boundaries/{}",
            self.base_url.trim_end_matches('/'),
            scope.as_str()
        )
    }
}

impl BoundaryProvider for HttpBoundaryProvider {
    fn fetch(&self, scope: Scope) -> impl Future<Output = Result<Vec<u8>>> + Send {
        let client = self.client.clone();
        let url = self.url_for(scope);
        async move {
            tracing::debug!(%scope, %url, "fetching boundary collection");
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|err| Error::BoundaryFetch {
                    scope,
                    message: err.to_string(),
                })?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::BoundaryFetch {
                    scope,
                    message: format!("{status}: {body}"),
                });
            }
            let bytes = response.bytes().await.map_err(|err| Error::BoundaryFetch {
                scope,
                message: err.to_string(),
            })?;
            Ok(bytes.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_scope_addressed() {
        let provider = HttpBoundaryProvider::new("http://localhost:9000/");
        assert_eq!(
            provider.url_for(Scope::ChinaPrefecture),
            "http://localhost:9000/api/boundaries/china-prefecture-cities"
        );
    }
}
