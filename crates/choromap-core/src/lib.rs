#![forbid(unsafe_code)]

//! Region-boundary matching core (headless).
//!
//! Colors administrative regions by place-name across three scopes (world
//! countries, Chinese provinces, Chinese prefecture-level cities):
//! fuzzy-free, exact-after-normalization name matching, planar polygon
//! geometry (point-in-polygon with holes, centroid, visual-center search),
//! and a lazily fetched, per-scope boundary store.
//!
//! Design goals:
//! - deterministic outputs (sorted id sets, stable anchors) so an interactive
//!   view and a standalone export agree pixel-for-pixel
//! - tolerance for slightly malformed upstream boundary data (non-finite
//!   coordinates are skipped, never fatal)
//! - runtime-agnostic async at the only suspension point (boundary fetches)

pub mod alias;
pub mod boundary;
pub mod error;
pub mod geom;
pub mod matcher;
pub mod normalize;
pub mod scope;
pub mod session;
pub mod store;

pub use alias::AliasIndex;
pub use boundary::{Feature, FeatureId};
pub use error::{Error, Result};
pub use matcher::{MatchResult, match_names};
pub use scope::Scope;
pub use session::MapSession;
pub use store::{BoundaryProvider, BoundaryStore, StaticBoundaryProvider};

#[cfg(test)]
mod tests;
