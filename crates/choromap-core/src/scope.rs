use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which administrative boundary set is active for matching and rendering.
///
/// Exactly one scope drives region matching at a time, but all three may be
/// cached simultaneously in a [`crate::store::BoundaryStore`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// World countries.
    #[default]
    Global,
    /// Chinese province-level divisions.
    ChinaProvince,
    /// Chinese prefecture-level cities.
    ChinaPrefecture,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Global, Scope::ChinaProvince, Scope::ChinaPrefecture];

    /// Stable slug, also the boundary provider endpoint path segment and the
    /// `<scope>` token in export file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "world",
            Scope::ChinaProvince => "china-provinces",
            Scope::ChinaPrefecture => "china-prefecture-cities",
        }
    }

    /// True for the scopes that carry Chinese administrative codes.
    pub fn is_china(self) -> bool {
        matches!(self, Scope::ChinaProvince | Scope::ChinaPrefecture)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "world" | "global" => Ok(Scope::Global),
            "china-provinces" | "china-province" => Ok(Scope::ChinaProvince),
            "china-prefecture-cities" | "china-prefecture" => Ok(Scope::ChinaPrefecture),
            other => Err(Error::UnsupportedScope {
                scope: other.to_string(),
            }),
        }
    }
}
