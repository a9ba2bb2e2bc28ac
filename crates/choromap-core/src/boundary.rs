//! Boundary feature model and tolerant GeoJSON-like parsing.
//!
//! Upstream boundary payloads are trusted but not clean: properties vary by
//! dataset (world countries vs. Chinese administrative data), positions may
//! carry altitude or non-finite values, and some entries are not proper
//! features at all. Parsing walks the JSON and keeps whatever is usable; only
//! a payload that is not a feature collection at all is an error.

use crate::error::{Error, Result};
use crate::geom::{self, Polygon};
use crate::scope::Scope;
use serde_json::Value;

/// Scope-qualified feature identifier, stable within a session.
///
/// Upstream data may lack stable ids, so the store assigns `scope:sequence`
/// ids at load time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureId {
    pub scope: Scope,
    pub seq: u32,
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.scope, self.seq)
    }
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub id: FeatureId,
    /// Multipolygon geometry; single polygons are stored as one entry.
    pub polygons: Vec<Polygon>,
    pub display_name: String,
    /// Every name-like property value found on the raw feature.
    pub name_candidates: Vec<String>,
    /// ISO country codes (alpha-2/alpha-3) when the dataset carries them.
    pub iso_codes: Vec<String>,
    /// Administrative code, zero-padded to 6 digits when numeric.
    pub admin_code: Option<String>,
    /// Which dataset the feature came from (scope slug of its origin).
    pub scope_source: String,
    /// True for features fabricated from a coarser scope to patch gaps in
    /// finer-scope source data.
    pub is_synthetic: bool,
}

impl Feature {
    /// The two-digit province prefix of the administrative code, padded back
    /// to province-level form (`43xxxx` → `430000`).
    pub fn province_code(&self) -> Option<String> {
        let code = self.admin_code.as_deref()?;
        let prefix = code.get(..2)?;
        if prefix.chars().all(|c| c.is_ascii_digit()) {
            Some(format!("{prefix}0000"))
        } else {
            None
        }
    }
}

/// Zero-pads a numeric administrative code to 6 digits; non-numeric codes
/// (e.g. the `100000_JD` nine-dash-line overlay) are kept verbatim.
pub fn admin_code_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            let n = n.as_i64()?;
            if n < 0 {
                return None;
            }
            Some(format!("{n:06}"))
        }
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                return None;
            }
            if text.chars().all(|c| c.is_ascii_digit()) {
                Some(format!("{text:0>6}"))
            } else {
                Some(text.to_string())
            }
        }
        _ => None,
    }
}

/// Property keys whose values are treated as name candidates, in
/// display-name preference order.
const NAME_KEYS: &[&str] = &[
    "name",
    "NAME",
    "ADMIN",
    "name_zh",
    "NAME_ZH",
    "name_en",
    "NAME_EN",
    "NAME_LONG",
    "FORMAL_EN",
    "fullname",
];

const ISO_KEYS: &[&str] = &["iso_a2", "ISO_A2", "iso_a3", "ISO_A3"];

fn polygon_from_value(rings: &Value) -> Option<Polygon> {
    let rings = rings.as_array()?;
    let mut polygon = Polygon::new();
    for ring_value in rings {
        let Some(positions) = ring_value.as_array() else {
            continue;
        };
        let coords: Vec<Vec<f64>> = positions
            .iter()
            .filter_map(|pos| {
                let pos = pos.as_array()?;
                Some(pos.iter().filter_map(Value::as_f64).collect())
            })
            .collect();
        if let Some(ring) = geom::ring_from_coords(coords.iter().map(Vec::as_slice)) {
            polygon.push(ring);
        } else if polygon.is_empty() {
            // A degenerate outer ring invalidates the whole polygon; a
            // degenerate hole is just dropped.
            return None;
        }
    }
    if polygon.is_empty() { None } else { Some(polygon) }
}

fn polygons_from_geometry(geometry: &Value) -> Vec<Polygon> {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("");
    let Some(coordinates) = geometry.get("coordinates") else {
        return Vec::new();
    };
    match kind {
        "Polygon" => polygon_from_value(coordinates).into_iter().collect(),
        "MultiPolygon" => coordinates
            .as_array()
            .map(|polys| polys.iter().filter_map(polygon_from_value).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Parses a feature collection payload for `scope`, assigning sequential
/// scope-qualified ids.
pub fn parse_collection(scope: Scope, raw: &[u8]) -> Result<Vec<Feature>> {
    let payload: Value = serde_json::from_slice(raw).map_err(|err| Error::BoundaryParse {
        path: scope.as_str().to_string(),
        message: err.to_string(),
    })?;
    let Some(raw_features) = payload.get("features").and_then(Value::as_array) else {
        return Err(Error::BoundaryParse {
            path: scope.as_str().to_string(),
            message: "payload has no features array".to_string(),
        });
    };

    let mut features = Vec::new();
    let mut seq = 0u32;
    for raw_feature in raw_features {
        let Some(geometry) = raw_feature.get("geometry") else {
            continue;
        };
        let polygons = polygons_from_geometry(geometry);
        if polygons.is_empty() {
            continue;
        }

        let empty = serde_json::Map::new();
        let props = raw_feature
            .get("properties")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let mut name_candidates = Vec::new();
        for key in NAME_KEYS {
            if let Some(name) = props.get(*key).and_then(Value::as_str) {
                let name = name.trim();
                if !name.is_empty() && !name_candidates.iter().any(|n| n == name) {
                    name_candidates.push(name.to_string());
                }
            }
        }
        let display_name = name_candidates.first().cloned().unwrap_or_default();

        let mut iso_codes = Vec::new();
        for key in ISO_KEYS {
            if let Some(code) = props.get(*key).and_then(Value::as_str) {
                let code = code.trim().to_ascii_uppercase();
                // Placeholder codes like "-99" appear in world data.
                if code.chars().all(|c| c.is_ascii_alphabetic())
                    && !code.is_empty()
                    && !iso_codes.contains(&code)
                {
                    iso_codes.push(code);
                }
            }
        }

        let admin_code = props.get("adcode").and_then(admin_code_string);

        features.push(Feature {
            id: FeatureId { scope, seq },
            polygons,
            display_name,
            name_candidates,
            iso_codes,
            admin_code,
            scope_source: scope.as_str().to_string(),
            is_synthetic: false,
        });
        seq += 1;
    }

    if features.is_empty() {
        return Err(Error::EmptyCollection { scope });
    }
    Ok(features)
}
