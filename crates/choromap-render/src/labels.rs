//! Label anchor selection, per scope.

use choromap_core::boundary::{Feature, FeatureId};
use choromap_core::geom::{self, Point};
use choromap_core::scope::Scope;
use std::collections::{BTreeMap, BTreeSet};

/// Features whose primary ring is smaller than this (square degrees) get no
/// label in the Global scope; tiny islands and territories would otherwise
/// clutter the world map.
pub const MIN_GLOBAL_LABEL_AREA: f64 = 1.5;

/// Hand-tuned label coordinates for province-level jurisdictions whose
/// visual center crowds a neighbour or sits awkwardly in an elongated shape.
/// Each is verified to lie inside the polygon before use.
const PROVINCE_ANCHOR_OVERRIDES: &[(&str, f64, f64)] = &[
    ("130000", 115.6, 38.8),  // 河北: keep clear of 北京/天津
    ("150000", 113.5, 44.0),  // 内蒙古: center of the long arc
    ("620000", 104.1, 35.4),  // 甘肃: the narrow corridor's wide end
    ("610000", 109.0, 35.8),  // 陕西
    ("440000", 113.6, 23.4),  // 广东: avoid the estuary SARs
];

/// A label anchor in geographic coordinates.
#[derive(Debug, Clone)]
pub struct PlacedLabel {
    pub feature: FeatureId,
    pub text: String,
    pub position: Point,
}

/// Anchor fallback chain: visual center of the primary ring, then bbox
/// center, then the first outer-ring vertex.
pub fn feature_anchor(feature: &Feature, precision: f64) -> Option<Point> {
    if let Some(ring) = geom::primary_outer_ring(&feature.polygons) {
        if let Some(center) = geom::visual_center(ring, precision) {
            return Some(center);
        }
    }
    if let Some(bbox) = geom::polygons_bbox(&feature.polygons) {
        return Some(bbox.center());
    }
    feature
        .polygons
        .first()
        .and_then(|poly| poly.first())
        .and_then(|ring| ring.first())
        .copied()
}

fn override_anchor(feature: &Feature) -> Option<Point> {
    let code = feature.admin_code.as_deref()?;
    let (_, lon, lat) = PROVINCE_ANCHOR_OVERRIDES
        .iter()
        .find(|(c, _, _)| *c == code)?;
    let p = geom::point(*lon, *lat);
    // Only trust the override when it actually falls inside the polygon.
    if geom::point_in_polygons(p, &feature.polygons) {
        Some(p)
    } else {
        None
    }
}

fn global_labels(
    features: &[Feature],
    highlight: &BTreeSet<FeatureId>,
    precision: f64,
) -> Vec<PlacedLabel> {
    let filter_active = !highlight.is_empty();
    let mut out = Vec::new();
    for feature in features {
        if feature.display_name.is_empty() {
            continue;
        }
        if filter_active && !highlight.contains(&feature.id) {
            continue;
        }
        let Some(ring) = geom::primary_outer_ring(&feature.polygons) else {
            continue;
        };
        if geom::ring_signed_area(ring).abs() < MIN_GLOBAL_LABEL_AREA {
            continue;
        }
        if let Some(position) = feature_anchor(feature, precision) {
            out.push(PlacedLabel {
                feature: feature.id.clone(),
                text: feature.display_name.clone(),
                position,
            });
        }
    }
    out
}

fn province_labels(features: &[Feature], precision: f64) -> Vec<PlacedLabel> {
    let mut out = Vec::new();
    for feature in features {
        if feature.display_name.is_empty() {
            continue;
        }
        let position = override_anchor(feature).or_else(|| feature_anchor(feature, precision));
        if let Some(position) = position {
            out.push(PlacedLabel {
                feature: feature.id.clone(),
                text: feature.display_name.clone(),
                position,
            });
        }
    }
    out
}

/// One label per covered province, placed at the province's own visual
/// center and attached to the largest constituent prefecture (the
/// "province-label carrier"). This avoids stacking the same province name on
/// every prefecture.
fn prefecture_labels(
    features: &[Feature],
    provinces: Option<&[Feature]>,
    precision: f64,
) -> Vec<PlacedLabel> {
    let mut carriers: BTreeMap<String, &Feature> = BTreeMap::new();
    for feature in features {
        let Some(code) = feature.province_code() else {
            continue;
        };
        let area = geom::primary_outer_ring(&feature.polygons)
            .map(|r| geom::ring_signed_area(r).abs())
            .unwrap_or(0.0);
        match carriers.get(&code) {
            Some(current) => {
                let current_area = geom::primary_outer_ring(&current.polygons)
                    .map(|r| geom::ring_signed_area(r).abs())
                    .unwrap_or(0.0);
                if area > current_area {
                    carriers.insert(code, feature);
                }
            }
            None => {
                carriers.insert(code, feature);
            }
        }
    }

    let mut out = Vec::new();
    for (code, carrier) in carriers {
        let province = provinces.and_then(|ps| {
            ps.iter()
                .find(|p| p.admin_code.as_deref() == Some(code.as_str()))
        });
        let (text, position) = match province {
            Some(p) if !p.display_name.is_empty() => {
                (p.display_name.clone(), feature_anchor(p, precision))
            }
            _ => (carrier.display_name.clone(), feature_anchor(carrier, precision)),
        };
        if text.is_empty() {
            continue;
        }
        if let Some(position) = position {
            out.push(PlacedLabel {
                feature: carrier.id.clone(),
                text,
                position,
            });
        }
    }
    out
}

/// Chooses label anchors for one scope's feature set.
///
/// `provinces` supplies the province-level dataset for prefecture-scope
/// label sharing; it is ignored by the other scopes.
pub fn place_labels(
    scope: Scope,
    features: &[Feature],
    highlight: &BTreeSet<FeatureId>,
    provinces: Option<&[Feature]>,
    precision: f64,
) -> Vec<PlacedLabel> {
    match scope {
        Scope::Global => global_labels(features, highlight, precision),
        Scope::ChinaProvince => province_labels(features, precision),
        Scope::ChinaPrefecture => prefecture_labels(features, provinces, precision),
    }
}
