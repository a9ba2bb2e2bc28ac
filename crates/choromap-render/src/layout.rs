//! Geographic state → canvas layout.

use crate::labels::{self, PlacedLabel};
use crate::model::{LabelLayout, RegionMapLayout, RegionPathLayout};
use crate::palette;
use crate::project::{ExportBounds, Projector};
use crate::{Error, ExportOptions, Result};
use choromap_core::boundary::{Feature, FeatureId};
use choromap_core::geom::{self, Point};
use choromap_core::scope::Scope;
use std::collections::BTreeSet;

/// Everything the layout pass reads. Borrowed from the session so the
/// interactive layer and the export path cannot drift apart.
#[derive(Debug)]
pub struct LayoutInput<'a> {
    pub scope: Scope,
    pub features: &'a [Feature],
    pub highlight: &'a BTreeSet<FeatureId>,
    /// Province-level dataset, used for prefecture label sharing and the
    /// province contour overlay. Optional; the overlay falls back to the
    /// features themselves in the province scope.
    pub provinces: Option<&'a [Feature]>,
}

/// Regions whose projected bbox is smaller than this on either axis get
/// their label offset outside the shape with a leader line.
const LEADER_THRESHOLD_PX: f64 = 40.0;
const LEADER_OFFSET: (f64, f64) = (18.0, -18.0);

fn project_rings(feature: &Feature, proj: &Projector) -> Vec<Vec<Point>> {
    let mut rings = Vec::new();
    for polygon in &feature.polygons {
        for ring in polygon {
            rings.push(
                ring.iter()
                    .map(|p| proj.project(p.x, p.y))
                    .collect::<Vec<_>>(),
            );
        }
    }
    rings
}

fn rings_bbox(rings: &[Vec<Point>]) -> Option<geom::Bounds> {
    let mut bbox: Option<geom::Bounds> = None;
    for ring in rings {
        let Some(rb) = geom::ring_bbox(ring) else {
            continue;
        };
        bbox = Some(match bbox {
            Some(b) => b.union(&rb),
            None => rb,
        });
    }
    bbox
}

fn contour_rings(input: &LayoutInput<'_>, proj: &Projector) -> Vec<Vec<Point>> {
    let source: Option<&[Feature]> = match input.scope {
        Scope::Global => None,
        Scope::ChinaProvince => input.provinces.or(Some(input.features)),
        Scope::ChinaPrefecture => input.provinces,
    };
    let Some(provinces) = source else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for province in provinces {
        for polygon in &province.polygons {
            let Some(outer) = polygon.first() else {
                continue;
            };
            out.push(
                outer
                    .iter()
                    .map(|p| proj.project(p.x, p.y))
                    .collect::<Vec<_>>(),
            );
        }
    }
    out
}

fn layout_label(label: &PlacedLabel, proj: &Projector, feature_px_bbox: Option<geom::Bounds>) -> LabelLayout {
    let anchor = proj.project(label.position.x, label.position.y);
    let small = feature_px_bbox
        .map(|b| (b.max.x - b.min.x).min(b.max.y - b.min.y) < LEADER_THRESHOLD_PX)
        .unwrap_or(false);
    if small {
        LabelLayout {
            text: label.text.clone(),
            anchor,
            position: geom::point(anchor.x + LEADER_OFFSET.0, anchor.y + LEADER_OFFSET.1),
            leader: true,
        }
    } else {
        LabelLayout {
            text: label.text.clone(),
            anchor,
            position: anchor,
            leader: false,
        }
    }
}

/// Produces the full canvas layout for one scope's state.
///
/// Deterministic: paths are sorted by feature id, labels follow the path
/// order of their carrier feature, and the projector is fixed by the bounds.
pub fn layout_region_map(input: &LayoutInput<'_>, options: &ExportOptions) -> Result<RegionMapLayout> {
    if input.features.is_empty() {
        return Err(Error::EmptyExport { scope: input.scope });
    }

    let bounds = options
        .bounds
        .unwrap_or_else(|| ExportBounds::for_scope(input.scope, input.features));
    let proj = Projector::new(bounds, options.long_side, options.min_short_side);
    let any_highlight = !input.highlight.is_empty();

    let mut ordered: Vec<&Feature> = input.features.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut paths = Vec::with_capacity(ordered.len());
    for feature in &ordered {
        let highlighted = input.highlight.contains(&feature.id);
        let rings = project_rings(feature, &proj);
        if rings.is_empty() {
            continue;
        }
        paths.push(RegionPathLayout {
            id: feature.id.clone(),
            name: feature.display_name.clone(),
            rings,
            fill: palette::base_fill(input.scope, feature, highlighted, any_highlight),
            highlighted,
            synthetic: feature.is_synthetic,
        });
    }

    let contours = if options.contours {
        contour_rings(input, &proj)
    } else {
        Vec::new()
    };

    let labels = if options.labels {
        let placed = labels::place_labels(
            input.scope,
            input.features,
            input.highlight,
            input.provinces,
            options.anchor_precision,
        );
        placed
            .iter()
            .map(|label| {
                let bbox = paths
                    .iter()
                    .find(|p| p.id == label.feature)
                    .and_then(|p| rings_bbox(&p.rings));
                layout_label(label, &proj, bbox)
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::debug!(
        scope = %input.scope,
        paths = paths.len(),
        contours = contours.len(),
        labels = labels.len(),
        "region map layout ready"
    );

    Ok(RegionMapLayout {
        scope: input.scope,
        width: proj.width(),
        height: proj.height(),
        paths,
        contours,
        labels,
    })
}
