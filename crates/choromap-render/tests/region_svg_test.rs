use choromap_core::boundary::{self, Feature, FeatureId};
use choromap_core::scope::Scope;
use choromap_render::svg::SvgStyleOptions;
use choromap_render::{ExportOptions, LayoutInput, layout_region_map, render_region_map_svg};
use serde_json::json;
use std::collections::BTreeSet;

fn rect(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> serde_json::Value {
    json!([[
        [min_lon, min_lat],
        [max_lon, min_lat],
        [max_lon, max_lat],
        [min_lon, max_lat],
        [min_lon, min_lat]
    ]])
}

fn world_features() -> Vec<Feature> {
    let raw = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "China", "iso_a2": "CN" },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(75.0, 20.0, 130.0, 50.0)] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Mongolia", "iso_a2": "MN" },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(88.0, 42.0, 118.0, 52.0)] }
            },
            {
                "type": "Feature",
                "properties": { "name": "Tiny Isle", "iso_a2": "TI" },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(0.0, 0.0, 0.4, 0.4)] }
            }
        ]
    });
    boundary::parse_collection(Scope::Global, raw.to_string().as_bytes()).expect("fixture parses")
}

fn province_features() -> Vec<Feature> {
    let raw = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "四川省", "adcode": 510000 },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(98.0, 26.0, 108.0, 34.0)] }
            },
            {
                "type": "Feature",
                "properties": { "name": "重庆市", "adcode": 500000 },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(105.0, 28.0, 110.0, 32.0)] }
            }
        ]
    });
    boundary::parse_collection(Scope::ChinaProvince, raw.to_string().as_bytes())
        .expect("fixture parses")
}

fn prefecture_features() -> Vec<Feature> {
    let raw = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "成都市", "adcode": 510100 },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(102.9, 30.0, 104.9, 31.5)] }
            },
            {
                "type": "Feature",
                "properties": { "name": "自贡市", "adcode": 510300 },
                "geometry": { "type": "MultiPolygon", "coordinates": [rect(104.0, 28.9, 105.0, 29.6)] }
            }
        ]
    });
    boundary::parse_collection(Scope::ChinaPrefecture, raw.to_string().as_bytes())
        .expect("fixture parses")
}

fn render(
    scope: Scope,
    features: &[Feature],
    highlight: &BTreeSet<FeatureId>,
    provinces: Option<&[Feature]>,
) -> String {
    let input = LayoutInput {
        scope,
        features,
        highlight,
        provinces,
    };
    let layout = layout_region_map(&input, &ExportOptions::default()).expect("layout ok");
    render_region_map_svg(&layout, &SvgStyleOptions::default())
}

#[test]
fn repeated_export_is_byte_identical() {
    let features = world_features();
    let mut highlight = BTreeSet::new();
    highlight.insert(features[0].id.clone());

    let first = render(Scope::Global, &features, &highlight, None);
    let second = render(Scope::Global, &features, &highlight, None);
    assert_eq!(first, second);
}

#[test]
fn global_canvas_ignores_the_highlight_set() {
    let features = world_features();
    let empty = BTreeSet::new();
    let mut highlight = BTreeSet::new();
    highlight.insert(features[0].id.clone());

    let plain = layout_region_map(
        &LayoutInput {
            scope: Scope::Global,
            features: &features,
            highlight: &empty,
            provinces: None,
        },
        &ExportOptions::default(),
    )
    .expect("layout ok");
    let filtered = layout_region_map(
        &LayoutInput {
            scope: Scope::Global,
            features: &features,
            highlight: &highlight,
            provinces: None,
        },
        &ExportOptions::default(),
    )
    .expect("layout ok");

    assert_eq!(plain.width, filtered.width);
    assert_eq!(plain.height, filtered.height);
    assert_eq!(plain.width, 2400.0);
}

#[test]
fn hatch_overlay_appears_only_when_highlighted() {
    let features = world_features();
    let empty = BTreeSet::new();
    let plain = render(Scope::Global, &features, &empty, None);
    assert!(plain.contains("region-hatch")); // the pattern def is always emitted
    assert!(!plain.contains("url(#region-hatch)"));

    let mut highlight = BTreeSet::new();
    highlight.insert(features[0].id.clone());
    let marked = render(Scope::Global, &features, &highlight, None);
    assert!(marked.contains("url(#region-hatch)"));
}

#[test]
fn small_global_regions_carry_no_label() {
    let features = world_features();
    let empty = BTreeSet::new();
    let svg = render(Scope::Global, &features, &empty, None);
    assert!(svg.contains(">China</text>"));
    assert!(svg.contains(">Mongolia</text>"));
    assert!(!svg.contains("Tiny Isle"));
}

#[test]
fn province_export_draws_contours_and_labels() {
    let features = province_features();
    let empty = BTreeSet::new();
    let svg = render(Scope::ChinaProvince, &features, &empty, None);
    assert!(svg.contains("四川省"));
    assert!(svg.contains("重庆市"));
    assert!(svg.contains(r##"fill="none" stroke="#5c6672""##));
}

#[test]
fn prefecture_labels_come_from_the_province_dataset() {
    let prefectures = prefecture_features();
    let provinces = province_features();
    let empty = BTreeSet::new();
    let svg = render(
        Scope::ChinaPrefecture,
        &prefectures,
        &empty,
        Some(&provinces),
    );
    // One shared label per province, named after the province itself.
    assert!(svg.contains("四川省"));
    assert!(!svg.contains(">成都市</text>"));
    assert!(!svg.contains(">自贡市</text>"));
}

#[test]
fn empty_feature_set_is_rejected() {
    let empty_features: Vec<Feature> = Vec::new();
    let empty = BTreeSet::new();
    let err = layout_region_map(
        &LayoutInput {
            scope: Scope::ChinaPrefecture,
            features: &empty_features,
            highlight: &empty,
            provinces: None,
        },
        &ExportOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("nothing to export"));
}

#[test]
fn disabled_layers_are_omitted() {
    let features = province_features();
    let empty = BTreeSet::new();
    let options = ExportOptions {
        contours: false,
        labels: false,
        ..ExportOptions::default()
    };
    let layout = layout_region_map(
        &LayoutInput {
            scope: Scope::ChinaProvince,
            features: &features,
            highlight: &empty,
            provinces: None,
        },
        &options,
    )
    .expect("layout ok");
    assert!(layout.contours.is_empty());
    assert!(layout.labels.is_empty());
}
