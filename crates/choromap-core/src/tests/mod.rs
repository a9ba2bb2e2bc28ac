use serde_json::{Value, json};

mod geom;
mod normalize;

fn square_coords(x: f64, y: f64, size: f64) -> Value {
    json!([[
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
        [x, y]
    ]])
}

/// Minimal world-countries style collection (geo-countries property names).
pub(crate) fn world_fixture() -> Vec<u8> {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(75.0, 20.0, 50.0) },
                "properties": { "ADMIN": "China", "ISO_A2": "CN", "ISO_A3": "CHN" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(-125.0, 25.0, 50.0) },
                "properties": { "ADMIN": "United States of America", "ISO_A2": "US", "ISO_A3": "USA" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(30.0, 50.0, 40.0) },
                "properties": { "ADMIN": "Russia", "ISO_A2": "RU", "ISO_A3": "RUS" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(115.0, 39.0, 2.0) },
                "properties": { "name": "北京" }
            }
        ]
    })
    .to_string()
    .into_bytes()
}

/// Chinese province-level collection (aliyun property names).
pub(crate) fn province_fixture() -> Vec<u8> {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(97.0, 26.0, 8.0) },
                "properties": { "name": "四川省", "adcode": 510000, "level": "province" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(115.0, 39.0, 2.0) },
                "properties": { "name": "北京市", "adcode": 110000, "level": "province" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(120.0, 22.0, 2.5) },
                "properties": { "name": "台湾省", "adcode": 710000, "level": "province" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(113.8, 22.1, 0.6) },
                "properties": { "name": "香港特别行政区", "adcode": 810000, "level": "province" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(113.4, 22.0, 0.3) },
                "properties": { "name": "澳门特别行政区", "adcode": 820000, "level": "province" }
            }
        ]
    })
    .to_string()
    .into_bytes()
}

/// Prefecture-level collection without the specially-administered regions,
/// mirroring the upstream data gap.
pub(crate) fn prefecture_fixture() -> Vec<u8> {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(103.5, 30.0, 1.5) },
                "properties": { "name": "成都市", "adcode": 510100, "level": "city" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(104.5, 29.0, 1.0) },
                "properties": { "name": "自贡市", "adcode": 510300, "level": "city" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(109.0, 28.2, 1.2) },
                "properties": { "name": "湘西土家族苗族自治州", "adcode": 433100, "level": "city" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": square_coords(115.0, 39.0, 2.0) },
                "properties": { "name": "北京市", "adcode": 110000, "level": "city" }
            }
        ]
    })
    .to_string()
    .into_bytes()
}
