//! Export bounds and the longitude/latitude → canvas projection.

use choromap_core::boundary::Feature;
use choromap_core::geom::{self, Point};
use choromap_core::scope::Scope;
use serde::Deserialize;

/// Latitude clamp for the Mercator transform; beyond this the projection
/// diverges toward the poles.
pub const MAX_MERCATOR_LAT: f64 = 85.0511;

/// Geographic bounding region of an export, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExportBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl ExportBounds {
    /// Fixed world box. Antarctica is cut below -60: it would otherwise
    /// dominate the Mercator canvas while carrying no label anyway.
    pub const GLOBAL: ExportBounds = ExportBounds {
        min_lon: -180.0,
        max_lon: 180.0,
        min_lat: -60.0,
        max_lat: 85.0,
    };

    /// Fixed national box, wide enough for the nine-dash-line overlay the
    /// upstream province dataset carries.
    pub const CHINA_PROVINCE: ExportBounds = ExportBounds {
        min_lon: 73.0,
        max_lon: 136.0,
        min_lat: 17.5,
        max_lat: 54.0,
    };

    /// Scope-level bounds: fixed boxes for Global and ChinaProvince,
    /// computed from the feature set for ChinaPrefecture. Never depends on
    /// the highlight set, so filtering does not move the map.
    pub fn for_scope(scope: Scope, features: &[Feature]) -> ExportBounds {
        match scope {
            Scope::Global => Self::GLOBAL,
            Scope::ChinaProvince => Self::CHINA_PROVINCE,
            Scope::ChinaPrefecture => {
                Self::from_features(features.iter()).unwrap_or(Self::CHINA_PROVINCE)
            }
        }
    }

    /// Computes bounds from a feature subset with asymmetric padding: 5% of
    /// the span on each side horizontally, 4% above and 8% below, leaving
    /// room for leader-line labels under small features.
    pub fn from_features<'a, I>(features: I) -> Option<ExportBounds>
    where
        I: Iterator<Item = &'a Feature>,
    {
        let mut bbox: Option<geom::Bounds> = None;
        for feature in features {
            let Some(fb) = geom::polygons_bbox(&feature.polygons) else {
                continue;
            };
            bbox = Some(match bbox {
                Some(b) => b.union(&fb),
                None => fb,
            });
        }
        let bbox = bbox?;
        let lon_span = (bbox.max.x - bbox.min.x).max(0.1);
        let lat_span = (bbox.max.y - bbox.min.y).max(0.1);
        Some(ExportBounds {
            min_lon: bbox.min.x - lon_span * 0.05,
            max_lon: bbox.max.x + lon_span * 0.05,
            min_lat: bbox.min.y - lat_span * 0.08,
            max_lat: bbox.max.y + lat_span * 0.04,
        })
    }
}

fn mercator_y(lat: f64) -> f64 {
    let clamped = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
    let phi = clamped.to_radians();
    (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln()
}

/// Projects longitude/latitude into canvas pixel coordinates (y down).
///
/// The canvas preserves the bounds' aspect ratio under the Mercator
/// transform, with the long side fixed and the short side floored.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    bounds: ExportBounds,
    width: f64,
    height: f64,
    merc_top: f64,
    merc_span: f64,
}

impl Projector {
    pub fn new(bounds: ExportBounds, long_side: f64, min_short_side: f64) -> Self {
        let lon_span = (bounds.max_lon - bounds.min_lon).max(1e-6).to_radians();
        let merc_top = mercator_y(bounds.max_lat);
        let merc_span = (merc_top - mercator_y(bounds.min_lat)).max(1e-9);

        let aspect = lon_span / merc_span;
        let (width, height) = if aspect >= 1.0 {
            (long_side, (long_side / aspect).max(min_short_side))
        } else {
            ((long_side * aspect).max(min_short_side), long_side)
        };

        Self {
            bounds,
            width: width.round(),
            height: height.round(),
            merc_top,
            merc_span,
        }
    }

    pub fn bounds(&self) -> ExportBounds {
        self.bounds
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn project(&self, lon: f64, lat: f64) -> Point {
        let x = (lon - self.bounds.min_lon) / (self.bounds.max_lon - self.bounds.min_lon)
            * self.width;
        let y = (self.merc_top - mercator_y(lat)) / self.merc_span * self.height;
        geom::point(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_bounds_are_fixed() {
        assert_eq!(
            ExportBounds::for_scope(Scope::Global, &[]),
            ExportBounds {
                min_lon: -180.0,
                max_lon: 180.0,
                min_lat: -60.0,
                max_lat: 85.0
            }
        );
    }

    #[test]
    fn projection_maps_corners_onto_canvas() {
        let proj = Projector::new(ExportBounds::GLOBAL, 2400.0, 640.0);
        let top_left = proj.project(-180.0, 85.0);
        assert!(top_left.x.abs() < 1e-9);
        assert!(top_left.y.abs() < 1e-9);
        let bottom_right = proj.project(180.0, -60.0);
        assert!((bottom_right.x - proj.width()).abs() < 1e-9);
        assert!((bottom_right.y - proj.height()).abs() < 1e-6);
    }

    #[test]
    fn latitude_is_clamped_at_the_poles() {
        let proj = Projector::new(ExportBounds::GLOBAL, 2400.0, 640.0);
        let pole = proj.project(0.0, 90.0);
        let clamp = proj.project(0.0, MAX_MERCATOR_LAT);
        assert_eq!(pole.y, clamp.y);
        assert!(pole.y.is_finite());
    }

    #[test]
    fn short_side_is_floored_for_elongated_bounds() {
        let thin = ExportBounds {
            min_lon: 0.0,
            max_lon: 60.0,
            min_lat: 0.0,
            max_lat: 1.0,
        };
        let proj = Projector::new(thin, 2400.0, 640.0);
        assert_eq!(proj.width(), 2400.0);
        assert_eq!(proj.height(), 640.0);
    }

    #[test]
    fn mercator_y_is_monotonic() {
        assert!(mercator_y(10.0) > mercator_y(0.0));
        assert!(mercator_y(0.0) > mercator_y(-10.0));
        assert!(mercator_y(0.0).abs() < 1e-12);
    }
}
