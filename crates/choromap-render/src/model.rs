//! Layout output structures consumed by the SVG renderer (and by any other
//! rendering surface; the layout itself never touches one).

use choromap_core::boundary::FeatureId;
use choromap_core::geom::Point;
use choromap_core::scope::Scope;

/// One filled region path in canvas coordinates.
///
/// Rings from every polygon of the feature are flattened into a single list
/// and painted with the even-odd fill rule, which handles both holes and
/// multipolygon parts.
#[derive(Debug, Clone)]
pub struct RegionPathLayout {
    pub id: FeatureId,
    pub name: String,
    pub rings: Vec<Vec<Point>>,
    pub fill: String,
    pub highlighted: bool,
    pub synthetic: bool,
}

#[derive(Debug, Clone)]
pub struct LabelLayout {
    pub text: String,
    /// The anchor inside the region, in canvas coordinates.
    pub anchor: Point,
    /// Where the text is drawn. Differs from `anchor` for small regions.
    pub position: Point,
    /// Draw a connecting line from `anchor` to `position`.
    pub leader: bool,
}

#[derive(Debug, Clone)]
pub struct RegionMapLayout {
    pub scope: Scope,
    pub width: f64,
    pub height: f64,
    /// Sorted by feature id for deterministic output.
    pub paths: Vec<RegionPathLayout>,
    /// Province contour overlay (outer rings only), China scopes.
    pub contours: Vec<Vec<Point>>,
    pub labels: Vec<LabelLayout>,
}
