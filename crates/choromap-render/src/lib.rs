#![forbid(unsafe_code)]

//! Cartographic layout + SVG renderer for region maps (headless).
//!
//! Consumes loaded feature sets and a highlight set from `choromap-core`,
//! chooses label anchors, projects longitude/latitude to a fixed-aspect
//! canvas via a spherical-Mercator-like transform, and emits a
//! self-contained SVG document. Output is deterministic for a given
//! scope/highlight state: features are sorted by id and coordinates use
//! fixed decimal formatting, so exporting the same state twice produces
//! byte-identical path data.

pub mod labels;
pub mod layout;
pub mod model;
pub mod palette;
pub mod project;
pub mod svg;

pub use layout::{LayoutInput, layout_region_map};
pub use model::RegionMapLayout;
pub use project::{ExportBounds, Projector};
pub use svg::{SvgStyleOptions, render_region_map_svg};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("nothing to export: the feature set for {scope} is empty")]
    EmptyExport { scope: choromap_core::Scope },

    #[error(transparent)]
    Core(#[from] choromap_core::Error),
}

/// Options shared by the interactive layer and the standalone export; both
/// paths must agree pixel-for-pixel, so they feed the same values here.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Overrides the scope-derived export bounds.
    pub bounds: Option<ExportBounds>,
    /// Fixed length of the long canvas side, in pixels.
    pub long_side: f64,
    /// Lower bound on the short canvas side so very elongated regions stay
    /// legible.
    pub min_short_side: f64,
    /// Draw province contour overlay lines (China scopes only).
    pub contours: bool,
    /// Draw region labels.
    pub labels: bool,
    /// Precision of the visual-center search, in degrees.
    pub anchor_precision: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            bounds: None,
            long_side: 2400.0,
            min_short_side: 640.0,
            contours: true,
            labels: true,
            anchor_precision: 0.01,
        }
    }
}
