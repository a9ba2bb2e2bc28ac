#![forbid(unsafe_code)]

//! `choromap` matches place names against administrative boundaries and
//! exports the result as a cartographic region map.
//!
//! The core (always available) covers boundary parsing, name normalization,
//! alias indexing and matching. Everything else is opt-in:
//!
//! - `render`: layout + SVG export (`choromap::render`)
//! - `raster`: PNG output via pure-Rust SVG rasterization
//! - `fetch`: an HTTP [`BoundaryProvider`] backed by `reqwest`

pub use choromap_core::*;

#[cfg(feature = "fetch")]
pub mod fetch;

#[cfg(feature = "render")]
pub mod render {
    pub use choromap_render::labels::PlacedLabel;
    pub use choromap_render::model::{LabelLayout, RegionMapLayout, RegionPathLayout};
    pub use choromap_render::svg::SvgStyleOptions;
    pub use choromap_render::{
        ExportBounds, ExportOptions, LayoutInput, Projector, layout_region_map,
        render_region_map_svg,
    };

    use choromap_core::{BoundaryProvider, MapSession, Scope};
    use chrono::{DateTime, SecondsFormat, Utc};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum ExportError {
        #[error(transparent)]
        Core(#[from] choromap_core::Error),
        #[error(transparent)]
        Render(#[from] choromap_render::Error),
    }

    pub type Result<T> = std::result::Result<T, ExportError>;

    /// Suggested download filename for an export taken now.
    pub fn export_filename(scope: Scope, extension: &str) -> String {
        export_filename_at(scope, Utc::now(), extension)
    }

    /// `region-map-<scope>-<timestamp>.<ext>`, with the timestamp's `:` and
    /// `.` flattened to `-` so the name is safe on every filesystem.
    pub fn export_filename_at(scope: Scope, when: DateTime<Utc>, extension: &str) -> String {
        let stamp = when
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .replace([':', '.'], "-");
        format!("region-map-{}-{stamp}.{extension}", scope.as_str())
    }

    /// Convenience wrapper that bundles layout and style options for
    /// exporting straight from a [`MapSession`].
    ///
    /// All work is CPU-bound; the session must already have its active scope
    /// loaded (exports never trigger a fetch).
    #[derive(Debug, Clone, Default)]
    pub struct RegionMapExporter {
        pub options: ExportOptions,
        pub style: SvgStyleOptions,
    }

    impl RegionMapExporter {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn layout<P: BoundaryProvider>(
            &self,
            session: &MapSession<P>,
        ) -> Result<RegionMapLayout> {
            let scope = session.active_scope();
            let features = session.features(scope).unwrap_or(&[]);
            let provinces = if scope.is_china() {
                session.features(Scope::ChinaProvince)
            } else {
                None
            };
            let input = LayoutInput {
                scope,
                features,
                highlight: session.highlight(),
                provinces,
            };
            Ok(layout_region_map(&input, &self.options)?)
        }

        pub fn export_svg<P: BoundaryProvider>(&self, session: &MapSession<P>) -> Result<String> {
            let layout = self.layout(session)?;
            Ok(render_region_map_svg(&layout, &self.style))
        }

        #[cfg(feature = "raster")]
        pub fn export_png<P: BoundaryProvider>(
            &self,
            session: &MapSession<P>,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.export_svg(session)?;
            raster::svg_to_png(&svg, raster)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn export_filename_is_filesystem_safe() {
            let when = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
            let name = export_filename_at(Scope::ChinaProvince, when, "svg");
            assert_eq!(name, "region-map-china-provinces-2025-03-14T09-26-53Z.svg");
            assert!(!name.contains(':'));
        }
    }
}
