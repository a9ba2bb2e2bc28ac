//! Deterministic SVG emission for a region map layout.

use crate::model::{LabelLayout, RegionMapLayout, RegionPathLayout};
use crate::palette;
use choromap_core::geom::Point;
use std::fmt::Write as _;

/// Visual constants not affected by scope or state.
#[derive(Debug, Clone)]
pub struct SvgStyleOptions {
    pub background: String,
    pub stroke_width: f64,
    pub contour_stroke: String,
    pub contour_width: f64,
    pub font_family: String,
    pub font_size: f64,
    pub label_color: String,
    pub hatch_color: String,
    pub hatch_spacing: f64,
}

impl Default for SvgStyleOptions {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            stroke_width: 1.0,
            contour_stroke: "#5c6672".to_string(),
            contour_width: 1.6,
            font_family: "sans-serif".to_string(),
            font_size: 26.0,
            label_color: "#2f3437".to_string(),
            hatch_color: "#b8860b".to_string(),
            hatch_spacing: 14.0,
        }
    }
}

/// Two decimals, trailing zeros trimmed. Fixed formatting keeps repeated
/// exports of the same state byte-identical.
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut out = format!("{v:.2}");
    while out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    if out == "-0" {
        out = "0".to_string();
    }
    out
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn path_data(rings: &[Vec<Point>]) -> String {
    let mut d = String::new();
    for ring in rings {
        for (i, p) in ring.iter().enumerate() {
            if i == 0 {
                let _ = write!(d, "M{} {}", fmt_num(p.x), fmt_num(p.y));
            } else {
                let _ = write!(d, "L{} {}", fmt_num(p.x), fmt_num(p.y));
            }
        }
        d.push('Z');
    }
    d
}

fn push_region_path(out: &mut String, path: &RegionPathLayout, stroke: &str, style: &SvgStyleOptions) {
    let _ = write!(
        out,
        r#"<path d="{}" fill="{}" fill-rule="evenodd" stroke="{}" stroke-width="{}""#,
        path_data(&path.rings),
        path.fill,
        stroke,
        fmt_num(style.stroke_width),
    );
    if path.synthetic {
        out.push_str(r#" stroke-dasharray="6 4""#);
    }
    out.push_str("/>\n");
}

fn push_label(out: &mut String, label: &LabelLayout, style: &SvgStyleOptions) {
    if label.leader {
        let _ = write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            fmt_num(label.anchor.x),
            fmt_num(label.anchor.y),
            fmt_num(label.position.x),
            fmt_num(label.position.y),
            style.label_color,
        );
        out.push('\n');
    }
    let anchor = if label.leader { "start" } else { "middle" };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="{}" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
        fmt_num(label.position.x),
        fmt_num(label.position.y),
        anchor,
        escape_xml(&style.font_family),
        fmt_num(style.font_size),
        style.label_color,
        escape_xml(&label.text),
    );
    out.push('\n');
}

/// Serializes a layout into a standalone SVG document.
pub fn render_region_map_svg(layout: &RegionMapLayout, style: &SvgStyleOptions) -> String {
    let width = fmt_num(layout.width);
    let height = fmt_num(layout.height);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
    );
    out.push('\n');

    let spacing = fmt_num(style.hatch_spacing);
    let _ = write!(
        out,
        concat!(
            r#"<defs><pattern id="region-hatch" width="{s}" height="{s}" "#,
            r#"patternUnits="userSpaceOnUse" patternTransform="rotate(45)">"#,
            r#"<line x1="0" y1="0" x2="0" y2="{s}" stroke="{c}" stroke-width="2"/>"#,
            r#"</pattern></defs>"#,
        ),
        s = spacing,
        c = style.hatch_color,
    );
    out.push('\n');

    let _ = write!(
        out,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        style.background,
    );
    out.push('\n');

    let stroke = palette::outline_stroke(layout.scope);
    for path in &layout.paths {
        push_region_path(&mut out, path, stroke, style);
    }

    // Hatch overlay on highlighted regions, on top of the base fill so the
    // region's own hue stays visible underneath.
    for path in &layout.paths {
        if !path.highlighted {
            continue;
        }
        let _ = write!(
            out,
            r#"<path d="{}" fill="url(#region-hatch)" fill-rule="evenodd" stroke="none"/>"#,
            path_data(&path.rings),
        );
        out.push('\n');
    }

    for contour in &layout.contours {
        let _ = write!(
            out,
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            path_data(std::slice::from_ref(contour)),
            style.contour_stroke,
            fmt_num(style.contour_width),
        );
        out.push('\n');
    }

    for label in &layout.labels {
        push_label(&mut out, label, style);
    }

    out.push_str("</svg>\n");
    out
}
