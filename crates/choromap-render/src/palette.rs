//! Scope-specific fill styling.
//!
//! Per-province hues are derived from a stable hash of the administrative
//! code so the interactive view and the standalone export always agree, and
//! so colors survive dataset reloads.

use choromap_core::boundary::Feature;
use choromap_core::scope::Scope;

/// 32-bit FNV-1a. Stable across platforms and runs.
fn fnv1a(text: &str) -> u32 {
    let mut hash: u32 = 0x811C9DC5;
    for byte in text.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(0x01000193);
    }
    hash
}

/// Hue in degrees for an administrative code, stable per jurisdiction.
pub fn admin_hue(code: &str) -> u32 {
    fnv1a(code) % 360
}

fn province_key(feature: &Feature) -> Option<String> {
    feature
        .province_code()
        .or_else(|| feature.admin_code.clone())
}

/// Base fill for a feature, before any highlight overlay.
pub fn base_fill(scope: Scope, feature: &Feature, highlighted: bool, any_highlight: bool) -> String {
    match scope {
        Scope::Global => {
            if highlighted {
                "#f0b24a".to_string()
            } else if any_highlight {
                // Dimmed when a filter is active and this country missed it.
                "#e7e3d8".to_string()
            } else {
                "#dfe7dc".to_string()
            }
        }
        Scope::ChinaProvince | Scope::ChinaPrefecture => {
            let hue = province_key(feature)
                .map(|code| admin_hue(&code))
                .unwrap_or(0);
            if highlighted {
                format!("hsl({hue}, 62%, 62%)")
            } else {
                format!("hsl({hue}, 48%, 84%)")
            }
        }
    }
}

/// Stroke color for region outlines.
pub fn outline_stroke(scope: Scope) -> &'static str {
    match scope {
        Scope::Global => "#9aa398",
        Scope::ChinaProvince | Scope::ChinaPrefecture => "#8893a0",
    }
}
