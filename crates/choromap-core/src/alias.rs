//! Per-scope alias index: normalized name variants → feature id sets.
//!
//! Built once per scope load from feature properties plus the static tables
//! below. Multiple features may legitimately share a normalized alias (the
//! index tolerates it; matching unions the hits).

use crate::boundary::{Feature, FeatureId};
use crate::normalize::{expand_aliases, normalize};
use crate::scope::Scope;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// Chinese names for countries whose boundary properties only carry
/// English names and ISO codes. Keyed by (alpha-2, alpha-3).
const ISO_LOCALIZED_NAMES: &[(&str, &str, &[&str])] = &[
    ("CN", "CHN", &["中国", "中华人民共和国"]),
    ("US", "USA", &["美国", "美利坚合众国"]),
    ("JP", "JPN", &["日本"]),
    ("KR", "KOR", &["韩国", "大韩民国"]),
    ("KP", "PRK", &["朝鲜"]),
    ("RU", "RUS", &["俄罗斯", "俄罗斯联邦"]),
    ("GB", "GBR", &["英国", "大不列颠及北爱尔兰联合王国"]),
    ("FR", "FRA", &["法国"]),
    ("DE", "DEU", &["德国"]),
    ("IT", "ITA", &["意大利"]),
    ("ES", "ESP", &["西班牙"]),
    ("PT", "PRT", &["葡萄牙"]),
    ("NL", "NLD", &["荷兰"]),
    ("BE", "BEL", &["比利时"]),
    ("CH", "CHE", &["瑞士"]),
    ("AT", "AUT", &["奥地利"]),
    ("SE", "SWE", &["瑞典"]),
    ("NO", "NOR", &["挪威"]),
    ("FI", "FIN", &["芬兰"]),
    ("DK", "DNK", &["丹麦"]),
    ("IS", "ISL", &["冰岛"]),
    ("IE", "IRL", &["爱尔兰"]),
    ("PL", "POL", &["波兰"]),
    ("CZ", "CZE", &["捷克"]),
    ("GR", "GRC", &["希腊"]),
    ("TR", "TUR", &["土耳其"]),
    ("UA", "UKR", &["乌克兰"]),
    ("IN", "IND", &["印度"]),
    ("PK", "PAK", &["巴基斯坦"]),
    ("BD", "BGD", &["孟加拉国"]),
    ("LK", "LKA", &["斯里兰卡"]),
    ("NP", "NPL", &["尼泊尔"]),
    ("TH", "THA", &["泰国"]),
    ("VN", "VNM", &["越南"]),
    ("LA", "LAO", &["老挝"]),
    ("KH", "KHM", &["柬埔寨"]),
    ("MM", "MMR", &["缅甸"]),
    ("MY", "MYS", &["马来西亚"]),
    ("SG", "SGP", &["新加坡"]),
    ("ID", "IDN", &["印度尼西亚", "印尼"]),
    ("PH", "PHL", &["菲律宾"]),
    ("MN", "MNG", &["蒙古", "蒙古国"]),
    ("KZ", "KAZ", &["哈萨克斯坦"]),
    ("AU", "AUS", &["澳大利亚"]),
    ("NZ", "NZL", &["新西兰"]),
    ("CA", "CAN", &["加拿大"]),
    ("MX", "MEX", &["墨西哥"]),
    ("BR", "BRA", &["巴西"]),
    ("AR", "ARG", &["阿根廷"]),
    ("CL", "CHL", &["智利"]),
    ("PE", "PER", &["秘鲁"]),
    ("EG", "EGY", &["埃及"]),
    ("ZA", "ZAF", &["南非"]),
    ("NG", "NGA", &["尼日利亚"]),
    ("KE", "KEN", &["肯尼亚"]),
    ("ET", "ETH", &["埃塞俄比亚"]),
    ("SA", "SAU", &["沙特阿拉伯"]),
    ("AE", "ARE", &["阿联酋", "阿拉伯联合酋长国"]),
    ("IR", "IRN", &["伊朗"]),
    ("IQ", "IRQ", &["伊拉克"]),
    ("IL", "ISR", &["以色列"]),
];

/// Short-name and classic single-character aliases for Chinese
/// province-level divisions, keyed by administrative code.
const ADMIN_CODE_ALIASES: &[(&str, &[&str])] = &[
    ("110000", &["北京", "京"]),
    ("120000", &["天津", "津"]),
    ("130000", &["河北", "冀"]),
    ("140000", &["山西", "晋"]),
    ("150000", &["内蒙古", "内蒙"]),
    ("210000", &["辽宁", "辽"]),
    ("220000", &["吉林"]),
    ("230000", &["黑龙江", "黑"]),
    ("310000", &["上海", "沪"]),
    ("320000", &["江苏", "苏"]),
    ("330000", &["浙江", "浙"]),
    ("340000", &["安徽", "皖"]),
    ("350000", &["福建", "闽"]),
    ("360000", &["江西", "赣"]),
    ("370000", &["山东", "鲁"]),
    ("410000", &["河南", "豫"]),
    ("420000", &["湖北", "鄂"]),
    ("430000", &["湖南", "湘"]),
    ("440000", &["广东", "粤"]),
    ("450000", &["广西", "桂"]),
    ("460000", &["海南", "琼"]),
    ("500000", &["重庆", "渝"]),
    ("510000", &["四川", "川", "蜀"]),
    ("520000", &["贵州", "黔"]),
    ("530000", &["云南", "滇"]),
    ("540000", &["西藏", "藏"]),
    ("610000", &["陕西", "陕", "秦"]),
    ("620000", &["甘肃", "甘", "陇"]),
    ("630000", &["青海", "青"]),
    ("640000", &["宁夏", "宁"]),
    ("650000", &["新疆"]),
    ("710000", &["台湾", "台"]),
    ("810000", &["香港", "港"]),
    ("820000", &["澳门", "澳"]),
];

fn iso_localized(codes: &[String]) -> &'static [&'static str] {
    for code in codes {
        for (a2, a3, names) in ISO_LOCALIZED_NAMES {
            if code == a2 || code == a3 {
                return names;
            }
        }
    }
    &[]
}

fn admin_code_aliases(code: &str) -> &'static [&'static str] {
    ADMIN_CODE_ALIASES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, names)| *names)
        .unwrap_or(&[])
}

#[derive(Debug, Clone)]
pub struct AliasIndex {
    scope: Scope,
    entries: FxHashMap<String, BTreeSet<FeatureId>>,
}

impl AliasIndex {
    /// Builds the index for one scope. O(features x aliases-per-feature);
    /// run once per scope load, not per query.
    pub fn build(scope: Scope, features: &[Feature]) -> Self {
        let mut entries: FxHashMap<String, BTreeSet<FeatureId>> = FxHashMap::default();
        let mut aliases = 0usize;
        for feature in features {
            let mut raw: Vec<&str> = feature
                .name_candidates
                .iter()
                .map(String::as_str)
                .collect();
            raw.extend(iso_localized(&feature.iso_codes));
            if let Some(code) = feature.admin_code.as_deref() {
                raw.extend(admin_code_aliases(code));
            }

            for candidate in raw {
                let normalized = normalize(candidate);
                if normalized.is_empty() {
                    continue;
                }
                let mut variants = expand_aliases(&normalized);
                variants.push(normalized);
                for variant in variants {
                    entries
                        .entry(variant)
                        .or_default()
                        .insert(feature.id.clone());
                    aliases += 1;
                }
            }
        }
        tracing::debug!(%scope, features = features.len(), aliases, "alias index built");
        Self { scope, entries }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn lookup(&self, normalized: &str) -> Option<&BTreeSet<FeatureId>> {
        self.entries.get(normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
