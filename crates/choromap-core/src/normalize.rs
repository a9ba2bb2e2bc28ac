//! Place-name canonicalization.
//!
//! Matching is exact-after-normalization: free-text queries and boundary
//! feature names are both pushed through [`normalize`], then expanded with
//! administrative-suffix-stripped variants via [`expand_aliases`]. No fuzzy
//! edit-distance matching is performed.

/// Separator and punctuation characters stripped during normalization,
/// covering both ASCII and the CJK variants that show up in upstream
/// boundary properties and user input.
const STRIP_CHARS: &[char] = &[
    ' ', '\t', '\u{3000}', '·', '・', '•', '-', '–', '—', '_', '\'', '’', '`', '.', ',', '。',
    '，', '、', '(', ')', '（', '）', '[', ']', '【', '】',
];

/// Administrative suffix tokens, longest first so the longest match wins
/// (e.g. 自治区 before 区).
const ADMIN_SUFFIXES: &[&str] = &[
    "特别行政区",
    "自治区",
    "自治州",
    "自治县",
    "自治旗",
    "地区",
    "省",
    "市",
    "盟",
    "县",
    "区",
];

/// Ethnic-group tokens searched inside names ending in 自治州 to recover the
/// bare prefecture name (e.g. 湘西土家族苗族自治州 → 湘西).
const ETHNIC_KEYWORDS: &[&str] = &[
    "土家族苗族",
    "布依族苗族",
    "苗族侗族",
    "哈尼族彝族",
    "壮族苗族",
    "傣族景颇族",
    "藏族羌族",
    "蒙古族藏族",
    "朝鲜族",
    "哈萨克",
    "柯尔克孜",
    "土家族",
    "傈僳族",
    "回族",
    "藏族",
    "彝族",
    "白族",
    "傣族",
    "苗族",
    "侗族",
    "蒙古族",
];

/// English-language suffix tokens (spaces are already stripped by
/// [`normalize`] when these are checked).
const EN_SUFFIXES: &[&str] = &["federation", "province", "city"];

/// Canonicalizes a place name: lower-case, trim, strip separators and
/// punctuation. Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !STRIP_CHARS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strips the longest matching administrative suffix, if the remainder is
/// non-empty. Input is expected to be normalized already.
pub fn strip_admin_suffix(normalized: &str) -> Option<String> {
    for suffix in ADMIN_SUFFIXES {
        if let Some(rest) = normalized.strip_suffix(suffix) {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// For names ending in 自治州, recovers the shortened prefecture name by
/// cutting before the first ethnic-group keyword found at a char offset >= 2.
fn ethnic_shortened(normalized: &str) -> Option<String> {
    let rest = normalized.strip_suffix("自治州")?;
    for keyword in ETHNIC_KEYWORDS {
        if let Some(byte_offset) = rest.find(keyword) {
            let prefix = &rest[..byte_offset];
            if prefix.chars().count() >= 2 {
                return Some(prefix.to_string());
            }
        }
    }
    None
}

fn english_stripped(normalized: &str) -> Option<String> {
    for suffix in EN_SUFFIXES {
        if let Some(rest) = normalized.strip_suffix(suffix) {
            if rest.chars().count() >= 3 {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// Expands a normalized name into its suffix-stripped alias variants.
///
/// The input itself is not included; every returned variant should resolve to
/// the same feature(s) the input was derived from.
pub fn expand_aliases(normalized: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |candidate: Option<String>| {
        if let Some(c) = candidate {
            if !c.is_empty() && c != normalized && !out.contains(&c) {
                out.push(c);
            }
        }
    };
    push(strip_admin_suffix(normalized));
    push(ethnic_shortened(normalized));
    push(english_stripped(normalized));
    out
}
