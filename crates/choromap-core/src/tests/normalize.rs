use crate::normalize::*;

#[test]
fn normalize_case_folds_and_strips_separators() {
    assert_eq!(normalize("  New Zealand "), "newzealand");
    assert_eq!(normalize("Guinea-Bissau"), "guineabissau");
    assert_eq!(normalize("克孜勒苏·柯尔克孜"), "克孜勒苏柯尔克孜");
    assert_eq!(normalize("中国（大陆）"), "中国大陆");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        "  Russian Federation ",
        "内蒙古自治区",
        "USA",
        "St. Kitts-Nevis",
        "恩施土家族苗族自治州",
        "",
        "香港特别行政区",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn strips_longest_admin_suffix() {
    assert_eq!(strip_admin_suffix("四川省").as_deref(), Some("四川"));
    assert_eq!(strip_admin_suffix("成都市").as_deref(), Some("成都"));
    // 自治区 must win over the shorter 区 suffix.
    assert_eq!(strip_admin_suffix("内蒙古自治区").as_deref(), Some("内蒙古"));
    assert_eq!(
        strip_admin_suffix("香港特别行政区").as_deref(),
        Some("香港")
    );
    assert_eq!(strip_admin_suffix("锡林郭勒盟").as_deref(), Some("锡林郭勒"));
}

#[test]
fn suffix_strip_requires_non_empty_remainder() {
    assert_eq!(strip_admin_suffix("省"), None);
    assert_eq!(strip_admin_suffix("市"), None);
}

#[test]
fn autonomous_prefecture_yields_ethnic_shortened_alias() {
    let variants = expand_aliases("湘西土家族苗族自治州");
    assert!(variants.contains(&"湘西土家族苗族".to_string()));
    assert!(variants.contains(&"湘西".to_string()));

    let variants = expand_aliases("延边朝鲜族自治州");
    assert!(variants.contains(&"延边".to_string()));
}

#[test]
fn ethnic_keyword_too_close_to_start_is_not_shortened() {
    // Offset < 2 chars before the keyword: no shortened alias.
    let variants = expand_aliases("回族自治州");
    assert!(!variants.iter().any(|v| v.is_empty()));
    assert!(!variants.contains(&"回".to_string()));
}

#[test]
fn english_suffix_stripping_keeps_minimum_remainder() {
    let variants = expand_aliases("russianfederation");
    assert!(variants.contains(&"russian".to_string()));
    // Remainder below 3 chars: keep as-is.
    let variants = expand_aliases("hocity");
    assert!(!variants.contains(&"ho".to_string()));
}

#[test]
fn expand_aliases_excludes_the_input_itself() {
    let variants = expand_aliases("四川");
    assert!(!variants.contains(&"四川".to_string()));
}
