//! Integration tests for pattern rewriting
//!
//! These tests drive the public entry points end to end: options in,
//! rewritten source and new flags out.

use es_regex_rewrite::prelude::*;

fn rewrite(pattern: &str, flags: &str, options: RewriteOptions) -> String {
    rewrite_pattern(pattern, flags, &options).unwrap()
}

fn named_group() -> RewriteOptions {
    RewriteOptions::new().with_named_group(true)
}

fn native_unicode_properties() -> RewriteOptions {
    RewriteOptions::new()
        .with_use_unicode_flag(true)
        .with_unicode_property_escape(true)
}

// ============================================================================
// Named Groups
// ============================================================================

#[test]
fn test_named_group_and_reference() {
    assert_eq!(
        rewrite("(?<year>\\d{4})-\\k<year>", "", named_group()),
        "(\\d{4})-\\1"
    );
}

#[test]
fn test_named_groups_kept_without_option() {
    assert_eq!(
        rewrite("(?<year>\\d{4})-\\k<year>", "", RewriteOptions::new()),
        "(?<year>\\d{4})-\\k<year>"
    );
}

#[test]
fn test_forward_named_reference() {
    assert_eq!(rewrite("\\k<a>(?<a>x)", "", named_group()), "\\1(x)");
}

#[test]
fn test_named_reference_before_digit() {
    assert_eq!(rewrite("(?<a>x)\\k<a>1", "", named_group()), "(x)(?:\\1)1");
}

#[test]
fn test_duplicate_names_in_alternatives() {
    assert_eq!(
        rewrite("(?:(?<a>x)|(?<a>y))\\k<a>", "", named_group()),
        "(?:(x)|(y))(?:\\1\\2)"
    );
}

#[test]
fn test_numbering_counts_unnamed_groups() {
    assert_eq!(
        rewrite("(a)(?:b)(?<c>c)\\k<c>", "", named_group()),
        "(a)(?:b)(c)\\2"
    );
}

#[test]
fn test_named_group_callback() {
    let mut seen = Vec::new();
    {
        let mut rewriter =
            PatternRewriter::new(named_group()).on_named_group(|name, index| {
                seen.push(format!("{}={}", name, index));
            });
        rewriter.rewrite("(x)(?<first>y)(?<second>z)", "").unwrap();
    }
    assert_eq!(seen, vec!["first=2", "second=3"]);
}

#[test]
fn test_named_group_callback_without_rewriting() {
    let mut count = 0;
    {
        let mut rewriter =
            PatternRewriter::new(RewriteOptions::new()).on_named_group(|_, _| count += 1);
        let output = rewriter.rewrite("(?<a>x)(?<b>y)", "").unwrap();
        assert_eq!(output, "(?<a>x)(?<b>y)");
    }
    assert_eq!(count, 2);
}

// ============================================================================
// Unicode Flag
// ============================================================================

#[test]
fn test_astral_escape() {
    assert_eq!(
        rewrite("\\u{1F600}", "u", RewriteOptions::new()),
        "(?:\\uD83D\\uDE00)"
    );
}

#[test]
fn test_astral_literal_is_quantifiable() {
    assert_eq!(
        rewrite("😀+", "u", RewriteOptions::new()),
        "(?:\\uD83D\\uDE00)+"
    );
}

#[test]
fn test_bmp_literals_untouched() {
    assert_eq!(rewrite("foo\\.bar", "u", RewriteOptions::new()), "foo\\.bar");
}

#[test]
fn test_astral_range_class() {
    assert_eq!(
        rewrite("[\\u{1F600}-\\u{1F64F}]", "u", RewriteOptions::new()),
        "(?:\\uD83D[\\uDE00-\\uDE4F])"
    );
}

#[test]
fn test_mixed_class() {
    assert_eq!(
        rewrite("[a\\u{1F600}]", "u", RewriteOptions::new()),
        "(?:a|\\uD83D\\uDE00)"
    );
}

#[test]
fn test_negated_class() {
    assert_eq!(
        rewrite("[^a]", "u", RewriteOptions::new()),
        "(?:[\\0-`b-\\uD7FF\\uE000-\\uFFFF]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]|[\\uD800-\\uDBFF](?![\\uDC00-\\uDFFF])|(?:[^\\uD800-\\uDBFF]|^)[\\uDC00-\\uDFFF])"
    );
}

#[test]
fn test_negated_class_ignore_case() {
    assert_eq!(
        rewrite("[^a]", "iu", RewriteOptions::new()),
        "(?:(?![Aa\\uD800-\\uDFFF])[\\s\\S]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF])"
    );
}

#[test]
fn test_kelvin_sign_folding() {
    assert_eq!(rewrite("k", "iu", RewriteOptions::new()), "[Kk\\u212A]");
    assert_eq!(rewrite("[k]", "iu", RewriteOptions::new()), "[Kk\\u212A]");
}

#[test]
fn test_range_folding() {
    assert_eq!(
        rewrite("[a-c]", "iu", RewriteOptions::new()),
        "[A-Ca-c]"
    );
}

#[test]
fn test_no_folding_with_native_unicode_flag() {
    let options = RewriteOptions::new().with_use_unicode_flag(true);
    assert_eq!(rewrite("k[a-c]", "iu", options), "k[a-c]");
}

#[test]
fn test_lone_surrogate_is_guarded() {
    assert_eq!(
        rewrite("\\uD83D", "u", RewriteOptions::new()),
        "(?:\\uD83D(?![\\uDC00-\\uDFFF]))"
    );
}

#[test]
fn test_class_escapes() {
    assert_eq!(rewrite("\\d+", "u", RewriteOptions::new()), "[0-9]+");
    assert_eq!(
        rewrite("\\W", "iu", RewriteOptions::new()),
        "(?:[\\0-\\/:-@\\[-\\^`\\{-\\u017E\\u0180-\\u2129\\u212B-\\uD7FF\\uE000-\\uFFFF]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]|[\\uD800-\\uDBFF](?![\\uDC00-\\uDFFF])|(?:[^\\uD800-\\uDBFF]|^)[\\uDC00-\\uDFFF])"
    );
}

#[test]
fn test_unicode_dot() {
    assert_eq!(
        rewrite(".", "u", RewriteOptions::new()),
        "(?:[\\0-\\t\\x0B\\f\\x0E-\\u2027\\u202A-\\uD7FF\\uE000-\\uFFFF]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]|[\\uD800-\\uDBFF](?![\\uDC00-\\uDFFF])|(?:[^\\uD800-\\uDBFF]|^)[\\uDC00-\\uDFFF])"
    );
}

#[test]
fn test_new_flags() {
    let mut flags = Vec::new();
    {
        let mut rewriter = PatternRewriter::new(RewriteOptions::new().with_dot_all_flag(true))
            .on_new_flags(|new_flags| flags.push(new_flags.to_string()));
        rewriter.rewrite("a", "gimsuy").unwrap();
        rewriter.rewrite("a", "g").unwrap();
    }
    assert_eq!(flags, vec!["gimy", "g"]);
}

#[test]
fn test_unicode_flag_kept() {
    let mut flags = String::new();
    {
        let mut rewriter = PatternRewriter::new(RewriteOptions::new().with_use_unicode_flag(true))
            .on_new_flags(|new_flags| flags = new_flags.to_string());
        let output = rewriter.rewrite("[^\\u{1F600}].", "u").unwrap();
        assert_eq!(output, "[^\\u{1F600}].");
    }
    assert_eq!(flags, "u");
}

#[test]
fn test_nul_escape_before_digit() {
    assert_eq!(rewrite("[\\0]1", "u", RewriteOptions::new()), "\\x001");
    assert_ne!(rewrite("[\\0]1", "u", RewriteOptions::new()), "\\01");
    assert_eq!(rewrite("[\\0]", "u", RewriteOptions::new()), "\\0");
    assert_eq!(rewrite("[\\0][12]", "u", RewriteOptions::new()), "\\0[12]");
}

#[test]
fn test_astral_class_without_unicode_is_code_units() {
    assert_eq!(rewrite("[a😀]", "", RewriteOptions::new()), "[a😀]");
    assert_eq!(rewrite("[😀-\\uFFFF]", "", RewriteOptions::new()), "[😀-\\uFFFF]");
    assert_eq!(
        rewrite("[😀-😂]", "u", RewriteOptions::new()),
        "(?:\\uD83D[\\uDE00-\\uDE02])"
    );
}

// ============================================================================
// Dot-All Flag
// ============================================================================

#[test]
fn test_dot_all_emulated() {
    let options = RewriteOptions::new().with_dot_all_flag(true);
    assert_eq!(rewrite("a.b", "s", options), "a[\\s\\S]b");
    assert_eq!(rewrite("a.b", "", options), "a.b");
}

#[test]
fn test_dot_all_with_unicode() {
    let options = RewriteOptions::new().with_dot_all_flag(true);
    assert_eq!(
        rewrite(".", "su", options),
        "(?:[\\0-\\uD7FF\\uE000-\\uFFFF]|[\\uD800-\\uDBFF][\\uDC00-\\uDFFF]|[\\uD800-\\uDBFF](?![\\uDC00-\\uDFFF])|(?:[^\\uD800-\\uDBFF]|^)[\\uDC00-\\uDFFF])"
    );
}

#[test]
fn test_use_dot_all_flag_keeps_dot() {
    let options = RewriteOptions::new().with_use_dot_all_flag(true);
    assert_eq!(rewrite("a.b", "s", options), "a.b");
}

// ============================================================================
// Property Escapes
// ============================================================================

#[test]
fn test_property_escape_surrogate_output() {
    let options = RewriteOptions::new().with_unicode_property_escape(true);
    let output = rewrite("\\p{L}", "u", options);
    assert!(output.starts_with(
        "(?:[A-Za-z\\xAA\\xB5\\xBA\\xC0-\\xD6\\xD8-\\xF6\\xF8-\\u02C1"
    ));
    assert!(output.contains("\\uD800[\\uDC00-\\uDC0B"));
}

#[test]
fn test_property_escape_native_unicode() {
    assert_eq!(
        rewrite("\\p{ASCII_Hex_Digit}+", "u", native_unicode_properties()),
        "[0-9A-Fa-f]+"
    );
    assert_eq!(
        rewrite("\\P{ASCII}", "u", native_unicode_properties()),
        "[\\x80-\\u{10FFFF}]"
    );
}

#[test]
fn test_property_escape_in_class() {
    assert_eq!(
        rewrite("[\\p{AHex}_]", "u", native_unicode_properties()),
        "[0-9A-F_a-f]"
    );
    assert_eq!(
        rewrite("[^\\p{AHex}_]", "u", native_unicode_properties()),
        "[^0-9A-F_a-f]"
    );
}

#[test]
fn test_class_without_property_untouched_with_native_unicode() {
    assert_eq!(
        rewrite("[a-z]\\w", "u", native_unicode_properties()),
        "[a-z]\\w"
    );
}

#[test]
fn test_property_escape_kept_without_option() {
    let options = RewriteOptions::new().with_use_unicode_flag(true);
    assert_eq!(rewrite("\\p{Lu}", "u", options), "\\p{Lu}");
}

#[test]
fn test_property_escape_matches_like_regex_crate() {
    for (payload, native) in [
        ("Lu", "\\p{Lu}"),
        ("Script=Greek", "\\p{Greek}"),
        ("Nd", "\\p{Nd}"),
        ("Emoji_Presentation", "\\p{Emoji_Presentation}"),
    ] {
        let output = rewrite(&format!("\\p{{{}}}", payload), "u", native_unicode_properties());
        let rewritten = regex::Regex::new(&format!("^{}$", output)).unwrap();
        let reference = regex::Regex::new(&format!("^{}$", native)).unwrap();

        for code_point in (1..=0x10FFFFu32).step_by(61) {
            let Some(c) = char::from_u32(code_point) else {
                continue;
            };
            let text = c.to_string();
            assert_eq!(
                rewritten.is_match(&text),
                reference.is_match(&text),
                "{} disagrees on U+{:04X}",
                payload,
                code_point
            );
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

fn transform_modifiers() -> RewriteOptions {
    RewriteOptions::new().with_modifiers(ModifiersMode::Transform)
}

#[test]
fn test_modifier_groups_become_non_capturing() {
    assert_eq!(rewrite("(?i:a)b", "", transform_modifiers()), "(?:[Aa])b");
    assert_eq!(rewrite("(?s:.)", "", transform_modifiers()), "(?:[\\s\\S])");
    assert_eq!(
        rewrite("(?i:\\u{1F600}k)", "u", transform_modifiers()),
        "(?:(?:\\uD83D\\uDE00)[Kk\\u212A])"
    );
}

#[test]
fn test_disabled_modifiers_lift_flags() {
    let mut new_flags = String::new();
    let rewritten = {
        let mut rewriter = PatternRewriter::new(transform_modifiers())
            .on_new_flags(|flags| new_flags = flags.to_string());
        rewriter.rewrite("a(?-i:b)", "gi").unwrap()
    };
    assert_eq!(rewritten, "[Aa](?:b)");
    assert_eq!(new_flags, "g");

    let re = regex::Regex::new(&format!("^{}$", rewritten)).unwrap();
    assert!(re.is_match("Ab"));
    assert!(!re.is_match("AB"));
}

#[test]
fn test_modifiers_parse_only() {
    let options = RewriteOptions::new().with_modifiers(ModifiersMode::Parse);
    assert_eq!(rewrite("(?i:a)(?-m:^)", "m", options), "(?i:a)(?-m:^)");
    assert!(rewrite_pattern("(?i:a)", "", &RewriteOptions::new()).is_err());
}

#[test]
fn test_modifiers_from_json() {
    let options = RewriteOptions::from_json(r#"{"modifiers": "transform"}"#).unwrap();
    assert_eq!(rewrite("(?m:$)", "", options), "(?:(?:$|(?=[\\n\\r\\u2028\\u2029])))");
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn test_legacy_syntax_passes_through() {
    for pattern in ["\\1(a)", "a{,5}", "\\c1", "[\\d-z]", "\\8", "]"] {
        assert_eq!(rewrite(pattern, "", RewriteOptions::new()), pattern);
    }
}

#[test]
fn test_lookbehind_requires_option() {
    assert!(rewrite_pattern("(?<=a)b", "", &RewriteOptions::new()).is_err());
    assert_eq!(
        rewrite("(?<=a)b(?<!c)", "", RewriteOptions::new().with_lookbehind(true)),
        "(?<=a)b(?<!c)"
    );
}

#[test]
fn test_options_from_json() {
    let options =
        RewriteOptions::from_json(r#"{"namedGroup": true, "dotAllFlag": true}"#).unwrap();
    assert_eq!(rewrite("(?<a>.)", "s", options), "([\\s\\S])");
}

#[test]
fn test_rewriting_twice_is_stable() {
    let options = RewriteOptions::new()
        .with_named_group(true)
        .with_unicode_property_escape(true)
        .with_dot_all_flag(true);
    for (pattern, flags) in [
        ("(?<a>\\u{1F600})\\k<a>", "u"),
        ("[^a\\u{1F600}]+.", "iu"),
        ("\\p{Script=Greek}\\W", "su"),
        ("[\\0]1", "u"),
    ] {
        let mut new_flags = String::new();
        let once = {
            let mut rewriter =
                PatternRewriter::new(options).on_new_flags(|flags| new_flags = flags.to_string());
            rewriter.rewrite(pattern, flags).unwrap()
        };
        let twice = rewrite(&once, &new_flags, options);
        assert_eq!(twice, once, "{:?} with flags {:?}", pattern, flags);
    }
}
