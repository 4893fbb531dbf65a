use super::compiler::expression_source;
use super::*;

fn placeholders(pattern: &str) -> Vec<Placeholder<'_>> {
    scan(pattern)
        .unwrap()
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) => None,
        })
        .collect()
}

fn names(matcher: &Matcher, path: &str) -> Vec<(String, String)> {
    matcher
        .captures(path)
        .unwrap()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn test_scan_typed_placeholder() {
    let segs = scan("/users/[i:id]").unwrap();
    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0], Segment::Literal("/users"));
    match segs[1] {
        Segment::Placeholder(p) => {
            assert_eq!(p.full, "/[i:id]");
            assert_eq!(p.prefix, "/");
            assert_eq!(p.type_tag, "i");
            assert_eq!(p.name, "id");
            assert!(!p.optional);
            assert_eq!(p.offset, 6);
            assert_eq!(p.bracket_offset(), 7);
        }
        Segment::Literal(_) => panic!("expected placeholder"),
    }
}

#[test]
fn test_scan_optional_and_dot_prefix() {
    let ph = placeholders("/report.[:format]?");
    assert_eq!(ph.len(), 1);
    assert_eq!(ph[0].prefix, ".");
    assert_eq!(ph[0].type_tag, "");
    assert_eq!(ph[0].name, "format");
    assert!(ph[0].optional);
    assert_eq!(ph[0].full, ".[:format]?");
}

#[test]
fn test_scan_name_only_uses_default_type() {
    let ph = placeholders("/posts/[slug]");
    assert_eq!(ph[0].type_tag, "");
    assert_eq!(ph[0].name, "slug");
}

#[test]
fn test_scan_anonymous_placeholder() {
    let ph = placeholders("/skip/[i:]");
    assert!(ph[0].is_anonymous());
    assert_eq!(ph[0].type_tag, "i");
}

#[test]
fn test_scan_no_prefix_when_adjacent_to_previous_placeholder() {
    let segs = scan("/[:a][:b]").unwrap();
    assert_eq!(segs.len(), 2);
    let ph = placeholders("/[:a][:b]");
    assert_eq!(ph[0].prefix, "/");
    assert_eq!(ph[1].prefix, "");
}

#[test]
fn test_scan_trailing_literal() {
    let segs = scan("/users/[i:id]/edit").unwrap();
    assert_eq!(segs.last(), Some(&Segment::Literal("/edit")));
}

#[test]
fn test_scan_errors() {
    assert!(matches!(
        scan("/users/[i:id"),
        Err(PatternError::Unclosed { position: 7 })
    ));
    assert!(matches!(
        scan("/a/[]"),
        Err(PatternError::Empty { position: 3 })
    ));
    assert!(matches!(
        scan("/a/[i:[b]"),
        Err(PatternError::Nested { position: 3 })
    ));
}

#[test]
fn test_registry_resolves_builtins_and_inline() {
    let types = TypeRegistry::new();
    assert_eq!(types.len(), BUILT_IN_TYPES.len());
    assert_eq!(types.resolve("i"), Resolved::Registered("[0-9]+"));
    assert_eq!(types.resolve(""), Resolved::Registered("[^/.]+"));
    let inline = types.resolve("en|fr");
    assert!(inline.is_inline());
    assert_eq!(inline.fragment(), "en|fr");
}

#[test]
fn test_registry_caller_overrides_builtin() {
    let mut types = TypeRegistry::new();
    types.extend([("i", "[1-9][0-9]*"), ("slug", "[a-z0-9-]+")]);
    assert_eq!(types.get("i"), Some("[1-9][0-9]*"));
    assert_eq!(types.get("slug"), Some("[a-z0-9-]+"));
}

#[test]
fn test_expression_source_single_trailing_question_mark() {
    let types = TypeRegistry::new();
    let segs = scan("/products/[i:categoryId]?").unwrap();
    assert_eq!(
        expression_source(&segs, &types),
        "^/products(?:/(?P<__bkt0>[0-9]+))?$"
    );
}

#[test]
fn test_expression_source_escapes_literals_and_dot_prefix() {
    let types = TypeRegistry::new();
    let segs = scan("/v1.0/file.[:ext]").unwrap();
    assert_eq!(
        expression_source(&segs, &types),
        r"^/v1\.0/file(?:\.(?P<__bkt0>[^/.]+))$"
    );
}

#[test]
fn test_compile_shapes() {
    let types = TypeRegistry::new();
    assert!(matches!(compile("*", &types).unwrap(), Matcher::CatchAll));
    assert!(matches!(compile("/about", &types).unwrap(), Matcher::Exact(_)));
    assert!(matches!(compile("@^/x$", &types).unwrap(), Matcher::Raw(_)));
    assert!(matches!(
        compile("/u/[i:id]", &types).unwrap(),
        Matcher::Placeholders(_)
    ));
}

#[test]
fn test_integer_placeholder() {
    let m = compile("/users/[i:id]", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/users/123"), vec![("id".into(), "123".into())]);
    assert!(m.captures("/users/abc").is_none());
    assert!(m.captures("/users/").is_none());
    assert!(m.captures("/users/123/extra").is_none());
}

#[test]
fn test_optional_present_and_absent() {
    let m = compile("/products/[i:categoryId]?", &TypeRegistry::new()).unwrap();
    assert_eq!(
        names(&m, "/products/5"),
        vec![("categoryId".into(), "5".into())]
    );
    assert!(m.captures("/products").unwrap().is_empty());
    assert!(m.captures("/products/").is_none());
}

#[test]
fn test_dot_prefixed_optional() {
    let m = compile("/report.[:format]?", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/report.pdf"), vec![("format".into(), "pdf".into())]);
    assert!(m.captures("/report").unwrap().is_empty());
    assert!(m.captures("/report.").is_none());
}

#[test]
fn test_default_type_stops_at_dot_and_slash() {
    let m = compile("/[:name]", &TypeRegistry::new()).unwrap();
    assert!(m.captures("/abc").is_some());
    assert!(m.captures("/a.b").is_none());
    assert!(m.captures("/a/b").is_none());
}

#[test]
fn test_single_and_multi_segment_wildcards() {
    let types = TypeRegistry::new();
    let one = compile("/files/[*:name]", &types).unwrap();
    assert!(one.captures("/files/a.txt").is_some());
    assert!(one.captures("/files/a/b.txt").is_none());

    let many = compile("/files/[**:path]", &types).unwrap();
    assert_eq!(
        names(&many, "/files/a/b.txt"),
        vec![("path".into(), "a/b.txt".into())]
    );
}

#[test]
fn test_hex_and_alnum() {
    let types = TypeRegistry::new();
    let hex = compile("/c/[h:color]", &types).unwrap();
    assert!(hex.captures("/c/ff00AA").is_some());
    assert!(hex.captures("/c/fg").is_none());

    let alnum = compile("/t/[a:token]", &types).unwrap();
    assert!(alnum.captures("/t/abc123").is_some());
    assert!(alnum.captures("/t/abc-123").is_none());
}

#[test]
fn test_inline_type_tag() {
    let m = compile("/[en|fr:lang]/home", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/fr/home"), vec![("lang".into(), "fr".into())]);
    assert!(m.captures("/de/home").is_none());
}

#[test]
fn test_inline_capturing_group_is_not_reported() {
    let m = compile("/[(a|b)c:x]", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/bc"), vec![("x".into(), "bc".into())]);
}

#[test]
fn test_names_outside_regex_group_syntax() {
    let m = compile("/u/[i:user-id]/[:1st]", &TypeRegistry::new()).unwrap();
    assert_eq!(
        names(&m, "/u/7/x"),
        vec![("user-id".into(), "7".into()), ("1st".into(), "x".into())]
    );
}

#[test]
fn test_anonymous_placeholder_not_captured() {
    let m = compile("/skip/[i:]/[:name]", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/skip/9/bob"), vec![("name".into(), "bob".into())]);
}

#[test]
fn test_literal_text_is_escaped() {
    let m = compile("/a+b/[i:id]", &TypeRegistry::new()).unwrap();
    assert!(m.captures("/a+b/1").is_some());
    assert!(m.captures("/aab/1").is_none());
}

#[test]
fn test_case_sensitive() {
    let m = compile("/Users/[i:id]", &TypeRegistry::new()).unwrap();
    assert!(m.captures("/users/1").is_none());
}

#[test]
fn test_unicode_segment() {
    let m = compile("/tags/[:tag]", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/tags/café"), vec![("tag".into(), "café".into())]);
}

#[test]
fn test_raw_pattern_is_anchored_and_uses_named_groups() {
    let m = compile(r"@/legacy/(?P<slug>[a-z]+)\.php", &TypeRegistry::new()).unwrap();
    assert_eq!(
        names(&m, "/legacy/about.php"),
        vec![("slug".into(), "about".into())]
    );
    assert!(m.captures("/x/legacy/about.php").is_none());
    assert!(m.captures("/legacy/about.php5").is_none());
}

#[test]
fn test_raw_pattern_unnamed_groups_skipped() {
    let m = compile("@/(a|b)/(?P<n>[0-9]+)", &TypeRegistry::new()).unwrap();
    assert_eq!(names(&m, "/a/4"), vec![("n".into(), "4".into())]);
}

#[test]
fn test_exact_and_catch_all() {
    let types = TypeRegistry::new();
    let exact = compile("/about", &types).unwrap();
    assert!(exact.captures("/about").unwrap().is_empty());
    assert!(exact.captures("/about/").is_none());

    let any = compile("*", &types).unwrap();
    assert!(any.captures("/whatever/here").unwrap().is_empty());
}

#[test]
fn test_root_matches_all_optional_pattern() {
    let m = compile("/[:lang]?", &TypeRegistry::new()).unwrap();
    assert!(m.captures("/").unwrap().is_empty());
    assert_eq!(names(&m, "/en"), vec![("lang".into(), "en".into())]);
}

#[test]
fn test_prefilter_head() {
    let m = compile("/users/[i:id]", &TypeRegistry::new()).unwrap();
    assert_eq!(m.expression().unwrap().head(), "/users");
    assert!(m.captures("/posts/1").is_none());
}

#[test]
fn test_invalid_inline_type_is_error() {
    let err = compile("/x/[(unclosed:name]", &TypeRegistry::new()).unwrap_err();
    assert!(matches!(err, PatternError::Regex(_)));
    let err = compile("@(", &TypeRegistry::new()).unwrap_err();
    assert!(matches!(err, PatternError::Regex(_)));
}

#[test]
fn test_param_names_in_declaration_order() {
    let m = compile("/[:a]/[i:b]/[h:c]?", &TypeRegistry::new()).unwrap();
    let names: Vec<&str> = m.expression().unwrap().param_names().collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}
