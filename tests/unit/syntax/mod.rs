use super::*;
use crate::theme::{Color, Style};

const SCENARIO: &str = "\npackage foo\n\nfunc µ() string {\n\tvar þ = \"Ωð\"\n\treturn þ\n}\n";

fn spans(layer: &Layer) -> Vec<(usize, usize)> {
    layer.spans().iter().map(Span::range).collect()
}

#[test]
fn keyword_and_string_spans_are_rune_offsets() {
    let mut syntax = Syntax::new(Theme::default());
    assert!(syntax.parse(SCENARIO).is_ok());

    let keywords = syntax.layer(Category::Keyword).expect("keyword layer");
    assert_eq!(spans(keywords), vec![(1, 8), (14, 18), (33, 36), (47, 53)]);

    let strings = syntax.layer(Category::String).expect("string layer");
    assert_eq!(spans(strings), vec![(41, 45)]);

    let declarations = syntax.layer(Category::Declaration).expect("declaration layer");
    assert_eq!(spans(declarations), vec![(19, 20)]);

    let builtins = syntax.layer(Category::Builtin).expect("builtin layer");
    assert_eq!(spans(builtins), vec![(23, 29)]);

    assert!(syntax.layer(Category::Unresolved).is_none());
    assert!(syntax.layer(Category::Operator).is_none());
}

#[test]
fn reparsing_the_same_text_is_idempotent() {
    let mut syntax = Syntax::new(Theme::default());
    let _ = syntax.parse(SCENARIO);
    let first = syntax.layers().clone();
    let _ = syntax.parse(SCENARIO);

    assert_eq!(syntax.layers(), &first);
}

#[test]
fn parse_replaces_previous_layers() {
    let mut syntax = Syntax::new(Theme::default());
    let _ = syntax.parse("package p\n\n// one\n");
    assert!(syntax.layer(Category::Comment).is_some());

    let _ = syntax.parse("package p\n");
    assert!(syntax.layer(Category::Comment).is_none());
    assert_eq!(syntax.offsets().byte_len(), "package p\n".len());
}

#[test]
fn syntax_errors_are_returned_with_layers_still_built() {
    let mut syntax = Syntax::new(Theme::default());
    let src = "package p\n\n// note\nfunc f( {\n";
    let errors = syntax.parse(src).expect_err("broken source");

    assert!(!errors.is_empty());
    assert_eq!(&errors, syntax.errors());
    assert!(syntax.layer(Category::Comment).is_some());
    assert!(syntax.layer(Category::Keyword).is_some());

    assert!(syntax.parse("package p\n").is_ok());
    assert!(syntax.errors().is_empty());
}

#[test]
fn sessions_share_a_theme_without_coupling() {
    let theme = Arc::new(Theme::default());
    let mut a = Syntax::new(Arc::clone(&theme));
    let mut b = Syntax::new(theme);
    let _ = a.parse("package a\n");
    let _ = b.parse("package b\n\nvar x = 1\n");

    assert_eq!(a.layers().span_count(), 1);
    assert!(b.layers().span_count() > a.layers().span_count());
}

#[test]
fn theme_decides_layer_membership() {
    let keyword = Style::fg(Color::Indexed(4));
    let theme = Theme::empty()
        .with_style(Category::Keyword, keyword)
        .with_style(Category::Declaration, keyword);
    let mut syntax = Syntax::new(theme);
    let _ = syntax.parse("package p\n\nfunc f() {}\n");

    assert_eq!(syntax.layers().len(), 1);
    let layer = syntax.layers().get(&keyword).expect("shared layer");
    assert_eq!(spans(layer), vec![(0, 7), (11, 15), (16, 17)]);
}

#[test]
fn emissions_expose_byte_ranges() {
    let (emissions, errors) = emissions("package p\n");
    assert!(errors.is_empty());
    assert_eq!(
        emissions,
        vec![Emission {
            category: Category::Keyword,
            start: 0,
            len: 7
        }]
    );
}

#[test]
fn category_names_are_unique_and_ordered() {
    for (i, category) in Category::ALL.iter().enumerate() {
        assert_eq!(*category as usize, i);
    }
    let mut names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Category::COUNT);
    assert_eq!(
        serde_json::to_value(Category::ImportPath).expect("json"),
        serde_json::json!("import_path")
    );
}
