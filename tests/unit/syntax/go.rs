use super::*;
use crate::syntax::GoParser;

fn build_source(src: &str) -> Vec<Emission> {
    let outcome = GoParser::new().parse(src);
    let tree = outcome.tree.expect("tree");
    build(tree.root_node(), src)
}

fn texts<'s>(src: &'s str, emissions: &[Emission], category: Category) -> Vec<&'s str> {
    emissions
        .iter()
        .filter(|e| e.category == category)
        .map(|e| &src[e.start..e.start + e.len])
        .collect()
}

#[test]
fn package_keyword_then_imports_then_comments_lead_the_output() {
    let src = "package main\n\nimport \"fmt\"\n\n// greet\nfunc main() { fmt.Println(1) }\n";
    let emissions = build_source(src);

    assert_eq!(
        emissions[0],
        Emission {
            category: Category::Keyword,
            start: 0,
            len: 7
        }
    );
    assert_eq!(
        emissions[1],
        Emission {
            category: Category::ImportPath,
            start: src.find("\"fmt\"").unwrap(),
            len: 5
        }
    );
    assert_eq!(
        emissions[2],
        Emission {
            category: Category::Comment,
            start: src.find("// greet").unwrap(),
            len: 8
        }
    );
    assert_eq!(
        texts(src, &emissions, Category::Keyword),
        vec!["package", "import", "func"]
    );
    assert_eq!(texts(src, &emissions, Category::Number), vec!["1"]);
    assert!(texts(src, &emissions, Category::Unresolved).is_empty());
}

#[test]
fn grouped_imports_emit_every_spec() {
    let src = "package p\n\nimport (\n\t\"os\"\n\tstr \"strings\"\n)\n";
    let emissions = build_source(src);

    assert_eq!(
        texts(src, &emissions, Category::ImportPath),
        vec!["\"os\"", "str \"strings\""]
    );
}

#[test]
fn package_level_names_are_declarations() {
    let src = "package p\n\ntype T struct{ X int }\n\nvar V, W = 1, 2\n\nconst C = iota\n\nfunc F() {}\n\nfunc (t T) M() {}\n";
    let emissions = build_source(src);

    assert_eq!(
        texts(src, &emissions, Category::Declaration),
        vec!["T", "V", "W", "C", "F", "M"]
    );
    assert_eq!(texts(src, &emissions, Category::Constant), vec!["iota"]);
    assert_eq!(texts(src, &emissions, Category::Builtin), vec!["int"]);
}

#[test]
fn local_names_are_not_declarations() {
    let src = "package p\n\nfunc f() {\n\tx := 1\n\tvar y = x\n\t_ = y\n}\n";
    let emissions = build_source(src);

    assert_eq!(texts(src, &emissions, Category::Declaration), vec!["f"]);
    assert!(texts(src, &emissions, Category::Unresolved).is_empty());
}

#[test]
fn literals_labels_and_operators() {
    let src = "package p\n\nfunc f() {\nL:\n\tfor {\n\t\tbreak L\n\t}\n\t_ = 'a'\n\t_ = 1.5 + 2i\n\t_ = `raw` + \"a\\n\"\n\t_ = nil\n}\n";
    let emissions = build_source(src);

    assert_eq!(texts(src, &emissions, Category::Label), vec!["L", "L"]);
    assert_eq!(texts(src, &emissions, Category::Rune), vec!["'a'"]);
    assert_eq!(texts(src, &emissions, Category::Number), vec!["1.5", "2i"]);
    assert_eq!(
        texts(src, &emissions, Category::String),
        vec!["`raw`", "\"a\\n\""]
    );
    assert_eq!(texts(src, &emissions, Category::Constant), vec!["nil"]);
    assert!(texts(src, &emissions, Category::Operator).contains(&"+"));
}

#[test]
fn comments_inside_bodies_are_emitted_once() {
    let src = "package p\n\nfunc f() {\n\t// inner\n\t_ = 1 /* tail */\n}\n";
    let emissions = build_source(src);

    assert_eq!(
        texts(src, &emissions, Category::Comment),
        vec!["// inner", "/* tail */"]
    );
}

#[test]
fn unresolved_references_are_reported_per_occurrence() {
    let src = "package p\n\nfunc f() int {\n\tmissing()\n\treturn missing() + len(\"x\")\n}\n";
    let emissions = build_source(src);

    let unresolved: Vec<usize> = emissions
        .iter()
        .filter(|e| e.category == Category::Unresolved)
        .map(|e| e.start)
        .collect();
    let expected: Vec<usize> = src.match_indices("missing").map(|(i, _)| i).collect();
    assert_eq!(unresolved, expected);
    assert_eq!(texts(src, &emissions, Category::Builtin), vec!["int", "len"]);
}

#[test]
fn broken_source_still_emits_keywords_and_comments() {
    let src = "package p\n\n// about f\nfunc f() {\n\tif x {\n}\n";
    let emissions = build_source(src);

    assert!(texts(src, &emissions, Category::Keyword).contains(&"package"));
    assert!(texts(src, &emissions, Category::Keyword).contains(&"func"));
    assert_eq!(texts(src, &emissions, Category::Comment), vec!["// about f"]);
    assert!(emissions.iter().all(|e| e.len > 0));
}

#[test]
fn missing_package_name_does_not_emit_empty_ranges() {
    let src = "package\n\nfunc f() {}\n";
    let emissions = build_source(src);

    assert!(emissions.iter().all(|e| e.len > 0));
    assert_eq!(texts(src, &emissions, Category::Keyword)[0], "package");
}

#[test]
fn deep_nesting_is_walked_without_recursion() {
    let depth = 10_000;
    let src = format!(
        "package p\n\nfunc f() {{\n{}_ = ({}missing{})\n{}}}\n",
        "{".repeat(depth),
        "(".repeat(depth),
        ")".repeat(depth),
        "}".repeat(depth)
    );
    let emissions = build_source(&src);

    assert_eq!(texts(&src, &emissions, Category::Unresolved), vec!["missing"]);
    assert_eq!(texts(&src, &emissions, Category::Declaration), vec!["f"]);
}
