use super::*;

#[test]
fn clean_source_parses_without_errors() {
    let mut parser = GoParser::new();
    let outcome = parser.parse("package main\n\nfunc main() {}\n");

    let tree = outcome.tree.expect("tree");
    assert_eq!(tree.root_node().kind(), "source_file");
    assert!(outcome.errors.is_empty());
}

#[test]
fn broken_source_keeps_the_recovered_tree() {
    let mut parser = GoParser::new();
    let src = "package main\n\nfunc main() {\n\tx := \n}\n\n// tail\n";
    let outcome = parser.parse(src);

    let tree = outcome.tree.expect("recovered tree");
    assert!(tree.root_node().has_error());
    assert!(!outcome.errors.is_empty());
    for err in &outcome.errors {
        let pos = err.pos().expect("located error");
        assert!(pos.line >= 1 && pos.column >= 1);
        assert!(pos.byte <= src.len());
        assert!(err.to_string().contains("syntax error"));
    }
}

#[test]
fn errors_are_reported_in_source_order() {
    let mut parser = GoParser::new();
    let src = "package main\nfunc a() { ) }\nfunc b() { ) }\n";
    let outcome = parser.parse(src);

    let bytes: Vec<usize> = outcome
        .errors
        .iter()
        .filter_map(|err| err.pos())
        .map(|pos| pos.byte)
        .collect();
    assert!(bytes.len() >= 2);
    assert!(bytes.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn parser_is_reusable_across_texts() {
    let mut parser = GoParser::default();
    assert!(!parser.parse("package a\nfunc (\n").errors.is_empty());
    assert!(parser.parse("package b\n").errors.is_empty());
}

#[test]
fn error_display_includes_position_and_detail() {
    let pos = ErrorPos {
        line: 3,
        column: 7,
        byte: 40,
    };
    let unexpected = SyntaxError::Unexpected {
        pos,
        text: "\")\"".to_string(),
    };
    let bare = SyntaxError::Unexpected {
        pos,
        text: String::new(),
    };
    let missing = SyntaxError::Missing {
        pos,
        expected: "\"}\"".to_string(),
    };

    assert_eq!(unexpected.to_string(), "3:7: syntax error: unexpected \")\"");
    assert_eq!(bare.to_string(), "3:7: syntax error");
    assert_eq!(missing.to_string(), "3:7: syntax error: missing \"}\"");
    assert_eq!(SyntaxError::NoTree.to_string(), "source could not be parsed");
    assert_eq!(SyntaxError::NoTree.pos(), None);
}

#[test]
fn error_list_displays_one_error_per_line() {
    let pos = |line| ErrorPos {
        line,
        column: 1,
        byte: 0,
    };
    let errors = SyntaxErrors::new(vec![
        SyntaxError::Unexpected {
            pos: pos(1),
            text: String::new(),
        },
        SyntaxError::Missing {
            pos: pos(2),
            expected: "identifier".to_string(),
        },
    ]);

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        "1:1: syntax error\n2:1: syntax error: missing identifier"
    );
    assert_eq!(errors.iter().count(), errors.as_slice().len());
}
