#![allow(dead_code)]

use placeholder_json::{Node, ParseErrorKind, parse, print_compact};

pub fn roundtrip(input: &str) {
    let node = parse(input).unwrap_or_else(|e| panic!("parse failed for {input}: {e}"));
    let output = print_compact(&node).expect("print failed");
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
}

pub fn parse_fails(input: &str) {
    if let Ok(node) = parse(input) {
        panic!("expected parse of {input:?} to fail, got {node:?}");
    }
}

pub fn error_kind(input: &str) -> (ParseErrorKind, usize) {
    let err = parse(input).expect_err("expected parse failure");
    (err.kind, err.offset)
}

/// Helper: print an AST compactly, parse it back, assert structural
/// equality.
pub fn assert_ast_roundtrip(original: &Node) {
    let printed = print_compact(original).expect("print failed");
    let parsed = parse(&printed).unwrap_or_else(|e| {
        panic!(
            "failed to re-parse printed output: {e}\n\
             --- printed ---\n{printed}"
        )
    });
    assert_eq!(
        original, &parsed,
        "tree mismatch\n--- printed ---\n{printed}"
    );
}
