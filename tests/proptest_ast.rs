//! Property-based tests with proptest.
//!
//! Generate random trees through the builder API, print them, parse
//! them back, and verify the trees match and printing is stable.

use placeholder_json::{
    Identifier, JsonArray, JsonObject, Node, NumberLiteral, TokenKind, parse, print_compact,
    print_pretty, tokenize,
};
use proptest::prelude::*;

// -- Leaf strategies --

/// Plain text for keys and strings. `$` is left out since a bare `$`
/// is not a well-formed placeholder.
fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.,:{}\\[\\]\"\\\\/\n\t-]{0,16}".prop_map(|s| s)
}

/// Placeholder name.
fn identifier() -> impl Strategy<Value = Identifier> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}".prop_map(|s| Identifier::new(s).unwrap())
}

/// Integer or fraction.
fn number() -> impl Strategy<Value = NumberLiteral> {
    prop_oneof![
        any::<i64>().prop_map(NumberLiteral::from),
        (any::<i32>(), 0_u32..100_000).prop_map(|(int, frac)| {
            NumberLiteral::from_text(std::format!("{int}.{frac}")).unwrap()
        }),
    ]
}

/// Leaf value.
fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        text().prop_map(|s| Node::from(s.as_str())),
        number().prop_map(Node::from),
        any::<bool>().prop_map(Node::from),
        Just(Node::Null),
        identifier().prop_map(Node::from),
        (text(), identifier()).prop_map(|(prefix, name)| {
            Node::from(std::format!("{prefix}${{{name}}}").as_str())
        }),
    ]
}

/// Value at a given depth (limits recursion)
fn value(depth: u32) -> BoxedStrategy<Node> {
    if depth == 0 {
        leaf().boxed()
    } else {
        prop_oneof![
            3 => leaf(),
            1 => prop::collection::vec(value(depth - 1), 0..=4).prop_map(|elements| {
                Node::Array(JsonArray { elements })
            }),
            1 => object(depth - 1).prop_map(Node::Object),
        ]
        .boxed()
    }
}

/// Object with 0-5 members.
fn object(depth: u32) -> impl Strategy<Value = JsonObject> {
    prop::collection::vec((text(), value(depth)), 0..=5).prop_map(|members| {
        members
            .into_iter()
            .fold(JsonObject::new(), |object, (key, value)| object.member(&key, value))
    })
}

/// Full document.
fn document() -> impl Strategy<Value = Node> {
    object(3).prop_map(Node::Object)
}

// -- Property tests --

proptest! {
    /// Compact output parses back into the same tree.
    #[test]
    fn compact_roundtrip(doc in document()) {
        let printed = print_compact(&doc).unwrap();
        let parsed = parse(&printed)
            .map_err(|e| {
                TestCaseError::fail(
                    std::format!("parse error: {e}\n--- output ---\n{printed}"))
            })?;
        prop_assert_eq!(&doc, &parsed);
    }

    /// Pretty output parses back into the same tree.
    #[test]
    fn pretty_roundtrip(doc in document()) {
        let printed = print_pretty(&doc).unwrap();
        let parsed = parse(&printed)
            .map_err(|e| {
                TestCaseError::fail(
                    std::format!("parse error: {e}\n--- output ---\n{printed}"))
            })?;
        prop_assert_eq!(&doc, &parsed);
    }

    /// Printing is idempotent: print(parse(print(x))) == print(x).
    #[test]
    fn print_idempotent(doc in document()) {
        let r1 = print_compact(&doc).unwrap();
        let r2 = print_compact(&parse(&r1).unwrap()).unwrap();
        prop_assert_eq!(r1, r2);
    }

    /// Placeholder names survive the round-trip.
    #[test]
    fn placeholder_names_preserved(doc in document()) {
        let printed = print_compact(&doc).unwrap();
        let parsed = parse(&printed).unwrap();
        prop_assert_eq!(
            doc.placeholder_names().unwrap(),
            parsed.placeholder_names().unwrap()
        );
    }

    /// The lexer always terminates with exactly one trailing `Eof`.
    #[test]
    fn tokenize_ends_with_eof(input in "\\PC{0,64}") {
        let tokens = tokenize(&input);
        prop_assert!(tokens.last().is_some_and(|t| t.is(TokenKind::Eof)));
        prop_assert_eq!(tokens.iter().filter(|t| t.is(TokenKind::Eof)).count(), 1);
    }

    /// Arbitrary input never panics the parser.
    #[test]
    fn parse_never_panics(input in "[{}\\[\\]\":,$\\\\a-z0-9 .-]{0,48}") {
        let _ = parse(&input);
    }
}
