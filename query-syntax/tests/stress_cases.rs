mod common;
use common::*;
use query_syntax::*;

#[test]
fn deep_nesting_builds_and_drops_without_recursion() {
    let n = 200_000;
    let input = format!("{}x{}", "{".repeat(n), "}".repeat(n));
    let mut stream = parse_terms(&input);
    let term = stream.next().expect("one group");
    assert!(stream.next().is_none());
    assert_eq!(depth(&term), n);
    drop(term);
}

#[test]
fn deep_nesting_missing_one_close_is_flushed() {
    let n = 200_000;
    let input = format!("{}x{}", "{".repeat(n), "}".repeat(n - 1));
    let parsed = terms(&input);
    assert_eq!(parsed.len(), 1);
    assert_eq!(depth(&parsed[0]), n);
}

#[test]
fn deep_unclosed_nesting_flushes_every_level() {
    let n = 500;
    let input = "{a ".repeat(n);
    let parsed = terms(&input);
    assert_eq!(parsed.len(), n);
    for term in &parsed {
        let members = as_group(term);
        assert_eq!(members.len(), 1);
        literal_is(&members[0], "a", false);
    }
}

#[test]
fn negation_chains_of_various_lengths() {
    for n in 0..8 {
        let input = format!("{}x", "-".repeat(n));
        let parsed = terms(&input);
        assert_eq!(parsed.len(), 1);
        literal_is(&parsed[0], "x", n % 2 == 1);
    }
}

#[test]
fn spaced_negation_markers_still_toggle() {
    literal_is(&terms("- - x")[0], "x", false);
    literal_is(&terms("- - - x")[0], "x", true);
}

#[test]
fn negation_inside_group_is_ignored_at_any_depth() {
    let parsed = terms("{-a {-b --c}}");
    let outer = as_group(&parsed[0]);
    literal_is(&outer[0], "a", false);
    let inner = as_group(&outer[1]);
    literal_is(&inner[0], "b", false);
    literal_is(&inner[1], "c", false);
}

#[test]
fn stray_close_still_clears_pending_negation() {
    let parsed = terms("-} x");
    literal_is(&parsed[0], "x", false);
}

#[test]
fn whitespace_variants_are_separators() {
    let parsed = terms("a\t\tb   c\nd\r\ne");
    let texts: Vec<_> = parsed
        .iter()
        .map(|term| match term {
            Term::Literal { text, .. } => text.as_str(),
            Term::Group(_) => panic!("unexpected group"),
        })
        .collect();
    assert_eq!(texts, ["a", "b", "c", "d", "e"]);
}

#[test]
fn unicode_words_and_quotes() {
    assert_eq!(
        lex("日本 \"ça va\" -ünïcode"),
        [
            Token::Word("日本".into()),
            Token::Phrase("ça va".into()),
            Token::Negate,
            Token::Word("ünïcode".into()),
        ]
    );
}

#[test]
fn tokens_serialize_with_kind_tags() {
    let json = serde_json::to_value(lex("-{a}")).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"kind": "negate"},
            {"kind": "open_group"},
            {"kind": "word", "text": "a"},
            {"kind": "close_group"},
        ])
    );
}

#[test]
fn terms_serialize_as_tagged_objects() {
    let json = serde_json::to_value(terms("-a {b}")).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"literal": {"text": "a", "negated": true}},
            {"group": [{"literal": {"text": "b", "negated": false}}]},
        ])
    );
}
