use super::*;

fn kinds(source: &str) -> Vec<SourceType> {
    tokenize(source)
        .expect("tokenize")
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_scan_membership() {
    assert_eq!(
        kinds("x in y"),
        vec![
            SourceType::Identifier,
            SourceType::Relation,
            SourceType::Identifier
        ]
    );
}

#[test]
fn test_scan_not_in_is_one_relation_token() {
    let source = "x not  in y";
    let tokens = tokenize(source).expect("tokenize");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].kind, SourceType::Relation);
    assert_eq!(tokens[1].text(source), "not  in");
}

#[test]
fn test_scan_not_without_in() {
    assert_eq!(
        kinds("not inside"),
        vec![SourceType::Not, SourceType::Identifier]
    );
    assert_eq!(kinds("!x"), vec![SourceType::Not, SourceType::Identifier]);
}

#[test]
fn test_scan_operators() {
    assert_eq!(
        kinds("a or b && c != d == e"),
        vec![
            SourceType::Identifier,
            SourceType::Operator,
            SourceType::Identifier,
            SourceType::Operator,
            SourceType::Identifier,
            SourceType::Operator,
            SourceType::Identifier,
            SourceType::Operator,
            SourceType::Identifier,
        ]
    );
}

#[test]
fn test_scan_literals_and_punctuation() {
    assert_eq!(
        kinds("foo.bar[0](1.5, 'a', \"b\", true, null, @x)"),
        vec![
            SourceType::Identifier,
            SourceType::Dot,
            SourceType::Identifier,
            SourceType::LBracket,
            SourceType::Number,
            SourceType::RBracket,
            SourceType::LParen,
            SourceType::Number,
            SourceType::Comma,
            SourceType::String,
            SourceType::Comma,
            SourceType::String,
            SourceType::Comma,
            SourceType::Bool,
            SourceType::Comma,
            SourceType::Null,
            SourceType::Comma,
            SourceType::This,
            SourceType::Identifier,
            SourceType::RParen,
        ]
    );
}

#[test]
fn test_scan_skips_comments_keeps_newlines() {
    assert_eq!(
        kinds("a # trailing comment\nb; c"),
        vec![
            SourceType::Identifier,
            SourceType::Newline,
            SourceType::Identifier,
            SourceType::Semicolon,
            SourceType::Identifier,
        ]
    );
}

#[test]
fn test_scan_string_with_escaped_quote() {
    let source = r#"'it\'s' in names"#;
    let tokens = tokenize(source).expect("tokenize");
    assert_eq!(tokens[0].kind, SourceType::String);
    assert_eq!(tokens[0].text(source), r#"'it\'s'"#);
}

#[test]
fn test_scan_unterminated_string() {
    let err = tokenize("x in 'abc").expect_err("unterminated");
    assert_eq!(err.pos, 5);
    assert!(err.to_string().contains("unterminated string literal"));
}

#[test]
fn test_scan_unexpected_character() {
    let err = tokenize("x ~ y").expect_err("unexpected");
    assert_eq!(err.pos, 2);
}
