use super::*;
use dcf_parser::parse_program;

fn patch_with(source: &str, options: &PatchOptions) -> PatchOutput {
    let parsed = parse_program(source).expect("parse");
    MainStage::new(&parsed, options)
        .run()
        .expect("patch succeeds")
}

fn patch(source: &str) -> String {
    patch_with(source, &PatchOptions::default()).code
}

fn patch_loose(source: &str) -> String {
    patch_with(source, &PatchOptions::default().with_loose_includes(true)).code
}

#[test]
fn test_array_literal_right_operand() {
    assert_eq!(patch("x in [1, 2, 3]"), "[1, 2, 3].includes(x);");
    assert_eq!(patch("x not in [1, 2, 3]"), "![1, 2, 3].includes(x);");
    assert_eq!(patch("x in []"), "[].includes(x);");
}

#[test]
fn test_impure_operands_are_extracted() {
    let output = patch_with("foo() in bar()", &PatchOptions::default());
    assert_eq!(
        output.code,
        "(needle = foo(), Array.from(bar()).includes(needle));"
    );
    assert_eq!(output.bindings, ["needle"]);
    assert_eq!(
        patch("foo() not in bar()"),
        "(needle = foo(), !Array.from(bar()).includes(needle));"
    );
}

#[test]
fn test_impure_right_operand_alone_is_extracted() {
    assert_eq!(
        patch("x in items()"),
        "(needle = x, Array.from(items()).includes(needle));"
    );
}

#[test]
fn test_loose_includes_skips_array_from() {
    assert_eq!(patch_loose("x in y"), "y.includes(x);");
    assert_eq!(patch_loose("x in a.b"), "a.b.includes(x);");
    assert_eq!(patch_loose("x in a[0]"), "a[0].includes(x);");
    assert_eq!(patch_loose("'a' in 'abc'"), "'abc'.includes('a');");
}

#[test]
fn test_loose_includes_still_parenthesizes_other_shapes() {
    assert_eq!(patch_loose("x in a + b"), "(a + b).includes(x);");
    assert_eq!(patch_loose("x in (a or b)"), "((a || b)).includes(x);");
    assert_eq!(patch_loose("x in 5"), "(5).includes(x);");
}

#[test]
fn test_other_shapes_are_adapted() {
    assert_eq!(patch("x in (a or b)"), "Array.from((a || b)).includes(x);");
    assert_eq!(patch("x in y"), "Array.from(y).includes(x);");
    assert_eq!(patch("1 in 'abc'"), "Array.from('abc').includes(1);");
}

#[test]
fn test_shorthand_this_right_operand() {
    assert_eq!(patch("x in @items"), "Array.from(this.items).includes(x);");
    assert_eq!(patch_loose("x in @items"), "this.items.includes(x);");
    assert_eq!(patch_loose("@x in list"), "list.includes(this.x);");
}

#[test]
fn test_not_folds_into_membership_test() {
    assert_eq!(patch("not (x in y)"), "(!Array.from(y).includes(x));");
    assert_eq!(patch("!(x in y)"), "(!Array.from(y).includes(x));");
    assert_eq!(patch("not (x not in y)"), "(Array.from(y).includes(x));");
    assert_eq!(patch("not not (x in y)"), "!(!Array.from(y).includes(x));");
}

#[test]
fn test_folded_not_with_extraction() {
    assert_eq!(
        patch("not (f() in g())"),
        "((needle = f(), !Array.from(g()).includes(needle)));"
    );
}

#[test]
fn test_not_on_left_operand_is_not_folded() {
    assert_eq!(patch("not a in b"), "Array.from(b).includes(!a);");
    assert_eq!(patch("not a"), "!a;");
}

#[test]
fn test_build_phase_records_negation() {
    let parsed = parse_program("not (x in y)\nx not in y").expect("parse");
    let options = PatchOptions::default();
    let stage = MainStage::new(&parsed, &options);
    let negations: Vec<Option<bool>> = parsed
        .statements()
        .iter()
        .map(|&statement| match parsed.arena[statement].kind {
            NodeKind::LogicalNot { operand, .. } => stage.is_negated(operand),
            _ => stage.is_negated(statement),
        })
        .collect();
    assert_eq!(negations, [Some(true), Some(true)]);
}

#[test]
fn test_nested_membership_tests() {
    assert_eq!(
        patch("a in b in c"),
        "Array.from(c).includes(Array.from(b).includes(a));"
    );
}

#[test]
fn test_binding_names_avoid_source_identifiers() {
    let output = patch_with("needle in list()", &PatchOptions::default());
    assert_eq!(
        output.code,
        "(needle1 = needle, Array.from(list()).includes(needle1));"
    );
    assert_eq!(output.bindings, ["needle1"]);
}

#[test]
fn test_each_extraction_claims_a_fresh_binding() {
    let output = patch_with("a() in b()\nc() in d()", &PatchOptions::default());
    assert_eq!(
        output.code,
        "(needle = a(), Array.from(b()).includes(needle));\n\
         (needle1 = c(), Array.from(d()).includes(needle1));"
    );
    assert_eq!(output.bindings, ["needle", "needle1"]);
    assert!(
        output
            .with_declarations()
            .starts_with("var needle, needle1;\n(needle = a()")
    );
}

#[test]
fn test_with_declarations_without_bindings() {
    let output = patch_with("x in [1]", &PatchOptions::default());
    assert!(output.bindings.is_empty());
    assert_eq!(output.with_declarations(), "[1].includes(x);");
}

#[test]
fn test_membership_inside_other_operators() {
    assert_eq!(
        patch("x in list and y isnt z"),
        "Array.from(list).includes(x) && y !== z;"
    );
    assert_eq!(
        patch("found = x in list"),
        "found = Array.from(list).includes(x);"
    );
    assert_eq!(patch("a is b or c == d"), "a === b || c === d;");
}

#[test]
fn test_parenthesized_impure_left_operand() {
    assert_eq!(
        patch_loose("(f()) in [1]"),
        "((needle = f()), [1].includes(needle));"
    );
}

#[test]
fn test_statement_needs_parens_is_false_for_membership() {
    let parsed = parse_program("f() in g()").expect("parse");
    let options = PatchOptions::default();
    let stage = MainStage::new(&parsed, &options);
    let statement = parsed.statements()[0];
    assert!(!stage.statement_needs_parens(statement));
}

#[test]
fn test_is_pure_classification() {
    let parsed =
        parse_program("a\n@b\n[1, c.d]\nf()\nx = 1\nnot a\na or f()\ny in [1]").expect("parse");
    let options = PatchOptions::default();
    let stage = MainStage::new(&parsed, &options);
    let purity: Vec<bool> = parsed
        .statements()
        .iter()
        .map(|&statement| stage.is_pure(statement))
        .collect();
    assert_eq!(
        purity,
        [true, true, true, false, false, true, false, true]
    );
}

#[test]
fn test_operator_token_lookup_skips_children() {
    let parsed = parse_program("(a in b) not in c").expect("parse");
    let options = PatchOptions::default();
    let stage = MainStage::new(&parsed, &options);
    let statement = parsed.statements()[0];
    let token = stage
        .operator_token(statement, InOpPatcher::operator_token_predicate())
        .expect("relation token");
    assert_eq!(token.text(&parsed.source), "not in");
}

#[test]
fn test_membership_patcher_is_consumed_once() {
    let parsed = parse_program("x in y").expect("parse");
    let options = PatchOptions::default();
    let mut stage = MainStage::new(&parsed, &options);
    let statement = parsed.statements()[0];
    stage.patch(statement).expect("first patch");
    assert_eq!(
        stage.patch(statement),
        Err(PatchError::AlreadyPatched(statement))
    );
}

#[test]
fn test_untouched_text_is_preserved() {
    assert_eq!(
        patch("a  +  b # comment\nx in [1,2]"),
        "a  +  b; # comment\n[1,2].includes(x);"
    );
}

#[test]
fn test_statements_after_another_statement_stay_separate() {
    assert_eq!(
        patch("a = 1\nf() in g()"),
        "a = 1;\n(needle = f(), Array.from(g()).includes(needle));"
    );
    assert_eq!(
        patch("a = b\nnot (x in y)"),
        "a = b;\n(!Array.from(y).includes(x));"
    );
    assert_eq!(patch("a = b\nx in [1]"), "a = b;\n[1].includes(x);");
}

#[test]
fn test_existing_semicolons_are_not_doubled() {
    assert_eq!(
        patch("x in y; f() in [1]"),
        "Array.from(y).includes(x); (needle = f(), [1].includes(needle));"
    );
    assert_eq!(patch("a ;\nb"), "a ;\nb;");
}

#[test]
fn test_extraction_with_array_literal_right_operand() {
    assert_eq!(
        patch("f() in [1, 2]"),
        "(needle = f(), [1, 2].includes(needle));"
    );
    assert_eq!(
        patch("f() not in [1, 2]"),
        "(needle = f(), ![1, 2].includes(needle));"
    );
}

#[test]
fn test_binary_operator_token_matches_its_operator() {
    assert_eq!(patch("a instanceof B or c"), "a instanceof B || c;");
    assert_eq!(patch("(a or b) and c"), "(a || b) && c;");

    let parsed = parse_program("a instanceof B").expect("parse");
    let options = PatchOptions::default();
    let stage = MainStage::new(&parsed, &options);
    let statement = parsed.statements()[0];
    let token = stage
        .operator_token(statement, BinaryOperator::InstanceOf.token_predicate())
        .expect("instanceof token");
    assert_eq!(token.text(&parsed.source), "instanceof");
    assert!(
        stage
            .operator_token(statement, BinaryOperator::Or.token_predicate())
            .is_none()
    );
}
