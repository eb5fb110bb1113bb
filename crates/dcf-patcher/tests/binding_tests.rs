use super::*;

#[test]
fn test_claim_base_name_when_free() {
    let mut scope = BindingScope::default();
    assert_eq!(scope.claim("needle").unwrap(), "needle");
    assert_eq!(scope.claimed(), ["needle"]);
}

#[test]
fn test_claim_skips_names_in_source() {
    let mut scope = BindingScope::with_used_names(["needle", "needle1", "x"]);
    assert_eq!(scope.claim("needle").unwrap(), "needle2");
    assert!(scope.is_used("x"));
}

#[test]
fn test_repeated_claims_are_distinct() {
    let mut scope = BindingScope::default();
    let first = scope.claim("needle").unwrap();
    let second = scope.claim("needle").unwrap();
    let third = scope.claim("needle").unwrap();
    assert_eq!([first, second, third], ["needle", "needle1", "needle2"]);
    assert_eq!(scope.claimed().len(), 3);
}
