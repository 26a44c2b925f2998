//! Compile tests for `#[derive(Structural)]`.

#[test]
fn derive_expansions() {
    let cases = trybuild::TestCases::new();
    cases.pass("tests/ui/pass/*.rs");
    cases.compile_fail("tests/ui/fail/*.rs");
}
