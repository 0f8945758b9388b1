//! Derive checks that must compile and run.
//!
//! Each file under `tests/ui/pass` is a small downstream crate exercising one
//! `#[derive(Record)]` form.

#[test]
fn derive_pass_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/pass/*.rs");
}
