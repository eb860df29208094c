use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_ne!(EXIT_SUCCESS, EXIT_CHECKS_FAILED);
    assert_ne!(EXIT_SUCCESS, EXIT_CONFIG_ERROR);
    assert_ne!(EXIT_CHECKS_FAILED, EXIT_CONFIG_ERROR);
}

#[test]
fn builtin_modules_are_exposed() {
    assert!(!builtin_modules().is_empty());
    assert!(registry::find_rule(builtin_modules(), "files/readme").is_some());
}
