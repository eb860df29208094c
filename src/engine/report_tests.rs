use super::*;
use crate::config::Severity;

fn result(passed: bool, severity: Severity) -> CheckResult {
    CheckResult::new("a/b", "a", passed, "msg", severity)
}

#[test]
fn push_counts_by_status() {
    let mut report = CheckReport::new(Preset::Dev);
    report.push(result(true, Severity::Error));
    report.push(result(false, Severity::Error));
    report.push(result(false, Severity::Warn));
    report.push(result(false, Severity::Info));

    assert_eq!(report.total, 4);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.warnings, 1);
    assert!(!report.is_success());
    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.warning_results().count(), 1);
}

#[test]
fn skipped_failures_count_as_passed() {
    let mut report = CheckReport::new(Preset::Stable);
    let mut skipped = result(false, Severity::Error);
    skipped.skipped = true;
    report.push(skipped);

    assert_eq!(report.passed, 1);
    assert_eq!(report.failed, 0);
    assert!(report.is_success());
}

#[test]
fn score_rounds_to_nearest_percent() {
    let mut report = CheckReport::new(Preset::Dev);
    assert_eq!(report.score(), 100);

    report.push(result(true, Severity::Error));
    report.push(result(true, Severity::Error));
    report.push(result(false, Severity::Error));
    assert_eq!(report.score(), 67);

    let mut half = CheckReport::new(Preset::Dev);
    half.push(result(true, Severity::Error));
    half.push(result(false, Severity::Warn));
    assert_eq!(half.score(), 50);

    let mut low = CheckReport::new(Preset::Dev);
    low.push(result(true, Severity::Error));
    for _ in 0..7 {
        low.push(result(false, Severity::Error));
    }
    // 12.5 rounds up
    assert_eq!(low.score(), 13);
}
