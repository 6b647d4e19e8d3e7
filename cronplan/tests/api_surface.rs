//! Public API surface: the free functions and `CronExpression` methods.

use cronplan::{CronExpression, Dialect, INVALID_DESCRIPTION};
use jiff::Zoned;

fn utc(s: &str) -> Zoned {
    format!("{s}+00:00[UTC]").parse().unwrap()
}

#[test]
fn detect_dialect_by_field_count() {
    assert_eq!(cronplan::detect_dialect("* * * * *"), Dialect::Crontab);
    assert_eq!(cronplan::detect_dialect("* * * * * ?"), Dialect::Scheduler);
    assert_eq!(cronplan::detect_dialect("* * * * * ? 2030"), Dialect::Scheduler);
    assert_eq!(cronplan::detect_dialect("nonsense"), Dialect::Scheduler);
}

#[test]
fn is_valid_detects_dialect() {
    assert!(cronplan::is_valid("0 0 12 * * ?"));
    assert!(cronplan::is_valid("*/15 * * * *"));
    assert!(!cronplan::is_valid("* * * *"));
    assert!(!cronplan::is_valid("0 0 12 * * ? 2030 x"));
    assert!(!cronplan::is_valid("0 0 12 * * @"));
}

#[test]
fn is_valid_as_checks_arity() {
    assert!(!cronplan::is_valid_as("*/15 * * * *", Dialect::Scheduler));
    assert!(cronplan::is_valid_as("*/15 * * * *", Dialect::Crontab));
}

#[test]
fn describe_example() {
    let text = cronplan::describe("0 30 9 * * MON-FRI");
    assert!(text.contains("at 9:30:00"));
    assert!(text.contains("weekdays (Mon-Fri)"));
}

#[test]
fn describe_invalid() {
    assert_eq!(cronplan::describe("* *"), INVALID_DESCRIPTION);
    assert_eq!(
        cronplan::describe_as("0 0 12 * * ?", Dialect::Crontab),
        INVALID_DESCRIPTION
    );
}

#[test]
fn next_occurrences_noon() {
    let results = cronplan::next_occurrences_from("0 0 12 * * ?", 1, &utc("2024-01-01T00:00:00"));
    assert_eq!(results, vec![utc("2024-01-01T12:00:00")]);
}

#[test]
fn next_occurrences_every_fifteen_minutes() {
    let results = cronplan::next_occurrences_from("*/15 * * * *", 4, &utc("2024-01-01T00:03:00"));
    assert_eq!(
        results,
        vec![
            utc("2024-01-01T00:15:00"),
            utc("2024-01-01T00:30:00"),
            utc("2024-01-01T00:45:00"),
            utc("2024-01-01T01:00:00"),
        ]
    );
}

#[test]
fn next_occurrences_impossible_is_empty() {
    let results =
        cronplan::next_occurrences_from("0 0 0 31 2 ? 2025", 5, &utc("2025-01-01T00:00:00"));
    assert!(results.is_empty());
}

#[test]
fn next_occurrences_malformed_is_empty() {
    assert!(cronplan::next_occurrences_from("* * *", 3, &utc("2024-01-01T00:00:00")).is_empty());
    assert!(cronplan::next_occurrences_from("*/0 * * * *", 3, &utc("2024-01-01T00:00:00")).is_empty());
    assert!(cronplan::next_occurrences("garbage", 3).is_empty());
}

#[test]
fn next_occurrences_from_now_is_in_future() {
    let before = Zoned::now();
    let results = cronplan::next_occurrences("* * * * *", 2);
    assert_eq!(results.len(), 2);
    assert!(results[0] > before);
}

#[test]
fn next_occurrences_as_forces_dialect() {
    // Read as crontab, weekday 1 is Monday; 2024-01-01 is a Monday.
    let from = utc("2023-12-31T12:00:00");
    let crontab = cronplan::next_occurrences_as("0 9 * * 1", Dialect::Crontab, 1, &from);
    assert_eq!(crontab, vec![utc("2024-01-01T09:00:00")]);
}

#[test]
fn weekday_numbering_differs_between_dialects() {
    let from = utc("2024-01-01T00:00:00");
    // Scheduler 2 = Monday, crontab 2 = Tuesday.
    let scheduler = cronplan::next_occurrences_from("0 0 9 ? * 2", 1, &from);
    let crontab = cronplan::next_occurrences_from("0 9 * * 2", 1, &from);
    assert_eq!(scheduler, vec![utc("2024-01-01T09:00:00")]);
    assert_eq!(crontab, vec![utc("2024-01-02T09:00:00")]);
}

#[test]
fn expression_is_reusable() {
    let expr: CronExpression = "0 0 * * * ?".parse().unwrap();
    let a = expr.next_from(&utc("2024-01-01T00:00:00")).unwrap();
    let b = expr.next_from(&utc("2024-06-01T10:30:00")).unwrap();
    assert_eq!(a, utc("2024-01-01T01:00:00"));
    assert_eq!(b, utc("2024-06-01T11:00:00"));
    assert_eq!(expr.raw(), "0 0 * * * ?");
}

#[test]
fn expression_matches() {
    let expr = CronExpression::parse("0 0 12 * * ?").unwrap();
    assert!(expr.matches(&utc("2024-05-05T12:00:00")));
    assert!(!expr.matches(&utc("2024-05-05T12:00:01")));
}

#[test]
fn normalized_crontab_behaves_like_scheduler() {
    let crontab = CronExpression::parse("5 4 * * *").unwrap();
    let scheduler = CronExpression::parse(&crontab.to_string()).unwrap();
    assert_eq!(scheduler.to_string(), "0 5 4 * * *");
    let from = utc("2024-01-01T00:00:00");
    assert_eq!(crontab.next_n_from(&from, 3), scheduler.next_n_from(&from, 3));
}

#[test]
fn next_occurrences_keeps_results_near_calendar_end() {
    let results = cronplan::next_occurrences_from("0 0 0 1 * ?", 30, &utc("9997-06-01T00:00:00"));
    assert_eq!(results.len(), 30);
    let results = cronplan::next_occurrences_from("0 0 0 1 1 ?", 3, &utc("9998-06-01T00:00:00"));
    assert_eq!(results, vec![utc("9999-01-01T00:00:00")]);
}

#[test]
fn crontab_weekday_step_includes_sunday() {
    // 2024-01-06 is a Saturday; 1-7/2 is Mon, Wed, Fri, Sun.
    let from = utc("2024-01-06T12:00:00");
    for raw in ["0 0 * * 1-7/2", "0 0 * * 1/2"] {
        let days: Vec<String> = cronplan::next_occurrences_from(raw, 4, &from)
            .iter()
            .map(|z| format!("{:?}", z.weekday()))
            .collect();
        assert_eq!(days, ["Sunday", "Monday", "Wednesday", "Friday"], "{raw}");
    }
}
