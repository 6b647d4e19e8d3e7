//! Next-occurrence search over a calendar cursor.
//!
//! Each query owns a fresh cursor in the time zone of the instant it starts
//! from. Mismatches skip forward by the coarsest unsatisfied unit: skipped
//! instants share the failing field value, so the first match found is still
//! the earliest one. The iteration cap and lookahead horizon guarantee
//! termination for schedules that can never fire.
//!
//! Fields match wall-clock values. When clocks fall back, a wall-clock time
//! inside the repeated hour exists twice and matches both times; when clocks
//! spring forward, times inside the skipped hour never occur.

use jiff::civil::Date;
use jiff::{Span, Timestamp, Zoned};
use tracing::{debug, trace};

use crate::ast::{CronExpression, Dialect, Field};
use crate::day::DayConstraint;
use crate::error::CronError;

/// Hard cap on cursor steps per single-occurrence search.
pub const MAX_ITERATIONS: u64 = 366 * 24 * 60 * 60;

/// Minimum lookahead horizon, in years.
pub const MIN_HORIZON_YEARS: i64 = 2;

/// Coarsest field the cursor currently fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

fn first_mismatch(expr: &CronExpression, days: &DayConstraint<'_>, at: &Zoned) -> Option<Mismatch> {
    let year_ok = u32::try_from(at.year())
        .map(|y| expr.expr(Field::Year).matches_field(y, Field::Year))
        .unwrap_or(false);
    if !year_ok {
        return Some(Mismatch::Year);
    }
    if !days.month.matches_field(at.month() as u32, Field::Month) {
        return Some(Mismatch::Month);
    }
    if !days.day_fields_match(at.date()) {
        return Some(Mismatch::Day);
    }
    if !expr.expr(Field::Hour).matches_field(at.hour() as u32, Field::Hour) {
        return Some(Mismatch::Hour);
    }
    if !expr.expr(Field::Minute).matches_field(at.minute() as u32, Field::Minute) {
        return Some(Mismatch::Minute);
    }
    if !expr.expr(Field::Second).matches_field(at.second() as u32, Field::Second) {
        return Some(Mismatch::Second);
    }
    None
}

fn any_in_domain(expr: &CronExpression, field: Field) -> bool {
    (field.min()..=field.max()).any(|v| expr.expr(field).matches_field(v, field))
}

/// True when some field can never be satisfied, so no search can succeed.
fn never_fires(expr: &CronExpression) -> bool {
    let small = [Field::Second, Field::Minute, Field::Hour, Field::Month];
    if small.iter().any(|f| !any_in_domain(expr, *f)) {
        return true;
    }
    // Years outside the nominal domain can still be named explicitly.
    if expr.expr(Field::Year).is_unmatchable() {
        return true;
    }

    let dom = expr.expr(Field::DayOfMonth);
    let dow = expr.expr(Field::DayOfWeek);
    // Day 31 of a 31-day month also exercises `L`.
    let dom_possible = (1..=31).any(|d| dom.matches_day(d, 31));
    let dow_possible = any_in_domain(expr, Field::DayOfWeek);
    match (dom.is_wildcard(), dow.is_wildcard()) {
        (false, false) => !dom_possible && !dow_possible,
        (false, true) => !dom_possible,
        (true, false) => !dow_possible,
        (true, true) => false,
    }
}

fn floor_second(at: &Zoned) -> Result<Zoned, CronError> {
    let span = Span::new().nanoseconds(at.subsec_nanosecond() as i64);
    Ok(at.checked_sub(span)?)
}

fn floor_minute(at: &Zoned) -> Result<Zoned, CronError> {
    let span = Span::new().seconds(at.second() as i64);
    Ok(floor_second(at)?.checked_sub(span)?)
}

fn floor_hour(at: &Zoned) -> Result<Zoned, CronError> {
    let span = Span::new().minutes(at.minute() as i64);
    Ok(floor_minute(at)?.checked_sub(span)?)
}

fn start_of(date: Date, like: &Zoned) -> Result<Zoned, CronError> {
    Ok(date.to_zoned(like.time_zone().clone())?)
}

/// Where a search for occurrences strictly after `after` begins.
fn seed(expr: &CronExpression, after: &Zoned) -> Result<Zoned, CronError> {
    let seed = match expr.dialect() {
        Dialect::Scheduler => floor_second(after)?.checked_add(Span::new().seconds(1))?,
        Dialect::Crontab => floor_minute(after)?.checked_add(Span::new().minutes(1))?,
    };
    Ok(seed)
}

/// The instant past which the search gives up: two years out, or far enough
/// to reach the largest explicitly named year. Clamped to the last instant
/// the calendar can represent.
fn horizon(expr: &CronExpression, cursor: &Zoned) -> Zoned {
    let current = cursor.year() as i64;
    let years = match expr.expr(Field::Year).explicit_max() {
        Some(target) => MIN_HORIZON_YEARS.max(target as i64 - current + 1),
        None => MIN_HORIZON_YEARS,
    };
    Span::new()
        .try_years(years)
        .and_then(|span| cursor.checked_add(span))
        .unwrap_or_else(|_| Timestamp::MAX.to_zoned(cursor.time_zone().clone()))
}

fn advance(cursor: &Zoned, mismatch: Mismatch) -> Result<Zoned, CronError> {
    let next = match mismatch {
        Mismatch::Year => {
            let date = Date::new(cursor.year() + 1, 1, 1)?;
            start_of(date, cursor)?
        }
        Mismatch::Month => {
            let date = cursor.date().first_of_month().checked_add(Span::new().months(1))?;
            start_of(date, cursor)?
        }
        Mismatch::Day => start_of(cursor.date().tomorrow()?, cursor)?,
        Mismatch::Hour => floor_hour(cursor)?.checked_add(Span::new().hours(1))?,
        Mismatch::Minute => floor_minute(cursor)?.checked_add(Span::new().minutes(1))?,
        Mismatch::Second => cursor.checked_add(Span::new().seconds(1))?,
    };
    Ok(next)
}

/// Earliest instant at or after `start` that satisfies every field.
fn search(expr: &CronExpression, start: Zoned) -> Result<Option<Zoned>, CronError> {
    if never_fires(expr) {
        debug!(expression = %expr.raw(), "expression has an unsatisfiable field");
        return Ok(None);
    }

    let max_time = horizon(expr, &start);
    let days = DayConstraint::of(expr);
    let mut cursor = start;

    for iteration in 0..MAX_ITERATIONS {
        if cursor > max_time {
            debug!(
                expression = %expr.raw(),
                iterations = iteration,
                horizon = %max_time,
                "no occurrence within lookahead horizon"
            );
            return Ok(None);
        }
        match first_mismatch(expr, &days, &cursor) {
            None => return Ok(Some(cursor)),
            Some(mismatch) => match advance(&cursor, mismatch) {
                Ok(next) => cursor = next,
                Err(e) => {
                    debug!(
                        expression = %expr.raw(),
                        error = %e,
                        "cursor ran off the end of the calendar"
                    );
                    return Ok(None);
                }
            },
        }
    }

    debug!(
        expression = %expr.raw(),
        iterations = MAX_ITERATIONS,
        "search iteration cap reached"
    );
    Ok(None)
}

/// Next occurrence strictly after `after`.
pub fn next_from(expr: &CronExpression, after: &Zoned) -> Result<Option<Zoned>, CronError> {
    search(expr, seed(expr, after)?)
}

/// Up to `n` consecutive occurrences after `after`. Fewer are returned when
/// the schedule stops firing within the lookahead horizon, or when a later
/// search fails; the error surfaces only if nothing was found first.
pub fn next_n_from(
    expr: &CronExpression,
    after: &Zoned,
    n: usize,
) -> Result<Vec<Zoned>, CronError> {
    let mut results = Vec::new();
    for occurrence in Occurrences::new(expr, after.clone()).take(n) {
        match occurrence {
            Ok(dt) => results.push(dt),
            Err(e) if results.is_empty() => return Err(e),
            Err(e) => {
                debug!(
                    expression = %expr.raw(),
                    error = %e,
                    found = results.len(),
                    "search failed, keeping earlier occurrences"
                );
                break;
            }
        }
    }
    if results.len() < n {
        trace!(
            expression = %expr.raw(),
            requested = n,
            found = results.len(),
            "schedule stopped firing"
        );
    }
    Ok(results)
}

/// Does `at` (to the second) satisfy every field of `expr`?
pub fn matches(expr: &CronExpression, at: &Zoned) -> bool {
    first_mismatch(expr, &DayConstraint::of(expr), at).is_none()
}

/// Lazy iterator over occurrences strictly after a given instant.
pub struct Occurrences<'a> {
    expr: &'a CronExpression,
    current: Option<Zoned>,
}

impl<'a> Occurrences<'a> {
    pub fn new(expr: &'a CronExpression, from: Zoned) -> Self {
        Self {
            expr,
            current: Some(from),
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Result<Zoned, CronError>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        match next_from(self.expr, &current) {
            Ok(Some(dt)) => {
                self.current = Some(dt.clone());
                Some(Ok(dt))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Occurrences in the range `(from, to]`.
pub struct BoundedOccurrences<'a> {
    inner: Occurrences<'a>,
    to: Zoned,
}

impl<'a> BoundedOccurrences<'a> {
    pub fn new(expr: &'a CronExpression, from: Zoned, to: Zoned) -> Self {
        Self {
            inner: Occurrences::new(expr, from),
            to,
        }
    }
}

impl Iterator for BoundedOccurrences<'_> {
    type Item = Result<Zoned, CronError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok(dt) if dt <= self.to => Some(Ok(dt)),
            Ok(_) => {
                self.inner.current = None;
                None
            }
            Err(e) => Some(Err(e)),
        }
    }
}
