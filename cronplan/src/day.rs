//! Weekday normalization and the day-of-month / day-of-week combination.
//!
//! After parsing, weekday expressions use one canonical encoding,
//! 1 = Sunday through 7 = Saturday, whichever dialect supplied the digits.

use jiff::civil::Date;

use crate::ast::{CronExpression, Dialect, Field, FieldExpr, StepBase};
use crate::parser::parse_field;

/// Largest crontab weekday digit (the Sunday alias).
const CRONTAB_WEEKDAY_MAX: u32 = 7;

/// Shift a crontab weekday (0 = Sun .. 6 = Sat, 7 = Sun) to canonical.
fn shift(d: u32) -> u32 {
    if d == 7 {
        1
    } else {
        d + 1
    }
}

/// Convert a parsed weekday expression to the canonical encoding.
///
/// Names are already canonical, and so are scheduler digits. Crontab digits
/// are shifted by one, unless the field also used names: a field that names
/// a day is read as scheduler-numbered throughout.
pub fn canonical_weekday(expr: FieldExpr, dialect: Dialect, named: bool) -> FieldExpr {
    if named || dialect == Dialect::Scheduler {
        return expr;
    }
    match expr {
        FieldExpr::Single(d) => FieldExpr::Single(shift(d)),
        // The Sunday alias would wrap the range around, so match it separately.
        FieldExpr::Range(a, 7) if a <= 6 => {
            FieldExpr::List(vec![FieldExpr::Range(a + 1, 7), FieldExpr::Single(1)])
        }
        FieldExpr::Range(a, b) => FieldExpr::Range(shift(a), shift(b)),
        FieldExpr::Step { base, step } => {
            // `*/n` over crontab's 0..=6 is `*/n` over 1..=7. Anchored steps
            // can land on the Sunday alias, so they are expanded.
            let (start, end) = match base {
                _ if step == 0 => return FieldExpr::Step { base, step },
                StepBase::Wildcard => return FieldExpr::Step { base, step },
                StepBase::From(a) => (a, CRONTAB_WEEKDAY_MAX),
                StepBase::Range(a, b) => (a, b.min(CRONTAB_WEEKDAY_MAX)),
            };
            let mut days: Vec<u32> = (start..=end).step_by(step as usize).map(shift).collect();
            if days.is_empty() {
                return FieldExpr::Step { base, step };
            }
            days.sort_unstable();
            days.dedup();
            FieldExpr::List(days.into_iter().map(FieldExpr::Single).collect())
        }
        FieldExpr::List(terms) => FieldExpr::List(
            terms
                .into_iter()
                .map(|t| canonical_weekday(t, dialect, named))
                .collect(),
        ),
        other => other,
    }
}

/// Does `weekday` (1 = Sun .. 7 = Sat) satisfy the raw weekday expression
/// written in `dialect`'s numbering?
pub fn weekday_matches(weekday: u32, expr: &str, dialect: Dialect) -> bool {
    match parse_field(expr.trim(), Field::DayOfWeek) {
        Ok((parsed, named)) => {
            canonical_weekday(parsed, dialect, named).matches_field(weekday, Field::DayOfWeek)
        }
        Err(_) => false,
    }
}

/// Canonical weekday of a calendar date (1 = Sunday).
pub fn calendar_weekday(date: Date) -> u32 {
    date.weekday().to_sunday_one_offset() as u32
}

/// The combined day constraint of an expression: day-of-month, month and
/// weekday, with cron's OR rule when both day fields are restricted.
#[derive(Debug, Clone, Copy)]
pub struct DayConstraint<'a> {
    pub day: &'a FieldExpr,
    pub month: &'a FieldExpr,
    pub weekday: &'a FieldExpr,
}

impl<'a> DayConstraint<'a> {
    pub fn of(expr: &'a CronExpression) -> Self {
        Self {
            day: expr.expr(Field::DayOfMonth),
            month: expr.expr(Field::Month),
            weekday: expr.expr(Field::DayOfWeek),
        }
    }

    /// Month AND (day-of-month OR weekday when both are restricted, else
    /// whichever one is).
    pub fn matches(&self, date: Date) -> bool {
        if !self.month.matches_field(date.month() as u32, Field::Month) {
            return false;
        }
        self.day_fields_match(date)
    }

    /// The day-of-month/weekday half of [`DayConstraint::matches`].
    pub fn day_fields_match(&self, date: Date) -> bool {
        let dom = self
            .day
            .matches_day(date.day() as u32, date.days_in_month() as u32);
        let dow = self
            .weekday
            .matches_field(calendar_weekday(date), Field::DayOfWeek);

        match (self.day.is_wildcard(), self.weekday.is_wildcard()) {
            (false, false) => dom || dow,
            (false, true) => dom,
            (true, false) => dow,
            (true, true) => true,
        }
    }
}
