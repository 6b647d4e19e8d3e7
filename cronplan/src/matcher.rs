//! Per-field value matching.
//!
//! Expressions are parsed once into [`FieldExpr`]; matching walks the parsed
//! form and never allocates, since a single search may call it millions of
//! times.

use crate::ast::{Field, FieldExpr, StepBase};
use crate::parser::parse_field;

impl FieldExpr {
    /// Does `value` satisfy this expression for a field with domain
    /// `min..=max`? `L` never matches here; use [`FieldExpr::matches_day`].
    pub fn matches(&self, value: u32, min: u32, max: u32) -> bool {
        self.eval(value, min, max, None)
    }

    /// Day-of-month matching, where `L` means the last day of a month with
    /// `days_in_month` days.
    pub fn matches_day(&self, day: u32, days_in_month: u32) -> bool {
        let field = Field::DayOfMonth;
        self.eval(day, field.min(), field.max(), Some(days_in_month))
    }

    /// Match against the domain of `field`.
    pub fn matches_field(&self, value: u32, field: Field) -> bool {
        self.eval(value, field.min(), field.max(), None)
    }

    fn eval(&self, value: u32, min: u32, max: u32, last_day: Option<u32>) -> bool {
        match self {
            FieldExpr::Any | FieldExpr::NoSpecific => true,
            FieldExpr::Single(v) | FieldExpr::NearestWeekday(v) => value == *v,
            FieldExpr::Range(a, b) => (*a..=*b).contains(&value),
            FieldExpr::Step { base, step } => {
                let (start, end) = match *base {
                    StepBase::Wildcard => (min, max),
                    StepBase::From(start) => (start, max),
                    StepBase::Range(start, end) => (start, end),
                };
                *step != 0 && (start..=end).contains(&value) && (value - start) % step == 0
            }
            FieldExpr::List(terms) => terms.iter().any(|t| t.eval(value, min, max, last_day)),
            FieldExpr::LastDayOfMonth => last_day == Some(value),
            FieldExpr::Unmatchable(_) => false,
        }
    }
}

/// Match `value` against a raw numeric field expression over `min..=max`.
///
/// Total: malformed expressions simply do not match.
pub fn matches(value: u32, expr: &str, min: u32, max: u32) -> bool {
    match parse_field(expr.trim(), Field::Minute) {
        Ok((parsed, _)) => parsed.matches(value, min, max),
        Err(_) => false,
    }
}
