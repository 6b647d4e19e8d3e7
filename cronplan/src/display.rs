use std::fmt;

use crate::ast::*;

/// Returned by [`describe`](crate::describe) for input that does not parse.
pub const INVALID_DESCRIPTION: &str = "invalid cron expression";

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Writes the normalized form: 6 or 7 fields, seconds first.
impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", field.source)?;
        }
        Ok(())
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn weekday_name(v: u32) -> String {
    match v {
        1..=7 => WEEKDAY_NAMES[v as usize - 1].to_string(),
        _ => v.to_string(),
    }
}

fn month_name(v: u32) -> String {
    match v {
        1..=12 => MONTH_NAMES[v as usize - 1].to_string(),
        _ => v.to_string(),
    }
}

fn plain(v: u32) -> String {
    v.to_string()
}

/// `*/n`
fn every_nth(expr: &FieldExpr) -> Option<u32> {
    match expr {
        FieldExpr::Step {
            base: StepBase::Wildcard,
            step,
        } => Some(*step),
        _ => None,
    }
}

/// Render a single term with `name` applied to its values.
fn term(expr: &FieldExpr, name: fn(u32) -> String) -> String {
    match expr {
        FieldExpr::Any | FieldExpr::NoSpecific => "*".to_string(),
        FieldExpr::Single(v) | FieldExpr::NearestWeekday(v) => name(*v),
        FieldExpr::Range(a, b) => format!("{}-{}", name(*a), name(*b)),
        FieldExpr::Step { base, step } => match base {
            StepBase::Wildcard => format!("every {step}"),
            StepBase::From(a) => format!("every {step} from {}", name(*a)),
            StepBase::Range(a, b) => format!("every {step} from {} to {}", name(*a), name(*b)),
        },
        FieldExpr::List(terms) => terms
            .iter()
            .map(|t| term(t, name))
            .collect::<Vec<_>>()
            .join(", "),
        FieldExpr::LastDayOfMonth => "last".to_string(),
        FieldExpr::Unmatchable(s) => s.clone(),
    }
}

/// Clock component: plain numbers are zero-padded to `width`, anything else
/// is printed as written.
fn clock(field: Option<&CronField>, width: usize) -> String {
    match field {
        Some(CronField {
            expr: FieldExpr::Single(v),
            ..
        }) => format!("{v:0width$}"),
        Some(f) => f.source.clone(),
        None => "*".to_string(),
    }
}

fn time_phrase(expr: &CronExpression) -> String {
    let second = expr.expr(Field::Second);
    let minute = expr.expr(Field::Minute);
    let hour = expr.expr(Field::Hour);
    let h = clock(expr.field(Field::Hour), 1);
    let mm = clock(expr.field(Field::Minute), 2);
    let ss = clock(expr.field(Field::Second), 2);

    match expr.dialect() {
        Dialect::Crontab => {
            if minute.is_wildcard() && hour.is_wildcard() {
                "every minute".to_string()
            } else if let (Some(n), true) = (every_nth(minute), hour.is_wildcard()) {
                format!("every {n} minutes")
            } else if hour.is_wildcard() {
                format!("every hour at minute {}", clock(expr.field(Field::Minute), 1))
            } else {
                format!("at {h}:{mm}:00")
            }
        }
        Dialect::Scheduler => {
            let top_wild = minute.is_wildcard() && hour.is_wildcard();
            if second.is_wildcard() && top_wild {
                "every second".to_string()
            } else if let (Some(n), true) = (every_nth(second), top_wild) {
                format!("every {n} seconds")
            } else if top_wild {
                format!("every minute at second {}", clock(expr.field(Field::Second), 1))
            } else if let (Some(n), true, true) = (
                every_nth(minute),
                hour.is_wildcard(),
                *second == FieldExpr::Single(0),
            ) {
                format!("every {n} minutes")
            } else if hour.is_wildcard() {
                format!("every hour at {mm}:{ss}")
            } else {
                format!("at {h}:{mm}:{ss}")
            }
        }
    }
}

fn day_clause(expr: &FieldExpr) -> String {
    match expr {
        FieldExpr::LastDayOfMonth => "on the last day of the month".to_string(),
        FieldExpr::Single(d) | FieldExpr::NearestWeekday(d) => format!("on day {d} of the month"),
        FieldExpr::Step {
            base: StepBase::Wildcard,
            step,
        } => format!("every {step} days"),
        other => format!("on days {} of the month", term(other, plain)),
    }
}

fn weekday_clause(expr: &FieldExpr) -> String {
    match expr {
        FieldExpr::Range(2, 6) => "on weekdays (Mon-Fri)".to_string(),
        FieldExpr::Range(a, b) => format!("on {} through {}", weekday_name(*a), weekday_name(*b)),
        FieldExpr::Step {
            base: StepBase::Wildcard,
            step,
        } => format!("every {step} days of the week"),
        other => format!("on {}", term(other, weekday_name)),
    }
}

fn month_clause(expr: &FieldExpr) -> String {
    match expr {
        FieldExpr::Step { base, step } => match base {
            StepBase::Wildcard => format!("every {step} months"),
            StepBase::From(a) | StepBase::Range(a, _) => {
                format!("every {step} months starting in {}", month_name(*a))
            }
        },
        FieldExpr::Range(a, b) => format!("from {} through {}", month_name(*a), month_name(*b)),
        other => format!("in {}", term(other, month_name)),
    }
}

fn year_clause(expr: &FieldExpr) -> String {
    match expr {
        FieldExpr::Step { base, step } => match base {
            StepBase::Wildcard => format!("every {step} years"),
            StepBase::From(a) => format!("every {step} years starting in {a}"),
            StepBase::Range(a, b) => format!("every {step} years from {a} through {b}"),
        },
        FieldExpr::Range(a, b) => format!("from {a} through {b}"),
        other => format!("in {}", term(other, plain)),
    }
}

/// English sentence describing when `expr` fires. Total: never fails.
pub fn describe(expr: &CronExpression) -> String {
    let mut clauses = vec![time_phrase(expr)];

    let dom = expr.expr(Field::DayOfMonth);
    let dow = expr.expr(Field::DayOfWeek);
    match (dom.is_wildcard(), dow.is_wildcard()) {
        (false, false) => clauses.push(format!("{} or {}", day_clause(dom), weekday_clause(dow))),
        (false, true) => clauses.push(day_clause(dom)),
        (true, false) => clauses.push(weekday_clause(dow)),
        (true, true) => {}
    }

    let month = expr.expr(Field::Month);
    if !month.is_wildcard() {
        clauses.push(month_clause(month));
    }

    let year = expr.expr(Field::Year);
    if expr.has_year() && !year.is_wildcard() {
        clauses.push(year_clause(year));
    }

    clauses.join(", ")
}
