//! Single-pass tokenizing parse of each field into a [`FieldExpr`].

use crate::ast::*;
use crate::day::canonical_weekday;
use crate::dialect::{detect, normalize, tokens};
use crate::error::{CronError, Span};
use crate::validate::validate;

pub(crate) const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parse `raw`, detecting its dialect from the field count.
pub fn parse(raw: &str) -> Result<CronExpression, CronError> {
    parse_as(raw, detect(raw))
}

/// Parse `raw` as the given dialect.
pub fn parse_as(raw: &str, dialect: Dialect) -> Result<CronExpression, CronError> {
    validate(raw, dialect)?;

    let raw_spans: Vec<Span> = tokens(raw).into_iter().map(|(span, _)| span).collect();
    let normalized = normalize(raw, dialect);

    let mut fields = Vec::with_capacity(7);
    for (i, (_, token)) in tokens(&normalized).into_iter().enumerate() {
        let field = Field::ALL[i];
        // Crontab's injected seconds field has no source span.
        let span = match dialect {
            Dialect::Scheduler => raw_spans[i],
            Dialect::Crontab if i == 0 => Span::new(0, 0),
            Dialect::Crontab => raw_spans[i - 1],
        };
        let ctx = TermContext {
            field,
            span,
            input: raw,
        };
        let (mut expr, named) = ctx.parse_field(token)?;
        if field == Field::DayOfWeek {
            expr = canonical_weekday(expr, dialect, named);
        }
        fields.push(CronField {
            source: token.to_string(),
            expr,
        });
    }

    Ok(CronExpression {
        raw: raw.to_string(),
        dialect,
        fields,
    })
}

/// Parse a single field token outside of a full expression. Weekday values
/// are returned as written (no dialect shift); the flag reports whether any
/// name was substituted.
pub fn parse_field(token: &str, field: Field) -> Result<(FieldExpr, bool), CronError> {
    TermContext {
        field,
        span: Span::new(0, token.len()),
        input: token,
    }
    .parse_field(token)
}

struct TermContext<'a> {
    field: Field,
    span: Span,
    input: &'a str,
}

impl TermContext<'_> {
    fn parse_field(&self, token: &str) -> Result<(FieldExpr, bool), CronError> {
        match token {
            "*" => return Ok((FieldExpr::Any, false)),
            "?" => return Ok((FieldExpr::NoSpecific, false)),
            _ => {}
        }

        let mut named = false;
        if token.contains(',') {
            let mut terms = Vec::new();
            for part in token.split(',') {
                terms.push(self.parse_term(part, &mut named)?);
            }
            return Ok((FieldExpr::List(terms), named));
        }
        let expr = self.parse_term(token, &mut named)?;
        Ok((expr, named))
    }

    fn parse_term(&self, term: &str, named: &mut bool) -> Result<FieldExpr, CronError> {
        if term == "*" || term == "?" {
            return Ok(FieldExpr::Any);
        }

        if let Some((base, step)) = term.split_once('/') {
            let step = match step.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(CronError::InvalidStep {
                        token: term.to_string(),
                        span: self.span,
                        input: self.input.to_string(),
                    })
                }
            };
            let base = if base == "*" {
                StepBase::Wildcard
            } else if let Some((a, b)) = base.split_once('-') {
                match (self.value(a, named), self.value(b, named)) {
                    (Some(a), Some(b)) => StepBase::Range(a, b),
                    _ => return Ok(FieldExpr::Unmatchable(term.to_string())),
                }
            } else {
                match self.value(base, named) {
                    Some(v) => StepBase::From(v),
                    None => return Ok(FieldExpr::Unmatchable(term.to_string())),
                }
            };
            return Ok(FieldExpr::Step { base, step });
        }

        if let Some((a, b)) = term.split_once('-') {
            return Ok(match (self.value(a, named), self.value(b, named)) {
                (Some(a), Some(b)) => FieldExpr::Range(a, b),
                _ => FieldExpr::Unmatchable(term.to_string()),
            });
        }

        if self.field == Field::DayOfMonth {
            let upper = term.to_ascii_uppercase();
            if upper == "L" || upper == "LW" {
                return Ok(FieldExpr::LastDayOfMonth);
            }
            if let Some(day) = upper.strip_suffix('W') {
                if let Ok(day) = day.parse() {
                    return Ok(FieldExpr::NearestWeekday(day));
                }
            }
        }

        Ok(match self.value(term, named) {
            Some(v) => FieldExpr::Single(v),
            None => FieldExpr::Unmatchable(term.to_string()),
        })
    }

    /// A number, or a name valid for this field.
    fn value(&self, s: &str, named: &mut bool) -> Option<u32> {
        if let Ok(n) = s.parse::<u32>() {
            return Some(n);
        }
        let table: &[&str] = match self.field {
            Field::DayOfWeek => &WEEKDAY_ABBREVIATIONS,
            Field::Month => &MONTH_ABBREVIATIONS,
            _ => return None,
        };
        let pos = table.iter().position(|name| name.eq_ignore_ascii_case(s))?;
        *named = true;
        Some(pos as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheduler_fields() {
        let expr = parse("0 30 9 * * MON-FRI").unwrap();
        assert_eq!(expr.dialect(), Dialect::Scheduler);
        assert_eq!(expr.expr(Field::Second), &FieldExpr::Single(0));
        assert_eq!(expr.expr(Field::Minute), &FieldExpr::Single(30));
        assert_eq!(expr.expr(Field::Hour), &FieldExpr::Single(9));
        assert_eq!(expr.expr(Field::DayOfMonth), &FieldExpr::Any);
        assert_eq!(expr.expr(Field::DayOfWeek), &FieldExpr::Range(2, 6));
        assert!(!expr.has_year());
        assert_eq!(expr.expr(Field::Year), &FieldExpr::Any);
    }

    #[test]
    fn test_parse_crontab_injects_seconds() {
        let expr = parse("*/15 * * * *").unwrap();
        assert_eq!(expr.dialect(), Dialect::Crontab);
        assert_eq!(expr.field(Field::Second).unwrap().source, "0");
        assert_eq!(
            expr.expr(Field::Minute),
            &FieldExpr::Step {
                base: StepBase::Wildcard,
                step: 15
            }
        );
    }

    #[test]
    fn test_parse_year() {
        let expr = parse("0 0 0 31 2 ? 2025").unwrap();
        assert!(expr.has_year());
        assert_eq!(expr.expr(Field::Year), &FieldExpr::Single(2025));
        assert_eq!(expr.expr(Field::DayOfWeek), &FieldExpr::NoSpecific);
    }

    #[test]
    fn test_parse_list_and_step_terms() {
        let (expr, named) = parse_field("1,5-10,20/5", Field::Minute).unwrap();
        assert!(!named);
        assert_eq!(
            expr,
            FieldExpr::List(vec![
                FieldExpr::Single(1),
                FieldExpr::Range(5, 10),
                FieldExpr::Step {
                    base: StepBase::From(20),
                    step: 5
                },
            ])
        );
    }

    #[test]
    fn test_parse_day_specials() {
        assert_eq!(
            parse_field("L", Field::DayOfMonth).unwrap().0,
            FieldExpr::LastDayOfMonth
        );
        assert_eq!(
            parse_field("15W", Field::DayOfMonth).unwrap().0,
            FieldExpr::NearestWeekday(15)
        );
        assert_eq!(
            parse_field("L", Field::Hour).unwrap().0,
            FieldExpr::Unmatchable("L".into())
        );
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        let (expr, named) = parse_field("jan,Jul", Field::Month).unwrap();
        assert!(named);
        assert_eq!(
            expr,
            FieldExpr::List(vec![FieldExpr::Single(1), FieldExpr::Single(7)])
        );
        let (expr, named) = parse_field("sun", Field::DayOfWeek).unwrap();
        assert!(named);
        assert_eq!(expr, FieldExpr::Single(1));
    }

    #[test]
    fn test_unparseable_single_is_inert() {
        let (expr, _) = parse_field("2#3", Field::DayOfWeek).unwrap();
        assert!(expr.is_unmatchable());
    }

    #[test]
    fn test_zero_step_is_error() {
        let err = parse("*/0 * * * *").unwrap_err();
        assert!(matches!(err, CronError::InvalidStep { .. }));
    }

    #[test]
    fn test_invalid_expression_is_error() {
        assert!(parse("* * *").is_err());
        assert!(parse_as("0 0 12 * * ?", Dialect::Crontab).is_err());
    }

    #[test]
    fn test_crontab_error_span_points_into_raw() {
        let err = parse("*/0 * * * *").unwrap_err();
        match err {
            CronError::InvalidStep { span, .. } => assert_eq!(span, Span::new(0, 3)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
