//! Structural validation: field count and a per-token character sieve.
//!
//! This is syntax only. `99` in the hour field passes here and simply never
//! matches during a search.

use crate::ast::{Dialect, Field};
use crate::dialect::tokens;
use crate::error::CronError;

const CRONTAB_FIELDS: [Field; 5] = [
    Field::Minute,
    Field::Hour,
    Field::DayOfMonth,
    Field::Month,
    Field::DayOfWeek,
];

/// Field occupying position `index` of a raw (non-normalized) expression.
pub(crate) fn raw_field_at(dialect: Dialect, index: usize) -> Field {
    match dialect {
        Dialect::Crontab => CRONTAB_FIELDS[index.min(4)],
        Dialect::Scheduler => Field::ALL[index.min(6)],
    }
}

fn allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '*' | '?' | '/' | ',' | '-' | '#')
}

/// Check arity and characters of a raw expression.
pub fn validate(raw: &str, dialect: Dialect) -> Result<(), CronError> {
    let toks = tokens(raw);
    if !dialect.accepts_arity(toks.len()) {
        return Err(CronError::FieldCount {
            expected: dialect.arity_label(),
            found: toks.len(),
            input: raw.to_string(),
        });
    }
    for (i, (span, tok)) in toks.iter().enumerate() {
        if !tok.chars().all(allowed) {
            return Err(CronError::InvalidCharacter {
                field: raw_field_at(dialect, i).name(),
                token: tok.to_string(),
                span: *span,
                input: raw.to_string(),
            });
        }
    }
    Ok(())
}

/// [`validate`] collapsed to a boolean. Never panics.
pub fn is_valid(raw: &str, dialect: Dialect) -> bool {
    validate(raw, dialect).is_ok()
}
