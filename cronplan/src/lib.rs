//! cronplan: a cron expression engine for two dialects.
//!
//! - **Scheduler style**: `sec min hour day-of-month month day-of-week [year]`,
//!   weekdays numbered 1 = Sunday .. 7 = Saturday.
//! - **Crontab style**: `min hour day-of-month month day-of-week`, weekdays
//!   numbered 0 = Sunday .. 6 = Saturday (7 is also Sunday).
//!
//! The dialect is inferred from the field count. Expressions can be
//! validated, searched for their next occurrences, and described in English.
//!
//! # Examples
//!
//! ```
//! use cronplan::CronExpression;
//!
//! let expr: CronExpression = "0 30 9 * * MON-FRI".parse().unwrap();
//! let from: jiff::Zoned = "2024-01-01T00:00:00+00:00[UTC]".parse().unwrap();
//! let next = expr.next_from(&from).unwrap();
//! assert_eq!(next.to_string(), "2024-01-01T09:30:00+00:00[UTC]");
//! assert!(expr.describe().contains("weekdays (Mon-Fri)"));
//! ```

pub mod ast;
pub mod day;
pub mod dialect;
pub mod display;
pub mod error;
pub mod eval;
pub mod matcher;
pub mod parser;
pub mod validate;

pub use ast::{CronExpression, CronField, Dialect, Field, FieldExpr, StepBase};
pub use display::INVALID_DESCRIPTION;
pub use error::{CronError, Span};
pub use eval::{BoundedOccurrences, Occurrences};

use jiff::Zoned;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// --- Free-function surface ---

/// Crontab iff the input has exactly 5 whitespace-separated fields.
pub fn detect_dialect(raw: &str) -> Dialect {
    dialect::detect(raw)
}

/// Structural check of `raw` in its detected dialect.
pub fn is_valid(raw: &str) -> bool {
    validate::is_valid(raw, detect_dialect(raw))
}

/// Structural check of `raw` as the given dialect.
pub fn is_valid_as(raw: &str, dialect: Dialect) -> bool {
    validate::is_valid(raw, dialect)
}

/// English description of `raw`, or [`INVALID_DESCRIPTION`].
pub fn describe(raw: &str) -> String {
    describe_as(raw, detect_dialect(raw))
}

pub fn describe_as(raw: &str, dialect: Dialect) -> String {
    match CronExpression::parse_as(raw, dialect) {
        Ok(expr) => expr.describe(),
        Err(_) => INVALID_DESCRIPTION.to_string(),
    }
}

/// Next `count` occurrences of `raw` after the current instant.
pub fn next_occurrences(raw: &str, count: usize) -> Vec<Zoned> {
    next_occurrences_from(raw, count, &Zoned::now())
}

/// Next `count` occurrences of `raw` after `from`. Malformed input yields an
/// empty list; a schedule that stops firing yields a short one.
pub fn next_occurrences_from(raw: &str, count: usize, from: &Zoned) -> Vec<Zoned> {
    next_occurrences_as(raw, detect_dialect(raw), count, from)
}

pub fn next_occurrences_as(raw: &str, dialect: Dialect, count: usize, from: &Zoned) -> Vec<Zoned> {
    match CronExpression::parse_as(raw, dialect) {
        Ok(expr) => expr.next_n_from(from, count),
        Err(_) => Vec::new(),
    }
}

// --- CronExpression convenience methods ---

impl CronExpression {
    /// Parse, detecting the dialect from the field count.
    pub fn parse(raw: &str) -> Result<Self, CronError> {
        parser::parse(raw)
    }

    pub fn parse_as(raw: &str, dialect: Dialect) -> Result<Self, CronError> {
        parser::parse_as(raw, dialect)
    }

    /// Next occurrence strictly after `now`.
    pub fn next_from(&self, now: &Zoned) -> Option<Zoned> {
        eval::next_from(self, now).ok().flatten()
    }

    /// Up to `n` occurrences after `now`, strictly increasing.
    pub fn next_n_from(&self, now: &Zoned, n: usize) -> Vec<Zoned> {
        eval::next_n_from(self, now, n).unwrap_or_default()
    }

    /// Lazy iterator over occurrences after `from`.
    pub fn occurrences(&self, from: &Zoned) -> Occurrences<'_> {
        Occurrences::new(self, from.clone())
    }

    /// Occurrences in `(from, to]`.
    pub fn between(&self, from: &Zoned, to: &Zoned) -> BoundedOccurrences<'_> {
        BoundedOccurrences::new(self, from.clone(), to.clone())
    }

    /// Check if an instant (to the second) fires this schedule.
    pub fn matches(&self, datetime: &Zoned) -> bool {
        eval::matches(self, datetime)
    }

    pub fn describe(&self) -> String {
        display::describe(self)
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CronExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("raw", self.raw())?;
        map.serialize_entry("dialect", &self.dialect())?;
        map.serialize_entry("normalized", &self.to_string())?;
        map.serialize_entry("description", &self.describe())?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CronExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CronExpression::parse(&s).map_err(serde::de::Error::custom)
    }
}
