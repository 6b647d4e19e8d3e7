/// Which field-count/meaning convention an expression is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// `sec min hour dom month dow [year]`, weekdays numbered 1=Sun..7=Sat.
    Scheduler,
    /// `min hour dom month dow`, weekdays numbered 0=Sun..6=Sat (7 = Sun).
    Crontab,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Scheduler => "scheduler",
            Dialect::Crontab => "crontab",
        }
    }

    /// Accepted raw token counts, as shown in error messages.
    pub(crate) fn arity_label(&self) -> &'static str {
        match self {
            Dialect::Scheduler => "6 or 7",
            Dialect::Crontab => "5",
        }
    }

    pub(crate) fn accepts_arity(&self, count: usize) -> bool {
        match self {
            Dialect::Scheduler => count == 6 || count == 7,
            Dialect::Crontab => count == 5,
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheduler" | "quartz" => Ok(Dialect::Scheduler),
            "crontab" | "cron" => Ok(Dialect::Crontab),
            other => Err(format!("unknown dialect: {other}")),
        }
    }
}

/// Field positions of the canonical (normalized) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Second,
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
    Year,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Second,
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
        Field::Year,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day-of-month",
            Field::Month => "month",
            Field::DayOfWeek => "day-of-week",
            Field::Year => "year",
        }
    }

    /// Smallest value of the field's domain. Day-of-week uses the canonical
    /// encoding, so its domain is 1..=7.
    pub fn min(&self) -> u32 {
        match self {
            Field::Second | Field::Minute | Field::Hour => 0,
            Field::DayOfMonth | Field::Month | Field::DayOfWeek => 1,
            Field::Year => 1970,
        }
    }

    pub fn max(&self) -> u32 {
        match self {
            Field::Second | Field::Minute => 59,
            Field::Hour => 23,
            Field::DayOfMonth => 31,
            Field::Month => 12,
            Field::DayOfWeek => 7,
            Field::Year => 2099,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// The base of a `base/step` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBase {
    /// `*/n`: starts at the field minimum.
    Wildcard,
    /// `a/n`: starts at `a`, no upper bound beyond the field's domain.
    From(u32),
    /// `a-b/n`: bounded on both ends.
    Range(u32, u32),
}

/// One parsed field expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldExpr {
    /// `*`
    Any,
    /// `?`: unconstrained, defers to the other day field.
    NoSpecific,
    Single(u32),
    /// Inclusive on both ends.
    Range(u32, u32),
    Step { base: StepBase, step: u32 },
    /// Comma-separated terms; matches when any term matches.
    List(Vec<FieldExpr>),
    /// `L` in the day-of-month field.
    LastDayOfMonth,
    /// `nW` in the day-of-month field. Matched as plain day `n`: the
    /// nearest-weekday shift is not applied.
    NearestWeekday(u32),
    /// A syntactically allowed token with no matching semantics (e.g. `2#3`,
    /// `L` outside the day field). Never matches.
    Unmatchable(String),
}

impl FieldExpr {
    /// True for `*` and `?`.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, FieldExpr::Any | FieldExpr::NoSpecific)
    }

    /// True when no value can ever satisfy this expression.
    pub fn is_unmatchable(&self) -> bool {
        match self {
            FieldExpr::Unmatchable(_) => true,
            FieldExpr::Range(a, b) => a > b,
            FieldExpr::Step {
                base: StepBase::Range(a, b),
                ..
            } => a > b,
            FieldExpr::List(terms) => terms.iter().all(FieldExpr::is_unmatchable),
            _ => false,
        }
    }

    /// Largest value this expression pins explicitly, if it is bounded.
    pub(crate) fn explicit_max(&self) -> Option<u32> {
        match self {
            FieldExpr::Single(v) | FieldExpr::NearestWeekday(v) => Some(*v),
            FieldExpr::Range(_, b) => Some(*b),
            FieldExpr::Step {
                base: StepBase::Range(_, b),
                ..
            } => Some(*b),
            FieldExpr::List(terms) => {
                let mut max = None;
                for term in terms {
                    max = max.max(Some(term.explicit_max()?));
                }
                max
            }
            _ => None,
        }
    }
}

/// A field's source token alongside its parsed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronField {
    pub source: String,
    pub expr: FieldExpr,
}

static ANY: FieldExpr = FieldExpr::Any;

/// A parsed cron expression. Immutable once constructed; parse once and
/// query it as often as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpression {
    pub(crate) raw: String,
    pub(crate) dialect: Dialect,
    /// `[second, minute, hour, day, month, weekday, year?]`
    pub(crate) fields: Vec<CronField>,
}

impl CronExpression {
    /// The original input, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The parsed field at `field`, or `None` for an absent year.
    pub fn field(&self, field: Field) -> Option<&CronField> {
        self.fields.get(field.index())
    }

    /// The expression at `field`; an absent year reads as `*`.
    pub fn expr(&self, field: Field) -> &FieldExpr {
        self.field(field).map(|f| &f.expr).unwrap_or(&ANY)
    }

    pub fn has_year(&self) -> bool {
        self.fields.len() == 7
    }
}
