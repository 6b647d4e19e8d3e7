//! Dialect detection and normalization into the 6/7-field canonical form.

use crate::ast::Dialect;
use crate::error::Span;

/// Whitespace-separated tokens of `raw` with their byte spans.
pub(crate) fn tokens(raw: &str) -> Vec<(Span, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in raw.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                out.push((Span::new(s, i), &raw[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((Span::new(s, raw.len()), &raw[s..]));
    }
    out
}

/// Infer the dialect from the token count: exactly 5 is crontab, anything
/// else is scheduler style (bad counts are left for validation to reject).
pub fn detect(raw: &str) -> Dialect {
    if raw.split_whitespace().count() == 5 {
        Dialect::Crontab
    } else {
        Dialect::Scheduler
    }
}

/// Rewrite `raw` into the canonical field order. Crontab input gains a
/// leading `0` seconds field; scheduler input passes through unchanged.
/// Total: malformed input still comes back in best-effort form.
pub fn normalize(raw: &str, dialect: Dialect) -> String {
    match dialect {
        Dialect::Scheduler => raw.to_string(),
        Dialect::Crontab => {
            let fields: Vec<&str> = raw.split_whitespace().collect();
            if fields.is_empty() {
                "0".to_string()
            } else {
                format!("0 {}", fields.join(" "))
            }
        }
    }
}
