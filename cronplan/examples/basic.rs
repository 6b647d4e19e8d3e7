//! Basic cronplan walkthrough: detect, validate, search, match, describe.

use cronplan::{CronExpression, Dialect};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let now: jiff::Zoned = "2025-06-15T08:00:00+00:00[UTC]".parse()?;

    // Crontab input is normalized to the six-field layout
    for raw in ["0 30 9 ? * MON-FRI", "30 9 * * 1-5"] {
        let expr: CronExpression = raw.parse()?;
        println!("{raw:<22} {:<9} -> {expr}", expr.dialect());
        println!("  {}", expr.describe());
        for dt in expr.next_n_from(&now, 3) {
            println!("  {dt}");
        }
    }

    // Matching a single instant
    let expr = CronExpression::parse("0 0 12 * * ?")?;
    let noon: jiff::Zoned = "2025-06-16T12:00:00+00:00[UTC]".parse()?;
    println!("\n{noon} matches '{}': {}", expr.raw(), expr.matches(&noon));

    // Validation never panics; errors point at the offending token
    println!("\nvalid: {}", cronplan::is_valid("0 0 25 * * ?"));
    if let Err(e) = CronExpression::parse_as("0 1$ * * *", Dialect::Crontab) {
        println!("{}", e.display_rich());
    }

    // Schedules that cannot fire come back empty
    let none = cronplan::next_occurrences_from("0 0 0 31 2 ?", 5, &now);
    println!("\nFeb 31 occurrences: {}", none.len());

    Ok(())
}
