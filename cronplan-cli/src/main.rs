use clap::Parser;
use cronplan::{CronExpression, Dialect};
use jiff::Zoned;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cronplan", about = "Validate, describe and preview cron expressions", version)]
struct Cli {
    /// Cron expression: 5 fields (crontab) or 6-7 fields (scheduler style)
    expression: Option<String>,

    /// Number of occurrences to show
    #[arg(short, long, default_value = "1")]
    n: u32,

    /// Force a dialect instead of detecting it from the field count
    #[arg(long, value_parser = parse_dialect)]
    dialect: Option<Dialect>,

    /// Start instant (ISO 8601 zoned datetime). Defaults to now.
    #[arg(long)]
    from: Option<String>,

    /// End of range for --from (ISO 8601). Shows all occurrences in (from, to].
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate expression without computing
    #[arg(long)]
    check: bool,

    /// Print an English description of the schedule
    #[arg(long)]
    describe: bool,
}

fn parse_dialect(s: &str) -> Result<Dialect, String> {
    s.parse()
}

fn parse_instant(flag: &str, s: &str) -> Zoned {
    match s.parse() {
        Ok(z) => z,
        Err(e) => {
            eprintln!("error: invalid --{flag} datetime: {e}");
            process::exit(1);
        }
    }
}

fn print_results(results: &[Zoned], json: bool) {
    if json {
        let iso_strings: Vec<String> = results.iter().map(|z| z.to_string()).collect();
        match serde_json::to_string(&iso_strings) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
    } else {
        for z in results {
            println!("{z}");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = match cli.expression {
        Some(ref expr) => expr.as_str(),
        None => {
            eprintln!("error: no expression provided");
            process::exit(2);
        }
    };

    let dialect = cli.dialect.unwrap_or_else(|| cronplan::detect_dialect(raw));
    debug!(expression = raw, %dialect, "parsing");

    let expr = match CronExpression::parse_as(raw, dialect) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    if cli.check {
        println!("\u{2713} valid ({dialect})");
        process::exit(0);
    }

    if cli.describe {
        if cli.json {
            match serde_json::to_string_pretty(&expr) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: failed to serialize: {e}");
                    process::exit(1);
                }
            }
        } else {
            println!("{}", expr.describe());
        }
        process::exit(0);
    }

    let from = match cli.from {
        Some(ref s) => parse_instant("from", s),
        None => Zoned::now(),
    };

    let results: Vec<Zoned> = if let Some(ref to_str) = cli.to {
        let to = parse_instant("to", to_str);
        match expr.between(&from, &to).collect::<Result<Vec<_>, _>>() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e.display_rich());
                process::exit(1);
            }
        }
    } else {
        let mut n = cli.n;
        if n > 1000 {
            eprintln!("warning: capped at 1000 occurrences");
            n = 1000;
        }
        expr.next_n_from(&from, n as usize)
    };

    if results.is_empty() {
        eprintln!("no upcoming occurrences");
        process::exit(0);
    }

    print_results(&results, cli.json);
}
