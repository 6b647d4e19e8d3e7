#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Validation, parsing and description never panic
        let _ = cronplan::is_valid(s);
        let _ = cronplan::describe(s);
        if let Ok(expr) = cronplan::CronExpression::parse(s) {
            let reparsed = cronplan::CronExpression::parse(&expr.to_string());
            assert!(reparsed.is_ok(), "normalized form failed to parse: {expr}");
        }
    }
});
