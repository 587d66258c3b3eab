use crate::config::suite_config::CategoryRule;
use crate::http_probe::result::ProbeResult;

use super::{RunSummary, categorize};

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

fn format_elapsed(duration: Option<f64>) -> String {
    duration
        .map(|d| format!("{:.2}ms", d * 1000.0))
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_status(status: Option<u16>) -> String {
    status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One verdict line per finished slot, printed as results arrive.
pub fn print_check_line(result: &ProbeResult, width: usize) {
    let name = to_fixed_width(&result.name, width);
    let status = format_status(result.http_status);
    let elapsed = format_elapsed(result.duration);
    if result.success {
        println!("[{name}] ✅ Status: {status}, Elapsed: {elapsed}");
    } else {
        println!(
            "[{name}] ❌ Status: {status}, Elapsed: {elapsed}, {}",
            result.details
        );
    }
}

/// Deterministic end-of-suite rendering: counts, duration stats, category
/// breakdown, then the results grouped by verdict.
pub fn print_report(
    suite_name: &str,
    summary: &RunSummary,
    results: &[ProbeResult],
    rules: &[CategoryRule],
) {
    println!();
    println!(
        "=== {suite_name}: {}/{} checks passed, {} failed ({:.1}%) ===",
        summary.passed, summary.total, summary.failed, summary.success_rate
    );
    if let Some(last) = results.last() {
        println!(
            "Completed at {}",
            last.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    if let (Some(min), Some(avg), Some(max)) = (
        summary.min_duration,
        summary.avg_duration,
        summary.max_duration,
    ) {
        println!(
            "Durations: min {:.2}ms, avg {:.2}ms, max {:.2}ms",
            min * 1000.0,
            avg * 1000.0,
            max * 1000.0
        );
    }

    if !rules.is_empty() {
        println!("By category:");
        let category_names = rules
            .iter()
            .map(|rule| rule.name.as_str())
            .chain(std::iter::once("other"));
        for category in category_names {
            let in_category: Vec<&ProbeResult> = results
                .iter()
                .filter(|r| categorize(rules, &r.name) == category)
                .collect();
            if in_category.is_empty() {
                continue;
            }
            let passed = in_category.iter().filter(|r| r.success).count();
            println!("  {category}: {passed}/{} passed", in_category.len());
        }
    }

    let passed: Vec<&ProbeResult> = results.iter().filter(|r| r.success).collect();
    if !passed.is_empty() {
        println!("Passed:");
        for result in passed {
            println!("  ✅ {}", result.name);
        }
    }

    let failed: Vec<&ProbeResult> = results.iter().filter(|r| !r.success).collect();
    if !failed.is_empty() {
        println!("Failed:");
        for result in failed {
            println!("  ❌ {}: {}", result.name, result.details);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_fixed_width_pads_and_truncates() {
        assert_eq!(to_fixed_width("abc", 5), "abc  ");
        assert_eq!(to_fixed_width("abcdefgh", 5), "abcde");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Some(0.25)), "250.00ms");
        assert_eq!(format_elapsed(None), "N/A");
    }
}
