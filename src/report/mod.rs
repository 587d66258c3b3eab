pub mod console;

use crate::config::suite_config::CategoryRule;
use crate::http_probe::result::ProbeResult;

/// Aggregate outcome of one suite run, derived from the result log.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Success percentage in the 0.0 to 100.0 range.
    pub success_rate: f64,
    pub min_duration: Option<f64>,
    pub avg_duration: Option<f64>,
    pub max_duration: Option<f64>,
}

/// Pure aggregation over the result log. Duration stats only cover results
/// that recorded a duration.
pub fn summarize(results: &[ProbeResult]) -> RunSummary {
    let total = results.len();
    let passed = results.iter().filter(|r| r.success).count();
    let failed = total - passed;
    let success_rate = if total == 0 {
        0.0
    } else {
        passed as f64 * 100.0 / total as f64
    };

    let durations: Vec<f64> = results.iter().filter_map(|r| r.duration).collect();
    let (min_duration, avg_duration, max_duration) = if durations.is_empty() {
        (None, None, None)
    } else {
        let min = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = durations.iter().sum::<f64>() / durations.len() as f64;
        (Some(min), Some(avg), Some(max))
    };

    RunSummary {
        total,
        passed,
        failed,
        success_rate,
        min_duration,
        avg_duration,
        max_duration,
    }
}

/// 0 when the success rate meets the threshold (a fraction, e.g. 0.7), 1 otherwise.
pub fn exit_code(summary: &RunSummary, threshold: f64) -> i32 {
    if summary.success_rate >= threshold * 100.0 {
        0
    } else {
        1
    }
}

/// Resolves the category of a check name: the first rule with a matching
/// substring wins, unmatched names fall into "other".
pub fn categorize<'a>(rules: &'a [CategoryRule], name: &str) -> &'a str {
    for rule in rules {
        if rule.match_any.iter().any(|needle| name.contains(needle.as_str())) {
            return &rule.name;
        }
    }
    "other"
}

#[cfg(test)]
mod test {
    use super::*;

    fn results(passed: usize, failed: usize) -> Vec<ProbeResult> {
        let mut results = Vec::new();
        for i in 0..passed {
            results.push(ProbeResult::passed(
                format!("check {i}"),
                "status 200".to_string(),
                Some(0.1 + i as f64 * 0.1),
                Some(200),
            ));
        }
        for i in 0..failed {
            results.push(ProbeResult::failed(
                format!("failing check {i}"),
                "unexpected status 500".to_string(),
                Some(0.3),
                Some(500),
            ));
        }
        results
    }

    #[test]
    fn test_summarize_counts_and_rate() {
        let summary = summarize(&results(7, 3));
        assert_eq!(summary.total, 10);
        assert_eq!(summary.passed, 7);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.success_rate, 70.0);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let log = results(4, 2);
        assert_eq!(summarize(&log), summarize(&log));
    }

    #[test]
    fn test_summarize_duration_stats() {
        let log = results(3, 0); // durations 0.1, 0.2, 0.3
        let summary = summarize(&log);
        assert_eq!(summary.min_duration, Some(0.1));
        let max = summary.max_duration.expect("no max");
        assert!((max - 0.3).abs() < 1e-9);
        let avg = summary.avg_duration.expect("no avg");
        assert!((avg - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_without_durations() {
        let log = vec![ProbeResult::failed(
            "broken check".to_string(),
            "invalid base URL".to_string(),
            None,
            None,
        )];
        let summary = summarize(&log);
        assert_eq!(summary.min_duration, None);
        assert_eq!(summary.avg_duration, None);
        assert_eq!(summary.max_duration, None);
    }

    #[test]
    fn test_exit_code_threshold_boundary() {
        // 7 of 10 meets a 0.7 threshold exactly
        let summary = summarize(&results(7, 3));
        assert_eq!(exit_code(&summary, 0.7), 0);

        // 6 of 10 falls below it
        let summary = summarize(&results(6, 4));
        assert_eq!(exit_code(&summary, 0.7), 1);
    }

    #[test]
    fn test_exit_code_empty_run_fails() {
        let summary = summarize(&[]);
        assert_eq!(exit_code(&summary, 0.7), 1);
    }

    #[test]
    fn test_categorize_first_match_wins() {
        let rules = vec![
            CategoryRule {
                name: "auth".to_string(),
                match_any: vec!["login".to_string(), "signup".to_string()],
            },
            CategoryRule {
                name: "offers".to_string(),
                match_any: vec!["offer".to_string()],
            },
        ];

        assert_eq!(categorize(&rules, "signup flow"), "auth");
        assert_eq!(categorize(&rules, "offers list"), "offers");
        // "login to accept offer" matches both rule sets, the first rule wins
        assert_eq!(categorize(&rules, "login to accept offer"), "auth");
        assert_eq!(categorize(&rules, "health endpoint"), "other");
    }
}
