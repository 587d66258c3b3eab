use std::time::Instant;

use reqwest::Method;
use url::Url;

use crate::config::suite_config::{CheckConfig, ShapeExpectation, SuiteConfig, apply_fixtures};

use super::report;
use super::result::ProbeResult;

pub fn status_accepted(accepted: &[u16], status: u16) -> bool {
    accepted.contains(&status)
}

/// The deadline is inclusive: elapsed time exactly at the limit passes.
pub fn within_deadline(elapsed: f64, max_duration_seconds: Option<f64>) -> bool {
    match max_duration_seconds {
        Some(max) => elapsed <= max,
        None => true,
    }
}

/// Verifies that the body carries the expected top-level list, and that the
/// first record has the required fields. An empty list satisfies the field
/// requirements vacuously.
pub fn check_shape(expect: &ShapeExpectation, body: &serde_json::Value) -> Result<(), String> {
    let value = body.get(&expect.list_key).ok_or_else(|| {
        format!(
            "response has no top-level key '{}': {}",
            expect.list_key,
            excerpt(body)
        )
    })?;

    let items = value.as_array().ok_or_else(|| {
        format!(
            "key '{}' does not hold a list: {}",
            expect.list_key,
            excerpt(value)
        )
    })?;

    if let Some(first) = items.first() {
        for field in &expect.required_fields {
            if first.get(field).is_none() {
                return Err(format!(
                    "first record in '{}' is missing field '{}': {}",
                    expect.list_key,
                    field,
                    excerpt(first)
                ));
            }
        }
    }

    Ok(())
}

fn excerpt(value: &serde_json::Value) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let rendered = value.to_string();
    let (truncated, _) = rendered.unicode_truncate(120);
    if truncated.len() < rendered.len() {
        format!("{truncated}...")
    } else {
        rendered
    }
}

fn join_url(suite: &SuiteConfig, path: &str) -> Result<Url, String> {
    let base = Url::parse(&suite.base_url)
        .map_err(|e| format!("invalid base URL '{}': {e}", suite.base_url))?;
    let full = format!("{}{}", suite.api_prefix.trim_end_matches('/'), path);
    base.join(&full)
        .map_err(|e| format!("cannot join '{full}' onto '{base}': {e}"))
}

/// Executes one configured check and classifies the outcome.
/// Never propagates an error: transport failures, non-accepted statuses,
/// slow responses and malformed bodies all become failing results whose
/// details carry the underlying error text.
pub async fn probe_check(
    client: &reqwest::Client,
    suite: &SuiteConfig,
    check: &CheckConfig,
    slot_name: String,
) -> ProbeResult {
    let path = apply_fixtures(&check.path, &suite.fixtures);
    let target = match join_url(suite, &path) {
        Ok(url) => url,
        Err(details) => return ProbeResult::failed(slot_name, details, None, None),
    };

    let method = match Method::from_bytes(check.method.to_uppercase().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            let details = format!("invalid HTTP method '{}'", check.method);
            return ProbeResult::failed(slot_name, details, None, None);
        }
    };

    let mut request = client.request(method, target);
    for (name, value) in &check.headers {
        request = request.header(name, apply_fixtures(value, &suite.fixtures));
    }
    if let Some(body) = &check.body {
        request = request.json(body);
    }

    let start = Instant::now();
    let response = request.send().await;
    let elapsed = start.elapsed().as_secs_f64();

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            let details = if e.is_timeout() {
                format!("timeout after {:.2}s: {}", elapsed, report(&e))
            } else {
                report(&e)
            };
            return ProbeResult::failed(slot_name, details, Some(elapsed), None);
        }
    };

    let status = response.status().as_u16();

    if !status_accepted(&check.accepted_status_codes, status) {
        let details = format!(
            "unexpected status {status} (accepted: {:?})",
            check.accepted_status_codes
        );
        return ProbeResult::failed(slot_name, details, Some(elapsed), Some(status));
    }

    if !within_deadline(elapsed, check.max_duration_seconds) {
        let details = format!(
            "too slow: {:.2}s over the {:.2}s deadline",
            elapsed,
            check.max_duration_seconds.unwrap_or_default()
        );
        return ProbeResult::failed(slot_name, details, Some(elapsed), Some(status));
    }

    if let Some(expect) = &check.expect {
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                let details = format!("invalid JSON body: {}", report(&e));
                return ProbeResult::failed(slot_name, details, Some(elapsed), Some(status));
            }
        };
        if let Err(details) = check_shape(expect, &body) {
            return ProbeResult::failed(slot_name, details, Some(elapsed), Some(status));
        }
    }

    ProbeResult::passed(
        slot_name,
        format!("status {status}"),
        Some(elapsed),
        Some(status),
    )
}
