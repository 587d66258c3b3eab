use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// A suite configuration for the smokebox runner.
/// Contains the target base URL, request defaults, fixtures and the ordered
/// list of checks to execute against the deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct SuiteConfig {
    /// The base URL of the deployment under test, e.g. `https://app.example.com`.
    pub base_url: String,

    /// Path prefix prepended to every check path, e.g. `/api`.
    #[serde(default)]
    pub api_prefix: String,

    /// Per-request timeout in seconds. A request that exceeds it becomes a
    /// failing result, never an aborted run.
    #[serde(default = "default_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Fraction of checks that must pass for the suite to exit 0.
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,

    /// Accept self-signed or otherwise invalid TLS certificates, for probing
    /// staging deployments.
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Known IDs and credentials, substituted into `{placeholder}` tokens in
    /// check paths and header values.
    #[serde(default)]
    pub fixtures: HashMap<String, String>,

    /// Report grouping rules, matched against check names.
    #[serde(default)]
    pub categories: Vec<CategoryRule>,

    /// The checks to run, in declaration order.
    pub checks: Vec<CheckConfig>,
}

/// A single HTTP check: one request plus the expectations that classify it.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Name of the check, used in report lines and category matching.
    pub name: String,

    /// Request path, joined onto `api_prefix`. May contain `{fixture}` tokens.
    pub path: String,

    /// HTTP method. Defaults to GET.
    #[serde(default = "default_method")]
    pub method: String,

    /// The HTTP status codes treated as a non-failure for this check.
    /// Often broader than a single code: `[200, 401, 403]` means "reachable
    /// and enforcing auth". Defaults to 200 if not specified.
    #[serde(default = "default_status_codes")]
    pub accepted_status_codes: Vec<u16>,

    /// Wall-clock deadline in seconds. The bound is inclusive: a check that
    /// finishes exactly at the deadline still passes.
    pub max_duration_seconds: Option<f64>,

    /// Expected shape of the JSON response body.
    pub expect: Option<ShapeExpectation>,

    /// Extra request headers. Values may contain `{fixture}` tokens.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// JSON request body, sent as-is.
    pub body: Option<serde_yaml::Value>,

    /// Number of identical requests fired in parallel. Each request gets its
    /// own result slot. Defaults to 1 (sequential).
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// A JSON body expectation: a top-level key that must hold a list, and fields
/// that must be present on the first record when the list is non-empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ShapeExpectation {
    pub list_key: String,

    #[serde(default)]
    pub required_fields: Vec<String>,
}

/// A report category: a check name belongs to the first rule whose any
/// substring matches it.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub match_any: Vec<String>,
}

fn default_status_codes() -> Vec<u16> {
    vec![200]
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_success_threshold() -> f64 {
    0.7
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_concurrency() -> usize {
    1
}

/// Replaces `{key}` tokens with the matching fixture value.
/// Tokens without a fixture are left untouched.
pub fn apply_fixtures(input: &str, fixtures: &HashMap<String, String>) -> String {
    let mut out = input.to_string();
    for (key, value) in fixtures {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

pub type Config = BTreeMap<String, SuiteConfig>;
