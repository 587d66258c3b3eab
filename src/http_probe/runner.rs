use std::sync::Arc;

use reqwest::Client;

use crate::config::suite_config::SuiteConfig;
use crate::report::console;

use super::probe::probe_check;
use super::result::ProbeResult;

/// Executes the checks of one suite against a live deployment.
/// Checks run sequentially in declaration order; a check with a concurrency
/// above 1 fans out into spawned tasks, one independent result slot each.
pub struct ProbeRunner {
    client: Client,
    suite: Arc<SuiteConfig>,
    name_width: usize,
}

impl ProbeRunner {
    pub fn new(client: Client, suite: SuiteConfig, name_width: usize) -> Self {
        Self {
            client,
            suite: Arc::new(suite),
            name_width,
        }
    }

    /// Runs every configured check and returns one result per slot.
    /// A failing check never stops the ones after it.
    pub async fn run_all(&self) -> Vec<ProbeResult> {
        let mut results = Vec::new();

        for check in &self.suite.checks {
            let slots = check.concurrency.max(1);

            if slots > 1 {
                let mut handles = Vec::new();

                for slot in 1..=slots {
                    let client = self.client.clone();
                    let suite = Arc::clone(&self.suite);
                    let check = check.clone();
                    let slot_name = format!("{} [{slot}/{slots}]", check.name);

                    let handle = tokio::spawn(async move {
                        probe_check(&client, &suite, &check, slot_name).await
                    });
                    handles.push((slot, handle));
                }

                for (slot, handle) in handles {
                    let result = match handle.await {
                        Ok(result) => result,
                        Err(e) => ProbeResult::failed(
                            format!("{} [{slot}/{slots}]", check.name),
                            format!("probe task failed: {e}"),
                            None,
                            None,
                        ),
                    };
                    console::print_check_line(&result, self.name_width);
                    results.push(result);
                }
            } else {
                let result =
                    probe_check(&self.client, &self.suite, check, check.name.clone()).await;
                console::print_check_line(&result, self.name_width);
                results.push(result);
            }
        }

        results
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner_for(base_url: &str, checks_yaml: &str) -> ProbeRunner {
        let yaml = format!(
            r#"
            base_url: {base_url}
            api_prefix: /api
            checks:
{checks_yaml}
            "#
        );
        let suite: SuiteConfig = serde_yaml::from_str(&yaml).expect("Invalid YAML");
        ProbeRunner::new(Client::new(), suite, 20)
    }

    #[tokio::test]
    async fn test_one_result_per_check_even_when_some_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/offers"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/campaigns"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"campaigns": []})))
            .mount(&server)
            .await;

        let runner = runner_for(
            &server.uri(),
            r#"
                - name: health endpoint
                  path: /health
                - name: offers list
                  path: /offers
                - name: campaigns list
                  path: /campaigns
                  expect:
                      list_key: campaigns
            "#,
        );
        let results = runner.run_all().await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "health endpoint");
        assert!(results[0].success);
        assert!(!results[1].success, "500 must fail the offers check");
        // the failing check does not stop the one after it
        assert!(results[2].success, "details: {}", results[2].details);
    }

    #[tokio::test]
    async fn test_concurrent_check_produces_independent_slots() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/offers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"offers": []})))
            .mount(&server)
            .await;

        let runner = runner_for(
            &server.uri(),
            r#"
                - name: offers under load
                  path: /offers
                  concurrency: 4
            "#,
        );
        let results = runner.run_all().await;

        assert_eq!(results.len(), 4);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.name, format!("offers under load [{}/4]", i + 1));
            assert!(result.success, "details: {}", result.details);
        }
    }

    #[tokio::test]
    async fn test_unreachable_target_still_yields_results() {
        // nothing listens on this port
        let runner = runner_for(
            "http://127.0.0.1:1",
            r#"
                - name: health endpoint
                  path: /health
            "#,
        );
        let results = runner.run_all().await;

        assert_eq!(results.len(), 1);
        assert!(!results[0].success);
        assert!(results[0].http_status.is_none());
        assert!(!results[0].details.is_empty());
    }
}
