use std::time::Duration;

use reqwest::Client;

pub mod config;
pub mod http_probe;
pub mod report;

use config::app_config::load_config;
use config::suite_config::SuiteConfig;
use http_probe::prelude::*;

fn build_client(suite: &SuiteConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(suite.request_timeout_seconds))
        .danger_accept_invalid_certs(suite.accept_invalid_certs)
        .user_agent("smokebox-probe/1.0")
        .build()
        .expect("Failed to create client")
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let app_config = load_config();

    let mut exit = 0;

    for (suite_name, suite) in app_config.config {
        println!("=== {suite_name} @ {} ===", suite.base_url);

        let client = build_client(&suite);
        let threshold = suite.success_threshold;
        let categories = suite.categories.clone();

        let runner = ProbeRunner::new(client, suite, app_config.max_name_width);
        let results = runner.run_all().await;

        let summary = report::summarize(&results);
        report::console::print_report(&suite_name, &summary, &results, &categories);

        if report::exit_code(&summary, threshold) != 0 {
            log::warn!(
                "Suite '{suite_name}' finished at {:.1}%, below its {:.0}% threshold",
                summary.success_rate,
                threshold * 100.0
            );
            exit = 1;
        }
    }

    std::process::exit(exit);
}
