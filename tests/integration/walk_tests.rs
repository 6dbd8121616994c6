//! Integration tests for the walker
//!
//! These tests use wiremock to stand in for the encyclopedia site and test
//! fetching, resolution and output end-to-end.

use philo_walk::config::Config;
use philo_walk::crawler::{walk, FetchError, HttpPageSource, PageSource};
use philo_walk::state::{FailureReason, Outcome};
use philo_walk::ArticleRef;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Article markup whose first body link (outside the aside) is `next`
fn article_page(next: &str) -> String {
    format!(
        r#"<html><head><title>Article</title></head><body>
        <div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
        <div id="mw-content-text"><div class="mw-parser-output">
        <p>This article (see <a href="/wiki/Trap">trap</a>) is about <a href="/wiki/{}">something</a>.</p>
        </div></div></body></html>"#,
        next
    )
}

fn dead_end_page() -> String {
    r#"<html><body><div id="mw-content-text"><div class="mw-parser-output">
    <p>No links here.</p></div></div></body></html>"#
        .to_string()
}

async fn mount_page(server: &MockServer, title: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", title)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts one-shot random redirects, served in the given order
async fn mount_randoms(server: &MockServer, titles: &[&str]) {
    for title in titles {
        Mock::given(method("GET"))
            .and(path("/wiki/Special:Random"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("/wiki/{}", title).as_str()),
            )
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

fn create_test_config(base_url: &str, dir: &std::path::Path, trials: u32) -> Config {
    let mut config = Config::default();
    config.site.base_url = base_url.to_string();
    config.walker.total_trials = trials;
    config.walker.concurrency = 1;
    config.walker.max_attempts = Some(trials * 2);
    config.output.csv_path = dir.join("data.csv").display().to_string();
    config.output.chart_path = dir.join("plot.svg").display().to_string();
    config.output.summary_path = dir.join("summary.md").display().to_string();
    config
}

#[tokio::test]
async fn test_full_walk_writes_outputs() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_randoms(&server, &["Alpha", "Beta", "Gamma"]).await;
    // Alpha is only ever fetched as the landing page of its draw
    Mock::given(method("GET"))
        .and(path("/wiki/Alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_page("Beta")))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "Beta", article_page("Philosophy")).await;
    mount_page(&server, "Gamma", dead_end_page()).await;

    // The target is never fetched
    Mock::given(method("GET"))
        .and(path("/wiki/Philosophy"))
        .respond_with(ResponseTemplate::new(200).set_body_string(dead_end_page()))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&base_url, dir.path(), 3);

    let report = walk(&config, "test-hash".to_string())
        .await
        .expect("Walk failed");

    assert_eq!(report.total_recorded(), 3);
    assert_eq!(report.successes, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(report.histogram.get(&1), Some(&1));
    assert_eq!(report.histogram.get(&2), Some(&1));

    let csv = std::fs::read_to_string(&config.output.csv_path).expect("Missing CSV");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "url,clicks".to_string(),
            format!("{}/wiki/Alpha,2", base_url),
            format!("{}/wiki/Beta,1", base_url),
            format!("{}/wiki/Gamma,-1", base_url),
        ]
    );

    let svg = std::fs::read_to_string(&config.output.chart_path).expect("Missing chart");
    assert_eq!(svg.matches("fill=\"steelblue\"").count(), 2);

    let summary = std::fs::read_to_string(&config.output.summary_path).expect("Missing summary");
    assert!(summary.contains("- **Config Hash**: test-hash"));
    assert!(summary.contains("| No Link | 1 |"));
}

#[tokio::test]
async fn test_broken_chain_is_fetch_failure() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_randoms(&server, &["Alpha"]).await;
    // Linked article is not mounted, so the mock server answers 404
    mount_page(&server, "Alpha", article_page("Missing")).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&base_url, dir.path(), 1);

    let report = walk(&config, String::new()).await.expect("Walk failed");
    assert_eq!(report.failures, 1);
    assert_eq!(
        report.records[0].outcome,
        Outcome::Failure(FailureReason::FetchFailed)
    );
}

#[tokio::test]
async fn test_random_article_follows_redirect() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    mount_randoms(&server, &["Some_Article"]).await;
    mount_page(&server, "Some_Article", dead_end_page()).await;

    let config = create_test_config(&base_url, std::path::Path::new("."), 1);
    let source = HttpPageSource::from_config(&config).expect("Failed to build source");

    let landing = source.random_article().await.expect("Random draw failed");
    assert_eq!(
        landing.article.as_str(),
        format!("{}/wiki/Some_Article", base_url)
    );
    assert!(landing.body.contains("No links here."));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/Flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "Flaky", dead_end_page()).await;

    let mut config = create_test_config(&base_url, std::path::Path::new("."), 1);
    config.walker.fetch_retries = 2;
    config.walker.retry_delay_ms = 10;
    let source = HttpPageSource::from_config(&config).expect("Failed to build source");

    let article = ArticleRef::parse(&format!("{}/wiki/Flaky", base_url)).unwrap();
    let body = source.fetch_page(&article).await.expect("Retry did not succeed");
    assert!(body.contains("No links here."));
}

#[tokio::test]
async fn test_without_retries_server_error_fails() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/Down"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&base_url, std::path::Path::new("."), 1);
    let source = HttpPageSource::from_config(&config).expect("Failed to build source");

    let article = ArticleRef::parse(&format!("{}/wiki/Down", base_url)).unwrap();
    let result = source.fetch_page(&article).await;
    assert!(matches!(
        result,
        Err(FetchError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = create_test_config(&base_url, std::path::Path::new("."), 1);
    config.walker.fetch_retries = 3;
    config.walker.retry_delay_ms = 10;
    let source = HttpPageSource::from_config(&config).expect("Failed to build source");

    let article = ArticleRef::parse(&format!("{}/wiki/Gone", base_url)).unwrap();
    let result = source.fetch_page(&article).await;
    assert!(matches!(
        result,
        Err(FetchError::Status { status: 404, .. })
    ));
}
