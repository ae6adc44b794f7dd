//! End-to-end pipeline tests against mock YouTube and Groq servers.
//!
//! Each test wires a real RunController to wiremock endpoints and then
//! asserts on the durable artifacts: the NDJSON detection log and the
//! final JSON report.

use std::path::PathBuf;
use std::time::Duration;

use botsweep::config::{GroqConfig, YouTubeConfig};
use botsweep::domain::ConfirmedBot;
use botsweep::pipeline::{Classifier, Crawler, ResultSink, RunController, RunSummary, Validator};
use botsweep::youtube::YouTubeClient;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestRun {
    dir: TempDir,
    log_path: PathBuf,
    report_path: PathBuf,
}

impl TestRun {
    fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let log_path = dir.path().join("detected_bots.jsonl");
        let report_path = dir.path().join("detected_bots_report.json");
        Self {
            dir,
            log_path,
            report_path,
        }
    }

    async fn execute(
        &self,
        youtube_server: &MockServer,
        groq_server: &MockServer,
        queries: &[&str],
    ) -> RunSummary {
        let http = reqwest::Client::new();
        let youtube = std::sync::Arc::new(YouTubeClient::new(
            http.clone(),
            YouTubeConfig {
                api_key: Some("test-yt-key".into()),
                base_url: youtube_server.uri(),
            },
            10,
        ));
        let groq = std::sync::Arc::new(botsweep::ai::GroqClient::new(
            http,
            GroqConfig {
                api_key: Some("test-groq-key".into()),
                model: "llama-3.1-8b-instant".into(),
                base_url: groq_server.uri(),
            },
        ));

        let sink = ResultSink::open(self.log_path.clone(), self.report_path.clone())
            .await
            .expect("sink open");

        RunController::new(
            Crawler::new(youtube),
            Classifier::new(groq.clone()),
            Validator::new(groq),
            sink,
            queries.iter().map(|q| q.to_string()).collect(),
            Duration::ZERO,
        )
        .run()
        .await
        .expect("run")
    }

    fn log_lines(&self) -> Vec<ConfirmedBot> {
        let contents = std::fs::read_to_string(&self.log_path).expect("log readable");
        contents
            .lines()
            .map(|line| serde_json::from_str(line).expect("log line decodes"))
            .collect()
    }

    fn report(&self) -> Vec<ConfirmedBot> {
        let contents = std::fs::read_to_string(&self.report_path).expect("report readable");
        serde_json::from_str(&contents).expect("report is a JSON array")
    }
}

async fn mock_search(server: &MockServer, query: &str, channel_ids: &[&str]) {
    let items: Vec<Value> = channel_ids
        .iter()
        .map(|id| json!({"id": {"kind": "youtube#channel", "channelId": id}}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": items})))
        .mount(server)
        .await;
}

async fn mock_channel(server: &MockServer, id: &str, title: &str, videos: u64, views: u64) {
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": id,
                "snippet": {"title": title, "description": "channel under test"},
                "statistics": {
                    "subscriberCount": "10",
                    "videoCount": videos.to_string(),
                    "viewCount": views.to_string()
                }
            }]
        })))
        .mount(server)
        .await;
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(json!({"choices": [{"message": {"content": content}}]}))
}

async fn mock_classification(server: &MockServer, verdict: Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Analyze this YouTube channel"))
        .respond_with(completion(&verdict.to_string()))
        .mount(server)
        .await;
}

fn spam_verdict() -> Value {
    json!({
        "is_spam_bot": true,
        "confidence": 0.93,
        "bot_type": "crypto_scam",
        "reasoning": "generator lure with no real uploads",
        "risk_level": "high"
    })
}

#[tokio::test]
async fn heuristic_confirms_without_second_inference_call() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "free bitcoin", &["UC1"]).await;
    mock_channel(&youtube, "UC1", "Free Bitcoin Generator", 2, 50_000).await;
    mock_classification(&groq, spam_verdict()).await;

    // The heuristic (few videos, high views) must make the re-evaluation
    // prompt unnecessary.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(completion("{}"))
        .expect(0)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["free bitcoin"]).await;

    assert_eq!(summary.total_analyzed, 1);
    assert_eq!(summary.total_confirmed, 1);
    assert!(!summary.quota_exhausted);

    let logged = run.log_lines();
    let reported = run.report();
    assert_eq!(logged.len(), 1);
    assert_eq!(reported.len(), 1);
    assert_eq!(logged[0].channel.channel_id, "UC1");
    assert!(logged[0].validation.confirmed);
    assert_eq!(
        logged[0].validation.reasoning,
        "Heuristic: very few videos with high views."
    );
}

#[tokio::test]
async fn failed_second_call_rejects_the_candidate() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "spam bot", &["UC2"]).await;
    mock_channel(&youtube, "UC2", "Suspicious Uploads", 50, 200_000).await;
    mock_classification(&groq, spam_verdict()).await;

    // Heuristic cannot fire at 50 videos, so the validator must call out
    // and the failure must reject rather than confirm.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["spam bot"]).await;

    assert_eq!(summary.total_analyzed, 1);
    assert_eq!(summary.total_confirmed, 0);
    assert!(run.log_lines().is_empty());
    assert!(run.report().is_empty());
}

#[tokio::test]
async fn second_call_can_confirm_when_heuristic_misses() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "sub4sub", &["UC3"]).await;
    mock_channel(&youtube, "UC3", "Sub4Sub Central", 30, 5_000).await;
    mock_classification(&groq, spam_verdict()).await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(completion(
            &json!({
                "is_valid_bot": true,
                "validation_reasoning": "identical upload cadence and templated titles"
            })
            .to_string(),
        ))
        .expect(1)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["sub4sub"]).await;

    assert_eq!(summary.total_confirmed, 1);
    let logged = run.log_lines();
    assert_eq!(
        logged[0].validation.reasoning,
        "identical upload cadence and templated titles"
    );
}

#[tokio::test]
async fn reply_without_json_is_treated_as_clean() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "fake account", &["UC4"]).await;
    mock_channel(&youtube, "UC4", "Odd Channel", 2, 50_000).await;

    // No braces anywhere in the reply: classification degrades to
    // "not spam" and the validator must never be consulted.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Analyze this YouTube channel"))
        .respond_with(completion("This looks like spam to me, honestly."))
        .mount(&groq)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(completion("{}"))
        .expect(0)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["fake account"]).await;

    assert_eq!(summary.total_analyzed, 1);
    assert_eq!(summary.total_confirmed, 0);
    assert!(run.log_lines().is_empty());
    assert!(run.report().is_empty());
}

#[tokio::test]
async fn out_of_range_confidence_is_not_trusted() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "crypto hack", &["UC6"]).await;
    mock_channel(&youtube, "UC6", "Crypto Hack Central", 2, 50_000).await;

    // A decoded verdict with confidence outside [0, 1] must count as a
    // parse failure, so the candidate ends clean with no validator call
    // even though the reply says spam.
    mock_classification(
        &groq,
        json!({
            "is_spam_bot": true,
            "confidence": 1.5,
            "bot_type": "crypto_scam",
            "reasoning": "looks automated",
            "risk_level": "high"
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(completion("{}"))
        .expect(0)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["crypto hack"]).await;

    assert_eq!(summary.total_analyzed, 1);
    assert_eq!(summary.total_confirmed, 0);
    assert!(run.log_lines().is_empty());
    assert!(run.report().is_empty());
}

#[tokio::test]
async fn negative_verdict_skips_validation() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "follow back", &["UC5"]).await;
    mock_channel(&youtube, "UC5", "Ordinary Vlogger", 2, 50_000).await;
    mock_classification(
        &groq,
        json!({
            "is_spam_bot": false,
            "confidence": 0.2,
            "bot_type": "general_spam",
            "reasoning": "normal personal channel",
            "risk_level": "low"
        }),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Re-evaluate this YouTube channel"))
        .respond_with(completion("{}"))
        .expect(0)
        .mount(&groq)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["follow back"]).await;

    assert_eq!(summary.total_analyzed, 1);
    assert!(run.log_lines().is_empty());
}

#[tokio::test]
async fn quota_exhaustion_stops_crawl_but_keeps_confirmations() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "free bitcoin", &["UC1"]).await;
    mock_channel(&youtube, "UC1", "Free Bitcoin Generator", 2, 50_000).await;
    mock_classification(&groq, spam_verdict()).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "crypto hack"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "The request cannot be completed because you have exceeded your quota.",
                "errors": [{"reason": "quotaExceeded"}]
            }
        })))
        .mount(&youtube)
        .await;

    // Nothing after the quota failure may be issued.
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "spam account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&youtube)
        .await;

    let run = TestRun::new();
    let summary = run
        .execute(
            &youtube,
            &groq,
            &["free bitcoin", "crypto hack", "spam account"],
        )
        .await;

    assert!(summary.quota_exhausted);
    assert_eq!(summary.total_confirmed, 1);

    let logged = run.log_lines();
    let reported = run.report();
    assert_eq!(logged.len(), 1);
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].channel.found_via_query, "free bitcoin");
}

#[tokio::test]
async fn transient_search_error_skips_only_the_failing_query() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "free money"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "Bad request",
                "errors": [{"reason": "invalidParameter"}]
            }
        })))
        .mount(&youtube)
        .await;
    mock_search(&youtube, "free bitcoin", &["UC1"]).await;
    mock_channel(&youtube, "UC1", "Free Bitcoin Generator", 2, 50_000).await;
    mock_classification(&groq, spam_verdict()).await;

    let run = TestRun::new();
    let summary = run
        .execute(&youtube, &groq, &["free money", "free bitcoin"])
        .await;

    assert!(!summary.quota_exhausted);
    assert_eq!(summary.total_confirmed, 1);
    assert_eq!(run.report()[0].channel.found_via_query, "free bitcoin");
}

#[tokio::test]
async fn missing_detail_item_is_skipped_silently() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "spam bot", &["UCGONE"]).await;
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("id", "UCGONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&youtube)
        .await;

    let run = TestRun::new();
    let summary = run.execute(&youtube, &groq, &["spam bot"]).await;

    assert_eq!(summary.total_analyzed, 0);
    assert!(run.log_lines().is_empty());
    assert!(run.report().is_empty());
}

#[tokio::test]
async fn run_truncates_previous_append_log() {
    let youtube = MockServer::start().await;
    let groq = MockServer::start().await;

    mock_search(&youtube, "spam bot", &[]).await;

    let run = TestRun::new();
    std::fs::write(&run.log_path, "leftover from a previous run\n").expect("seed log");

    let summary = run.execute(&youtube, &groq, &["spam bot"]).await;

    assert_eq!(summary.total_analyzed, 0);
    assert!(run.log_lines().is_empty());
    assert!(run.report().is_empty());
    // Keep the tempdir alive through the assertions.
    drop(run.dir);
}
