use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pipeline::{IssueNumber, LabelName, RepositoryUrl};

use super::*;

const TOKEN: &str = "test-token";

fn issue_list_body(uri: &str) -> serde_json::Value {
    json!([
        {
            "repository_url": format!("{uri}/repos/acme/widgets"),
            "number": 42,
            "title": "Crash on startup",
            "body": "Steps to reproduce... /kind bug",
            "updated_at": "2024-05-01T12:00:00Z",
            "labels": [{"name": "triage"}]
        },
        {
            "repository_url": format!("{uri}/repos/acme/widgets"),
            "number": 43,
            "title": "Add dark mode",
            "body": null,
            "updated_at": "2024-05-01T13:00:00Z",
            "labels": [],
            "pull_request": {"url": format!("{uri}/repos/acme/widgets/pulls/43")}
        }
    ])
}

#[tokio::test]
async fn list_issues_parses_the_wire_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .and(header("authorization", format!("Bearer {TOKEN}")))
        .and(header("accept", ACCEPT_ISSUE_LIST))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_list_body(&server.uri())))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::for_repository(&server.uri(), "acme", "widgets", TOKEN).unwrap();
    let issues = client.list_issues().await.unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, IssueNumber::new(42));
    assert!(!issues[0].is_pull_request());
    assert!(issues[1].is_pull_request());
}

#[tokio::test]
async fn list_issues_maps_non_success_status_to_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::for_repository(&server.uri(), "acme", "widgets", TOKEN).unwrap();
    let err = client.list_issues().await.unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 500 }));
}

#[tokio::test]
async fn list_issues_rejects_a_body_that_is_not_an_issue_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "rate limited"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::for_repository(&server.uri(), "acme", "widgets", TOKEN).unwrap();
    let err = client.list_issues().await.unwrap_err();

    assert!(matches!(err, FetchError::Malformed { .. }));
}

#[tokio::test]
async fn list_issues_reports_unreachable_upstream_as_transport_error() {
    // Nothing listens on this port.
    let client = GitHubClient::new("http://127.0.0.1:9/issues", TOKEN).unwrap();
    let err = client.list_issues().await.unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }));
}

fn label_request(uri: &str) -> AddLabelRequest {
    AddLabelRequest {
        url: RepositoryUrl::new(format!("{uri}/repos/acme/widgets")).unwrap(),
        number: IssueNumber::new(42),
        label: LabelName::new("bug").unwrap(),
    }
}

#[tokio::test]
async fn add_label_posts_the_exact_mutation_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues/42/labels"))
        .and(header("authorization", format!("Bearer {TOKEN}")))
        .and(header("accept", ACCEPT_LABELS))
        .and(body_json(json!({"labels": ["bug"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(format!("{}/issues", server.uri()), TOKEN).unwrap();
    client.add_label(&label_request(&server.uri())).await.unwrap();
}

#[tokio::test]
async fn add_label_accepts_any_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues/42/labels"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(format!("{}/issues", server.uri()), TOKEN).unwrap();
    client.add_label(&label_request(&server.uri())).await.unwrap();
}

#[tokio::test]
async fn add_label_makes_exactly_one_attempt_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/acme/widgets/issues/42/labels"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = GitHubClient::new(format!("{}/issues", server.uri()), TOKEN).unwrap();
    let err = client
        .add_label(&label_request(&server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplyError::Status { status: 404 }));
    // Mock expectation (exactly one request) is verified on drop.
}
