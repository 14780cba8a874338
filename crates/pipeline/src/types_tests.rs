use chrono::{DateTime, Utc};

use super::*;

fn ts(value: &str) -> Timestamp {
    Timestamp::from_utc(
        DateTime::parse_from_rfc3339(value)
            .expect("test timestamp must be valid RFC 3339")
            .with_timezone(&Utc),
    )
}

fn request() -> AddLabelRequest {
    AddLabelRequest {
        url: RepositoryUrl::new("https://api.github.com/repos/acme/widgets").unwrap(),
        number: IssueNumber::new(42),
        label: LabelName::new("bug").unwrap(),
    }
}

#[test]
fn issue_deserialises_from_upstream_wire_form() {
    let raw = r#"{
        "repository_url": "https://api.github.com/repos/acme/widgets",
        "number": 42,
        "title": "Crash on startup",
        "body": "Steps to reproduce... /kind bug",
        "updated_at": "2024-05-01T12:00:00Z",
        "labels": [{"name": "triage", "color": "ededed"}],
        "state": "open",
        "comments": 3
    }"#;

    let issue: Issue = serde_json::from_str(raw).unwrap();

    assert_eq!(issue.number, IssueNumber::new(42));
    assert_eq!(
        issue.repository_url.as_str(),
        "https://api.github.com/repos/acme/widgets"
    );
    assert_eq!(issue.body.as_deref(), Some("Steps to reproduce... /kind bug"));
    assert_eq!(issue.updated_at, ts("2024-05-01T12:00:00Z"));
    assert_eq!(issue.labels, vec![Label { name: "triage".into() }]);
    assert!(!issue.is_pull_request());
}

#[test]
fn issue_tolerates_null_body_and_missing_labels() {
    let raw = r#"{
        "repository_url": "https://api.github.com/repos/acme/widgets",
        "number": 7,
        "title": "No body here",
        "body": null,
        "updated_at": "2024-05-01T12:00:00Z"
    }"#;

    let issue: Issue = serde_json::from_str(raw).unwrap();

    assert_eq!(issue.body, None);
    assert!(issue.labels.is_empty());
    assert!(!issue.is_pull_request());
}

#[test]
fn pull_request_reference_with_url_marks_a_pull_request() {
    let raw = r#"{
        "repository_url": "https://api.github.com/repos/acme/widgets",
        "number": 8,
        "title": "Add feature",
        "updated_at": "2024-05-01T12:00:00Z",
        "pull_request": {"url": "https://api.github.com/repos/acme/widgets/pulls/8"}
    }"#;

    let issue: Issue = serde_json::from_str(raw).unwrap();
    assert!(issue.is_pull_request());
}

#[test]
fn pull_request_reference_without_url_is_not_a_pull_request() {
    let issue = Issue {
        repository_url: RepositoryUrl::new("https://api.github.com/repos/acme/widgets").unwrap(),
        number: IssueNumber::new(9),
        title: String::new(),
        body: None,
        updated_at: ts("2024-05-01T12:00:00Z"),
        labels: Vec::new(),
        pull_request: Some(PullRequestRef { url: None }),
    };

    assert!(!issue.is_pull_request());
}

#[test]
fn has_label_matches_exact_names_only() {
    let issue = Issue {
        repository_url: RepositoryUrl::new("https://api.github.com/repos/acme/widgets").unwrap(),
        number: IssueNumber::new(10),
        title: String::new(),
        body: None,
        updated_at: ts("2024-05-01T12:00:00Z"),
        labels: vec![Label { name: "bug".into() }],
        pull_request: None,
    };

    assert!(issue.has_label(&LabelName::new("bug").unwrap()));
    assert!(!issue.has_label(&LabelName::new("Bug").unwrap()));
    assert!(!issue.has_label(&LabelName::new("enhancement").unwrap()));
}

#[test]
fn change_decision_derivation() {
    let first = ts("2024-05-01T12:00:00Z");
    let second = ts("2024-05-02T08:30:00Z");

    assert_eq!(ChangeDecision::derive(None, first), ChangeDecision::New);
    assert_eq!(
        ChangeDecision::derive(Some(first), first),
        ChangeDecision::Unchanged
    );
    assert_eq!(
        ChangeDecision::derive(Some(first), second),
        ChangeDecision::Changed
    );
}

#[test]
fn actionable_decisions_are_new_and_changed() {
    assert!(ChangeDecision::New.is_actionable());
    assert!(ChangeDecision::Changed.is_actionable());
    assert!(!ChangeDecision::Unchanged.is_actionable());
}

#[test]
fn label_event_serialises_with_type_tag_and_payload() {
    let event = LabelEvent::Request(request());
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["type"], "request");
    assert_eq!(json["payload"]["number"], 42);
    assert_eq!(json["payload"]["label"], "bug");

    let no_op = serde_json::to_value(LabelEvent::NoOp).unwrap();
    assert_eq!(no_op["type"], "no_op");
    assert!(no_op.get("payload").is_none());
}

#[test]
fn label_result_distinguishes_success_from_failure() {
    let ok = LabelResult::Success {
        message: "applied".into(),
    };
    let err = LabelResult::Failure {
        message: "status 500".into(),
    };

    assert!(ok.is_success());
    assert!(!err.is_success());
    assert_eq!(err.message(), "status 500");

    let json = serde_json::to_value(&ok).unwrap();
    assert_eq!(json["type"], "success");
}
