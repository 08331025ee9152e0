use super::*;

#[test]
fn test_new_github_client() {
    let client = DefaultGithubClient::new("https://api.github.com", Duration::from_secs(10));
    assert!(client.is_ok());
}

#[test]
fn test_new_github_client_strips_trailing_slash() {
    let client =
        DefaultGithubClient::new("https://api.github.com/", Duration::from_secs(10)).unwrap();
    assert_eq!(client.api_url, "https://api.github.com");
}

#[test]
fn test_issue_deserialization() {
    // Real responses carry many more fields; only title and url are kept.
    let body = r#"[
        {
            "title": "Lid sensor misreads after rain",
            "url": "https://api.github.com/repos/zotbins/waste_watcher/issues/42",
            "state": "open",
            "number": 42
        }
    ]"#;

    let issues: Vec<Issue> = serde_json::from_str(body).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Lid sensor misreads after rain");
    assert_eq!(issues[0].url, "https://api.github.com/repos/zotbins/waste_watcher/issues/42");
}

#[test]
fn test_issue_deserialization_missing_title_fails() {
    let body = r#"[{ "url": "https://api.github.com/repos/zotbins/zbce_api/issues/1" }]"#;
    assert!(serde_json::from_str::<Vec<Issue>>(body).is_err());
}
