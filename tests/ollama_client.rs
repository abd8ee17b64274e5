mod common;

use session_vault::annex::SUMMARY_FAILED;
use session_vault::{Annex, AnnexError, Message, OllamaClient, Role};

fn conversation() -> Vec<Message> {
    vec![
        Message::new(Role::User, "How do I sort a list?").unwrap(),
        Message::new(Role::Assistant, "Call sort() on it.").unwrap(),
    ]
}

#[test]
fn test_summary_from_generate_response() {
    let (endpoint, server) = common::respond_once(200, r#"{"response":"- sorting","done":true}"#);
    let client = OllamaClient::new(&endpoint, "gemma3:1b", None);

    assert_eq!(client.summarize(&conversation()), "- sorting");

    let request = server.join().unwrap();
    assert_eq!(request.request_line, "POST /api/generate HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["model"], "gemma3:1b");
    assert_eq!(body["stream"], false);
    assert!(body["prompt"]
        .as_str()
        .unwrap()
        .contains("user: How do I sort a list?\n\nassistant: Call sort() on it."));
}

#[test]
fn test_error_status_degrades_to_sentinels() {
    let (endpoint, server) = common::respond_once(500, r#"{"error":"model not found"}"#);
    let client = OllamaClient::new(&endpoint, "missing", None);
    assert_eq!(client.summarize(&conversation()), SUMMARY_FAILED);
    server.join().unwrap();

    let (endpoint, server) = common::respond_once(404, "");
    let client = OllamaClient::new(&endpoint, "missing", None);
    assert_eq!(client.diagram(&conversation()), "");
    server.join().unwrap();
}

#[test]
fn test_generate_reports_status() {
    let (endpoint, server) = common::respond_once(500, "");
    let err = OllamaClient::new(&endpoint, "m", None)
        .generate("hi")
        .unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, AnnexError::Status { status: 500 }));
}

#[test]
fn test_list_models() {
    let (endpoint, server) = common::respond_once(
        200,
        r#"{"models":[{"name":"gemma3:1b","size":1},{"name":"llama3:8b","size":2}]}"#,
    );
    let models = OllamaClient::new(&endpoint, "m", None).list_models().unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.request_line, "GET /api/tags HTTP/1.1");
    assert_eq!(models, vec!["gemma3:1b", "llama3:8b"]);
}
