use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

fn bin() -> Command {
    let path = assert_cmd::cargo::cargo_bin!("inquiry-responder");
    let mut cmd = Command::new(path);
    cmd.env_remove("INQUIRY_KB_PATH");
    cmd
}

fn inquiry(message: &str) -> String {
    json!({
        "name": "Sarah",
        "email": "s@x.com",
        "subject": "Laptop Recycling",
        "message": message,
    })
    .to_string()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn process_answers_known_question_from_stdin() {
    let assert = bin()
        .args(["process", "--now", "2024-05-01T12:00:00Z"])
        .write_stdin(inquiry("What are your rates for recycling 50 old laptops?"))
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["status"], "automated");
    assert_eq!(json["name"], "Sarah");
    assert!(
        json["response"]
            .as_str()
            .unwrap()
            .starts_with("Our laptop recycling rates")
    );
    assert_eq!(json["autoRepliedAt"], "2024-05-01T12:00:00Z");
    assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
}

#[test]
fn process_queues_unknown_question() {
    let assert = bin()
        .args(["process"])
        .write_stdin(inquiry("What is the weather today?"))
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["status"], "pending");
    assert!(json.get("response").is_none());
    assert!(json.get("autoRepliedAt").is_none());
    assert!(json["createdAt"].is_string());
}

#[test]
fn process_reads_input_file_and_prints_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", inquiry("Do you offer pickup services for e-waste?")).unwrap();

    bin()
        .args(["process", "--output", "text", "--input"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: automated"))
        .stdout(predicate::str::contains("Response: Yes, we offer pickup services"));
}

#[test]
fn process_rejects_invalid_inquiry() {
    let body = json!({
        "name": "Sarah",
        "email": "not-an-email",
        "subject": "Laptop Recycling",
        "message": "What are your rates for recycling laptops?",
    })
    .to_string();

    bin()
        .args(["process"])
        .write_stdin(body)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid inquiry"));
}

#[test]
fn process_with_empty_knowledge_base_is_pending() {
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    std::fs::write(file.path(), "[]").unwrap();

    let assert = bin()
        .args(["process", "--knowledge-base"])
        .arg(file.path())
        .write_stdin(inquiry("What are your rates for recycling laptops?"))
        .assert()
        .success();

    assert_eq!(stdout_json(&assert)["status"], "pending");
}

#[test]
fn match_uses_custom_knowledge_base() {
    let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
    writeln!(file, r#"{{"question": "Do you repair phones?", "answer": "phones-first"}}"#).unwrap();
    writeln!(file, r#"{{"question": "Do you repair phones?", "answer": "phones-second"}}"#).unwrap();

    let assert = bin()
        .args(["match", "--message", "Do you repair phones?", "--output", "json"])
        .args(["--knowledge-base"])
        .arg(file.path())
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["answer"], "phones-first");
    assert_eq!(json["score"], 1.0);
    assert_eq!(json["entry_index"], 0);
    assert_eq!(json["threshold"], 0.3);
    assert_eq!(json["ranking"].as_array().unwrap().len(), 2);
    assert_eq!(json["ranking"][0]["index"], 0);
    assert_eq!(json["ranking"][1]["index"], 1);
}

#[test]
fn match_reports_pending_in_text_mode() {
    bin()
        .args(["match", "--message", "What is the weather today?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decision=pending"))
        .stdout(predicate::str::contains("answer=").not());
}

#[test]
fn missing_knowledge_base_file_fails() {
    bin()
        .args(["match", "--message", "hello", "--knowledge-base", "/nonexistent/kb.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load knowledge base"));
}

#[test]
fn eval_exit_code_follows_pass_rate() {
    let cases = json!([
        {
            "case_id": "laptops",
            "message": "What are your rates for recycling 50 old laptops?",
            "expected_status": "automated",
            "expected_entry": 1
        },
        {
            "case_id": "weather",
            "message": "What is the weather today?",
            "expected_status": "automated"
        }
    ]);
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    std::fs::write(file.path(), cases.to_string()).unwrap();

    bin()
        .args(["eval", "--min-pass-rate", "0.5", "--cases"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("passed=1 failed=1"))
        .stdout(predicate::str::contains("case=laptops passed=true status=automated"))
        .stdout(predicate::str::contains("case=weather passed=false status=pending"));

    bin()
        .args(["eval", "--cases"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("below required"));
}
