//! # End-to-End Ask Tests
//!
//! Drives the full pipeline over HTTP: session, navigation, document
//! resolution (predefined vs uploaded), extraction, prompt construction,
//! and the single completion call against the mocked remote service.

mod common;

use anyhow::Result;
use common::TestApp;
use duolens_test_utils::helpers::generate_test_pdf;
use httpmock::prelude::*;
use serde_json::{json, Value};

const OPINION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant interpreting subjective opinions about naturalness.";
const DATA_SYSTEM_PROMPT: &str =
    "You are a scientific assistant providing objective, data-driven insights.";

#[tokio::test]
async fn asking_against_the_predefined_opinion_document() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.accept_credential("sk-valid-key");

    // The predefined opinion document is present on disk.
    let pdf_data = generate_test_pdf("Participants found synthetic speech unnatural.")?;
    std::fs::write(app.opinion_dir.join("naturalness_opinions.pdf"), &pdf_data)?;

    // Strict mock: only a request carrying the opinion system prompt plus
    // both the extracted context and the question matches.
    let completions_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains(OPINION_SYSTEM_PROMPT)
            .body_contains("Participants found synthetic speech unnatural.")
            .body_contains("Is the speech natural?");
        then.status(200).json_body(json!({
            "choices": [
                { "message": { "role": "assistant",
                               "content": "Most participants did not find it natural." } }
            ]
        }));
    });

    let session_id = app.create_session("sk-valid-key").await?;
    let navigate: Value = app.navigate(&session_id, "opinion").await?.json().await?;
    assert_eq!(navigate["result"]["document_available"], true);

    let response = app.ask(&session_id, "Is the speech natural?").await?;
    assert!(response.status().is_success());
    let body: Value = response.json().await?;
    assert_eq!(
        body["result"]["answer"],
        "Most participants did not find it natural."
    );
    assert_eq!(
        body["result"]["heading"],
        "Insight from Subjective Perspectives"
    );
    completions_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn a_missing_predefined_document_falls_back_to_the_upload() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.accept_credential("sk-valid-key");

    let completions_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains(DATA_SYSTEM_PROMPT)
            .body_contains("The mean opinion score was 3.1.");
        then.status(200).json_body(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "The score was 3.1." } }
            ]
        }));
    });

    let session_id = app.create_session("sk-valid-key").await?;
    app.navigate(&session_id, "data_driven").await?;

    // No predefined data document exists, so the mode asks for an upload.
    let blocked = app.ask(&session_id, "What was the score?").await?;
    assert_eq!(blocked.status(), 404);

    let pdf_data = generate_test_pdf("The mean opinion score was 3.1.")?;
    app.upload_pdf(&session_id, "survey.pdf", pdf_data).await?;

    // Extraction now runs against the freshly persisted upload.
    let response = app.ask(&session_id, "What was the score?").await?;
    assert!(response.status().is_success());
    let body: Value = response.json().await?;
    assert_eq!(body["result"]["answer"], "The score was 3.1.");
    assert_eq!(body["result"]["heading"], "Data-Driven Insight");
    completions_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn a_remote_failure_surfaces_an_error_and_no_answer() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.accept_credential("sk-valid-key");

    let completions_mock = app.mock_server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(500).body("upstream exploded");
    });

    let session_id = app.create_session("sk-valid-key").await?;
    app.navigate(&session_id, "opinion").await?;
    let pdf_data = generate_test_pdf("Some opinions.")?;
    app.upload_pdf(&session_id, "opinions.pdf", pdf_data).await?;

    let response = app.ask(&session_id, "Anything?").await?;
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().is_some());
    assert!(body.get("result").is_none(), "no answer may be rendered");
    completions_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn asking_in_home_mode_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.accept_credential("sk-valid-key");
    let completions_mock = app.count_completions();

    let session_id = app.create_session("sk-valid-key").await?;
    let response = app.ask(&session_id, "Hello?").await?;
    assert_eq!(response.status(), 400);
    completions_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn each_question_re_reads_the_document() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.accept_credential("sk-valid-key");

    let predefined = app.opinion_dir.join("naturalness_opinions.pdf");
    std::fs::write(&predefined, generate_test_pdf("First revision.")?)?;

    let first_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("First revision.");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "v1" } }]
        }));
    });
    let second_mock = app.mock_server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Second revision.");
        then.status(200).json_body(json!({
            "choices": [{ "message": { "role": "assistant", "content": "v2" } }]
        }));
    });

    let session_id = app.create_session("sk-valid-key").await?;
    app.navigate(&session_id, "opinion").await?;

    let first: Value = app.ask(&session_id, "Which?").await?.json().await?;
    assert_eq!(first["result"]["answer"], "v1");

    // Replace the document on disk; the next question must see the new text
    // because nothing is cached between requests.
    std::fs::write(&predefined, generate_test_pdf("Second revision.")?)?;
    let second: Value = app.ask(&session_id, "Which?").await?.json().await?;
    assert_eq!(second["result"]["answer"], "v2");

    first_mock.assert_hits(1);
    second_mock.assert_hits(1);
    Ok(())
}
