// system-tests/tests/suites/store_persistence.rs
// ============================================================================
// Module: Store Persistence Suite
// Description: Durable storage and audit output across server restarts.
// Purpose: Validate accepted messages survive restarts and audit stays private.
// Dependencies: system-tests helpers, contact-form-store-sqlite
// ============================================================================

//! `SQLite` persistence and audit log tests.

use contact_form_client::HttpSubmissionTransport;
use contact_form_client::SubmissionTransport;
use contact_form_core::ContactPayload;
use contact_form_core::MessageStore;
use contact_form_core::SubmissionResult;
use contact_form_store_sqlite::SqliteMessageStore;
use contact_form_store_sqlite::SqliteStoreConfig;
use helpers::harness::RunRoot;
use helpers::harness::StoreChoice;
use helpers::harness::http_client;
use helpers::harness::server_config;
use helpers::harness::spawn_server;
use helpers::requests::post_form;
use serde_json::Value;
use system_tests::config::DEFAULT_TIMEOUT;

use crate::helpers;

const SECRET_EMAIL: &str = "hemlig@example.se";
const SECRET_MESSAGE: &str = "Det här får inte synas i loggen";

#[tokio::test(flavor = "multi_thread")]
async fn accepted_messages_survive_a_restart() -> Result<(), String> {
    let root = RunRoot::new("persistence")?;
    let db = root.path().join("contact.db");
    let choice = StoreChoice::Sqlite(db.clone());

    let server = spawn_server(server_config(&choice, None)).await?;
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let result = transport
        .send(&ContactPayload::new(" Första ", "a@b.se", true))
        .await
        .map_err(|err| err.to_string())?;
    assert_eq!(result, SubmissionResult::Success);
    server.shutdown().await;

    let server = spawn_server(server_config(&choice, None)).await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let response =
        post_form(&client, server.url("/api/contact"), &ContactPayload::new("Andra", "c@d.se", true))
            .await?;
    assert_eq!(response.status().as_u16(), 303);
    let rejected =
        post_form(&client, server.url("/api/contact"), &ContactPayload::new("", "c@d.se", true))
            .await?;
    assert_eq!(rejected.status().as_u16(), 422);
    server.shutdown().await;

    let store =
        SqliteMessageStore::new(SqliteStoreConfig::for_path(db.clone())).map_err(|err| err.to_string())?;
    let stored = store.recent(10).map_err(|err| err.to_string())?;
    let mut bodies: Vec<&str> = stored.iter().map(|stored| stored.message.message.as_str()).collect();
    bodies.sort_unstable();
    assert_eq!(bodies, vec!["Andra", "Första"]);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn audit_log_records_outcomes_without_content() -> Result<(), String> {
    let root = RunRoot::new("audit")?;
    let audit_log = root.path().join("audit.jsonl");
    let choice = StoreChoice::Sqlite(root.path().join("contact.db"));

    let server = spawn_server(server_config(&choice, Some(&audit_log))).await?;
    let client = http_client(DEFAULT_TIMEOUT)?;
    let accepted = ContactPayload::new(SECRET_MESSAGE, SECRET_EMAIL, true);
    let response = post_form(&client, server.url("/api/contact"), &accepted).await?;
    assert_eq!(response.status().as_u16(), 303);
    let transport = HttpSubmissionTransport::new(server.base_url()).map_err(|err| err.to_string())?;
    let result = transport
        .send(&ContactPayload::new(SECRET_MESSAGE, SECRET_EMAIL, false))
        .await
        .map_err(|err| err.to_string())?;
    assert!(!result.is_success());
    server.shutdown().await;

    let contents = std::fs::read_to_string(&audit_log).map_err(|err| err.to_string())?;
    assert!(!contents.contains(SECRET_EMAIL));
    assert!(!contents.contains("hemlig"));
    assert!(!contents.contains("synas"));

    let events = contents
        .lines()
        .map(serde_json::from_str::<Value>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| err.to_string())?;
    let names: Vec<&str> = events.iter().filter_map(|event| event["event"].as_str()).collect();
    assert_eq!(names, vec!["server_start", "contact_submission", "contact_submission"]);
    assert_eq!(events[0]["store"], "sqlite");
    assert_eq!(events[1]["channel"], "no_script");
    assert_eq!(events[1]["status"], 303);
    assert_eq!(events[2]["channel"], "scripted");
    assert_eq!(events[2]["status"], 422);
    assert_eq!(events[2]["rejected_fields"], serde_json::json!(["terms"]));
    Ok(())
}
