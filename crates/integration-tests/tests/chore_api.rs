//! Integration tests for the chore and collective JSON endpoints.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p coclean-web)
//!
//! Run with: cargo test -p coclean-integration-tests -- --ignored

use serde_json::{Value, json};

use coclean_integration_tests::{base_url, client, unique_suffix};

/// Create a collective through the page form and return its name.
/// The session cookie remembers it as the selected collective.
async fn create_collective(client: &reqwest::Client, password: &str) -> String {
    let base_url = base_url();
    let name = format!("Kollektiv-{}", unique_suffix());

    let resp = client
        .post(format!("{base_url}/collective"))
        .form(&[
            ("name", name.as_str()),
            ("description", "Integration test collective"),
            ("school", "Test School"),
            ("password", password),
        ])
        .send()
        .await
        .expect("Failed to create collective");
    assert!(resp.status().is_success());

    name
}

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_chore_create_and_wrong_password_delete() {
    let client = client();
    let base_url = base_url();
    let collective = create_collective(&client, "correctpassword").await;

    // Create a chore
    let resp = client
        .post(format!("{base_url}/chore/create"))
        .json(&json!({
            "collective": collective,
            "title": "Dishes",
            "description": "Every evening",
            "start_date": "2026-01-05",
            "frequency": 2
        }))
        .send()
        .await
        .expect("Failed to create chore");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], true, "create failed: {body}");

    // Deleting with the wrong password fails and keeps the row
    let resp = client
        .delete(format!("{base_url}/chore/delete"))
        .json(&json!({
            "collective": collective,
            "title": "Dishes",
            "password": "wrongpassword"
        }))
        .send()
        .await
        .expect("Failed to post delete");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], false);
    assert_eq!(body["text"], "wrong password");

    let page = client
        .get(format!("{base_url}/chore"))
        .send()
        .await
        .expect("Failed to load chore page")
        .text()
        .await
        .expect("Failed to read chore page");
    assert!(page.contains("Dishes"), "chore vanished after failed delete");

    // Deleting with the right password removes it
    let resp = client
        .delete(format!("{base_url}/chore/delete"))
        .json(&json!({
            "collective": collective,
            "title": "Dishes",
            "password": "correctpassword"
        }))
        .send()
        .await
        .expect("Failed to post delete");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], true, "delete failed: {body}");

    let page = client
        .get(format!("{base_url}/chore"))
        .send()
        .await
        .expect("Failed to load chore page")
        .text()
        .await
        .expect("Failed to read chore page");
    assert!(!page.contains("Dishes"));
}

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_duplicate_chore_title_is_reported() {
    let client = client();
    let base_url = base_url();
    let collective = create_collective(&client, "pw-for-dup-test").await;

    let chore = json!({
        "collective": collective,
        "title": "Trash",
        "start_date": "2026-01-05",
        "frequency": 3
    });

    let first: Value = client
        .post(format!("{base_url}/chore/create"))
        .json(&chore)
        .send()
        .await
        .expect("Failed to create chore")
        .json()
        .await
        .expect("Envelope expected");
    assert_eq!(first["success"], true);

    let second: Value = client
        .post(format!("{base_url}/chore/create"))
        .json(&chore)
        .send()
        .await
        .expect("Failed to create chore")
        .json()
        .await
        .expect("Envelope expected");
    assert_eq!(second["success"], false);
}

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_collective_edit_envelope_contract() {
    let client = client();
    let base_url = base_url();
    let collective = create_collective(&client, "pw-for-edit-test").await;

    // Edit an existing collective
    let resp = client
        .put(format!("{base_url}/collective/edit"))
        .json(&json!({
            "name": collective,
            "description": "Updated description",
            "school": "Another School"
        }))
        .send()
        .await
        .expect("Failed to edit collective");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], true);

    // Editing an unknown collective fails with a readable envelope
    let resp = client
        .put(format!("{base_url}/collective/edit"))
        .json(&json!({
            "name": format!("missing-{}", unique_suffix()),
            "description": "x",
            "school": "y"
        }))
        .send()
        .await
        .expect("Failed to edit collective");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], false);
    assert_eq!(body["text"], "not found");

    // Delete the session-selected collective (no body)
    let resp = client
        .delete(format!("{base_url}/collective/delete"))
        .send()
        .await
        .expect("Failed to delete collective");
    let body: Value = resp.json().await.expect("Envelope expected");
    assert_eq!(body["success"], true);
}
