//! Integration tests for the signup → login → profile flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p coclean-web)
//!
//! Run with: cargo test -p coclean-integration-tests -- --ignored

use reqwest::StatusCode;

use coclean_integration_tests::{base_url, client, unique_suffix};

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_signup_login_profile_round_trip() {
    let client = client();
    let base_url = base_url();
    let email = format!("it-{}@example.com", unique_suffix());

    // Sign up
    let resp = client
        .post(format!("{base_url}/signup"))
        .form(&[
            ("name", "Inge"),
            ("surname", "Grasjon"),
            ("email", email.as_str()),
            ("password", "secret-enough"),
        ])
        .send()
        .await
        .expect("Failed to sign up");
    assert_eq!(resp.status(), StatusCode::OK);
    // Redirect chain should land on the login page with the success note
    assert!(resp.url().path().starts_with("/login"));

    // Log in
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email.as_str()), ("password", "secret-enough")])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/");

    // Profile shows the created fields
    let resp = client
        .get(format!("{base_url}/profile"))
        .send()
        .await
        .expect("Failed to load profile");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read profile page");
    assert!(body.contains("Inge"));
    assert!(body.contains("Grasjon"));
    assert!(body.contains(&email));
}

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_login_with_unknown_email_is_rejected() {
    let client = client();
    let base_url = base_url();
    let email = format!("nobody-{}@example.com", unique_suffix());

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email.as_str()), ("password", "whatever")])
        .send()
        .await
        .expect("Failed to post login");

    // Back on the login page with an error, not a 500: a missing user is
    // an empty result, never a driver error
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().starts_with("/login"));
    let body = resp.text().await.expect("Failed to read login page");
    assert!(body.contains("Wrong email or password"));
}

#[tokio::test]
#[ignore = "Requires a running CoClean server and database"]
async fn test_profile_requires_login() {
    // Fresh client, no session cookie
    let client = client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/profile"))
        .send()
        .await
        .expect("Failed to request profile");

    // Redirected to the login page
    assert!(resp.url().path().starts_with("/login"));
}
