use anyhow::Result;
use geocheck::constants::{LOGIN_PAGE_PATH, LOGOUT_PATH};
use geocheck::probe::{meets_expectation, LogoutRedirectCheck};
use geocheck::stub::create_stub_app;
use geocheck::types::{CheckStatus, VerificationCheck};
use reqwest::{redirect, Method};
use std::net::SocketAddr;

/// Serve the stub application on an ephemeral port and return its base URL
fn spawn_stub() -> String {
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let server = axum::Server::bind(&addr).serve(create_stub_app().into_make_service());
    let local_addr = server.local_addr();
    tokio::spawn(server);
    format!("http://{local_addr}")
}

#[tokio::test]
async fn test_get_logout_redirects_to_login_page() -> Result<()> {
    let base_url = spawn_stub();
    let check = LogoutRedirectCheck::new(&base_url, 5);

    let client = reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;
    let result = check.probe(&client, Method::GET, LOGOUT_PATH).await?;

    assert_eq!(result.status_code, 302);
    assert_eq!(result.redirect_target.as_deref(), Some(LOGIN_PAGE_PATH));
    assert!(meets_expectation(&result));
    Ok(())
}

#[tokio::test]
async fn test_post_logout_redirects_to_login_page() -> Result<()> {
    let base_url = spawn_stub();
    let check = LogoutRedirectCheck::new(&base_url, 5);

    let client = reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;
    let result = check.probe(&client, Method::POST, LOGOUT_PATH).await?;

    assert_eq!(result.status_code, 302);
    assert_eq!(result.redirect_target.as_deref(), Some(LOGIN_PAGE_PATH));
    Ok(())
}

#[tokio::test]
async fn test_full_check_passes_against_stub() -> Result<()> {
    let base_url = spawn_stub();
    let check = LogoutRedirectCheck::new(&base_url, 5);

    let outcome = check.run().await?;

    assert_eq!(outcome.status, CheckStatus::Passed);
    // GET, POST, and the post-logout dashboard probe
    assert_eq!(outcome.details.len(), 3);
    assert!(check.affects_exit_code());
    Ok(())
}

#[tokio::test]
async fn test_non_redirect_endpoint_fails_expectation() -> Result<()> {
    let base_url = spawn_stub();
    let check = LogoutRedirectCheck::new(&base_url, 5);

    let client = reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;
    // The health endpoint answers 200, so no redirect target is captured
    let result = check.probe(&client, Method::GET, "/health").await?;

    assert_eq!(result.status_code, 200);
    assert_eq!(result.redirect_target, None);
    assert!(!meets_expectation(&result));
    Ok(())
}

#[tokio::test]
async fn test_dashboard_bounces_without_session() -> Result<()> {
    let base_url = spawn_stub();
    let client = reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()?;

    let response = client.get(format!("{base_url}/dashboard/")).send().await?;

    assert_eq!(response.status().as_u16(), 302);
    Ok(())
}
