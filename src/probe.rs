use crate::constants::{DASHBOARD_PATH, LOGIN_PAGE_PATH, LOGOUT_PATH, LOGOUT_REDIRECT_CHECK};
use crate::error::Result;
use crate::types::{CheckOutcome, CheckStatus, ProbeResult, VerificationCheck};
use chrono::Utc;
use reqwest::{header, redirect, Client, Method, StatusCode};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Probes the logout endpoint of a running application and verifies that it
/// answers with a 302 pointing at the login page.
pub struct LogoutRedirectCheck {
    base_url: String,
    timeout: Duration,
}

impl LogoutRedirectCheck {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Redirects must be observed, not followed, so the client never chases
    /// the Location header itself.
    fn client(&self) -> Result<Client> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }

    /// Issue one request and capture what came back. The redirect target is
    /// only recorded when the status is a redirection.
    #[instrument(skip(self, client))]
    pub async fn probe(&self, client: &Client, method: Method, path: &str) -> Result<ProbeResult> {
        let url = format!("{}{}", self.base_url, path);
        let response = client.request(method, url).send().await?;

        let status = response.status();
        let redirect_target = if status.is_redirection() {
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string())
        } else {
            None
        };

        Ok(ProbeResult {
            status_code: status.as_u16(),
            redirect_target,
        })
    }
}

/// Success means exactly 302 with the login page as the redirect target
pub fn meets_expectation(result: &ProbeResult) -> bool {
    result.status_code == StatusCode::FOUND.as_u16()
        && result.redirect_target.as_deref() == Some(LOGIN_PAGE_PATH)
}

#[async_trait::async_trait]
impl VerificationCheck for LogoutRedirectCheck {
    fn check_name(&self) -> &'static str {
        LOGOUT_REDIRECT_CHECK
    }

    async fn run(&self) -> Result<CheckOutcome> {
        println!("🚪 Testing Logout URL...");
        println!("{}", "=".repeat(40));

        let client = self.client()?;
        let mut details = Vec::new();
        let mut status = CheckStatus::Passed;

        for method in [Method::GET, Method::POST] {
            let label = method.to_string();
            println!("\n🔄 Testing {label} logout...");

            let result = self.probe(&client, method, LOGOUT_PATH).await?;
            println!("   Status code: {}", result.status_code);
            println!(
                "   Redirect URL: {}",
                result.redirect_target.as_deref().unwrap_or("No redirect")
            );

            if meets_expectation(&result) {
                println!("✅ {label} logout works correctly!");
                info!(method = %label, status = result.status_code, "logout redirect verified");
                details.push(format!(
                    "{label} {LOGOUT_PATH} -> {} {LOGIN_PAGE_PATH}",
                    result.status_code
                ));
            } else {
                println!("❌ {label} logout failed");
                warn!(
                    method = %label,
                    status = result.status_code,
                    target = result.redirect_target.as_deref().unwrap_or(""),
                    "unexpected logout response"
                );
                details.push(format!(
                    "{label} {LOGOUT_PATH} -> {} {}",
                    result.status_code,
                    result.redirect_target.as_deref().unwrap_or("no redirect")
                ));
                status = CheckStatus::Failed;
                // A failed expectation ends the evaluation
                break;
            }
        }

        // A logged-out client must not reach the dashboard
        if status == CheckStatus::Passed {
            println!("\n🔄 Testing dashboard access after logout...");
            let result = self.probe(&client, Method::GET, DASHBOARD_PATH).await?;
            if StatusCode::from_u16(result.status_code)
                .map(|s| s.is_redirection())
                .unwrap_or(false)
            {
                println!("✅ User is properly logged out (dashboard redirects)");
                details.push(format!(
                    "GET {DASHBOARD_PATH} -> {} (redirected)",
                    result.status_code
                ));
            } else {
                println!("❌ Dashboard is still accessible after logout");
                warn!(status = result.status_code, "dashboard reachable without session");
                details.push(format!("GET {DASHBOARD_PATH} -> {}", result.status_code));
                status = CheckStatus::Failed;
            }
        }

        if status == CheckStatus::Passed {
            println!("\n{}", "=".repeat(40));
            println!("🎉 Logout URL test passed!");
        }

        Ok(CheckOutcome {
            check_name: LOGOUT_REDIRECT_CHECK.to_string(),
            status,
            details,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status_code: u16, redirect_target: Option<&str>) -> ProbeResult {
        ProbeResult {
            status_code,
            redirect_target: redirect_target.map(|t| t.to_string()),
        }
    }

    #[test]
    fn test_expected_redirect_passes() {
        assert!(meets_expectation(&result(302, Some(LOGIN_PAGE_PATH))));
    }

    #[test]
    fn test_wrong_status_fails() {
        assert!(!meets_expectation(&result(200, None)));
        assert!(!meets_expectation(&result(301, Some(LOGIN_PAGE_PATH))));
        assert!(!meets_expectation(&result(303, Some(LOGIN_PAGE_PATH))));
    }

    #[test]
    fn test_wrong_target_fails() {
        assert!(!meets_expectation(&result(302, Some("/dashboard/"))));
        assert!(!meets_expectation(&result(302, None)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let check = LogoutRedirectCheck::new("http://localhost:8000/", 5);
        assert_eq!(check.base_url, "http://localhost:8000");
    }
}
