// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness polling for contact form servers.
// Purpose: Ensure servers are ready without arbitrary sleeps.
// Dependencies: reqwest, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use tokio::time::sleep;
use url::Url;

/// Polls the contact page until the server responds or timeout expires.
pub async fn wait_for_server_ready(
    client: &reqwest::Client,
    base_url: &Url,
    timeout: Duration,
) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match client.get(base_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            Ok(response) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "server readiness timeout after {attempts} attempts: status {}",
                        response.status()
                    ));
                }
            }
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!(
                        "server readiness timeout after {attempts} attempts: {err}"
                    ));
                }
            }
        }
        sleep(Duration::from_millis(50)).await;
    }
}
