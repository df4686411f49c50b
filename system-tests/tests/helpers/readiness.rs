// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Readiness Helpers
// Description: Readiness probe for the Jira instance under test.
// Purpose: Fail fast with a clear message when Jira is not reachable.
// Dependencies: condec-client, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use condec_client::JiraClient;
use tokio::time::sleep;

/// Polls `serverInfo` until Jira responds or the timeout expires.
pub async fn wait_for_jira_ready(client: &JiraClient, timeout: Duration) -> Result<(), String> {
    let start = Instant::now();
    let mut attempts = 0u32;
    loop {
        attempts = attempts.saturating_add(1);
        match client.server_info().await {
            Ok(info) => {
                tracing::debug!(version = %info.version, attempts, "jira is ready");
                return Ok(());
            }
            Err(err) => {
                if start.elapsed() > timeout {
                    return Err(format!("jira readiness timeout after {attempts} attempts: {err}"));
                }
                sleep(Duration::from_millis(500)).await;
            }
        }
    }
}
