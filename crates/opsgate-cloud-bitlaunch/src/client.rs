//! BitLaunch API client

use async_trait::async_trait;
use opsgate_cloud::{
    CloudError, Credentials, RebootAck, Result, ServerStatus, ServerSummary, VpsProvider,
};
use serde::Deserialize;
use std::time::Duration;

const BITLAUNCH_API_BASE: &str = "https://app.bitlaunch.io/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const PROVIDER_ID: &str = "bitlaunch";

/// Client for the BitLaunch API
#[derive(Debug)]
pub struct BitLaunchClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl BitLaunchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BITLAUNCH_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client from a credential bundle of the shape
    /// `{"api_key": "...", "base_url": "..."?}`.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        let api_key = credentials.require_str(PROVIDER_ID, "api_key")?;
        let mut client = Self::new(api_key);
        if let Some(base_url) = credentials.get_str("base_url") {
            client = client.with_base_url(base_url);
        }
        Ok(client)
    }

    async fn fetch_servers(&self) -> Result<Vec<ApiServer>> {
        let url = format!("{}/servers", self.base_url);

        tracing::debug!("fetching server list from BitLaunch");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let servers: Vec<ApiServer> = response.json().await.map_err(classify_transport)?;
        tracing::info!(count = servers.len(), "retrieved BitLaunch servers");
        Ok(servers)
    }

    async fn fetch_server_by_name(&self, name: &str) -> Result<Option<ApiServer>> {
        // The BitLaunch API has no name filter; list and match client-side.
        Ok(self
            .fetch_servers()
            .await?
            .into_iter()
            .find(|server| server.name == name))
    }
}

#[async_trait]
impl VpsProvider for BitLaunchClient {
    fn name(&self) -> &str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &str {
        "BitLaunch"
    }

    async fn list_servers(&self) -> Result<Vec<ServerSummary>> {
        let servers = self.fetch_servers().await?;
        Ok(servers.into_iter().map(ApiServer::into_summary).collect())
    }

    async fn find_server(&self, name: &str) -> Result<Option<ServerSummary>> {
        Ok(self
            .fetch_server_by_name(name)
            .await?
            .map(ApiServer::into_summary))
    }

    async fn reboot_server(&self, name: &str) -> Result<Option<RebootAck>> {
        let Some(server) = self.fetch_server_by_name(name).await? else {
            tracing::warn!(server = name, "reboot target not found on BitLaunch");
            return Ok(None);
        };

        let url = format!("{}/servers/{}/restart", self.base_url, server.id);
        tracing::info!(server = name, id = %server.id, "rebooting BitLaunch server");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(Some(RebootAck::new(PROVIDER_ID, name)))
        } else if status.as_u16() == 404 {
            // server vanished between lookup and reboot
            tracing::warn!(server = name, "BitLaunch server disappeared before reboot");
            Ok(None)
        } else {
            Err(classify_status(status))
        }
    }
}

fn classify_status(status: reqwest::StatusCode) -> CloudError {
    match status.as_u16() {
        401 => CloudError::AuthenticationFailed {
            provider: PROVIDER_ID.to_string(),
        },
        429 => CloudError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        },
        code => CloudError::Api {
            provider: PROVIDER_ID.to_string(),
            status: code,
        },
    }
}

fn classify_transport(err: reqwest::Error) -> CloudError {
    if err.is_connect() {
        CloudError::Network {
            provider: PROVIDER_ID.to_string(),
            message: "connection failed".to_string(),
        }
    } else if err.is_timeout() {
        CloudError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        CloudError::Network {
            provider: PROVIDER_ID.to_string(),
            message: err.to_string(),
        }
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ApiServer {
    id: String,
    name: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    ip: Option<String>,
}

impl ApiServer {
    fn into_summary(self) -> ServerSummary {
        let status = normalize_status(self.status.as_deref());
        ServerSummary::new(self.name, status, self.ip)
    }
}

fn normalize_status(raw: Option<&str>) -> ServerStatus {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("running" | "active" | "ok") => ServerStatus::Running,
        Some("stopped" | "off" | "inactive") => ServerStatus::Stopped,
        Some("rebooting" | "restarting") => ServerStatus::Rebooting,
        Some("creating" | "provisioning" | "installing") => ServerStatus::Creating,
        Some("deleting" | "destroying") => ServerStatus::Deleting,
        _ => ServerStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_server_listing() {
        let body = json!([
            {"id": "server-123", "name": "test-server-1", "status": "running", "ip": "1.2.3.4"},
            {"id": "server-456", "name": "test-server-2", "status": "stopped"}
        ]);
        let servers: Vec<ApiServer> = serde_json::from_value(body).unwrap();
        assert_eq!(servers.len(), 2);

        let first = servers.into_iter().next().unwrap().into_summary();
        assert_eq!(first.name, "test-server-1");
        assert_eq!(first.status, ServerStatus::Running);
        assert_eq!(first.address.as_deref(), Some("1.2.3.4"));
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(Some("Running")), ServerStatus::Running);
        assert_eq!(normalize_status(Some("off")), ServerStatus::Stopped);
        assert_eq!(normalize_status(Some("restarting")), ServerStatus::Rebooting);
        assert_eq!(normalize_status(Some("weird")), ServerStatus::Unknown);
        assert_eq!(normalize_status(None), ServerStatus::Unknown);
    }

    #[test]
    fn test_from_credentials_requires_api_key() {
        let err = BitLaunchClient::from_credentials(&Credentials::empty()).unwrap_err();
        assert!(matches!(err, CloudError::InvalidCredentials { .. }));
    }

    #[test]
    fn test_from_credentials_base_url_override() {
        let creds = Credentials::new(json!({
            "api_key": "k",
            "base_url": "http://localhost:9000/"
        }));
        let client = BitLaunchClient::from_credentials(&creds).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
