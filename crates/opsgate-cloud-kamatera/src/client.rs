//! Kamatera CloudCLI API client

use async_trait::async_trait;
use opsgate_cloud::{
    CloudError, Credentials, RebootAck, Result, ServerStatus, ServerSummary, VpsProvider,
};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const KAMATERA_API_BASE: &str = "https://cloudcli.cloudwm.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const PROVIDER_ID: &str = "kamatera";

/// Client for the Kamatera CloudCLI API
#[derive(Debug)]
pub struct KamateraClient {
    client: reqwest::Client,
    client_id: String,
    secret: String,
    base_url: String,
    timeout: Duration,
}

impl KamateraClient {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.into(),
            secret: secret.into(),
            base_url: KAMATERA_API_BASE.to_string(),
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
    /// `{"client_id": "...", "secret": "...", "base_url": "..."?}`.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        let client_id = credentials.require_str(PROVIDER_ID, "client_id")?;
        let secret = credentials.require_str(PROVIDER_ID, "secret")?;
        let mut client = Self::new(client_id, secret);
        if let Some(base_url) = credentials.get_str("base_url") {
            client = client.with_base_url(base_url);
        }
        Ok(client)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("AuthClientId", &self.client_id)
            .header("AuthSecret", &self.secret)
            .timeout(self.timeout)
    }

    async fn fetch_servers(&self) -> Result<Vec<ApiServer>> {
        let url = format!("{}/service/servers", self.base_url);

        tracing::debug!("fetching server list from Kamatera");
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let servers: Vec<ApiServer> = response.json().await.map_err(classify_transport)?;
        tracing::info!(count = servers.len(), "retrieved Kamatera servers");
        Ok(servers)
    }

    /// Server-side name lookup via `POST /service/server/info`.
    async fn fetch_server_by_name(&self, name: &str) -> Result<Option<ApiServer>> {
        let url = format!("{}/service/server/info", self.base_url);

        tracing::debug!(server = name, "looking up Kamatera server");
        let response = self
            .request(self.client.post(&url))
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let servers: Vec<ApiServer> = response.json().await.map_err(classify_transport)?;
        // the backend filter can glob; keep only an exact match
        Ok(servers.into_iter().find(|server| server.name == name))
    }
}

#[async_trait]
impl VpsProvider for KamateraClient {
    fn name(&self) -> &str {
        PROVIDER_ID
    }

    fn display_name(&self) -> &str {
        "Kamatera"
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
            tracing::warn!(server = name, "reboot target not found on Kamatera");
            return Ok(None);
        };

        let url = format!("{}/service/server/reboot", self.base_url);
        tracing::info!(server = name, id = %server.id, "rebooting Kamatera server");

        let response = self
            .request(self.client.post(&url))
            .json(&json!({ "id": server.id }))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(Some(RebootAck::new(PROVIDER_ID, name)))
        } else if status.as_u16() == 404 {
            tracing::warn!(server = name, "Kamatera server disappeared before reboot");
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
        403 => CloudError::Forbidden {
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
    power: Option<String>,
}

impl ApiServer {
    fn into_summary(self) -> ServerSummary {
        let status = normalize_power(self.power.as_deref());
        // the listing payload carries no public address
        ServerSummary::new(self.name, status, None)
    }
}

fn normalize_power(raw: Option<&str>) -> ServerStatus {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("on") => ServerStatus::Running,
        Some("off") => ServerStatus::Stopped,
        Some("rebooting" | "restarting") => ServerStatus::Rebooting,
        Some("creating") => ServerStatus::Creating,
        Some("deleting") => ServerStatus::Deleting,
        _ => ServerStatus::Unknown,
    }
}
