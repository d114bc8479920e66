//! Console backend client
//!
//! Wraps `reqwest` with the backend's conventions: JSON bodies, optional
//! bearer token, and error messages pulled from the response body.

use crate::config::HttpClientConfig;
use crate::error::{ApiError, Result};
use crate::types::CallListQuery;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use vani_core::domain::{
    Agent, AgentListResponse, AgentResponse, AgentStats, AgentStatsResponse, AgentSummary,
    AssignAgentRequest, CallRecord, CredentialsResponse, OutboundCallRequest,
    OutboundCallResponse, PhoneLine, PhoneLineListResponse, SipTrunkCredential,
};
use vani_core::port::{CallError, CallGateway};

/// REST client for the voice-agent console backend
///
/// # Example
///
/// ```no_run
/// use vani_infra_http::{HttpApiClient, HttpClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpApiClient::new(HttpClientConfig::new("http://127.0.0.1:5000/api"))?;
/// let call = client.call_info("call-123").await?;
/// println!("{:?}", call.status);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token: config.token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /outbound-call-info/{id}`
    pub async fn call_info(&self, id: &str) -> Result<CallRecord> {
        let url = self.resource("/outbound-call-info", id, &[])?;
        self.get_json(url).await
    }

    /// `GET /calls/list` with the set filters
    pub async fn list_calls(&self, query: &CallListQuery) -> Result<Vec<CallRecord>> {
        let mut url = self.endpoint("/calls/list")?;
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.get_json(url).await
    }

    /// `GET /vapi/agents`
    pub async fn list_agents(&self, search: Option<&str>) -> Result<Vec<AgentSummary>> {
        let mut url = self.endpoint("/vapi/agents")?;
        if let Some(search) = search.filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("search", search);
        }
        let response: AgentListResponse = self.get_json(url).await?;
        if !response.success {
            warn!("Agent list response reported success=false");
        }
        Ok(response.data)
    }

    /// `GET /vapi/agents/{id}`
    pub async fn agent(&self, id: &str) -> Result<Agent> {
        let url = self.resource("/vapi/agents", id, &[])?;
        let response: AgentResponse = self.get_json(url).await?;
        Ok(response.agent)
    }

    /// `GET /vapi/agents/stats/overview`
    pub async fn agent_stats(&self) -> Result<AgentStats> {
        let url = self.endpoint("/vapi/agents/stats/overview")?;
        let response: AgentStatsResponse = self.get_json(url).await?;
        Ok(response.stats)
    }

    /// `DELETE /vapi/agents/{id}`
    pub async fn delete_agent(&self, id: &str) -> Result<()> {
        let url = self.resource("/vapi/agents", id, &[])?;
        self.send_empty(self.client.delete(url)).await
    }

    /// `GET /vapi/phone-numbers`
    pub async fn list_phone_numbers(&self) -> Result<Vec<PhoneLine>> {
        let url = self.endpoint("/vapi/phone-numbers")?;
        let response: PhoneLineListResponse = self.get_json(url).await?;
        if response.count != response.phone_numbers.len() {
            debug!(
                count = response.count,
                received = response.phone_numbers.len(),
                "Phone number count mismatch"
            );
        }
        Ok(response.phone_numbers)
    }

    /// `PATCH /vapi/phone-numbers/{id}/assign`
    ///
    /// `selection` is an agent's vendor assistant id; `None`, blank or
    /// `"unassigned"` detaches the line.
    pub async fn assign_phone_number(&self, id: &str, selection: Option<&str>) -> Result<()> {
        let url = self.resource("/vapi/phone-numbers", id, &["assign"])?;
        let body = AssignAgentRequest::from_selection(selection);
        debug!(id, assistant_id = ?body.assistant_id, "Assigning phone number");
        self.send_empty(self.client.patch(url).json(&body)).await
    }

    /// `DELETE /vapi/phone-numbers/{id}`
    pub async fn delete_phone_number(&self, id: &str) -> Result<()> {
        let url = self.resource("/vapi/phone-numbers", id, &[])?;
        self.send_empty(self.client.delete(url)).await
    }

    /// `GET /vapi/credentials`
    pub async fn list_credentials(&self) -> Result<Vec<SipTrunkCredential>> {
        let url = self.endpoint("/vapi/credentials")?;
        let response: CredentialsResponse = self.get_json(url).await?;
        Ok(response.credentials)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// `{path}/{id}/{suffix..}` with the id percent-encoded as one segment
    fn resource(&self, path: &str, id: &str, suffix: &[&str]) -> Result<Url> {
        let mut url = self.endpoint(path)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(id)
            .extend(suffix);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "GET");
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = error_for_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a mutation whose response body carries nothing we need
    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = self.authorize(builder).send().await?;
        debug!(url = %response.url(), status = response.status().as_u16(), "Mutation sent");
        error_for_status(response).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Http`
///
/// Message lookup order: `message`, `error`, the raw body, then
/// `Request failed: {status}`.
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let body = response.text().await.unwrap_or_default();

    let message = if is_json {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => string_field(&value, "message")
                .or_else(|| string_field(&value, "error"))
                .unwrap_or_else(|| value.to_string()),
            Err(_) => body,
        }
    } else {
        body
    };

    let message = if message.trim().is_empty() || message == "{}" {
        format!("Request failed: {}", status.as_u16())
    } else {
        message
    };

    Err(ApiError::Http {
        status: status.as_u16(),
        message,
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl CallGateway for HttpApiClient {
    /// `POST /outbound-call`
    ///
    /// Non-2xx responses use the body's `message` (or "Failed"); a 2xx body
    /// that is not JSON still counts as a placed call, just without an id.
    async fn place_call(
        &self,
        request: &OutboundCallRequest,
    ) -> std::result::Result<OutboundCallResponse, CallError> {
        let url = self.endpoint("/outbound-call").map_err(CallError::from)?;
        debug!(to = %request.to, agent_id = ?request.agent_id, "POST /outbound-call");

        let response = self
            .authorize(self.client.post(url).json(request))
            .send()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            return Err(CallError::rejected(
                status.as_u16(),
                string_field(&body, "message"),
            ));
        }

        let id = match body.get("id") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Ok(OutboundCallResponse { id })
    }
}
