//! HttpApiClient against a mocked console backend

use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use vani_core::domain::{AgentStatus, OutboundCallRequest};
use vani_core::port::{CallError, CallGateway};
use vani_infra_http::{ApiError, CallListQuery, HttpApiClient, HttpClientConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpApiClient {
    HttpApiClient::new(HttpClientConfig::new(format!("{}/api", server.uri()))).unwrap()
}

fn request(to: &str, agent_id: Option<&str>) -> OutboundCallRequest {
    OutboundCallRequest {
        to: to.to_string(),
        agent_id: agent_id.map(str::to_string),
    }
}

/// Port with nothing listening on it
fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

// =============================================================================
// POST /outbound-call
// =============================================================================

#[tokio::test]
async fn test_place_call_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .and(body_json(json!({ "to": "+918267818161", "agentId": "agent-7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "call-abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .place_call(&request("+918267818161", Some("agent-7")))
        .await
        .unwrap();
    assert_eq!(response.id.as_deref(), Some("call-abc"));
}

#[tokio::test]
async fn test_place_call_omits_agent_for_server_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .and(body_json(json!({ "to": "+918267818161" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 42 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .place_call(&request("+918267818161", None))
        .await
        .unwrap();
    assert_eq!(response.id.as_deref(), Some("42"));
}

#[tokio::test]
async fn test_place_call_success_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .respond_with(ResponseTemplate::new(200).set_body_string("queued"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .place_call(&request("+918267818161", None))
        .await
        .unwrap();
    assert_eq!(response.id, None);
}

#[tokio::test]
async fn test_place_call_rejection_uses_body_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "busy" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .place_call(&request("+918267818162", None))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        CallError::Rejected {
            status: 400,
            message: "busy".to_string()
        }
    );
    assert_eq!(err.to_string(), "busy");
}

#[tokio::test]
async fn test_place_call_rejection_without_message_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .place_call(&request("+918267818162", None))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Failed");
}

#[tokio::test]
async fn test_place_call_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "c1" })))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::new(format!("{}/api", server.uri()))
        .with_token(Some("secret-token".to_string()));
    let client = HttpApiClient::new(config).unwrap();
    client
        .place_call(&request("+918267818161", None))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_place_call_transport_error() {
    let config = HttpClientConfig::new(format!("http://127.0.0.1:{}/api", closed_port()));
    let client = HttpApiClient::new(config).unwrap();

    let err = client
        .place_call(&request("+918267818161", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CallError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_place_call_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/outbound-call"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "late" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = HttpClientConfig::new(format!("{}/api", server.uri()))
        .with_request_timeout(Duration::from_millis(200));
    let client = HttpApiClient::new(config).unwrap();

    let err = client
        .place_call(&request("+918267818161", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CallError::Transport(_)));
}

// =============================================================================
// Call log and agents
// =============================================================================

#[tokio::test]
async fn test_call_info() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outbound-call-info/call-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "call-abc",
            "status": "ended",
            "startedAt": "2024-05-01T10:00:00Z",
            "endedAt": "2024-05-01T10:02:05Z",
            "cost": 0.5,
            "customer": { "number": "+918267818161" },
            "transcript": "AI: Hello\nUser: Hi"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let record = client.call_info("call-abc").await.unwrap();
    assert_eq!(record.id, "call-abc");
    assert_eq!(record.status.as_deref(), Some("ended"));
    assert_eq!(record.customer_number(), Some("+918267818161"));
    assert_eq!(record.cost, Some(0.5));
}

#[tokio::test]
async fn test_call_info_not_found_extracts_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/outbound-call-info/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Call not found" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.call_info("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Call not found");
}

#[tokio::test]
async fn test_error_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calls/list"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_calls(&CallListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(err.to_string(), "Request failed: 500");
}

#[tokio::test]
async fn test_error_uses_plain_text_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calls/list"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_calls(&CallListQuery::default()).await.unwrap_err();
    assert_eq!(err.to_string(), "Forbidden");
}

#[tokio::test]
async fn test_list_calls_sends_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calls/list"))
        .and(query_param("page", "2"))
        .and(query_param("q", "+9182"))
        .and(query_param("status", "ended"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "c1", "status": "ended" },
            { "_id": "c2", "status": "ended", "cost": 1.25 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let query = CallListQuery {
        page: Some(2),
        search: Some("+9182".to_string()),
        status: Some("ended".to_string()),
        ..Default::default()
    };
    let calls = client.list_calls(&query).await.unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].cost, Some(1.25));
}

#[tokio::test]
async fn test_list_agents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vapi/agents"))
        .and(query_param("search", "sales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                { "_id": "a1", "name": "Sales", "status": "active" },
                { "_id": "a2", "name": "Sales draft", "status": "draft" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let agents = client.list_agents(Some("sales")).await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].id, "a1");
    assert_eq!(agents[1].status, AgentStatus::Draft);
}

#[tokio::test]
async fn test_agent_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vapi/agents/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "agent": {
                "_id": "a1",
                "name": "Sales",
                "vapiAssistantId": "asst-1",
                "status": "active",
                "statistics": { "totalCalls": 10, "successfulCalls": 8, "failedCalls": 2 },
                "metadata": { "category": "sales", "tags": ["outbound"], "version": 3 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let agent = client.agent("a1").await.unwrap();
    assert_eq!(agent.vapi_assistant_id.as_deref(), Some("asst-1"));
    assert_eq!(agent.statistics.success_rate(), Some(80.0));
    assert_eq!(agent.metadata.tags, vec!["outbound".to_string()]);
}

#[tokio::test]
async fn test_agent_stats_overview() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vapi/agents/stats/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "stats": {
                "totalAgents": 4,
                "activeAgents": 3,
                "totalCalls": 120,
                "successfulCalls": 100,
                "failedCalls": 20,
                "mostUsed": [{ "id": "a1", "name": "Sales", "calls": 90 }]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let stats = client.agent_stats().await.unwrap();
    assert_eq!(stats.total_agents, 4);
    assert_eq!(stats.most_used[0].name, "Sales");
}

#[tokio::test]
async fn test_delete_agent_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/vapi/agents/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Agent deleted successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/vapi/agents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Agent not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_agent("a1").await.unwrap();

    let err = client.delete_agent("missing").await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Agent not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// =============================================================================
// Phone numbers and SIP credentials
// =============================================================================

#[tokio::test]
async fn test_list_phone_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vapi/phone-numbers"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": 2,
            "phoneNumbers": [
                { "id": "pn1", "number": "+918267818161", "provider": "twilio", "assistantId": "asst-1" },
                { "id": "pn2", "provider": "byo-sip-trunk", "sipUri": "sip:desk@pbx.example.com" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = HttpClientConfig::new(format!("{}/api", server.uri()))
        .with_token(Some("t0ken".to_string()));
    let client = HttpApiClient::new(config).unwrap();
    let lines = client.list_phone_numbers().await.unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].is_assigned());
    assert_eq!(lines[1].address(), "sip:desk@pbx.example.com");
}

#[tokio::test]
async fn test_assign_phone_number_sends_assistant_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/vapi/phone-numbers/pn1/assign"))
        .and(body_json(json!({ "assistantId": "asst-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.assign_phone_number("pn1", Some("asst-1")).await.unwrap();
}

#[tokio::test]
async fn test_unassign_phone_number_sends_null() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/vapi/phone-numbers/pn1/assign"))
        .and(body_json(json!({ "assistantId": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.assign_phone_number("pn1", Some("unassigned")).await.unwrap();
    client.assign_phone_number("pn1", None).await.unwrap();
}

#[tokio::test]
async fn test_delete_phone_number() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/vapi/phone-numbers/pn1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/vapi/phone-numbers/pn2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Vapi API error" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_phone_number("pn1").await.unwrap();

    let err = client.delete_phone_number("pn2").await.unwrap_err();
    assert_eq!(err.to_string(), "Vapi API error");
}

#[tokio::test]
async fn test_list_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vapi/credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "credentials": [
                { "id": "cred-1", "name": "Office PBX", "provider": "byo-sip-trunk",
                  "gateways": [{ "ip": "203.0.113.10", "inboundEnabled": false }] }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let credentials = client.list_credentials().await.unwrap();
    assert_eq!(credentials.len(), 1);
    assert_eq!(credentials[0].gateways[0].ip, "203.0.113.10");
}
