//! HTTP client for communicating with the onboarding API
//!
//! Every call is a single JSON request/response exchange. Requests carry an
//! `X-Request-ID` so failures can be matched against the server's logs.

use super::error::ApiError;
use super::submission::created_id;
use super::traits::OnboardingApi;
use super::types::{ApprovalRequest, Breakdown, Envelope, Page, StepReport, WizardRequest};
use crate::config::TuiConfig;
use crate::state::{
    AnalyticsSummary, OnboardingStats, StatusShare, StepMetric, TypeShare, WorkflowDetail,
    WorkflowSummary,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Error bodies are kept for the status line, not dumped whole
const MAX_ERROR_BODY: usize = 200;

/// Client for the onboarding REST API
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from the user configuration
    pub fn new(config: &TuiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Onboarding resource URL for the given suffix
    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/onboarding{}", self.base_url, path)
    }

    /// Analytics resource URL for the given suffix
    fn analytics_url(&self, path: &str) -> String {
        format!("{}/api/v1/analytics{}", self.base_url, path)
    }

    /// GET an analytics resource for the last `days` days
    async fn get_analytics<T: DeserializeOwned>(&self, path: &str, days: u32) -> Result<T, ApiError> {
        self.send(
            self.client
                .get(self.analytics_url(path))
                .query(&[("days", days)]),
        )
        .await
    }

    /// Send a request and decode a successful JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let response = request
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;

        if !status.is_success() {
            tracing::debug!(%request_id, status = status.as_u16(), "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl OnboardingApi for ApiClient {
    async fn list_workflows(&self) -> Result<Vec<WorkflowSummary>, ApiError> {
        let page: Page<WorkflowSummary> = self.send(self.client.get(self.url(""))).await?;
        let items = page.items.ok_or(ApiError::MissingData("items"))?;
        tracing::trace!(count = items.len(), total = page.total, "Fetched workflows");
        Ok(items)
    }

    async fn get_workflow(&self, workflow_id: &str) -> Result<WorkflowDetail, ApiError> {
        let envelope: Envelope<WorkflowDetail> = self
            .send(self.client.get(self.url(&format!("/{workflow_id}"))))
            .await?;
        envelope.data.ok_or(ApiError::MissingData("data"))
    }

    async fn get_stats(&self) -> Result<OnboardingStats, ApiError> {
        self.send(self.client.get(self.url("/stats"))).await
    }

    async fn get_analytics_summary(&self, days: u32) -> Result<AnalyticsSummary, ApiError> {
        self.get_analytics("/summary", days).await
    }

    async fn get_status_breakdown(&self, days: u32) -> Result<Vec<StatusShare>, ApiError> {
        let body: Breakdown<StatusShare> = self
            .get_analytics("/workflow-status-breakdown", days)
            .await?;
        Ok(body.breakdown)
    }

    async fn get_type_breakdown(&self, days: u32) -> Result<Vec<TypeShare>, ApiError> {
        let body: Breakdown<TypeShare> = self.get_analytics("/workflow-types", days).await?;
        Ok(body.breakdown)
    }

    async fn get_step_analytics(&self, days: u32) -> Result<Vec<StepMetric>, ApiError> {
        let body: StepReport<StepMetric> = self.get_analytics("/step-analytics", days).await?;
        tracing::trace!(count = body.steps.len(), days, "Fetched step analytics");
        Ok(body.steps)
    }

    async fn create_onboarding(
        &self,
        request: &WizardRequest,
    ) -> Result<Option<String>, ApiError> {
        let body: serde_json::Value = self
            .send(self.client.post(self.url("/wizard")).json(request))
            .await?;
        Ok(created_id(&body))
    }

    async fn approve_workflow(
        &self,
        workflow_id: &str,
        notes: Option<String>,
    ) -> Result<(), ApiError> {
        let body = ApprovalRequest {
            approved: true,
            notes,
        };
        let envelope: Envelope<serde_json::Value> = self
            .send(
                self.client
                    .post(self.url(&format!("/{workflow_id}/approve")))
                    .json(&body),
            )
            .await?;
        if let Some(message) = envelope.message {
            tracing::info!(workflow_id, %message, "Workflow approved");
        }
        Ok(())
    }

    async fn cancel_workflow(&self, workflow_id: &str) -> Result<(), ApiError> {
        let envelope: Envelope<serde_json::Value> = self
            .send(
                self.client
                    .post(self.url(&format!("/{workflow_id}/cancel"))),
            )
            .await?;
        if let Some(message) = envelope.message {
            tracing::info!(workflow_id, %message, "Workflow cancelled");
        }
        Ok(())
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::WizardContext;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one canned HTTP response and hand back the raw request
    async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&raw).to_string());
        });

        (format!("http://{addr}"), rx)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn client_for(base_url: String) -> ApiClient {
        ApiClient::new(&TuiConfig {
            api_base_url: Some(base_url),
            request_timeout_ms: Some(2_000),
            ..Default::default()
        })
        .unwrap()
    }

    fn sample_request() -> WizardRequest {
        WizardRequest {
            company_name: "Acme Corp".to_string(),
            tax_id: "12-3456789".to_string(),
            contact_name: "John Doe".to_string(),
            email: "john@acme.com".to_string(),
            workflow_type: "standard_onboarding".to_string(),
            priority: "normal".to_string(),
            context: WizardContext {
                intake_source: "tui_wizard".to_string(),
            },
        }
    }

    #[test]
    fn test_url_building() {
        let client = client_for("http://localhost:8000".to_string());
        assert_eq!(client.url(""), "http://localhost:8000/api/v1/onboarding");
        assert_eq!(
            client.url("/wf_1/approve"),
            "http://localhost:8000/api/v1/onboarding/wf_1/approve"
        );
    }

    #[test]
    fn test_analytics_url_building() {
        let client = client_for("http://localhost:8000/".to_string());
        assert_eq!(
            client.analytics_url("/summary"),
            "http://localhost:8000/api/v1/analytics/summary"
        );
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), MAX_ERROR_BODY + 3);
    }

    #[tokio::test]
    async fn test_create_onboarding_posts_wizard_body() {
        let (base, request_rx) =
            serve_once("201 Created", r#"{"success":true,"data":{"id":"wf_123"}}"#).await;
        let client = client_for(base);

        let id = client.create_onboarding(&sample_request()).await.unwrap();
        assert_eq!(id, Some("wf_123".to_string()));

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("POST /api/v1/onboarding/wizard "));
        assert!(raw.to_ascii_lowercase().contains("x-request-id:"));
        assert!(raw.contains(r#""workflow_type":"standard_onboarding""#));
        assert!(raw.contains(r#""context":{"intake_source":"tui_wizard"}"#));
    }

    #[tokio::test]
    async fn test_create_onboarding_without_id_is_none() {
        let (base, _rx) = serve_once("201 Created", r#"{"success":true,"data":null}"#).await;
        let client = client_for(base);

        let id = client.create_onboarding(&sample_request()).await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (base, _rx) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let client = client_for(base);

        let err = client.create_onboarding(&sample_request()).await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base, _rx) = serve_once("200 OK", "<html>not json</html>").await;
        let client = client_for(base);

        let err = client.get_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_list_workflows_reads_items() {
        let (base, request_rx) = serve_once(
            "200 OK",
            r#"{"items":[{"id":"wf_1","status":"completed"},{"id":"wf_2"}],"total":2,"page":1,"page_size":20,"total_pages":1}"#,
        )
        .await;
        let client = client_for(base);

        let items = client.list_workflows().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "wf_1");

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /api/v1/onboarding "));
    }

    #[tokio::test]
    async fn test_list_without_items_is_missing_data() {
        let (base, _rx) = serve_once("200 OK", r#"{"detail":"nope"}"#).await;
        let client = client_for(base);

        let err = client.list_workflows().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingData("items")));
    }

    #[tokio::test]
    async fn test_get_workflow_unwraps_envelope() {
        let (base, request_rx) = serve_once(
            "200 OK",
            r#"{"success":true,"data":{"id":"wf_9","status":"in_progress","steps":[{"step_name":"intake","sequence_order":1,"status":"completed"}]}}"#,
        )
        .await;
        let client = client_for(base);

        let detail = client.get_workflow("wf_9").await.unwrap();
        assert_eq!(detail.summary.id, "wf_9");
        assert_eq!(detail.steps.len(), 1);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /api/v1/onboarding/wf_9 "));
    }

    #[tokio::test]
    async fn test_unreachable_api_is_unavailable() {
        // Bind then drop so the port is closed
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}"));
        let err = client.get_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable | ApiError::Request(_)));
    }

    #[tokio::test]
    async fn test_analytics_summary_sends_days_query() {
        let (base, request_rx) = serve_once(
            "200 OK",
            r#"{"period_days":7,"total_workflows":4,"completed_workflows":3,"success_rate":75.0}"#,
        )
        .await;
        let client = client_for(base);

        let summary = client.get_analytics_summary(7).await.unwrap();
        assert_eq!(summary.period_days, 7);
        assert_eq!(summary.completed_workflows, 3);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /api/v1/analytics/summary?days=7 "));
    }

    #[tokio::test]
    async fn test_status_breakdown_unwraps_rows() {
        let (base, request_rx) = serve_once(
            "200 OK",
            r#"{"period_days":30,"total_workflows":5,"breakdown":[{"status":"completed","count":4,"percentage":80.0},{"status":"failed","count":1,"percentage":20.0}]}"#,
        )
        .await;
        let client = client_for(base);

        let rows = client.get_status_breakdown(30).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].count, 1);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /api/v1/analytics/workflow-status-breakdown?days=30 "));
    }

    #[tokio::test]
    async fn test_step_analytics_unwraps_steps() {
        let (base, request_rx) = serve_once(
            "200 OK",
            r#"{"period_days":14,"total_steps":1,"steps":[{"step_name":"kyc_check","total_executions":6,"successful_executions":5,"failed_executions":1,"success_rate":83.33,"avg_duration_minutes":2.5}]}"#,
        )
        .await;
        let client = client_for(base);

        let steps = client.get_step_analytics(14).await.unwrap();
        assert_eq!(steps[0].step_name, "kyc_check");
        assert_eq!(steps[0].failed_executions, 1);

        let raw = request_rx.await.unwrap();
        assert!(raw.starts_with("GET /api/v1/analytics/step-analytics?days=14 "));
    }
}
