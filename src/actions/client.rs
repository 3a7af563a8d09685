use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::chart::ChartData;
use crate::config::Server;
use crate::model::{Anomaly, Bottleneck, TrafficPatterns, string_or_number};

const ACKNOWLEDGE_PATH: &str = "/api/alerts/acknowledge/";
const GENERATE_REPORT_PATH: &str = "/api/automation/generate-report";
const DOWNLOAD_REPORT_PATH: &str = "/api/reports/download/";
const PERFORMANCE_PATH: &str = "/api/metrics/performance";
const TRAFFIC_PATTERNS_PATH: &str = "/api/analytics/traffic-patterns";
const ANOMALIES_PATH: &str = "/api/analytics/anomalies";
const BOTTLENECKS_PATH: &str = "/api/analytics/bottlenecks";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn is_success_status(status: &str) -> bool {
    status == "success"
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatternsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub patterns: TrafficPatterns,
}

impl PatternsResponse {
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnomaliesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
}

impl AnomaliesResponse {
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BottlenecksResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub bottlenecks: Vec<Bottleneck>,
}

impl BottlenecksResponse {
    pub fn is_success(&self) -> bool {
        is_success_status(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "chartData")]
    pub chart_data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRequest {
    pub report_type: String,
    pub period: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub report_id: String,
}

/// Request/response endpoints of the dashboard server.
pub trait DashboardApi {
    async fn acknowledge_alert(&self, alert_id: &str) -> Result<(), ApiError>;
    async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError>;
    async fn download_report(&self, report_id: &str) -> Result<Vec<u8>, ApiError>;
    async fn performance_chart(&self, range: &str) -> Result<PerformanceResponse, ApiError>;
    async fn traffic_patterns(&self) -> Result<PatternsResponse, ApiError>;
    async fn anomalies(&self) -> Result<AnomaliesResponse, ApiError>;
    async fn bottlenecks(&self) -> Result<BottlenecksResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn from_config(server: &Server) -> Result<Self, ApiError> {
        let base_url = Url::parse(&server.base_url).map_err(|error| ApiError::InvalidUrl {
            url: server.base_url.clone(),
            reason: error.to_string(),
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(server.request_timeout_secs))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url.join(path).map_err(|error| ApiError::InvalidUrl {
            url: path.to_string(),
            reason: error.to_string(),
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let endpoint = url.path().to_string();
        let response = self.send(self.client.get(url), &endpoint).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }
}

impl DashboardApi for ApiClient {
    async fn acknowledge_alert(&self, alert_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("{}{}", ACKNOWLEDGE_PATH, alert_id))?;
        let endpoint = url.path().to_string();
        self.send(self.client.post(url), &endpoint).await?;
        Ok(())
    }

    async fn generate_report(&self, request: &ReportRequest) -> Result<ReportResponse, ApiError> {
        let url = self.endpoint(GENERATE_REPORT_PATH)?;
        let endpoint = url.path().to_string();
        let response = self
            .send(self.client.post(url).json(request), &endpoint)
            .await?;
        response
            .json::<ReportResponse>()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })
    }

    async fn download_report(&self, report_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint(&format!("{}{}", DOWNLOAD_REPORT_PATH, report_id))?;
        let endpoint = url.path().to_string();
        let response = self.send(self.client.get(url), &endpoint).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Decode { endpoint, source })?;
        Ok(bytes.to_vec())
    }

    async fn performance_chart(&self, range: &str) -> Result<PerformanceResponse, ApiError> {
        let mut url = self.endpoint(PERFORMANCE_PATH)?;
        url.query_pairs_mut().append_pair("range", range);
        self.get_json(url).await
    }

    async fn traffic_patterns(&self) -> Result<PatternsResponse, ApiError> {
        self.get_json(self.endpoint(TRAFFIC_PATTERNS_PATH)?).await
    }

    async fn anomalies(&self) -> Result<AnomaliesResponse, ApiError> {
        self.get_json(self.endpoint(ANOMALIES_PATH)?).await
    }

    async fn bottlenecks(&self) -> Result<BottlenecksResponse, ApiError> {
        self.get_json(self.endpoint(BOTTLENECKS_PATH)?).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ApiClient, PerformanceResponse, ReportResponse};
    use crate::config::Server;

    #[test]
    fn rejects_unparsable_base_url() {
        let server = Server {
            base_url: "not a url".to_string(),
            ..Server::default()
        };
        let error = ApiClient::from_config(&server).expect_err("base url should be rejected");
        assert!(error.to_string().contains("not a url"));
    }

    #[test]
    fn endpoints_join_onto_base_url() {
        let client = ApiClient::from_config(&Server::default()).expect("client should build");
        let url = client
            .endpoint("/api/analytics/anomalies")
            .expect("endpoint should join");
        assert_eq!(url.as_str(), "http://127.0.0.1:7777/api/analytics/anomalies");
    }

    #[test]
    fn response_shapes_decode() {
        let report: ReportResponse =
            serde_json::from_value(json!({"success": true, "report_id": 17}))
                .expect("report response should decode");
        assert!(report.success);
        assert_eq!(report.report_id, "17");

        let performance: PerformanceResponse = serde_json::from_value(json!({
            "success": true,
            "chartData": {
                "labels": ["10:00", "10:05"],
                "datasets": [{"label": "Inbound", "data": [1.0, 2.0]}]
            }
        }))
        .expect("performance response should decode");
        assert!(performance.success);
        assert_eq!(performance.chart_data.labels.len(), 2);
    }
}
