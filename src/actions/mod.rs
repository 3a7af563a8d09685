mod client;

use std::path::PathBuf;

use crate::app_context::AppContext;
use crate::view::{
    Region, ToastKind, apply_anomaly, apply_bottlenecks, apply_traffic_patterns, show_toast,
};

pub use client::{
    AnomaliesResponse, ApiClient, ApiError, BottlenecksResponse, DashboardApi, PatternsResponse,
    PerformanceResponse, ReportRequest, ReportResponse,
};

const REPORT_BUSY_LABEL: &str = "Generating...";

pub async fn acknowledge_alert<A: DashboardApi>(
    app_context: &AppContext,
    api: &A,
    alert_id: &str,
) -> bool {
    match api.acknowledge_alert(alert_id).await {
        Ok(()) => {
            let marked = app_context.view.lock().await.alerts.acknowledge(alert_id);
            log::info!("alert_acknowledged id={} displayed={}", alert_id, marked);
            true
        }
        Err(error) => {
            log::error!("alert_acknowledge_failed id={} error={}", alert_id, error);
            false
        }
    }
}

/// Requests a report and downloads it on success. The report control is
/// busy for the duration of the request and restored whatever the outcome.
pub async fn generate_report<A: DashboardApi>(app_context: &AppContext, api: &A) -> Option<PathBuf> {
    app_context
        .view
        .lock()
        .await
        .report_action
        .begin(REPORT_BUSY_LABEL);

    let request = ReportRequest {
        report_type: app_context.config.reports.report_type.clone(),
        period: app_context.config.reports.period.clone(),
    };
    let outcome = api.generate_report(&request).await;

    app_context.view.lock().await.report_action.restore();

    match outcome {
        Ok(response) if response.success && !response.report_id.is_empty() => {
            show_toast(app_context, ToastKind::Success, "Report generated").await;
            match download_report(app_context, api, &response.report_id).await {
                Ok(path) => Some(path),
                Err(error) => {
                    log::error!(
                        "report_download_failed id={} error={}",
                        response.report_id,
                        error
                    );
                    None
                }
            }
        }
        Ok(response) => {
            log::warn!(
                "report_generation_rejected type={} period={} success={}",
                request.report_type,
                request.period,
                response.success
            );
            show_toast(app_context, ToastKind::Error, "Report generation failed").await;
            None
        }
        Err(error) => {
            log::error!("report_generation_failed error={}", error);
            show_toast(
                app_context,
                ToastKind::Error,
                "An error occurred while generating the report",
            )
            .await;
            None
        }
    }
}

pub async fn download_report<A: DashboardApi>(
    app_context: &AppContext,
    api: &A,
    report_id: &str,
) -> Result<PathBuf, ApiError> {
    let bytes = api.download_report(report_id).await?;

    let dir = PathBuf::from(&app_context.config.reports.download_dir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| ApiError::Io {
            path: dir.display().to_string(),
            source,
        })?;

    let path = dir.join(report_file_name(report_id));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;

    log::info!(
        "report_downloaded id={} path={} bytes={}",
        report_id,
        path.display(),
        bytes.len()
    );
    Ok(path)
}

fn report_file_name(report_id: &str) -> String {
    let safe_id = report_id
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    format!("report_{}.pdf", safe_id)
}

pub async fn load_chart_range<A: DashboardApi>(
    app_context: &AppContext,
    api: &A,
    range: &str,
) -> bool {
    app_context.view.lock().await.selected_range = Some(range.to_string());

    match api.performance_chart(range).await {
        Ok(response) if response.success => {
            let mut view = app_context.view.lock().await;
            if view.is_mounted(Region::PerformanceChart) {
                view.chart.replace_data(response.chart_data);
            }
            log::info!("chart_range_loaded range={}", range);
            true
        }
        Ok(_) => {
            log::warn!("chart_range_rejected range={}", range);
            false
        }
        Err(error) => {
            log::error!("chart_range_failed range={} error={}", range, error);
            false
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsOutcome {
    pub patterns: bool,
    pub anomalies: usize,
    pub bottlenecks: bool,
}

/// Fetches the three analytics sources concurrently. Each result is applied
/// on its own, so one failing source leaves the others untouched.
pub async fn load_advanced_analytics<A: DashboardApi>(
    app_context: &AppContext,
    api: &A,
) -> AnalyticsOutcome {
    let (patterns, anomalies, bottlenecks) =
        tokio::join!(api.traffic_patterns(), api.anomalies(), api.bottlenecks());
    let mut outcome = AnalyticsOutcome::default();

    match patterns {
        Ok(response) if response.is_success() => {
            apply_traffic_patterns(app_context, response.patterns).await;
            outcome.patterns = true;
        }
        Ok(response) => log::warn!(
            "analytics_source_unsuccessful source=traffic_patterns status={}",
            response.status
        ),
        Err(error) => log::error!("analytics_source_failed source=traffic_patterns error={}", error),
    }

    match anomalies {
        Ok(response) if response.is_success() => {
            outcome.anomalies = response.anomalies.len();
            for anomaly in response.anomalies {
                apply_anomaly(app_context, anomaly).await;
            }
        }
        Ok(response) => log::warn!(
            "analytics_source_unsuccessful source=anomalies status={}",
            response.status
        ),
        Err(error) => log::error!("analytics_source_failed source=anomalies error={}", error),
    }

    match bottlenecks {
        Ok(response) if response.is_success() => {
            apply_bottlenecks(app_context, response.bottlenecks).await;
            outcome.bottlenecks = true;
        }
        Ok(response) => log::warn!(
            "analytics_source_unsuccessful source=bottlenecks status={}",
            response.status
        ),
        Err(error) => log::error!("analytics_source_failed source=bottlenecks error={}", error),
    }

    tracing::info!(
        target: "actions",
        module = "actions",
        patterns = outcome.patterns,
        anomalies = outcome.anomalies,
        bottlenecks = outcome.bottlenecks,
        "advanced_analytics_loaded"
    );
    outcome
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    AddDevice,
    PacketCapture,
    Report,
    Settings,
}

impl QuickAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "add-device" => Some(Self::AddDevice),
            "packet-capture" => Some(Self::PacketCapture),
            "report" => Some(Self::Report),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    pub fn page_path(self) -> Option<&'static str> {
        match self {
            Self::AddDevice => Some("/devices?action=add"),
            Self::PacketCapture => Some("/packet_sniffer"),
            Self::Settings => Some("/settings"),
            Self::Report => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickActionOutcome {
    Navigate(String),
    Report(Option<PathBuf>),
}

pub async fn run_quick_action<A: DashboardApi>(
    app_context: &AppContext,
    api: &A,
    action: QuickAction,
) -> QuickActionOutcome {
    match action.page_path() {
        Some(path) => {
            let url = format!(
                "{}{}",
                app_context.config.server.base_url.trim_end_matches('/'),
                path
            );
            log::info!("quick_action_navigate action={:?} url={}", action, url);
            QuickActionOutcome::Navigate(url)
        }
        None => QuickActionOutcome::Report(generate_report(app_context, api).await),
    }
}
