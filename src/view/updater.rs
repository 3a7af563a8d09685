use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::config::Timing;
use crate::format::{HealthTier, alert_badge_text, format_chart_time, format_traffic, parse_counter_text};
use crate::model::{Alert, Anomaly, Bottleneck, MetricsSnapshot, TrafficPatterns};
use crate::series::SeriesPoint;

use super::{
    BottleneckPanel, ConnectionStatus, CounterAnimation, CounterId, DashboardView, HealthBar,
    Region, Toast, ToastKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExpiryTarget {
    Anomaly,
    Toast,
}

impl DashboardView {
    fn begin_fade(&mut self, target: ExpiryTarget, id: u64) -> bool {
        match target {
            ExpiryTarget::Anomaly => self.anomalies.begin_fade(id),
            ExpiryTarget::Toast => self.toasts.begin_fade(id),
        }
    }

    fn remove_expiring(&mut self, target: ExpiryTarget, id: u64) -> bool {
        match target {
            ExpiryTarget::Anomaly => self.anomalies.remove(id),
            ExpiryTarget::Toast => self.toasts.remove(id),
        }
    }

    fn update_health_bar(&mut self, online: i64, total: i64) {
        if !self.is_mounted(Region::HealthBar) {
            return;
        }
        let percentage = if total > 0 {
            online as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        self.health_bar = Some(HealthBar {
            width_percent: percentage,
            tier: HealthTier::from_percentage(percentage),
        });
    }

    fn update_alert_indicator(&mut self, count: i64) {
        if !self.is_mounted(Region::AlertIndicator) {
            return;
        }
        self.alert_badge.active = count > 0;
        self.alert_badge.text = alert_badge_text(count);
    }
}

pub async fn apply_metrics(app_context: &AppContext, snapshot: MetricsSnapshot) {
    let timing = app_context.runtime_config.read().await.timing.clone();
    let mut counters = Vec::with_capacity(3);

    {
        let mut view = app_context.view.lock().await;

        if let Some(total) = snapshot.total_devices {
            view.last_total_devices = Some(total);
            counters.push((CounterId::TotalDevices, total));
        }

        if let Some(online) = snapshot.online_devices {
            counters.push((CounterId::OnlineDevices, online));
            // A snapshot without a total reuses the last one received instead
            // of reading as 0% health.
            let total = snapshot
                .total_devices
                .or(view.last_total_devices)
                .unwrap_or(0);
            view.update_health_bar(online, total);
        }

        if let Some(traffic) = snapshot.total_traffic
            && view.is_mounted(Region::TotalTraffic)
        {
            view.traffic_text = format_traffic(traffic);
        }

        if let Some(active) = snapshot.active_alerts {
            counters.push((CounterId::ActiveAlerts, active));
            view.update_alert_indicator(active);
        }

        if let Some(sample) = snapshot.performance_data
            && view.is_mounted(Region::PerformanceChart)
        {
            let label = format_chart_time(&Local::now());
            view.chart
                .append(SeriesPoint::new(label, vec![sample.inbound, sample.outbound]));
        }

        if let Some(devices) = snapshot.top_devices
            && view.is_mounted(Region::DeviceList)
        {
            view.devices = devices;
        }
    }

    tracing::debug!(
        target: "view",
        module = "view",
        total_devices = snapshot.total_devices,
        online_devices = snapshot.online_devices,
        active_alerts = snapshot.active_alerts,
        total_traffic = snapshot.total_traffic,
        "metrics_applied"
    );

    for (counter, target) in counters {
        animate_counter(app_context, counter, target, &timing).await;
    }
}

async fn animate_counter(app_context: &AppContext, counter: CounterId, target: i64, timing: &Timing) {
    let from = {
        let view = app_context.view.lock().await;
        if !view.is_mounted(counter.region()) {
            return;
        }
        parse_counter_text(view.counter_text(counter))
    };

    let animation = CounterAnimation::new(
        from,
        target,
        timing.counter_duration_ms,
        timing.counter_tick_ms,
    );
    app_context.animations.lock().await.start(
        app_context.view.clone(),
        counter,
        animation,
        Duration::from_millis(timing.counter_tick_ms),
    );
}

pub async fn apply_alert(app_context: &AppContext, alert: Alert) {
    let cue_settings = app_context.runtime_config.read().await.alerts.clone();

    {
        let mut view = app_context.view.lock().await;
        if view.is_mounted(Region::AlertList)
            && let Some(evicted) = view.alerts.prepend(alert.clone())
        {
            log::debug!("alert_evicted id={}", evicted.alert.id);
        }
    }

    tracing::info!(
        target: "view",
        module = "view",
        alert_id = %alert.id,
        severity = alert.severity.as_str(),
        "alert_displayed"
    );

    if alert.severity.is_urgent() {
        app_context.cues.announce(&alert, &cue_settings).await;
    }
}

pub async fn apply_anomaly(app_context: &AppContext, anomaly: Anomaly) {
    let timing = app_context.runtime_config.read().await.timing.clone();

    let id = {
        let mut view = app_context.view.lock().await;
        if !view.is_mounted(Region::AnomalyContainer) {
            return;
        }
        view.anomalies.push(anomaly)
    };

    schedule_expiry(
        app_context.view.clone(),
        ExpiryTarget::Anomaly,
        id,
        Duration::from_millis(timing.anomaly_display_ms),
        Duration::from_millis(timing.fade_ms),
    );
}

pub async fn apply_connectivity(app_context: &AppContext, status: ConnectionStatus) {
    let mut view = app_context.view.lock().await;
    if view.is_mounted(Region::ConnectionStatus) {
        view.connection = Some(status);
    }
    log::info!("feed_connectivity status={}", status.class_name());
}

pub async fn apply_traffic_patterns(app_context: &AppContext, patterns: TrafficPatterns) {
    let mut view = app_context.view.lock().await;

    if !patterns.peak_hours.is_empty() && view.is_mounted(Region::PeakHours) {
        let hours = patterns
            .peak_hours
            .iter()
            .map(|hour| format!("{:02}", hour))
            .collect::<Vec<_>>();
        view.peak_hours = format!("{}h", hours.join(", "));
    }

    if let Some(protocols) = patterns.protocol_distribution
        && view.is_mounted(Region::ProtocolChart)
    {
        view.protocols = protocols;
    }
}

pub async fn apply_bottlenecks(app_context: &AppContext, bottlenecks: Vec<Bottleneck>) {
    let mut view = app_context.view.lock().await;
    if !view.is_mounted(Region::Bottlenecks) {
        return;
    }
    view.bottlenecks = if bottlenecks.is_empty() {
        BottleneckPanel::NoIssues
    } else {
        BottleneckPanel::Issues(bottlenecks)
    };
}

pub async fn show_toast(app_context: &AppContext, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let timing = app_context.runtime_config.read().await.timing.clone();

    let id = {
        let mut view = app_context.view.lock().await;
        if !view.is_mounted(Region::Notifications) {
            return;
        }
        view.toasts.push(Toast {
            kind,
            message: message.clone(),
        })
    };
    log::info!("toast_shown kind={:?} message={}", kind, message);

    schedule_expiry(
        app_context.view.clone(),
        ExpiryTarget::Toast,
        id,
        Duration::from_millis(timing.toast_display_ms),
        Duration::from_millis(timing.fade_ms),
    );
}

fn schedule_expiry(
    view: Arc<Mutex<DashboardView>>,
    target: ExpiryTarget,
    id: u64,
    display: Duration,
    fade: Duration,
) {
    tokio::spawn(async move {
        sleep(display).await;
        if !view.lock().await.begin_fade(target, id) {
            return;
        }
        sleep(fade).await;
        view.lock().await.remove_expiring(target, id);
    });
}
