use chrono::Utc;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::chart::UpdateMode;
use crate::config::Config;
use crate::format::HealthTier;
use crate::model::{Alert, Anomaly, MetricsSnapshot, PerformanceSample, Severity};

use super::{
    ConnectionStatus, CounterId, Region, ToastKind, apply_alert, apply_anomaly,
    apply_connectivity, apply_metrics, show_toast, summary_lines,
};

fn anomaly(metric: &str) -> Anomaly {
    Anomaly {
        metric: metric.to_string(),
        current_value: Some(97.0),
        expected_range: Some([20.0, 60.0]),
    }
}

fn alert(id: usize, severity: Severity) -> Alert {
    Alert {
        id: id.to_string(),
        severity,
        title: format!("alert {id}"),
        message: "threshold exceeded".to_string(),
        timestamp: None,
    }
}

fn total_devices(count: i64) -> MetricsSnapshot {
    MetricsSnapshot {
        total_devices: Some(count),
        ..MetricsSnapshot::default()
    }
}

#[tokio::test(start_paused = true)]
async fn anomaly_card_is_removed_between_display_and_fade_deadline() {
    let app = AppContext::for_tests(Config::default());
    apply_anomaly(&app, anomaly("cpu")).await;
    assert_eq!(app.view.lock().await.anomalies.len(), 1);

    sleep(Duration::from_millis(4_999)).await;
    {
        let view = app.view.lock().await;
        let card = view.anomalies.iter().next().expect("card still shown");
        assert!(!card.fading);
    }

    sleep(Duration::from_millis(2)).await;
    {
        let view = app.view.lock().await;
        let card = view.anomalies.iter().next().expect("card fading");
        assert!(card.fading);
    }

    sleep(Duration::from_millis(300)).await;
    assert!(app.view.lock().await.anomalies.is_empty());
}

#[tokio::test(start_paused = true)]
async fn anomaly_expiry_removes_its_own_card() {
    let app = AppContext::for_tests(Config::default());
    apply_anomaly(&app, anomaly("cpu")).await;
    sleep(Duration::from_millis(2_000)).await;
    apply_anomaly(&app, anomaly("memory")).await;

    sleep(Duration::from_millis(3_400)).await;
    let view = app.view.lock().await;
    let remaining = view
        .anomalies
        .iter()
        .map(|card| (card.item.metric.clone(), card.fading))
        .collect::<Vec<_>>();
    assert_eq!(remaining, vec![("memory".to_string(), false)]);
}

#[tokio::test(start_paused = true)]
async fn toasts_expire_after_display_and_fade() {
    let app = AppContext::for_tests(Config::default());
    show_toast(&app, ToastKind::Info, "Report queued").await;

    sleep(Duration::from_millis(3_100)).await;
    {
        let view = app.view.lock().await;
        let toast = view.toasts.iter().next().expect("toast fading");
        assert!(toast.fading);
        assert_eq!(toast.item.message, "Report queued");
    }

    sleep(Duration::from_millis(250)).await;
    assert!(app.view.lock().await.toasts.is_empty());
}

#[tokio::test]
async fn disconnect_then_connect_leaves_only_connected() {
    let app = AppContext::for_tests(Config::default());
    apply_connectivity(&app, ConnectionStatus::Disconnected).await;
    apply_connectivity(&app, ConnectionStatus::Connected).await;

    let view = app.view.lock().await;
    assert_eq!(view.connection, Some(ConnectionStatus::Connected));
    assert_eq!(view.connection_class(), "connection-status connected");
}

#[tokio::test(start_paused = true)]
async fn counter_animation_ends_on_target() {
    let app = AppContext::for_tests(Config::default());
    apply_metrics(&app, total_devices(120)).await;

    sleep(Duration::from_millis(250)).await;
    let midway = app.view.lock().await.counter_text(CounterId::TotalDevices).to_string();
    let midway = midway.parse::<i64>().expect("counter shows an integer");
    assert!(midway > 0 && midway < 120, "midway value {midway}");

    sleep(Duration::from_millis(400)).await;
    assert_eq!(
        app.view.lock().await.counter_text(CounterId::TotalDevices),
        "120"
    );
    assert_eq!(app.animations.lock().await.active_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn second_animation_on_same_counter_cancels_the_first() {
    let app = AppContext::for_tests(Config::default());
    apply_metrics(&app, total_devices(100)).await;
    sleep(Duration::from_millis(100)).await;

    apply_metrics(&app, total_devices(40)).await;
    assert_eq!(app.animations.lock().await.active_count(), 1);

    for _ in 0..40 {
        sleep(Duration::from_millis(16)).await;
        let text = app.view.lock().await.counter_text(CounterId::TotalDevices).to_string();
        let value = text.parse::<i64>().expect("counter shows an integer");
        assert!(value <= 40, "first animation still running: {value}");
    }

    assert_eq!(
        app.view.lock().await.counter_text(CounterId::TotalDevices),
        "40"
    );
}

#[tokio::test(start_paused = true)]
async fn metrics_update_badge_health_bar_and_traffic() {
    let app = AppContext::for_tests(Config::default());
    apply_metrics(
        &app,
        MetricsSnapshot {
            total_devices: Some(200),
            online_devices: Some(150),
            active_alerts: Some(12),
            total_traffic: Some(1_500.0),
            ..MetricsSnapshot::default()
        },
    )
    .await;
    {
        let view = app.view.lock().await;
        assert_eq!(view.alert_badge.text, "9+");
        assert!(view.alert_badge.active);
        let bar = view.health_bar.expect("health bar set");
        assert!((bar.width_percent - 75.0).abs() < 1e-9);
        assert_eq!(bar.tier, HealthTier::Warning);
        assert_eq!(view.traffic_text, "1.5 Gbps");
    }

    apply_metrics(
        &app,
        MetricsSnapshot {
            online_devices: Some(190),
            active_alerts: Some(0),
            ..MetricsSnapshot::default()
        },
    )
    .await;
    let view = app.view.lock().await;
    assert_eq!(view.alert_badge.text, "");
    assert!(!view.alert_badge.active);
    let bar = view.health_bar.expect("health bar set");
    assert!((bar.width_percent - 95.0).abs() < 1e-9);
    assert_eq!(bar.tier, HealthTier::Good);
}

#[tokio::test]
async fn performance_sample_appends_without_animation() {
    let app = AppContext::for_tests(Config::default());
    let mut redraw = app.view.lock().await.chart.subscribe();

    apply_metrics(
        &app,
        MetricsSnapshot {
            performance_data: Some(PerformanceSample {
                inbound: 1.2,
                outbound: 0.4,
            }),
            ..MetricsSnapshot::default()
        },
    )
    .await;

    assert!(redraw.has_changed().expect("chart alive"));
    let frame = redraw.borrow_and_update().clone();
    assert_eq!(frame.mode, UpdateMode::NoAnimation);
    assert_eq!(frame.points.len(), 1);
    assert_eq!(frame.points[0].values, vec![1.2, 0.4]);
    assert_eq!(frame.points[0].label.len(), 5);
}

#[tokio::test]
async fn unmounted_regions_ignore_updates() {
    let app = AppContext::for_tests(Config::default());
    {
        let mut view = app.view.lock().await;
        view.unmount(Region::AlertList);
        view.unmount(Region::TotalDevices);
        view.unmount(Region::AnomalyContainer);
    }

    apply_alert(&app, alert(1, Severity::Warning)).await;
    apply_metrics(&app, total_devices(55)).await;
    apply_anomaly(&app, anomaly("disk")).await;

    let view = app.view.lock().await;
    assert!(view.alerts.is_empty());
    assert_eq!(view.counter_text(CounterId::TotalDevices), "");
    assert!(view.anomalies.is_empty());
    assert_eq!(view.last_total_devices, Some(55));
    assert_eq!(app.animations.lock().await.active_count(), 0);
}

#[tokio::test]
async fn alert_feed_keeps_ten_newest() {
    let app = AppContext::for_tests(Config::default());
    for id in 0..13 {
        apply_alert(&app, alert(id, Severity::Info)).await;
    }

    let view = app.view.lock().await;
    assert_eq!(view.alerts.len(), 10);
    let newest = view.alerts.entries().next().expect("alerts shown");
    assert_eq!(newest.alert.id, "12");
}

#[tokio::test]
async fn summary_lists_connection_alerts_and_traffic() {
    let app = AppContext::for_tests(Config::default());
    apply_connectivity(&app, ConnectionStatus::Connected).await;
    apply_alert(&app, alert(5, Severity::Warning)).await;
    apply_metrics(
        &app,
        MetricsSnapshot {
            total_traffic: Some(640.0),
            ..MetricsSnapshot::default()
        },
    )
    .await;

    let view = app.view.lock().await;
    let lines = summary_lines(&view, Utc::now());
    assert_eq!(lines[0], "Connection: Real-time updates connected");
    assert!(lines.iter().any(|line| line == "Total traffic: 640 Mbps"));
    assert!(lines.iter().any(|line| line.contains("[warning] #5 alert 5")));
}
