use std::fs;

use tempfile::tempdir;

use crate::{
    app_context::AppContext,
    config::{NotificationPermission, RuntimeConfig, load_config},
    model::{Alert, Severity},
};

use super::apply_runtime_reload_from_path;

fn config_toml(counter_tick_ms: u64, anomaly_display_ms: u64, sound_volume: f32) -> String {
    alerts_config_toml(counter_tick_ms, anomaly_display_ms, sound_volume, 10, "default")
}

fn alerts_config_toml(
    counter_tick_ms: u64,
    anomaly_display_ms: u64,
    sound_volume: f32,
    max_visible: usize,
    permission: &str,
) -> String {
    format!(
        r#"[server]
base_url = "http://127.0.0.1:7777"
namespace = "/dashboard"

[chart]
capacity = 50
output_path = "data/performance.png"

[timing]
counter_duration_ms = 500
counter_tick_ms = {counter_tick_ms}
anomaly_display_ms = {anomaly_display_ms}
fade_ms = 300
toast_display_ms = 3000

[alerts]
max_visible = {max_visible}
sound_enabled = true
sound_volume = {sound_volume}
notification_permission = "{permission}"
"#
    )
}

fn context_for(config_path: &std::path::Path) -> AppContext {
    let initial = load_config(config_path).expect("initial config should load");
    let mut app = AppContext::for_tests(initial);
    app.config_path = config_path.to_string_lossy().to_string();
    app
}

#[tokio::test]
async fn hot_reload_applies_valid_runtime_changes_without_restart() {
    let temp = tempdir().expect("tempdir should be created");
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, config_toml(16, 5000, 0.3)).expect("initial config should be written");

    let app = context_for(&config_path);

    fs::write(&config_path, config_toml(20, 8000, 0.2)).expect("updated config should be written");

    let applied = apply_runtime_reload_from_path(&app, &config_path.to_string_lossy())
        .await
        .expect("valid hot-reload should apply");

    let current = app.runtime_config.read().await.clone();
    assert_eq!(applied.runtime_config.timing.counter_tick_ms, 20);
    assert_eq!(applied.runtime_config.timing.anomaly_display_ms, 8000);
    assert!((applied.runtime_config.alerts.sound_volume - 0.2).abs() < f32::EPSILON);
    assert_eq!(applied.trimmed_alerts, 0);
    assert!(applied.permission.is_none());
    assert_eq!(current.timing.counter_tick_ms, 20);
    assert_eq!(current.timing.anomaly_display_ms, 8000);
    assert!((current.alerts.sound_volume - 0.2).abs() < f32::EPSILON);
}

#[tokio::test]
async fn hot_reload_rejects_invalid_config_and_preserves_last_runtime() {
    let temp = tempdir().expect("tempdir should be created");
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, config_toml(16, 5000, 0.3)).expect("initial config should be written");

    let app = context_for(&config_path);
    let expected_runtime = RuntimeConfig::from_config(&app.config);

    fs::write(&config_path, config_toml(0, 8000, 0.2)).expect("invalid config should be written");

    let error = apply_runtime_reload_from_path(&app, &config_path.to_string_lossy())
        .await
        .expect_err("invalid config should be rejected");
    assert!(error
        .to_string()
        .contains("timing.counter_tick_ms must be greater than 0"));

    let current = app.runtime_config.read().await.clone();
    assert_eq!(
        current.timing.counter_tick_ms,
        expected_runtime.timing.counter_tick_ms
    );
    assert_eq!(
        current.timing.anomaly_display_ms,
        expected_runtime.timing.anomaly_display_ms
    );
    assert!((current.alerts.sound_volume - expected_runtime.alerts.sound_volume).abs() < f32::EPSILON);
}

#[tokio::test]
async fn hot_reload_applies_alert_cap_and_permission_to_live_state() {
    let temp = tempdir().expect("tempdir should be created");
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, alerts_config_toml(16, 5000, 0.3, 10, "default"))
        .expect("initial config should be written");

    let app = context_for(&config_path);
    {
        let mut view = app.view.lock().await;
        for id in 0..6 {
            view.alerts.prepend(Alert {
                id: id.to_string(),
                severity: Severity::Warning,
                title: format!("alert {id}"),
                ..Alert::default()
            });
        }
    }

    fs::write(&config_path, alerts_config_toml(16, 5000, 0.3, 3, "granted"))
        .expect("updated config should be written");
    let applied = apply_runtime_reload_from_path(&app, &config_path.to_string_lossy())
        .await
        .expect("valid hot-reload should apply");

    assert_eq!(applied.trimmed_alerts, 3);
    assert_eq!(applied.permission, Some(NotificationPermission::Granted));
    assert_eq!(app.cues.permission().await, NotificationPermission::Granted);

    let mut view = app.view.lock().await;
    let ids = view
        .alerts
        .entries()
        .map(|entry| entry.alert.id.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["5", "4", "3"]);

    let evicted = view.alerts.prepend(Alert {
        id: "6".to_string(),
        ..Alert::default()
    });
    assert_eq!(evicted.map(|entry| entry.alert.id), Some("3".to_string()));
    assert_eq!(view.alerts.len(), 3);
}
