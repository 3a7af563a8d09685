use std::path::Path;

use notify::{Config as NotifyConfig, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::app_context::AppContext;
use crate::config::{ConfigError, NotificationPermission, RuntimeConfig, load_config};

/// Runtime settings after a reload, with the view and cue changes it caused.
#[derive(Debug)]
struct AppliedReload {
    runtime_config: RuntimeConfig,
    trimmed_alerts: usize,
    permission: Option<NotificationPermission>,
}

async fn apply_runtime_reload_from_path(
    app_context: &AppContext,
    config_path: &str,
) -> Result<AppliedReload, ConfigError> {
    let new_config = load_config(config_path)?;
    let runtime_config = RuntimeConfig::from_config(&new_config);
    let previous = app_context.update_runtime_config(runtime_config.clone()).await;

    let trimmed_alerts = if previous.alerts.max_visible != runtime_config.alerts.max_visible {
        app_context
            .view
            .lock()
            .await
            .alerts
            .set_max_visible(runtime_config.alerts.max_visible)
    } else {
        0
    };

    // Only an edited permission replaces the state resolved at startup.
    let configured = runtime_config.alerts.notification_permission;
    let permission = if previous.alerts.notification_permission != configured {
        app_context.cues.set_permission(configured).await;
        Some(app_context.cues.request_permission_once().await)
    } else {
        None
    };

    Ok(AppliedReload {
        runtime_config,
        trimmed_alerts,
        permission,
    })
}

pub(super) fn start_config_hot_reload_job(app_context: AppContext) {
    tokio::spawn(async move {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

        let config_path = app_context.config_path.clone();
        let mut watcher = match RecommendedWatcher::new(
            move |result| {
                let _ = tx.send(result);
            },
            NotifyConfig::default(),
        ) {
            Ok(watcher) => watcher,
            Err(error) => {
                log::warn!("config hot-reload disabled: watcher init failed: {}", error);
                return;
            }
        };

        if let Err(error) =
            watcher.watch(Path::new(config_path.as_str()), RecursiveMode::NonRecursive)
        {
            log::warn!(
                "config hot-reload disabled: failed to watch {}: {}",
                config_path,
                error
            );
            return;
        }

        while let Some(event_result) = rx.recv().await {
            let event = match event_result {
                Ok(event) => event,
                Err(error) => {
                    log::warn!("config hot-reload event error: {}", error);
                    continue;
                }
            };

            let should_reload = matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
            );
            if !should_reload {
                continue;
            }

            match apply_runtime_reload_from_path(&app_context, config_path.as_str()).await {
                Ok(applied) => {
                    let timing = &applied.runtime_config.timing;
                    let alerts = &applied.runtime_config.alerts;
                    log::info!(
                        "config_hot_reload_applied counter_duration_ms={} counter_tick_ms={} anomaly_display_ms={} fade_ms={} toast_display_ms={}",
                        timing.counter_duration_ms,
                        timing.counter_tick_ms,
                        timing.anomaly_display_ms,
                        timing.fade_ms,
                        timing.toast_display_ms,
                    );
                    log::info!(
                        "alert_settings_reloaded max_visible={} trimmed_alerts={} sound_enabled={} sound_volume={} title={} permission={:?}",
                        alerts.max_visible,
                        applied.trimmed_alerts,
                        alerts.sound_enabled,
                        alerts.sound_volume,
                        alerts.notification_title,
                        applied.permission,
                    );
                }
                Err(error) => {
                    log::warn!("config hot-reload ignored invalid config: {}", error);
                }
            }
        }
    });
}

#[cfg(test)]
mod tests;
