use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::app_context::AppContext;
use crate::model::{Alert, Anomaly, MetricsSnapshot};
use crate::view::{ConnectionStatus, apply_alert, apply_anomaly, apply_connectivity, apply_metrics};

use super::channel::ChannelEvent;
use super::{ANOMALY_DETECTED, METRICS_UPDATE, NEW_ALERT};

#[derive(Debug, Clone)]
pub enum FeedEvent {
    Metrics(MetricsSnapshot),
    Alert(Alert),
    Anomaly(Anomaly),
    Connectivity(ConnectionStatus),
}

impl FeedEvent {
    fn kind(&self) -> &'static str {
        match self {
            Self::Metrics(_) => METRICS_UPDATE,
            Self::Alert(_) => NEW_ALERT,
            Self::Anomaly(_) => ANOMALY_DETECTED,
            Self::Connectivity(_) => "connectivity",
        }
    }
}

/// Turns a raw channel event into a typed feed event. Unknown event names
/// and undecodable payloads yield `None`.
pub fn normalize(event: ChannelEvent) -> Option<FeedEvent> {
    match event {
        ChannelEvent::Connected => Some(FeedEvent::Connectivity(ConnectionStatus::Connected)),
        ChannelEvent::Disconnected { reason } => {
            log::warn!("feed_disconnected reason={}", reason);
            Some(FeedEvent::Connectivity(ConnectionStatus::Disconnected))
        }
        ChannelEvent::Message { name, payload } => match name.as_str() {
            METRICS_UPDATE => decode(&name, payload).map(FeedEvent::Metrics),
            NEW_ALERT => decode(&name, payload).map(FeedEvent::Alert),
            ANOMALY_DETECTED => decode(&name, payload).map(FeedEvent::Anomaly),
            other => {
                log::debug!("feed_event_ignored name={}", other);
                None
            }
        },
    }
}

fn decode<T: DeserializeOwned>(name: &str, payload: Value) -> Option<T> {
    match serde_json::from_value(payload) {
        Ok(value) => Some(value),
        Err(error) => {
            log::debug!("feed_payload_dropped name={} error={}", name, error);
            None
        }
    }
}

pub async fn dispatch(app_context: &AppContext, event: FeedEvent) {
    tracing::info!(target: "feed", module = "feed", event = event.kind(), "feed_event");

    match event {
        FeedEvent::Metrics(snapshot) => apply_metrics(app_context, snapshot).await,
        FeedEvent::Alert(alert) => apply_alert(app_context, alert).await,
        FeedEvent::Anomaly(anomaly) => apply_anomaly(app_context, anomaly).await,
        FeedEvent::Connectivity(status) => apply_connectivity(app_context, status).await,
    }
}

/// Applies channel events one at a time in arrival order until every sender
/// is gone.
pub async fn run_dispatcher(app_context: AppContext, mut events: mpsc::Receiver<ChannelEvent>) {
    while let Some(event) = events.recv().await {
        if let Some(event) = normalize(event) {
            dispatch(&app_context, event).await;
        }
    }
    log::info!("feed_dispatcher_stopped");
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio::sync::mpsc;

    use super::{FeedEvent, normalize, run_dispatcher};
    use crate::app_context::AppContext;
    use crate::config::Config;
    use crate::feed::ChannelEvent;
    use crate::model::Severity;
    use crate::view::ConnectionStatus;

    fn message(name: &str, payload: serde_json::Value) -> ChannelEvent {
        ChannelEvent::Message {
            name: name.to_string(),
            payload,
        }
    }

    #[test]
    fn normalizes_known_events() {
        match normalize(message("metrics_update", json!({"online_devices": 12}))) {
            Some(FeedEvent::Metrics(snapshot)) => {
                assert_eq!(snapshot.online_devices, Some(12));
                assert!(snapshot.total_devices.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }

        match normalize(message(
            "new_alert",
            json!({"id": 4, "severity": "critical", "title": "PSU failure"}),
        )) {
            Some(FeedEvent::Alert(alert)) => {
                assert_eq!(alert.id, "4");
                assert_eq!(alert.severity, Severity::Critical);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            normalize(ChannelEvent::Disconnected {
                reason: "closed".to_string()
            }),
            Some(FeedEvent::Connectivity(ConnectionStatus::Disconnected))
        ));
    }

    #[test]
    fn drops_unknown_and_malformed_events() {
        assert!(normalize(message("device_rebooted", json!({}))).is_none());
        assert!(normalize(message("new_alert", json!("not an object"))).is_none());
        assert!(normalize(message("metrics_update", json!("not an object"))).is_none());
    }

    #[test]
    fn keeps_valid_metrics_fields_next_to_a_mistyped_one() {
        let event = normalize(message(
            "metrics_update",
            json!({
                "total_devices": 120.0,
                "online_devices": "many",
                "active_alerts": 3,
                "performance_data": {"inbound": 5.0, "outbound": 2.0}
            }),
        ));
        match event {
            Some(FeedEvent::Metrics(snapshot)) => {
                assert_eq!(snapshot.total_devices, Some(120));
                assert!(snapshot.online_devices.is_none());
                assert_eq!(snapshot.active_alerts, Some(3));
                assert!(snapshot.performance_data.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn dispatches_in_arrival_order() {
        let app = AppContext::for_tests(Config::default());
        let (tx, rx) = mpsc::channel(16);

        tx.send(ChannelEvent::Disconnected {
            reason: "transport error".to_string(),
        })
        .await
        .expect("send");
        tx.send(ChannelEvent::Connected).await.expect("send");
        for id in 1..=3 {
            tx.send(message(
                "new_alert",
                json!({"id": id, "severity": "info", "title": format!("alert {id}")}),
            ))
            .await
            .expect("send");
        }
        tx.send(message("garbage", json!(null))).await.expect("send");
        drop(tx);

        run_dispatcher(app.clone(), rx).await;

        let view = app.view.lock().await;
        assert_eq!(view.connection, Some(ConnectionStatus::Connected));
        let ids = view
            .alerts
            .entries()
            .map(|entry| entry.alert.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
