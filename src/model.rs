use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info | Self::Unknown => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, Self::Error | Self::Critical)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Alert {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Anomaly {
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub expected_range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PerformanceSample {
    pub inbound: f64,
    pub outbound: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TopDevice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub traffic: f64,
    #[serde(default)]
    pub trend: f64,
}

/// Every field decodes on its own: a mistyped field becomes `None` and the
/// rest of the snapshot still applies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_devices: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub online_devices: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_traffic: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub active_alerts: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub performance_data: Option<PerformanceSample>,
    #[serde(default, deserialize_with = "lenient")]
    pub top_devices: Option<Vec<TopDevice>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottleneckKind {
    Cpu,
    Memory,
    Network,
    Disk,
}

impl BottleneckKind {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "cpu" => Some(Self::Cpu),
            "memory" => Some(Self::Memory),
            "network" => Some(Self::Network),
            "disk" => Some(Self::Disk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bottleneck {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrafficPatterns {
    #[serde(default)]
    pub peak_hours: Vec<u8>,
    #[serde(default)]
    pub protocol_distribution: Option<BTreeMap<String, f64>>,
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(decoded) => Ok(Some(decoded)),
        Err(error) => {
            log::debug!("metrics_field_ignored error={}", error);
            Ok(None)
        }
    }
}

/// Integer counts, also accepting integral floats (`120.0`) and numeric strings.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.fract() == 0.0 && value.abs() < i64::MAX as f64)
                .map(|value| value as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        Alert, Bottleneck, BottleneckKind, MetricsSnapshot, PerformanceSample, Severity,
        TrafficPatterns,
    };

    #[test]
    fn partial_metrics_snapshot_keeps_missing_fields_empty() {
        let snapshot: MetricsSnapshot =
            serde_json::from_value(json!({"online_devices": 7, "unexpected": true}))
                .expect("snapshot should decode");
        assert_eq!(snapshot.online_devices, Some(7));
        assert!(snapshot.total_devices.is_none());
        assert!(snapshot.performance_data.is_none());
    }

    #[test]
    fn mistyped_metrics_field_only_drops_itself() {
        let snapshot: MetricsSnapshot = serde_json::from_value(json!({
            "total_devices": 120.0,
            "online_devices": "many",
            "active_alerts": 3,
            "total_traffic": "fast",
            "performance_data": {"inbound": 410.5, "outbound": 120.0},
            "top_devices": [{"name": "core-sw1", "ip": "10.0.0.1"}]
        }))
        .expect("snapshot should decode");
        assert_eq!(snapshot.total_devices, Some(120));
        assert!(snapshot.online_devices.is_none());
        assert_eq!(snapshot.active_alerts, Some(3));
        assert!(snapshot.total_traffic.is_none());
        assert_eq!(
            snapshot.performance_data,
            Some(PerformanceSample {
                inbound: 410.5,
                outbound: 120.0
            })
        );
        assert_eq!(snapshot.top_devices.map(|devices| devices.len()), Some(1));
    }

    #[test]
    fn counts_reject_fractions_and_accept_numeric_strings() {
        let snapshot: MetricsSnapshot = serde_json::from_value(json!({
            "total_devices": 12.5,
            "online_devices": " 7 ",
            "active_alerts": null
        }))
        .expect("snapshot should decode");
        assert!(snapshot.total_devices.is_none());
        assert_eq!(snapshot.online_devices, Some(7));
        assert!(snapshot.active_alerts.is_none());
    }

    #[test]
    fn alert_accepts_numeric_id_and_unknown_severity() {
        let alert: Alert = serde_json::from_value(json!({
            "id": 42,
            "severity": "emergency",
            "title": "Link flap"
        }))
        .expect("alert should decode");
        assert_eq!(alert.id, "42");
        assert_eq!(alert.severity, Severity::Unknown);
        assert_eq!(alert.severity.as_str(), "info");
        assert!(alert.message.is_empty());
    }

    #[test]
    fn bottleneck_type_maps_unknown_kind() {
        let bottleneck: Bottleneck = serde_json::from_value(json!({
            "type": "gpu",
            "severity": "high",
            "value": 93.5,
            "recommendation": "scale out"
        }))
        .expect("bottleneck should decode");
        assert_eq!(bottleneck.kind, "gpu");
        assert!(BottleneckKind::parse(&bottleneck.kind).is_none());
        assert_eq!(BottleneckKind::parse("Memory"), Some(BottleneckKind::Memory));
    }

    #[test]
    fn traffic_patterns_decode_protocol_map() {
        let patterns: TrafficPatterns = serde_json::from_value(json!({
            "peak_hours": [9, 14],
            "protocol_distribution": {"https": 61.0, "dns": 4.5}
        }))
        .expect("patterns should decode");
        assert_eq!(patterns.peak_hours, vec![9, 14]);
        let protocols = patterns.protocol_distribution.expect("protocols present");
        assert_eq!(protocols.get("dns"), Some(&4.5));
    }
}
