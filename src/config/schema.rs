use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub chart: Chart,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub alerts: Alerts,
    #[serde(default)]
    pub reports: Reports,
    #[serde(default)]
    pub layout: Layout,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub timing: Timing,
    pub alerts: Alerts,
}

impl RuntimeConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            timing: config.timing.clone(),
            alerts: config.alerts.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    #[serde(default = "default_chart_capacity")]
    pub capacity: usize,
    #[serde(default = "default_chart_output_path")]
    pub output_path: String,
    #[serde(default = "default_chart_series_labels")]
    pub series_labels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Timing {
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
    #[serde(default = "default_counter_tick_ms")]
    pub counter_tick_ms: u64,
    #[serde(default = "default_anomaly_display_ms")]
    pub anomaly_display_ms: u64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
    #[serde(default = "default_toast_display_ms")]
    pub toast_display_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerts {
    #[serde(default = "default_max_visible_alerts")]
    pub max_visible: usize,
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(default = "default_sound_volume")]
    pub sound_volume: f32,
    #[serde(default = "default_notification_permission")]
    pub notification_permission: NotificationPermission,
    #[serde(default = "default_notification_title")]
    pub notification_title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reports {
    #[serde(default = "default_report_type")]
    pub report_type: String,
    #[serde(default = "default_report_period")]
    pub period: String,
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    #[serde(default = "default_mounted_regions")]
    pub mounted: Vec<String>,
    #[serde(default = "default_navbar_pins")]
    pub navbar_pins: Vec<(String, String)>,
}
