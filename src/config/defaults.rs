use super::schema::{Alerts, Chart, Layout, NotificationPermission, Reports, Server, Timing};

pub(super) fn default_base_url() -> String {
    "http://127.0.0.1:7777".to_string()
}

pub(super) fn default_namespace() -> String {
    "/dashboard".to_string()
}

pub(super) fn default_request_timeout_secs() -> u64 {
    10
}

pub(super) fn default_reconnect_delay_ms() -> u64 {
    2000
}

pub(super) fn default_chart_capacity() -> usize {
    50
}

pub(super) fn default_chart_output_path() -> String {
    "data/performance.png".to_string()
}

pub(super) fn default_chart_series_labels() -> Vec<String> {
    vec!["Inbound".to_string(), "Outbound".to_string()]
}

pub(super) fn default_counter_duration_ms() -> u64 {
    500
}

pub(super) fn default_counter_tick_ms() -> u64 {
    16
}

pub(super) fn default_anomaly_display_ms() -> u64 {
    5000
}

pub(super) fn default_fade_ms() -> u64 {
    300
}

pub(super) fn default_toast_display_ms() -> u64 {
    3000
}

pub(super) fn default_max_visible_alerts() -> usize {
    10
}

pub(super) fn default_sound_enabled() -> bool {
    true
}

pub(super) fn default_sound_volume() -> f32 {
    0.3
}

pub(super) fn default_notification_permission() -> NotificationPermission {
    NotificationPermission::Default
}

pub(super) fn default_notification_title() -> String {
    "Nextrade Alert".to_string()
}

pub(super) fn default_report_type() -> String {
    "summary".to_string()
}

pub(super) fn default_report_period() -> String {
    "daily".to_string()
}

pub(super) fn default_download_dir() -> String {
    "data/reports".to_string()
}

pub(super) fn default_mounted_regions() -> Vec<String> {
    [
        "total-devices",
        "online-devices",
        "total-traffic",
        "active-alerts",
        "device-health-bar",
        "alert-indicator",
        "alert-list",
        "anomaly-container",
        "connection-status",
        "performance-chart",
        "device-list",
        "peak-hours",
        "protocol-chart",
        "bottlenecks-container",
        "report-action",
        "notifications",
        "navbar",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

pub(super) fn default_navbar_pins() -> Vec<(String, String)> {
    [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("right", "0"),
        ("z-index", "9999"),
        ("transform", "none"),
        ("animation", "none"),
        ("width", "100%"),
        ("height", "60px"),
    ]
    .into_iter()
    .map(|(property, value)| (property.to_string(), value.to_string()))
    .collect()
}

impl Default for Server {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            namespace: default_namespace(),
            request_timeout_secs: default_request_timeout_secs(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            capacity: default_chart_capacity(),
            output_path: default_chart_output_path(),
            series_labels: default_chart_series_labels(),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            counter_duration_ms: default_counter_duration_ms(),
            counter_tick_ms: default_counter_tick_ms(),
            anomaly_display_ms: default_anomaly_display_ms(),
            fade_ms: default_fade_ms(),
            toast_display_ms: default_toast_display_ms(),
        }
    }
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            max_visible: default_max_visible_alerts(),
            sound_enabled: default_sound_enabled(),
            sound_volume: default_sound_volume(),
            notification_permission: default_notification_permission(),
            notification_title: default_notification_title(),
        }
    }
}

impl Default for Reports {
    fn default() -> Self {
        Self {
            report_type: default_report_type(),
            period: default_report_period(),
            download_dir: default_download_dir(),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            mounted: default_mounted_regions(),
            navbar_pins: default_navbar_pins(),
        }
    }
}
