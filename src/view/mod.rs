mod alerts;
mod animation;
mod expiring;
mod layout;
mod summary;
mod updater;

use std::collections::{BTreeMap, HashSet};

use crate::chart::PerformanceChart;
use crate::config::Config;
use crate::format::HealthTier;
use crate::model::{Anomaly, Bottleneck, TopDevice};

pub use alerts::{AlertFeed, render_alert_block};
pub use animation::{AnimationRegistry, CounterAnimation};
pub use expiring::ExpiringList;
pub use layout::{NavbarLayout, StyleChange};
pub use summary::summary_lines;
pub use updater::{
    apply_alert, apply_anomaly, apply_bottlenecks, apply_connectivity, apply_metrics,
    apply_traffic_patterns, show_toast,
};

/// Named regions of the dashboard. An unmounted region ignores every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    TotalDevices,
    OnlineDevices,
    TotalTraffic,
    ActiveAlerts,
    HealthBar,
    AlertIndicator,
    AlertList,
    AnomalyContainer,
    ConnectionStatus,
    PerformanceChart,
    DeviceList,
    PeakHours,
    ProtocolChart,
    Bottlenecks,
    ReportAction,
    Notifications,
    Navbar,
}

impl Region {
    pub fn parse(id: &str) -> Option<Self> {
        match id.trim() {
            "total-devices" => Some(Self::TotalDevices),
            "online-devices" => Some(Self::OnlineDevices),
            "total-traffic" => Some(Self::TotalTraffic),
            "active-alerts" => Some(Self::ActiveAlerts),
            "device-health-bar" => Some(Self::HealthBar),
            "alert-indicator" => Some(Self::AlertIndicator),
            "alert-list" => Some(Self::AlertList),
            "anomaly-container" => Some(Self::AnomalyContainer),
            "connection-status" => Some(Self::ConnectionStatus),
            "performance-chart" => Some(Self::PerformanceChart),
            "device-list" => Some(Self::DeviceList),
            "peak-hours" => Some(Self::PeakHours),
            "protocol-chart" => Some(Self::ProtocolChart),
            "bottlenecks-container" => Some(Self::Bottlenecks),
            "report-action" => Some(Self::ReportAction),
            "notifications" => Some(Self::Notifications),
            "navbar" => Some(Self::Navbar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CounterId {
    TotalDevices,
    OnlineDevices,
    ActiveAlerts,
}

impl CounterId {
    pub fn region(self) -> Region {
        match self {
            Self::TotalDevices => Region::TotalDevices,
            Self::OnlineDevices => Region::OnlineDevices,
            Self::ActiveAlerts => Region::ActiveAlerts,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::TotalDevices => "Total devices",
            Self::OnlineDevices => "Online devices",
            Self::ActiveAlerts => "Active alerts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    pub width_percent: f64,
    pub tier: HealthTier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertBadge {
    pub text: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Self::Connected => "Real-time updates connected",
            Self::Disconnected => "Disconnected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionControl {
    pub label: String,
    idle_label: String,
    pub busy: bool,
    pub disabled: bool,
}

impl ActionControl {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            idle_label: label.clone(),
            label,
            busy: false,
            disabled: false,
        }
    }

    pub fn begin(&mut self, busy_label: &str) {
        self.label = busy_label.to_string();
        self.busy = true;
        self.disabled = true;
    }

    pub fn restore(&mut self) {
        self.label = self.idle_label.clone();
        self.busy = false;
        self.disabled = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BottleneckPanel {
    #[default]
    NotLoaded,
    NoIssues,
    Issues(Vec<Bottleneck>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error | Self::Info => "exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// In-memory state of every dashboard region.
pub struct DashboardView {
    mounted: HashSet<Region>,
    counters: BTreeMap<CounterId, String>,
    last_total_devices: Option<i64>,
    pub traffic_text: String,
    pub health_bar: Option<HealthBar>,
    pub alert_badge: AlertBadge,
    pub alerts: AlertFeed,
    pub anomalies: ExpiringList<Anomaly>,
    pub connection: Option<ConnectionStatus>,
    pub chart: PerformanceChart,
    pub selected_range: Option<String>,
    pub devices: Vec<TopDevice>,
    pub peak_hours: String,
    pub protocols: BTreeMap<String, f64>,
    pub bottlenecks: BottleneckPanel,
    pub report_action: ActionControl,
    pub toasts: ExpiringList<Toast>,
    pub navbar: NavbarLayout,
}

impl DashboardView {
    pub fn from_config(config: &Config) -> Self {
        let mounted = config
            .layout
            .mounted
            .iter()
            .filter_map(|id| {
                let region = Region::parse(id);
                if region.is_none() {
                    log::warn!("layout_region_unknown id={}", id);
                }
                region
            })
            .collect();

        Self {
            mounted,
            counters: BTreeMap::new(),
            last_total_devices: None,
            traffic_text: String::new(),
            health_bar: None,
            alert_badge: AlertBadge::default(),
            alerts: AlertFeed::new(config.alerts.max_visible),
            anomalies: ExpiringList::default(),
            connection: None,
            chart: PerformanceChart::new(config.chart.capacity, config.chart.series_labels.clone()),
            selected_range: None,
            devices: Vec::new(),
            peak_hours: String::new(),
            protocols: BTreeMap::new(),
            bottlenecks: BottleneckPanel::default(),
            report_action: ActionControl::new("Generate report"),
            toasts: ExpiringList::default(),
            navbar: NavbarLayout::new(config.layout.navbar_pins.clone()),
        }
    }

    pub fn is_mounted(&self, region: Region) -> bool {
        self.mounted.contains(&region)
    }

    #[cfg(test)]
    pub fn unmount(&mut self, region: Region) {
        self.mounted.remove(&region);
    }

    pub fn counter_text(&self, counter: CounterId) -> &str {
        self.counters.get(&counter).map(String::as_str).unwrap_or("")
    }

    pub fn set_counter(&mut self, counter: CounterId, text: String) {
        if self.is_mounted(counter.region()) {
            self.counters.insert(counter, text);
        }
    }

    #[cfg(test)]
    pub fn connection_class(&self) -> String {
        match self.connection {
            Some(status) => format!("connection-status {}", status.class_name()),
            None => "connection-status".to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
