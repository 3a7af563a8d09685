use chrono::{DateTime, Utc};

use crate::format::{bottleneck_icon, bottleneck_name, format_relative_time};

use super::{BottleneckPanel, CounterId, DashboardView};

/// Plain-text rendering of the dashboard state for the `status` command.
pub fn summary_lines(view: &DashboardView, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::new();

    let connection = view
        .connection
        .map(|status| status.tooltip())
        .unwrap_or("Connecting...");
    lines.push(format!("Connection: {}", connection));

    for counter in [
        CounterId::TotalDevices,
        CounterId::OnlineDevices,
        CounterId::ActiveAlerts,
    ] {
        if !view.is_mounted(counter.region()) {
            continue;
        }
        let text = view.counter_text(counter);
        lines.push(format!(
            "{}: {}",
            counter.title(),
            if text.is_empty() { "-" } else { text }
        ));
    }

    if !view.traffic_text.is_empty() {
        lines.push(format!("Total traffic: {}", view.traffic_text));
    }

    if let Some(bar) = view.health_bar {
        lines.push(format!(
            "Device health: {:.1}% ({})",
            bar.width_percent,
            bar.tier.class_name()
        ));
    }

    if view.alert_badge.active {
        lines.push(format!("Alert badge: {}", view.alert_badge.text));
    }

    let chart = view.chart.snapshot();
    if let Some(last) = chart.last() {
        let values = last
            .values
            .iter()
            .zip(view.chart.series_labels())
            .map(|(value, label)| format!("{}={:.2}", label, value))
            .collect::<Vec<_>>();
        lines.push(format!(
            "Performance ({}/{} points{}): {} {}",
            chart.len(),
            view.chart.capacity(),
            view.selected_range
                .as_deref()
                .map(|range| format!(", range {}", range))
                .unwrap_or_default(),
            last.label,
            values.join(" ")
        ));
    }

    if !view.alerts.is_empty() {
        lines.push(format!("Alerts ({}):", view.alerts.len()));
        for entry in view.alerts.entries() {
            let when = entry
                .alert
                .timestamp
                .as_deref()
                .map(|timestamp| format_relative_time(timestamp, now))
                .unwrap_or_default();
            lines.push(format!(
                "  [{}] #{} {}{} {}",
                entry.alert.severity.as_str(),
                entry.alert.id,
                entry.alert.title,
                if entry.acknowledged { " (ack)" } else { "" },
                when
            ));
        }
    }

    for card in view.anomalies.iter() {
        let current = card
            .item
            .current_value
            .map(|value| format!("{:.2}", value))
            .unwrap_or_else(|| "-".to_string());
        let expected = card
            .item
            .expected_range
            .map(|[low, high]| format!("{:.2} - {:.2}", low, high))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "Anomaly: {} current {} expected {}{}",
            card.item.metric,
            current,
            expected,
            if card.fading { " (fading)" } else { "" }
        ));
    }

    for device in &view.devices {
        lines.push(format!(
            "Device: {} {} {} {:.0} Mbps {:+.1}%",
            device.name, device.ip, device.status, device.traffic, device.trend
        ));
    }

    if !view.peak_hours.is_empty() {
        lines.push(format!("Peak hours: {}", view.peak_hours));
    }

    if !view.protocols.is_empty() {
        let protocols = view
            .protocols
            .iter()
            .map(|(name, share)| format!("{}={}", name, share))
            .collect::<Vec<_>>();
        lines.push(format!("Protocols: {}", protocols.join(" ")));
    }

    match &view.bottlenecks {
        BottleneckPanel::NotLoaded => {}
        BottleneckPanel::NoIssues => lines.push("Bottlenecks: none detected".to_string()),
        BottleneckPanel::Issues(items) => {
            for item in items {
                lines.push(format!(
                    "Bottleneck [{}] {} {} {:.0}%: {}",
                    bottleneck_icon(&item.kind),
                    bottleneck_name(&item.kind),
                    item.severity,
                    item.value,
                    item.recommendation
                ));
            }
        }
    }

    for toast in view.toasts.iter() {
        lines.push(format!(
            "Notice [{}]: {}",
            toast.item.kind.icon(),
            toast.item.message
        ));
    }

    lines
}
