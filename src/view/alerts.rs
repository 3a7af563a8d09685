use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::format::{alert_color, alert_icon, escape_html, format_relative_time};
use crate::model::Alert;

#[derive(Debug, Clone)]
pub struct AlertEntry {
    pub alert: Alert,
    pub acknowledged: bool,
}

/// Newest-first alert list holding at most `max_visible` entries.
#[derive(Debug)]
pub struct AlertFeed {
    entries: VecDeque<AlertEntry>,
    max_visible: usize,
}

impl AlertFeed {
    pub fn new(max_visible: usize) -> Self {
        let max_visible = max_visible.max(1);
        Self {
            entries: VecDeque::with_capacity(max_visible + 1),
            max_visible,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> {
        self.entries.iter()
    }

    /// Returns the evicted entry when the list overflowed.
    pub fn prepend(&mut self, alert: Alert) -> Option<AlertEntry> {
        self.entries.push_front(AlertEntry {
            alert,
            acknowledged: false,
        });
        if self.entries.len() > self.max_visible {
            return self.entries.pop_back();
        }
        None
    }

    /// Changes the cap, dropping the oldest entries beyond it. Returns how
    /// many were dropped.
    pub fn set_max_visible(&mut self, max_visible: usize) -> usize {
        self.max_visible = max_visible.max(1);
        let excess = self.entries.len().saturating_sub(self.max_visible);
        self.entries.truncate(self.max_visible);
        excess
    }

    pub fn acknowledge(&mut self, alert_id: &str) -> bool {
        let mut found = false;
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.alert.id == alert_id)
        {
            entry.acknowledged = true;
            found = true;
        }
        found
    }
}

pub fn render_alert_block(entry: &AlertEntry, now: DateTime<Utc>) -> String {
    let alert = &entry.alert;
    let severity = alert.severity.as_str();
    let acknowledged = if entry.acknowledged {
        " acknowledged"
    } else {
        ""
    };
    let time = alert
        .timestamp
        .as_deref()
        .map(|timestamp| format_relative_time(timestamp, now))
        .unwrap_or_default();

    format!(
        concat!(
            "<div class=\"alert-item alert-{severity}{acknowledged}\" data-alert-id=\"{id}\">",
            "<i class=\"fas fa-{icon} alert-icon\" style=\"color: var(--{color});\"></i>",
            "<div class=\"alert-content\">",
            "<div class=\"alert-title\">{title}</div>",
            "<div class=\"alert-description\">{message}</div>",
            "<div class=\"alert-time\">{time}</div>",
            "</div>",
            "</div>"
        ),
        severity = severity,
        acknowledged = acknowledged,
        id = escape_html(&alert.id),
        icon = alert_icon(alert.severity),
        color = alert_color(alert.severity),
        title = escape_html(&alert.title),
        message = escape_html(&alert.message),
        time = escape_html(&time),
    )
}
