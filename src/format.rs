use chrono::{DateTime, Local, Timelike, Utc};

use crate::model::{BottleneckKind, Severity};

const JUST_NOW_SECS: i64 = 60;
const HOUR_SECS: i64 = 3600;
const DAY_SECS: i64 = 86_400;
const BADGE_OVERFLOW: &str = "9+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Good,
    Warning,
    Critical,
}

impl HealthTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 90.0 {
            Self::Good
        } else if percentage > 70.0 {
            Self::Warning
        } else {
            Self::Critical
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Ties round up (`2.5` -> `3 Mbps`); `format!` precision alone rounds them
/// to even.
pub fn format_traffic(mbps: f64) -> String {
    if mbps >= 1000.0 {
        return format!("{:.1} Gbps", (mbps / 100.0).round() / 10.0);
    }
    format!("{:.0} Mbps", mbps.round())
}

pub fn format_relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp.trim()) else {
        return timestamp.to_string();
    };

    let diff_secs = now
        .signed_duration_since(parsed.with_timezone(&Utc))
        .num_seconds();

    if diff_secs < JUST_NOW_SECS {
        return "just now".to_string();
    }
    if diff_secs < HOUR_SECS {
        return format!("{} min ago", diff_secs / 60);
    }
    if diff_secs < DAY_SECS {
        return format!("{} h ago", diff_secs / HOUR_SECS);
    }

    parsed.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

pub fn format_chart_time<Tz: chrono::TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

/// Badge text for the active alert count: blank at zero, capped at `9+`.
pub fn alert_badge_text(count: i64) -> String {
    if count > 9 {
        BADGE_OVERFLOW.to_string()
    } else if count > 0 {
        count.to_string()
    } else {
        String::new()
    }
}

pub fn alert_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info | Severity::Unknown => "info-circle",
        Severity::Warning => "exclamation-triangle",
        Severity::Error => "exclamation-circle",
        Severity::Critical => "fire-alt",
    }
}

pub fn alert_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Info | Severity::Unknown => "info",
        Severity::Warning => "warning",
        Severity::Error | Severity::Critical => "danger",
    }
}

pub fn bottleneck_icon(kind: &str) -> &'static str {
    match BottleneckKind::parse(kind) {
        Some(BottleneckKind::Cpu) => "microchip",
        Some(BottleneckKind::Memory) => "memory",
        Some(BottleneckKind::Network) => "network-wired",
        Some(BottleneckKind::Disk) => "hdd",
        None => "exclamation-triangle",
    }
}

pub fn bottleneck_name(kind: &str) -> String {
    match BottleneckKind::parse(kind) {
        Some(BottleneckKind::Cpu) => "CPU".to_string(),
        Some(BottleneckKind::Memory) => "Memory".to_string(),
        Some(BottleneckKind::Network) => "Network".to_string(),
        Some(BottleneckKind::Disk) => "Disk".to_string(),
        None => kind.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

/// Leading integer of a displayed counter, `0` when the text has none.
pub fn parse_counter_text(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map(|(index, _)| index)
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map(|value| sign * value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{
        HealthTier, alert_badge_text, alert_color, alert_icon, bottleneck_icon, bottleneck_name,
        escape_html, format_chart_time, format_relative_time, format_traffic, parse_counter_text,
    };
    use crate::model::Severity;

    #[test]
    fn formats_traffic_in_mbps_and_gbps() {
        assert_eq!(format_traffic(999.0), "999 Mbps");
        assert_eq!(format_traffic(1500.0), "1.5 Gbps");
        assert_eq!(format_traffic(1000.0), "1.0 Gbps");
        assert_eq!(format_traffic(0.0), "0 Mbps");
    }

    #[test]
    fn traffic_ties_round_up() {
        assert_eq!(format_traffic(2.5), "3 Mbps");
        assert_eq!(format_traffic(0.5), "1 Mbps");
        assert_eq!(format_traffic(1250.0), "1.3 Gbps");
        assert_eq!(format_traffic(2450.0), "2.5 Gbps");
    }

    #[test]
    fn badge_text_blank_literal_and_overflow() {
        assert_eq!(alert_badge_text(0), "");
        assert_eq!(alert_badge_text(5), "5");
        assert_eq!(alert_badge_text(9), "9");
        assert_eq!(alert_badge_text(12), "9+");
        assert_eq!(alert_badge_text(-3), "");
    }

    #[test]
    fn health_tier_boundaries() {
        assert_eq!(HealthTier::from_percentage(95.0), HealthTier::Good);
        assert_eq!(HealthTier::from_percentage(90.0), HealthTier::Warning);
        assert_eq!(HealthTier::from_percentage(70.5), HealthTier::Warning);
        assert_eq!(HealthTier::from_percentage(70.0), HealthTier::Critical);
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).single().expect("valid date");
        let stamp = |offset: Duration| (now - offset).to_rfc3339();

        assert_eq!(format_relative_time(&stamp(Duration::seconds(10)), now), "just now");
        assert_eq!(format_relative_time(&stamp(Duration::minutes(5)), now), "5 min ago");
        assert_eq!(format_relative_time(&stamp(Duration::hours(3)), now), "3 h ago");
        assert_eq!(format_relative_time("not a time", now), "not a time");
    }

    #[test]
    fn chart_time_is_zero_padded() {
        let at = Utc.with_ymd_and_hms(2026, 3, 10, 7, 5, 59).single().expect("valid date");
        assert_eq!(format_chart_time(&at), "07:05");
    }

    #[test]
    fn icon_and_name_lookups_fall_back() {
        assert_eq!(alert_icon(Severity::Critical), "fire-alt");
        assert_eq!(alert_icon(Severity::Unknown), "info-circle");
        assert_eq!(alert_color(Severity::Error), "danger");
        assert_eq!(bottleneck_icon("disk"), "hdd");
        assert_eq!(bottleneck_icon("gpu"), "exclamation-triangle");
        assert_eq!(bottleneck_name("memory"), "Memory");
        assert_eq!(bottleneck_name("gpu"), "gpu");
    }

    #[test]
    fn escapes_markup_characters() {
        let escaped = escape_html(r#"<b>"core" & 'edge'</b>"#);
        assert!(escaped.starts_with("&lt;b&gt;&quot;core&quot; &amp; "));
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('\''));
        assert!(!escaped.contains('"'));
    }

    #[test]
    fn counter_text_parses_leading_integer() {
        assert_eq!(parse_counter_text("42"), 42);
        assert_eq!(parse_counter_text("17 devices"), 17);
        assert_eq!(parse_counter_text("-8"), -8);
        assert_eq!(parse_counter_text(""), 0);
        assert_eq!(parse_counter_text("n/a"), 0);
    }
}
