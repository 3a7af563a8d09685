use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation(
                "server.base_url must not be empty".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "server.base_url must start with http:// or https://".to_string(),
            ));
        }
        if !self.server.namespace.starts_with('/') {
            return Err(ConfigError::Validation(
                "server.namespace must start with '/'".to_string(),
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.server.reconnect_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "server.reconnect_delay_ms must be greater than 0".to_string(),
            ));
        }

        if self.chart.capacity == 0 {
            return Err(ConfigError::Validation(
                "chart.capacity must be at least 1".to_string(),
            ));
        }
        if self.chart.series_labels.is_empty() {
            return Err(ConfigError::Validation(
                "chart.series_labels must name at least one series".to_string(),
            ));
        }
        if self.chart.output_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "chart.output_path must not be empty".to_string(),
            ));
        }

        if self.timing.counter_tick_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.counter_tick_ms must be greater than 0".to_string(),
            ));
        }
        if self.timing.counter_duration_ms < self.timing.counter_tick_ms {
            return Err(ConfigError::Validation(
                "timing.counter_duration_ms must not be shorter than timing.counter_tick_ms"
                    .to_string(),
            ));
        }
        if self.timing.anomaly_display_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.anomaly_display_ms must be greater than 0".to_string(),
            ));
        }
        if self.timing.toast_display_ms == 0 {
            return Err(ConfigError::Validation(
                "timing.toast_display_ms must be greater than 0".to_string(),
            ));
        }

        if self.alerts.max_visible == 0 {
            return Err(ConfigError::Validation(
                "alerts.max_visible must be at least 1".to_string(),
            ));
        }
        if self.alerts.sound_volume.is_nan() || !(0.0..=1.0).contains(&self.alerts.sound_volume) {
            return Err(ConfigError::Validation(
                "alerts.sound_volume must be between 0 and 1".to_string(),
            ));
        }

        if self.reports.report_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reports.report_type must not be empty".to_string(),
            ));
        }
        if self.reports.period.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reports.period must not be empty".to_string(),
            ));
        }
        if self.reports.download_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reports.download_dir must not be empty".to_string(),
            ));
        }

        for (property, _) in &self.layout.navbar_pins {
            if property.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "layout.navbar_pins entries must name a property".to_string(),
                ));
            }
        }

        Ok(())
    }
}
