mod error;
mod render;

use serde::Deserialize;
use tokio::sync::watch;

use crate::series::{BoundedSeries, SeriesPoint};

pub use error::ChartRenderError;
pub use render::render_chart_png;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Regular redraw, used after a wholesale dataset swap.
    Default,
    /// Fast path for high-frequency ticks; consumers skip transitions.
    NoAnimation,
}

impl UpdateMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::NoAnimation => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub revision: u64,
    pub series_labels: Vec<String>,
    pub points: Vec<SeriesPoint>,
    pub mode: UpdateMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartDataset {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Pre-aggregated dataset as served by the performance endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    fn into_points(self) -> (Vec<String>, Vec<SeriesPoint>) {
        let series_labels = self
            .datasets
            .iter()
            .map(|dataset| dataset.label.clone())
            .collect::<Vec<_>>();
        let usable = self
            .datasets
            .iter()
            .map(|dataset| dataset.data.len())
            .fold(self.labels.len(), usize::min);

        let points = self
            .labels
            .into_iter()
            .take(usable)
            .enumerate()
            .map(|(index, label)| {
                let values = self
                    .datasets
                    .iter()
                    .map(|dataset| dataset.data[index])
                    .collect();
                SeriesPoint::new(label, values)
            })
            .collect();

        (series_labels, points)
    }
}

/// Rolling performance chart. Every mutation publishes a new frame on the
/// redraw channel; the renderer only ever sees the latest one.
pub struct PerformanceChart {
    series: BoundedSeries,
    series_labels: Vec<String>,
    revision: u64,
    redraw: watch::Sender<ChartFrame>,
}

impl PerformanceChart {
    pub fn new(capacity: usize, series_labels: Vec<String>) -> Self {
        let (redraw, _) = watch::channel(ChartFrame {
            revision: 0,
            series_labels: series_labels.clone(),
            points: Vec::new(),
            mode: UpdateMode::Default,
        });

        Self {
            series: BoundedSeries::with_capacity(capacity),
            series_labels,
            revision: 0,
            redraw,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ChartFrame> {
        self.redraw.subscribe()
    }

    pub fn capacity(&self) -> usize {
        self.series.capacity()
    }

    pub fn series_labels(&self) -> &[String] {
        &self.series_labels
    }

    pub fn snapshot(&self) -> Vec<SeriesPoint> {
        self.series.snapshot()
    }

    pub fn append(&mut self, point: SeriesPoint) {
        self.series.append(point);
        self.publish(UpdateMode::NoAnimation);
    }

    pub fn replace_data(&mut self, data: ChartData) {
        let (series_labels, points) = data.into_points();
        if !series_labels.is_empty() {
            self.series_labels = series_labels;
        }
        self.series.replace(points);
        self.publish(UpdateMode::Default);
    }

    fn publish(&mut self, mode: UpdateMode) {
        self.revision += 1;
        self.redraw.send_replace(ChartFrame {
            revision: self.revision,
            series_labels: self.series_labels.clone(),
            points: self.series.snapshot(),
            mode,
        });
    }
}
