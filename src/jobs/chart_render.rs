use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_context::AppContext;
use crate::chart::{ChartFrame, ChartRenderError, render_chart_png};

pub(super) fn start_chart_render_job(app_context: AppContext) {
    tokio::spawn(async move {
        let mut redraw = app_context.view.lock().await.chart.subscribe();
        let output_path = PathBuf::from(&app_context.config.chart.output_path);

        while redraw.changed().await.is_ok() {
            let frame = redraw.borrow_and_update().clone();
            let revision = frame.revision;

            match render_frame_to_file(frame, &output_path).await {
                Ok(_) => {}
                Err(ChartRenderError::NotEnoughPoints) => {
                    log::debug!("chart_render_skipped revision={} reason=not_enough_points", revision);
                }
                Err(error) => {
                    log::warn!(
                        "chart_render_failed revision={} code={} error={}",
                        revision,
                        error.code(),
                        error
                    );
                }
            }
        }
        log::info!("chart_render_job_stopped");
    });
}

async fn render_frame_to_file(frame: ChartFrame, path: &Path) -> Result<usize, ChartRenderError> {
    let started = Instant::now();
    let revision = frame.revision;
    let mode = frame.mode;
    let points = frame.points.len();

    let png = tokio::task::spawn_blocking(move || render_chart_png(&frame))
        .await
        .map_err(|error| ChartRenderError::Join(error.to_string()))??;

    let write_error = |source| ChartRenderError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, &png).await.map_err(write_error)?;

    tracing::info!(
        target: "chart",
        module = "chart",
        revision,
        mode = mode.as_str(),
        points,
        bytes = png.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "chart_rendered"
    );
    Ok(png.len())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::render_frame_to_file;
    use crate::chart::{ChartFrame, ChartRenderError, UpdateMode};
    use crate::series::SeriesPoint;

    #[tokio::test]
    async fn single_point_frame_is_skipped_without_writing() {
        let temp = tempdir().expect("tempdir should be created");
        let path = temp.path().join("charts").join("performance.png");
        let frame = ChartFrame {
            revision: 1,
            series_labels: vec!["Inbound".to_string(), "Outbound".to_string()],
            points: vec![SeriesPoint::new("10:00", vec![1.0, 0.5])],
            mode: UpdateMode::NoAnimation,
        };

        let result = render_frame_to_file(frame, &path).await;
        assert!(matches!(result, Err(ChartRenderError::NotEnoughPoints)));
        assert!(!path.exists());
    }
}
