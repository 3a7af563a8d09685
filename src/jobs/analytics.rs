use crate::actions::load_advanced_analytics;
use crate::app_context::AppContext;

pub(super) fn start_initial_analytics_job(app_context: AppContext) {
    tokio::spawn(async move {
        let outcome = load_advanced_analytics(&app_context, &app_context.api).await;
        log::info!(
            "initial_analytics_loaded patterns={} anomalies={} bottlenecks={}",
            outcome.patterns,
            outcome.anomalies,
            outcome.bottlenecks
        );
    });
}
