use crate::app_context::AppContext;

mod analytics;
mod chart_render;
mod config_reload;
mod feed;

pub fn start_background_jobs(app_context: AppContext) {
    chart_render::start_chart_render_job(app_context.clone());
    config_reload::start_config_hot_reload_job(app_context.clone());
    analytics::start_initial_analytics_job(app_context.clone());
    feed::start_feed_job(app_context);
}
