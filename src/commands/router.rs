use chrono::Utc;

use crate::actions::{
    QuickActionOutcome, acknowledge_alert, generate_report, load_advanced_analytics,
    load_chart_range, run_quick_action,
};
use crate::app_context::AppContext;
use crate::view::{Region, StyleChange, render_alert_block, summary_lines};

use super::command_def::{Command, HELP_TEXT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }
}

pub(super) async fn route_command(app_context: &AppContext, cmd: Command) -> Reply {
    let api = &app_context.api;

    match cmd {
        Command::Help => Reply::Lines(HELP_TEXT.lines().map(str::to_string).collect()),
        Command::Status => {
            let view = app_context.view.lock().await;
            Reply::Lines(summary_lines(&view, Utc::now()))
        }
        Command::Alerts => {
            let view = app_context.view.lock().await;
            if view.alerts.is_empty() {
                return Reply::line("No alerts.");
            }
            let now = Utc::now();
            Reply::Lines(
                view.alerts
                    .entries()
                    .map(|entry| render_alert_block(entry, now))
                    .collect(),
            )
        }
        Command::Ack(alert_id) => {
            if acknowledge_alert(app_context, api, &alert_id).await {
                Reply::line(format!("Alert {} acknowledged.", alert_id))
            } else {
                Reply::line(format!("Alert {} could not be acknowledged.", alert_id))
            }
        }
        Command::Report => match generate_report(app_context, api).await {
            Some(path) => Reply::line(format!("Report saved to {}", path.display())),
            None => Reply::line("Report generation failed."),
        },
        Command::Range(range) => {
            if load_chart_range(app_context, api, &range).await {
                Reply::line(format!("Chart range {} loaded.", range))
            } else {
                Reply::line(format!("Chart range {} could not be loaded.", range))
            }
        }
        Command::Analytics => {
            let outcome = load_advanced_analytics(app_context, api).await;
            Reply::line(format!(
                "Analytics: patterns={} anomalies={} bottlenecks={}",
                outcome.patterns, outcome.anomalies, outcome.bottlenecks
            ))
        }
        Command::Action(action) => match run_quick_action(app_context, api, action).await {
            QuickActionOutcome::Navigate(url) => Reply::line(format!("Open {}", url)),
            QuickActionOutcome::Report(Some(path)) => {
                Reply::line(format!("Report saved to {}", path.display()))
            }
            QuickActionOutcome::Report(None) => Reply::line("Report generation failed."),
        },
        Command::Layout => {
            let view = app_context.view.lock().await;
            if !view.is_mounted(Region::Navbar) {
                return Reply::line("Navigation bar is not mounted.");
            }
            Reply::Lines(
                view.navbar
                    .style()
                    .iter()
                    .map(|(property, value)| format!("{}: {}", property, value))
                    .collect(),
            )
        }
        Command::Restyle { property, value } => {
            let mut view = app_context.view.lock().await;
            if !view.is_mounted(Region::Navbar) {
                return Reply::line("Navigation bar is not mounted.");
            }
            match view.navbar.observe(&property, &value) {
                StyleChange::Accepted => Reply::line(format!("{}: {}", property, value)),
                StyleChange::Restored { property, pinned } => {
                    log::info!(
                        "navbar_style_restored property={} rejected={} pinned={}",
                        property,
                        value,
                        pinned
                    );
                    Reply::line(format!("{} is pinned to {}", property, pinned))
                }
            }
        }
        Command::Quit => Reply::Quit,
    }
}
