use crate::actions::QuickAction;

pub const HELP_TEXT: &str = "Available commands:
  status                 Show the dashboard state.
  alerts                 Render the alert feed.
  ack <id>               Acknowledge an alert.
  report                 Generate and download a report.
  range <name>           Load the performance chart for a time range, e.g. range 24h
  analytics              Reload traffic patterns, anomalies and bottlenecks.
  action <name>          Run a quick action: add-device, packet-capture, report, settings
  layout                 Show the pinned navigation bar style.
  restyle <prop> <value> Apply an external style change to the navigation bar.
  help                   Show this help.
  quit                   Exit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Alerts,
    Ack(String),
    Report,
    Range(String),
    Analytics,
    Action(QuickAction),
    Layout,
    Restyle { property: String, value: String },
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        let mut args = line.split_whitespace();
        let name = args.next()?.to_lowercase();
        let first = args.next();

        let command = match (name.as_str(), first) {
            ("help", None) => Self::Help,
            ("status", None) => Self::Status,
            ("alerts", None) => Self::Alerts,
            ("ack", Some(id)) => Self::Ack(id.to_string()),
            ("report", None) => Self::Report,
            ("range", Some(range)) => Self::Range(range.to_string()),
            ("analytics", None) => Self::Analytics,
            ("action", Some(action)) => Self::Action(QuickAction::parse(action)?),
            ("layout", None) => Self::Layout,
            ("restyle", Some(property)) => {
                let value = args.by_ref().collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return None;
                }
                return Some(Self::Restyle {
                    property: property.to_lowercase(),
                    value,
                });
            }
            ("quit" | "exit", None) => Self::Quit,
            _ => return None,
        };

        if args.next().is_some() {
            return None;
        }
        Some(command)
    }
}
