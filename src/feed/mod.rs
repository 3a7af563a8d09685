mod channel;
mod codec;
mod dispatcher;

use serde_json::{Value, json};

pub use channel::{ChannelError, ChannelEvent, PushChannel};
pub use dispatcher::{FeedEvent, dispatch, run_dispatcher};

pub const METRICS_UPDATE: &str = "metrics_update";
pub const NEW_ALERT: &str = "new_alert";
pub const ANOMALY_DETECTED: &str = "anomaly_detected";
pub const SUBSCRIBE_METRICS: &str = "subscribe_metrics";

pub fn subscription_payload() -> Value {
    json!({ "dashboard": true })
}
