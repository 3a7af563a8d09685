use tokio::sync::mpsc;

use crate::app_context::AppContext;
use crate::feed::{PushChannel, SUBSCRIBE_METRICS, run_dispatcher, subscription_payload};

const FEED_BUFFER: usize = 64;

pub(super) fn start_feed_job(app_context: AppContext) {
    let channel = match PushChannel::from_config(&app_context.config.server) {
        Ok(channel) => channel.subscribe_on_connect(SUBSCRIBE_METRICS, subscription_payload()),
        Err(error) => {
            log::error!("feed disabled: {}", error);
            return;
        }
    };
    log::info!(
        "feed_job_starting url={} namespace={}",
        channel.url(),
        app_context.config.server.namespace
    );

    let (tx, rx) = mpsc::channel(FEED_BUFFER);
    tokio::spawn(channel.run(tx));
    tokio::spawn(run_dispatcher(app_context, rx));
}
