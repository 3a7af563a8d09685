use futures_util::{SinkExt, StreamExt};
use reqwest::Url;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep, timeout};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::config::Server;

use super::codec::{
    DEFAULT_PING_INTERVAL_MS, DEFAULT_PING_TIMEOUT_MS, Frame, decode_frame, encode_connect,
    encode_event, encode_pong,
};

const SOCKET_PATH: &str = "/socket.io/";

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("invalid push channel url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("push channel connect failed: {0}")]
    Connect(#[source] tungstenite::Error),
    #[error("push channel transport failed: {0}")]
    Transport(#[source] tungstenite::Error),
    #[error("no frame from server within {0:?}")]
    HeartbeatTimeout(Duration),
    #[error("namespace connection rejected: {0}")]
    Rejected(String),
    #[error("feed receiver closed")]
    ReceiverClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Connected,
    Disconnected { reason: String },
    Message { name: String, payload: Value },
}

/// Long-lived push connection. Reconnects after a fixed delay until the
/// event receiver goes away.
#[derive(Debug, Clone)]
pub struct PushChannel {
    url: Url,
    namespace: String,
    reconnect_delay: Duration,
    subscriptions: Vec<(String, Value)>,
}

impl PushChannel {
    pub fn from_config(server: &Server) -> Result<Self, ChannelError> {
        Ok(Self {
            url: socket_url(&server.base_url)?,
            namespace: server.namespace.clone(),
            reconnect_delay: Duration::from_millis(server.reconnect_delay_ms),
            subscriptions: Vec::new(),
        })
    }

    /// Event emitted every time the namespace connection opens.
    pub fn subscribe_on_connect(mut self, name: impl Into<String>, payload: Value) -> Self {
        self.subscriptions.push((name.into(), payload));
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn run(self, events: mpsc::Sender<ChannelEvent>) {
        loop {
            let reason = match self.session(&events).await {
                Ok(()) => "closed".to_string(),
                Err(ChannelError::ReceiverClosed) => break,
                Err(error) => {
                    log::warn!("push_channel_failed url={} error={}", self.url, error);
                    error.to_string()
                }
            };

            if events
                .send(ChannelEvent::Disconnected { reason })
                .await
                .is_err()
            {
                break;
            }

            sleep(self.reconnect_delay).await;
            if events.is_closed() {
                break;
            }
            log::info!(
                "push_channel_reconnecting url={} delay_ms={}",
                self.url,
                self.reconnect_delay.as_millis()
            );
        }
        log::info!("push_channel_stopped url={}", self.url);
    }

    async fn session(&self, events: &mpsc::Sender<ChannelEvent>) -> Result<(), ChannelError> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .map_err(ChannelError::Connect)?;
        log::info!("push_channel_open url={}", self.url);
        let (mut sink, mut stream) = socket.split();
        // The server pings every interval; silence past interval + timeout
        // means the connection is dead.
        let mut deadline = Duration::from_millis(DEFAULT_PING_INTERVAL_MS + DEFAULT_PING_TIMEOUT_MS);

        loop {
            let message = match timeout(deadline, stream.next()).await {
                Ok(Some(message)) => message,
                Ok(None) => break,
                Err(_) => return Err(ChannelError::HeartbeatTimeout(deadline)),
            };
            let text = match message.map_err(ChannelError::Transport)? {
                Message::Text(text) => text,
                Message::Close(_) => return Ok(()),
                _ => continue,
            };

            let frame = match decode_frame(&text) {
                Ok(frame) => frame,
                Err(error) => {
                    log::debug!("push_frame_dropped error={} frame={}", error, text);
                    continue;
                }
            };

            match frame {
                Frame::Open {
                    sid,
                    ping_interval_ms,
                    ping_timeout_ms,
                } => {
                    deadline = Duration::from_millis(ping_interval_ms + ping_timeout_ms);
                    log::debug!(
                        "push_engine_open sid={} ping_interval_ms={} ping_timeout_ms={}",
                        sid,
                        ping_interval_ms,
                        ping_timeout_ms
                    );
                    sink.send(Message::Text(encode_connect(&self.namespace)))
                        .await
                        .map_err(ChannelError::Transport)?;
                }
                Frame::Ping => {
                    sink.send(Message::Text(encode_pong()))
                        .await
                        .map_err(ChannelError::Transport)?;
                }
                Frame::Connected { namespace } if namespace == self.namespace => {
                    forward(events, ChannelEvent::Connected).await?;
                    for (name, payload) in &self.subscriptions {
                        sink.send(Message::Text(encode_event(&self.namespace, name, payload)))
                            .await
                            .map_err(ChannelError::Transport)?;
                        log::info!("push_subscribed namespace={} event={}", self.namespace, name);
                    }
                }
                Frame::Event {
                    namespace,
                    name,
                    payload,
                } if namespace == self.namespace => {
                    forward(events, ChannelEvent::Message { name, payload }).await?;
                }
                Frame::ConnectError { message, .. } => {
                    return Err(ChannelError::Rejected(message));
                }
                Frame::Disconnected { namespace } if namespace == self.namespace => {
                    return Ok(());
                }
                Frame::Close => return Ok(()),
                _ => {}
            }
        }

        Ok(())
    }
}

async fn forward(
    events: &mpsc::Sender<ChannelEvent>,
    event: ChannelEvent,
) -> Result<(), ChannelError> {
    events
        .send(event)
        .await
        .map_err(|_| ChannelError::ReceiverClosed)
}

fn socket_url(base_url: &str) -> Result<Url, ChannelError> {
    let invalid = |reason: String| ChannelError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|error| invalid(error.to_string()))?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(invalid(format!("unsupported scheme {}", other))),
    };
    url.set_scheme(scheme)
        .map_err(|_| invalid(format!("cannot switch scheme to {}", scheme)))?;
    url.set_path(SOCKET_PATH);
    url.set_query(Some("EIO=4&transport=websocket"));
    Ok(url)
}
