use serde_json::Value;

const ROOT_NAMESPACE: &str = "/";
pub(super) const DEFAULT_PING_INTERVAL_MS: u64 = 25_000;
pub(super) const DEFAULT_PING_TIMEOUT_MS: u64 = 20_000;

/// One decoded text frame of the push transport (Engine.IO v4 carrying
/// Socket.IO v4 packets).
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Open {
        sid: String,
        ping_interval_ms: u64,
        ping_timeout_ms: u64,
    },
    Close,
    Ping,
    Pong,
    Noop,
    Connected { namespace: String },
    Disconnected { namespace: String },
    Event {
        namespace: String,
        name: String,
        payload: Value,
    },
    ConnectError { namespace: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("empty frame")]
    Empty,
    #[error("unknown engine packet type {0:?}")]
    UnknownEnginePacket(char),
    #[error("unknown socket packet type {0:?}")]
    UnknownSocketPacket(char),
    #[error("event packet without a name")]
    MissingEventName,
    #[error("invalid packet payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

pub fn decode_frame(text: &str) -> Result<Frame, CodecError> {
    let mut chars = text.chars();
    let engine_type = chars.next().ok_or(CodecError::Empty)?;
    let rest = chars.as_str();

    match engine_type {
        '0' => decode_open(rest),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '6' => Ok(Frame::Noop),
        '4' => decode_socket_packet(rest),
        other => Err(CodecError::UnknownEnginePacket(other)),
    }
}

fn decode_open(body: &str) -> Result<Frame, CodecError> {
    let handshake: Value = serde_json::from_str(body)?;
    Ok(Frame::Open {
        sid: handshake
            .get("sid")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        ping_interval_ms: handshake
            .get("pingInterval")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PING_INTERVAL_MS),
        ping_timeout_ms: handshake
            .get("pingTimeout")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_PING_TIMEOUT_MS),
    })
}

fn decode_socket_packet(packet: &str) -> Result<Frame, CodecError> {
    let mut chars = packet.chars();
    let packet_type = chars.next().ok_or(CodecError::Empty)?;
    let (namespace, body) = split_namespace(chars.as_str());
    let body = body.trim_start_matches(|ch: char| ch.is_ascii_digit());

    match packet_type {
        '0' => Ok(Frame::Connected { namespace }),
        '1' => Ok(Frame::Disconnected { namespace }),
        '2' => {
            let mut arguments = match serde_json::from_str::<Value>(body)? {
                Value::Array(arguments) => arguments.into_iter(),
                _ => return Err(CodecError::MissingEventName),
            };
            let name = match arguments.next() {
                Some(Value::String(name)) => name,
                _ => return Err(CodecError::MissingEventName),
            };
            Ok(Frame::Event {
                namespace,
                name,
                payload: arguments.next().unwrap_or(Value::Null),
            })
        }
        '4' => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| body.to_string());
            Ok(Frame::ConnectError { namespace, message })
        }
        other => Err(CodecError::UnknownSocketPacket(other)),
    }
}

fn split_namespace(packet: &str) -> (String, &str) {
    if !packet.starts_with('/') {
        return (ROOT_NAMESPACE.to_string(), packet);
    }
    match packet.split_once(',') {
        Some((namespace, body)) => (namespace.to_string(), body),
        None => (packet.to_string(), ""),
    }
}

fn namespace_prefix(namespace: &str) -> String {
    if namespace == ROOT_NAMESPACE {
        String::new()
    } else {
        format!("{},", namespace)
    }
}

pub fn encode_connect(namespace: &str) -> String {
    format!("40{}", namespace_prefix(namespace))
}

pub fn encode_pong() -> String {
    "3".to_string()
}

pub fn encode_event(namespace: &str, name: &str, payload: &Value) -> String {
    let arguments = Value::Array(vec![Value::String(name.to_string()), payload.clone()]);
    format!("42{}{}", namespace_prefix(namespace), arguments)
}
