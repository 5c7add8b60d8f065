//! Socket.IO v4 over Engine.IO v4, WebSocket transport, text frames only.
//!
//! Engine.IO wraps every frame in a one-digit packet type: `0` open (JSON
//! handshake), `1` close, `2` ping, `3` pong, `4` message, `5` upgrade, `6`
//! noop. A `4` carries a Socket.IO packet: `0` connect, `1` disconnect, `2`
//! event, `4` connect error, optionally followed by `/namespace,` and an ack
//! id before the JSON body. Only the default namespace is used.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ChannelError;

pub const EVENT_JOIN_AUDIT_ROOM: &str = "join_audit_room";
pub const EVENT_NEW_VIOLATION: &str = "new_violation";

pub fn socket_url(page_protocol: &str, host: &str, socket_path: &str) -> String {
    let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
    let path = socket_path.trim_end_matches('/');
    format!("{scheme}://{host}{path}/?EIO=4&transport=websocket")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(String),
    Upgrade,
    Noop,
}

impl EnginePacket {
    pub fn parse(frame: &str) -> Result<Self, ChannelError> {
        let mut chars = frame.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ChannelError::Frame("empty frame".to_string()))?;
        let rest = chars.as_str();
        match kind {
            '0' => serde_json::from_str(rest)
                .map(Self::Open)
                .map_err(|error| ChannelError::Frame(format!("bad handshake: {error}"))),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping(rest.to_string())),
            '3' => Ok(Self::Pong(rest.to_string())),
            '4' => Ok(Self::Message(rest.to_string())),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            other => Err(ChannelError::Frame(format!(
                "unknown engine packet type {other:?}"
            ))),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Self::Open(handshake) => format!("0{}", serde_json::json!({ "sid": handshake.sid })),
            Self::Close => "1".to_string(),
            Self::Ping(data) => format!("2{data}"),
            Self::Pong(data) => format!("3{data}"),
            Self::Message(data) => format!("4{data}"),
            Self::Upgrade => "5".to_string(),
            Self::Noop => "6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect(Option<Value>),
    Disconnect,
    Event { name: String, data: Value },
    ConnectError(String),
}

impl SocketPacket {
    pub fn parse(raw: &str) -> Result<Self, ChannelError> {
        let mut chars = raw.chars();
        let kind = chars
            .next()
            .ok_or_else(|| ChannelError::Frame("empty socket packet".to_string()))?;
        let body = strip_ack_id(strip_namespace(chars.as_str()));
        match kind {
            '0' => Ok(Self::Connect(parse_optional_json(body)?)),
            '1' => Ok(Self::Disconnect),
            '2' => parse_event(body),
            '4' => {
                let message = match parse_optional_json(body)? {
                    Some(Value::Object(map)) => map
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("connection refused")
                        .to_string(),
                    Some(Value::String(text)) => text,
                    _ => "connection refused".to_string(),
                };
                Ok(Self::ConnectError(message))
            }
            other => Err(ChannelError::Frame(format!(
                "unsupported socket packet type {other:?}"
            ))),
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Self::Connect(None) => "0".to_string(),
            Self::Connect(Some(auth)) => format!("0{auth}"),
            Self::Disconnect => "1".to_string(),
            Self::Event { name, data } => {
                format!("2{}", Value::Array(vec![Value::String(name.clone()), data.clone()]))
            }
            Self::ConnectError(message) => {
                format!("4{}", serde_json::json!({ "message": message }))
            }
        }
    }
}

fn strip_namespace(raw: &str) -> &str {
    if raw.starts_with('/') {
        raw.split_once(',').map_or("", |(_, rest)| rest)
    } else {
        raw
    }
}

fn strip_ack_id(raw: &str) -> &str {
    raw.trim_start_matches(|ch: char| ch.is_ascii_digit())
}

fn parse_optional_json(body: &str) -> Result<Option<Value>, ChannelError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|error| ChannelError::Frame(format!("bad packet body: {error}")))
}

fn parse_event(body: &str) -> Result<SocketPacket, ChannelError> {
    let Some(Value::Array(mut items)) = parse_optional_json(body)? else {
        return Err(ChannelError::Frame("event body must be an array".to_string()));
    };
    if items.is_empty() {
        return Err(ChannelError::Frame("event without a name".to_string()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        _ => return Err(ChannelError::Frame("event name must be a string".to_string())),
    };
    let data = if items.is_empty() {
        Value::Null
    } else {
        items.remove(0)
    };
    Ok(SocketPacket::Event { name, data })
}

/// What a console or feed sees of the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Opened,
    Message { event: String, data: Value },
    ConnectError { message: String },
    Closed,
}

impl ChannelEvent {
    /// Terminal failure as the console reports it.
    pub fn failed(error: &ChannelError) -> Self {
        Self::ConnectError {
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketOutput {
    /// Text frame to write back on the WebSocket.
    Send(String),
    Channel(ChannelEvent),
}

/// Client side of one Socket.IO connection, fed raw WebSocket text frames.
#[derive(Debug, Default)]
pub struct SocketIoClient {
    connected: bool,
}

impl SocketIoClient {
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn on_frame(&mut self, frame: &str) -> Result<Vec<SocketOutput>, ChannelError> {
        let outputs = match EnginePacket::parse(frame)? {
            EnginePacket::Open(handshake) => {
                tracing::debug!(sid = %handshake.sid, "engine.io handshake");
                vec![SocketOutput::Send(
                    EnginePacket::Message(SocketPacket::Connect(None).encode()).encode(),
                )]
            }
            EnginePacket::Ping(data) => vec![SocketOutput::Send(EnginePacket::Pong(data).encode())],
            EnginePacket::Close => {
                self.connected = false;
                vec![SocketOutput::Channel(ChannelEvent::Closed)]
            }
            EnginePacket::Message(raw) => match SocketPacket::parse(&raw)? {
                SocketPacket::Connect(_) => {
                    self.connected = true;
                    vec![SocketOutput::Channel(ChannelEvent::Opened)]
                }
                SocketPacket::Disconnect => {
                    self.connected = false;
                    vec![SocketOutput::Channel(ChannelEvent::Closed)]
                }
                SocketPacket::Event { name, data } => {
                    vec![SocketOutput::Channel(ChannelEvent::Message { event: name, data })]
                }
                SocketPacket::ConnectError(message) => {
                    self.connected = false;
                    vec![SocketOutput::Channel(ChannelEvent::failed(
                        &ChannelError::Rejected(message),
                    ))]
                }
            },
            EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Vec::new(),
        };
        Ok(outputs)
    }

    pub fn emit_frame(&self, event: &str, data: Value) -> Result<String, ChannelError> {
        if !self.connected {
            return Err(ChannelError::NotConnected);
        }
        Ok(EnginePacket::Message(
            SocketPacket::Event {
                name: event.to_string(),
                data,
            }
            .encode(),
        )
        .encode())
    }

    pub fn disconnect_frame(&mut self) -> String {
        self.connected = false;
        EnginePacket::Message(SocketPacket::Disconnect.encode()).encode()
    }
}
