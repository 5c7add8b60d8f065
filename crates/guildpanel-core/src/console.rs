//! Start-stream-finish state machine behind the restore and broadcast consoles.
//!
//! The console never touches a socket itself. Every transition returns the
//! effects the shell must perform, in order. Each `start` mints a new
//! [`SessionId`]; channel events carrying any other session are dropped, so a
//! late frame from a replaced connection cannot leak into the new log.

use serde_json::Value;

use crate::socket::ChannelEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Restore,
    Broadcast,
}

impl JobKind {
    pub fn start_event(self) -> &'static str {
        match self {
            Self::Restore => "start_restore",
            Self::Broadcast => "start_global_broadcast",
        }
    }

    pub fn progress_event(self) -> &'static str {
        match self {
            Self::Restore => "restore_progress",
            Self::Broadcast => "broadcast_log",
        }
    }

    pub fn finished_event(self) -> &'static str {
        match self {
            Self::Restore => "restore_finished",
            Self::Broadcast => "broadcast_finished",
        }
    }

    pub fn connected_message(self) -> &'static str {
        match self {
            Self::Restore => "Connected to the log server...",
            Self::Broadcast => "Connected to the broadcast server...",
        }
    }

    pub fn entry_class(self) -> &'static str {
        match self {
            Self::Restore => "restore-log-entry",
            Self::Broadcast => "log-entry",
        }
    }

    pub fn idle_label(self) -> &'static str {
        match self {
            Self::Restore => "I understand the risk, start restore",
            Self::Broadcast => "Start broadcast",
        }
    }

    fn connecting_label(self) -> &'static str {
        match self {
            Self::Restore => "Connecting to server...",
            Self::Broadcast => "Broadcast in progress...",
        }
    }

    fn running_label(self) -> &'static str {
        match self {
            Self::Restore => "Starting restore...",
            Self::Broadcast => "Broadcast in progress...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePhase {
    Idle,
    Connecting,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("success") => Self::Success,
            Some("warning" | "warn") => Self::Warning,
            Some("error") => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Info => "log-info",
            Self::Success => "log-success",
            Self::Warning => "log-warning",
            Self::Error => "log-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub timestamp: Option<String>,
    pub severity: Severity,
    pub message: String,
}

impl LogLine {
    pub fn text(&self) -> String {
        match &self.timestamp {
            Some(timestamp) => format!("[{timestamp}] {}", self.message),
            None => self.message.clone(),
        }
    }

    pub fn class_name(&self, kind: JobKind) -> String {
        format!("{} {}", kind.entry_class(), self.severity.class_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Ready,
    Busy(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEffect {
    Connect {
        session: SessionId,
    },
    Disconnect {
        session: SessionId,
    },
    Emit {
        session: SessionId,
        event: &'static str,
        payload: Value,
    },
    ShowLog,
    ClearLog,
    AppendLine(LogLine),
    Control(ControlState),
}

#[derive(Debug)]
pub struct JobConsole {
    kind: JobKind,
    phase: ConsolePhase,
    session: Option<SessionId>,
    issued: u64,
    pending_start: Option<Value>,
}

impl JobConsole {
    pub fn new(kind: JobKind) -> Self {
        Self {
            kind,
            phase: ConsolePhase::Idle,
            session: None,
            issued: 0,
            pending_start: None,
        }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn phase(&self) -> ConsolePhase {
        self.phase
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.session
    }

    /// Begins a validated job. `payload` is emitted once the channel opens.
    pub fn start(&mut self, payload: Value) -> Vec<ConsoleEffect> {
        let mut effects = Vec::new();
        if let Some(previous) = self.session.take() {
            effects.push(ConsoleEffect::Disconnect { session: previous });
        }
        self.issued += 1;
        let session = SessionId(self.issued);
        self.session = Some(session);
        self.phase = ConsolePhase::Connecting;
        self.pending_start = Some(payload);
        effects.extend([
            ConsoleEffect::Control(ControlState::Busy(self.kind.connecting_label())),
            ConsoleEffect::ShowLog,
            ConsoleEffect::ClearLog,
            ConsoleEffect::Connect { session },
        ]);
        effects
    }

    pub fn on_event(
        &mut self,
        session: SessionId,
        event: ChannelEvent,
        now: &str,
    ) -> Vec<ConsoleEffect> {
        if self.session != Some(session) {
            tracing::debug!(?session, "dropping event from stale console session");
            return Vec::new();
        }
        match event {
            ChannelEvent::Opened => self.on_opened(session, now),
            ChannelEvent::Message { event, data } if event == self.kind.progress_event() => {
                vec![ConsoleEffect::AppendLine(progress_line(&data, now))]
            }
            ChannelEvent::Message { event, data } if event == self.kind.finished_event() => {
                let line = self.finished_line(&data);
                self.terminate(session, line)
            }
            ChannelEvent::Message { event, .. } => {
                tracing::debug!(%event, "ignoring unrelated console event");
                Vec::new()
            }
            ChannelEvent::ConnectError { message } => {
                self.terminate(session, Some(connect_error_line(&message)))
            }
            ChannelEvent::Closed => {
                self.terminate(session, Some(connect_error_line("connection closed")))
            }
        }
    }

    fn on_opened(&mut self, session: SessionId, now: &str) -> Vec<ConsoleEffect> {
        if self.phase != ConsolePhase::Connecting {
            return Vec::new();
        }
        self.phase = ConsolePhase::Running;
        let payload = self.pending_start.take().unwrap_or(Value::Null);
        vec![
            ConsoleEffect::AppendLine(LogLine {
                timestamp: Some(now.to_string()),
                severity: Severity::Success,
                message: self.kind.connected_message().to_string(),
            }),
            ConsoleEffect::Control(ControlState::Busy(self.kind.running_label())),
            ConsoleEffect::Emit {
                session,
                event: self.kind.start_event(),
                payload,
            },
        ]
    }

    fn finished_line(&self, data: &Value) -> Option<LogLine> {
        match self.kind {
            JobKind::Restore => None,
            JobKind::Broadcast => {
                let succeeded = data.get("status").and_then(Value::as_str) == Some("success");
                Some(LogLine {
                    timestamp: None,
                    severity: if succeeded {
                        Severity::Success
                    } else {
                        Severity::Error
                    },
                    message: if succeeded {
                        "Broadcast finished.".to_string()
                    } else {
                        "Broadcast aborted due to an error.".to_string()
                    },
                })
            }
        }
    }

    fn terminate(&mut self, session: SessionId, line: Option<LogLine>) -> Vec<ConsoleEffect> {
        self.phase = ConsolePhase::Idle;
        self.session = None;
        self.pending_start = None;
        let mut effects: Vec<ConsoleEffect> =
            line.into_iter().map(ConsoleEffect::AppendLine).collect();
        effects.push(ConsoleEffect::Control(ControlState::Ready));
        effects.push(ConsoleEffect::Disconnect { session });
        effects
    }
}

fn progress_line(data: &Value, now: &str) -> LogLine {
    LogLine {
        timestamp: Some(now.to_string()),
        severity: Severity::from_wire(data.get("type").and_then(Value::as_str)),
        message: match data.get("message") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
    }
}

fn connect_error_line(message: &str) -> LogLine {
    LogLine {
        timestamp: None,
        severity: Severity::Error,
        message: format!("Could not connect to the log server: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn connect_session(effects: &[ConsoleEffect]) -> SessionId {
        effects
            .iter()
            .find_map(|effect| match effect {
                ConsoleEffect::Connect { session } => Some(*session),
                _ => None,
            })
            .expect("start should connect")
    }

    #[test]
    fn start_from_idle_connects_without_disconnect() {
        let mut console = JobConsole::new(JobKind::Restore);
        let effects = console.start(json!({"guild_id": "1"}));
        assert!(!effects
            .iter()
            .any(|effect| matches!(effect, ConsoleEffect::Disconnect { .. })));
        assert_eq!(console.phase(), ConsolePhase::Connecting);
        assert_eq!(
            effects.last(),
            Some(&ConsoleEffect::Connect {
                session: connect_session(&effects)
            })
        );
    }

    #[test]
    fn restart_disconnects_previous_session_first() {
        let mut console = JobConsole::new(JobKind::Broadcast);
        let first = connect_session(&console.start(json!({})));
        let effects = console.start(json!({}));
        let second = connect_session(&effects);
        assert_ne!(first, second);
        assert_eq!(effects[0], ConsoleEffect::Disconnect { session: first });
        assert_eq!(console.active_session(), Some(second));
    }

    #[test]
    fn opened_emits_start_event_once() {
        let mut console = JobConsole::new(JobKind::Restore);
        let session = connect_session(&console.start(json!({"guild_id": "9"})));
        let effects = console.on_event(session, ChannelEvent::Opened, "12:00:00");
        assert_eq!(
            effects,
            vec![
                ConsoleEffect::AppendLine(LogLine {
                    timestamp: Some("12:00:00".to_string()),
                    severity: Severity::Success,
                    message: "Connected to the log server...".to_string(),
                }),
                ConsoleEffect::Control(ControlState::Busy("Starting restore...")),
                ConsoleEffect::Emit {
                    session,
                    event: "start_restore",
                    payload: json!({"guild_id": "9"}),
                },
            ]
        );
        assert_eq!(console.phase(), ConsolePhase::Running);
        assert!(console
            .on_event(session, ChannelEvent::Opened, "12:00:01")
            .is_empty());
    }

    #[test]
    fn progress_appends_classed_line() {
        let mut console = JobConsole::new(JobKind::Broadcast);
        let session = connect_session(&console.start(json!({})));
        console.on_event(session, ChannelEvent::Opened, "t0");
        let effects = console.on_event(
            session,
            ChannelEvent::Message {
                event: "broadcast_log".to_string(),
                data: json!({"type": "warning", "message": "User 5 has DMs closed"}),
            },
            "t1",
        );
        let lines: Vec<&LogLine> = effects
            .iter()
            .filter_map(|effect| match effect {
                ConsoleEffect::AppendLine(line) => Some(line),
                _ => None,
            })
            .collect();
        assert_eq!(effects.len(), 1);
        assert_eq!(lines[0].text(), "[t1] User 5 has DMs closed");
        assert_eq!(
            lines[0].class_name(JobKind::Broadcast),
            "log-entry log-warning"
        );
    }

    #[test]
    fn broadcast_finish_reports_outcome_and_disconnects() {
        let mut console = JobConsole::new(JobKind::Broadcast);
        let session = connect_session(&console.start(json!({})));
        console.on_event(session, ChannelEvent::Opened, "t0");
        let effects = console.on_event(
            session,
            ChannelEvent::Message {
                event: "broadcast_finished".to_string(),
                data: json!({"status": "error"}),
            },
            "t1",
        );
        assert_eq!(
            effects,
            vec![
                ConsoleEffect::AppendLine(LogLine {
                    timestamp: None,
                    severity: Severity::Error,
                    message: "Broadcast aborted due to an error.".to_string(),
                }),
                ConsoleEffect::Control(ControlState::Ready),
                ConsoleEffect::Disconnect { session },
            ]
        );
        assert_eq!(console.phase(), ConsolePhase::Idle);
        assert_eq!(console.active_session(), None);
    }

    #[test]
    fn connect_error_re_enables_control() {
        let mut console = JobConsole::new(JobKind::Restore);
        let session = connect_session(&console.start(json!({})));
        let effects = console.on_event(
            session,
            ChannelEvent::ConnectError {
                message: "timeout".to_string(),
            },
            "t0",
        );
        assert_eq!(
            effects[0],
            ConsoleEffect::AppendLine(LogLine {
                timestamp: None,
                severity: Severity::Error,
                message: "Could not connect to the log server: timeout".to_string(),
            })
        );
        assert!(effects.contains(&ConsoleEffect::Control(ControlState::Ready)));
        assert!(effects.contains(&ConsoleEffect::Disconnect { session }));
    }

    #[test]
    fn stale_sessions_are_ignored() {
        let mut console = JobConsole::new(JobKind::Restore);
        let stale = connect_session(&console.start(json!({})));
        let current = connect_session(&console.start(json!({})));
        assert!(console
            .on_event(stale, ChannelEvent::Opened, "t0")
            .is_empty());
        assert_eq!(console.phase(), ConsolePhase::Connecting);
        assert!(!console
            .on_event(current, ChannelEvent::Opened, "t0")
            .is_empty());
    }
}
