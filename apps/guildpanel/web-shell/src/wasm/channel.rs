use super::*;

    enum Outbound {
        Emit { event: String, data: Value },
        Close,
    }

    enum Step {
        Frame(Option<Result<WsMessage, WebSocketError>>),
        Command(Option<Outbound>),
    }

    /// Write side of one Socket.IO connection driven by a spawned task.
    pub(super) struct ChannelHandle {
        outbound: mpsc::UnboundedSender<Outbound>,
    }

    impl ChannelHandle {
        pub(super) fn emit(&self, event: &str, data: Value) {
            let command = Outbound::Emit {
                event: event.to_string(),
                data,
            };
            if self.outbound.unbounded_send(command).is_err() {
                tracing::debug!(event, "emit on a finished channel");
            }
        }

        pub(super) fn close(&self) {
            let _ = self.outbound.unbounded_send(Outbound::Close);
        }
    }

    /// Opens the panel socket and streams its events into `on_event` until it closes.
    pub(super) fn open_channel(
        on_event: impl FnMut(ChannelEvent) + 'static,
    ) -> Result<ChannelHandle, ChannelError> {
        let url = build_socket_url(&config().socket_path)?;
        let socket = WebSocket::open(&url).map_err(|error| ChannelError::Open(error.to_string()))?;
        let (sender, receiver) = mpsc::unbounded();
        tracing::debug!(%url, "socket opening");
        spawn_local(run_channel(socket, receiver, on_event));
        Ok(ChannelHandle { outbound: sender })
    }

    async fn run_channel(
        socket: WebSocket,
        mut outbound: mpsc::UnboundedReceiver<Outbound>,
        mut on_event: impl FnMut(ChannelEvent),
    ) {
        let (mut sink, mut stream) = socket.split();
        let mut client = SocketIoClient::default();

        loop {
            let step = {
                let next_frame = stream.next().fuse();
                let next_command = outbound.next().fuse();
                pin_mut!(next_frame, next_command);
                select! {
                    frame = next_frame => Step::Frame(frame),
                    command = next_command => Step::Command(command),
                }
            };

            match step {
                Step::Frame(Some(Ok(message))) => {
                    let outputs = match websocket_text(message).and_then(|raw| client.on_frame(&raw)) {
                        Ok(outputs) => outputs,
                        Err(error) => {
                            tracing::warn!(%error, "dropping socket frame");
                            continue;
                        }
                    };
                    for output in outputs {
                        match output {
                            SocketOutput::Send(raw) => {
                                if let Err(error) = sink.send(WsMessage::Text(raw)).await {
                                    on_event(ChannelEvent::failed(&ChannelError::Transport(
                                        error.to_string(),
                                    )));
                                    return;
                                }
                            }
                            SocketOutput::Channel(event) => {
                                let closed = matches!(
                                    event,
                                    ChannelEvent::Closed | ChannelEvent::ConnectError { .. }
                                );
                                on_event(event);
                                if closed {
                                    return;
                                }
                            }
                        }
                    }
                }
                Step::Frame(Some(Err(error))) => {
                    on_event(ChannelEvent::failed(&ChannelError::Transport(error.to_string())));
                    return;
                }
                Step::Frame(None) => {
                    on_event(ChannelEvent::Closed);
                    return;
                }
                Step::Command(Some(Outbound::Emit { event, data })) => {
                    match client.emit_frame(&event, data) {
                        Ok(raw) => {
                            if let Err(error) = sink.send(WsMessage::Text(raw)).await {
                                tracing::warn!(%event, %error, "socket emit failed");
                            }
                        }
                        Err(error) => tracing::warn!(%event, %error, "socket emit rejected"),
                    }
                }
                Step::Command(Some(Outbound::Close) | None) => {
                    let _ = sink.send(WsMessage::Text(client.disconnect_frame())).await;
                    let _ = sink.close().await;
                    tracing::debug!("socket closed by client");
                    return;
                }
            }
        }
    }
