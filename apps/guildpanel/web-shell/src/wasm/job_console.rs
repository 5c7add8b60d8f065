use super::*;

    /// Element ids the console writes to.
    #[derive(Debug, Clone, Copy)]
    pub(super) struct ConsoleControls {
        pub(super) log_card: &'static str,
        pub(super) log: &'static str,
        pub(super) button: &'static str,
        pub(super) idle_icon: &'static str,
    }

    pub(super) struct ConsoleHost {
        console: JobConsole,
        controls: ConsoleControls,
        channels: HashMap<SessionId, ChannelHandle>,
    }

    pub(super) fn install_job_console(kind: JobKind, controls: ConsoleControls) {
        shutdown_job_console();
        JOB_CONSOLE.with(|slot| {
            *slot.borrow_mut() = Some(ConsoleHost {
                console: JobConsole::new(kind),
                controls,
                channels: HashMap::new(),
            });
        });
    }

    pub(super) fn shutdown_job_console() {
        let channels: Vec<ChannelHandle> = JOB_CONSOLE.with(|slot| {
            slot.borrow_mut()
                .take()
                .map(|host| host.channels.into_values().collect())
                .unwrap_or_default()
        });
        for channel in channels {
            channel.close();
        }
    }

    /// Starts a validated job; `payload` is emitted once the socket is open.
    pub(super) fn start_job(payload: Value) {
        let effects = JOB_CONSOLE.with(|slot| {
            slot.borrow_mut()
                .as_mut()
                .map(|host| host.console.start(payload))
                .unwrap_or_default()
        });
        if effects.is_empty() {
            tracing::warn!("job started without a console installed");
        }
        apply_effects(effects);
    }

    fn on_channel_event(session: SessionId, event: ChannelEvent) {
        let now = clock_time();
        let effects = JOB_CONSOLE.with(|slot| {
            slot.borrow_mut()
                .as_mut()
                .map(|host| host.console.on_event(session, event, &now))
                .unwrap_or_default()
        });
        apply_effects(effects);
    }

    fn controls() -> Option<(ConsoleControls, JobKind)> {
        JOB_CONSOLE.with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|host| (host.controls, host.console.kind()))
        })
    }

    fn apply_effects(effects: Vec<ConsoleEffect>) {
        for effect in effects {
            apply_effect(effect);
        }
    }

    // Effects run with no borrow of JOB_CONSOLE held: a failed connect feeds
    // straight back into `on_channel_event`.
    fn apply_effect(effect: ConsoleEffect) {
        let Some((controls, kind)) = controls() else {
            return;
        };
        match effect {
            ConsoleEffect::Connect { session } => {
                match open_channel(move |event| on_channel_event(session, event)) {
                    Ok(channel) => JOB_CONSOLE.with(|slot| {
                        if let Some(host) = slot.borrow_mut().as_mut() {
                            host.channels.insert(session, channel);
                        }
                    }),
                    Err(error) => {
                        tracing::warn!(%error, "job console could not open its socket");
                        on_channel_event(
                            session,
                            ChannelEvent::ConnectError {
                                message: error.to_string(),
                            },
                        );
                    }
                }
            }
            ConsoleEffect::Disconnect { session } => {
                let channel = JOB_CONSOLE.with(|slot| {
                    slot.borrow_mut()
                        .as_mut()
                        .and_then(|host| host.channels.remove(&session))
                });
                if let Some(channel) = channel {
                    channel.close();
                }
            }
            ConsoleEffect::Emit {
                session,
                event,
                payload,
            } => JOB_CONSOLE.with(|slot| {
                if let Some(channel) = slot
                    .borrow()
                    .as_ref()
                    .and_then(|host| host.channels.get(&session))
                {
                    channel.emit(event, payload);
                }
            }),
            ConsoleEffect::ShowLog => {
                if let Some(card) = element_by_id(controls.log_card) {
                    set_display(&card, "block");
                }
            }
            ConsoleEffect::ClearLog => set_html(controls.log, ""),
            ConsoleEffect::AppendLine(line) => {
                let Some(log) = element_by_id(controls.log) else {
                    return;
                };
                let Ok(entry) = document().and_then(|document| {
                    document
                        .create_element("span")
                        .map_err(|_| "failed to create log entry".to_string())
                }) else {
                    return;
                };
                entry.set_class_name(&line.class_name(kind));
                entry.set_text_content(Some(&line.text()));
                let _ = log.append_child(&entry);
                log.set_scroll_top(log.scroll_height());
            }
            ConsoleEffect::Control(state) => {
                let Some(button) = element_by_id(controls.button) else {
                    return;
                };
                match state {
                    ControlState::Ready => {
                        set_button_idle(&button, &format!("<i class=\"{}\"></i> ", controls.idle_icon));
                        let _ = button.append_with_str_1(kind.idle_label());
                    }
                    ControlState::Busy(label) => set_button_busy(&button, label),
                }
            }
        }
    }
