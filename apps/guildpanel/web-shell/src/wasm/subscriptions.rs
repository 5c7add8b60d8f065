use super::*;

    type Listener = Closure<dyn FnMut(web_sys::Event)>;

    /// Listeners and timers owned by the mounted page, released together.
    #[derive(Default)]
    pub(super) struct Subscriptions {
        listeners: Vec<(EventTarget, &'static str, Listener)>,
        intervals: Vec<Interval>,
    }

    impl Subscriptions {
        fn listen(&mut self, target: &EventTarget, event: &'static str, listener: Listener) {
            if target
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .is_err()
            {
                tracing::warn!(event, "failed to attach listener");
                return;
            }
            self.listeners.push((target.clone(), event, listener));
        }

        pub(super) fn dispose(&mut self) {
            for (target, event, listener) in self.listeners.drain(..) {
                let _ = target.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
            }
            // Dropping an `Interval` cancels it.
            self.intervals.clear();
        }
    }

    impl Drop for Subscriptions {
        fn drop(&mut self) {
            self.dispose();
        }
    }

    pub(super) fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let listener = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(handler));
        SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow_mut().listen(target, event, listener));
    }

    /// Attaches to the element with `id`; a missing element is not an error.
    pub(super) fn listen_by_id(
        id: &str,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> bool {
        match element_by_id(id) {
            Some(element) => {
                listen(&element, event, handler);
                true
            }
            None => {
                tracing::debug!(id, event, "listener target missing");
                false
            }
        }
    }

    pub(super) fn every(millis: u32, tick: impl FnMut() + 'static) {
        let interval = Interval::new(millis, tick);
        SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow_mut().intervals.push(interval));
    }
