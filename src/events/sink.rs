use super::Event;

/// Receiver for editor [`Event`]s.
///
/// Implemented for closures out of the box, and for
/// `crossbeam::channel::Sender<Event>` when the `events` feature is enabled.
pub trait EventSink {
    fn send(&self, event: Event);
}

impl<F> EventSink for F
where
    F: Fn(Event),
{
    fn send(&self, event: Event) {
        self(event);
    }
}

#[cfg(feature = "events")]
impl EventSink for crossbeam::channel::Sender<Event> {
    fn send(&self, event: Event) {
        // Slow or disconnected consumers must not break the editor loop.
        let _ = self.try_send(event);
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;
    use crate::events::PayloadNodeSelect;

    #[test]
    fn closure_sink_receives_events() {
        let seen = RefCell::new(Vec::new());
        let sink = |e: Event| seen.borrow_mut().push(e);
        sink.send(Event::NodeSelect(PayloadNodeSelect { id: 7 }));
        assert_eq!(seen.borrow().len(), 1);
    }
}
