//! Channel-backed event sink.
//!
//! Core components never write log lines themselves. They push events
//! into an [`EventSender`] handed to them by the caller, and the caller
//! decides what to print, log, or assert on.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Injected event sink used by the scanner and the remover.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { inner: sender }
    }

    /// Send an event.
    ///
    /// If the receiver is gone the event is dropped; reporting is optional.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receiving half, owned by whoever renders the events.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event arrives or every sender is dropped
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Take everything already queued without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Factory for connected sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (EventSender, EventReceiver) {
        let (tx, rx) = unbounded();
        (EventSender::new(tx), EventReceiver { inner: rx })
    }
}

/// A sender whose events go nowhere
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{RunEvent, ScanEvent};
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn events_cross_threads_in_order() {
        let (sender, receiver) = EventChannel::new();

        let handle = thread::spawn(move || {
            sender.send(Event::Scan(ScanEvent::RawFound {
                path: PathBuf::from("/photos/a.RAF"),
            }));
            sender.send(Event::Scan(ScanEvent::RawFound {
                path: PathBuf::from("/photos/b.RAF"),
            }));
        });
        handle.join().unwrap();

        let paths: Vec<PathBuf> = receiver
            .iter()
            .filter_map(|event| match event {
                Event::Scan(ScanEvent::RawFound { path }) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("/photos/a.RAF"), PathBuf::from("/photos/b.RAF")]
        );
    }

    #[test]
    fn null_sender_does_not_panic() {
        let sender = null_sender();
        sender.send(Event::Run(RunEvent::Completed {
            removed: 0,
            duration_ms: 0,
        }));
    }

    #[test]
    fn drain_returns_queued_events_only() {
        let (sender, receiver) = EventChannel::new();
        assert!(receiver.drain().is_empty());

        sender.send(Event::Run(RunEvent::Started {
            delete_enabled: false,
            inline: false,
        }));
        assert_eq!(receiver.drain().len(), 1);
        assert!(receiver.drain().is_empty());
    }
}
