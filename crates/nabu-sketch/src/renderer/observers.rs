use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use log::trace;

/// Kinds of host notifications a renderer can subscribe to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ObserverKind {
    Resize,
    Intersection,
    PageVisibility,
    Hover,
}

/// A notification from the host environment.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum HostEvent {
    /// New surface size in logical pixels.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    /// Visible fraction of the surface, `0..=1`.
    Intersection { ratio: f32 },
    PageVisibility { visible: bool },
    /// Pointer entered (`true`) or left the surface.
    Hover(bool),
}

impl HostEvent {
    pub fn kind(&self) -> ObserverKind {
        match self {
            HostEvent::Resize { .. } => ObserverKind::Resize,
            HostEvent::Intersection { .. } => ObserverKind::Intersection,
            HostEvent::PageVisibility { .. } => ObserverKind::PageVisibility,
            HostEvent::Hover(_) => ObserverKind::Hover,
        }
    }
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    subscribers: Vec<(u64, ObserverKind)>,
    queue: VecDeque<HostEvent>,
}

/// Host-side event source shared with one renderer.
///
/// Events are queued only while a live [`Subscription`] of their kind exists,
/// and drained by the renderer before each frame.
#[derive(Debug, Default)]
pub struct ObserverHub {
    state: RefCell<HubState>,
}

impl ObserverHub {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn subscribe(self: &Rc<Self>, kind: ObserverKind) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.subscribers.push((id, kind));
        trace!("observer {id} subscribed to {kind:?}");
        Subscription { hub: Rc::downgrade(self), id }
    }

    pub fn notify(&self, event: HostEvent) {
        let mut state = self.state.borrow_mut();
        let kind = event.kind();
        if state.subscribers.iter().any(|(_, k)| *k == kind) {
            state.queue.push_back(event);
        }
    }

    pub fn drain(&self) -> Vec<HostEvent> {
        self.state.borrow_mut().queue.drain(..).collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    pub fn is_subscribed(&self, kind: ObserverKind) -> bool {
        self.state.borrow().subscribers.iter().any(|(_, k)| *k == kind)
    }

    fn unsubscribe(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        state.subscribers.retain(|(i, _)| *i != id);
        if state.subscribers.is_empty() {
            state.queue.clear();
        }
    }
}

/// Releases its observer when dropped.
#[derive(Debug)]
pub struct Subscription {
    hub: Weak<ObserverHub>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(self.id);
            trace!("observer {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_without_subscribers_are_dropped() {
        let hub = ObserverHub::new();
        hub.notify(HostEvent::Hover(true));
        assert!(hub.drain().is_empty());

        let _sub = hub.subscribe(ObserverKind::Hover);
        hub.notify(HostEvent::Hover(true));
        hub.notify(HostEvent::PageVisibility { visible: false });
        assert_eq!(hub.drain(), vec![HostEvent::Hover(true)]);
        assert!(hub.drain().is_empty());
    }

    #[test]
    fn dropping_subscription_releases_it() {
        let hub = ObserverHub::new();
        let a = hub.subscribe(ObserverKind::Resize);
        let b = hub.subscribe(ObserverKind::Resize);
        assert_eq!(hub.subscriber_count(), 2);
        drop(a);
        assert!(hub.is_subscribed(ObserverKind::Resize));
        drop(b);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn subscription_may_outlive_hub() {
        let hub = ObserverHub::new();
        let sub = hub.subscribe(ObserverKind::Intersection);
        drop(hub);
        drop(sub);
    }
}
