use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    sync::mpsc,
};

/// Keyboard visibility notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyboardEvent {
    /// The keyboard is about to appear with the given height in pixels.
    WillShow {
        /// Final keyboard height.
        height: f64,
    },
    /// The keyboard is about to disappear.
    WillHide,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<(u64, mpsc::Sender<KeyboardEvent>)>,
}

/// Broadcast hub for keyboard notifications on the UI thread.
///
/// Clones share one registry. Subscriptions unregister themselves when dropped.
#[derive(Clone, Default)]
pub struct KeyboardCenter {
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for KeyboardCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardCenter")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl KeyboardCenter {
    /// Empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    pub fn subscribe(&self) -> KeyboardSubscription {
        let (tx, rx) = mpsc::channel();
        let mut reg = self.registry.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.subscribers.push((id, tx));
        KeyboardSubscription {
            id,
            rx,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every live subscriber and return how many received it.
    pub fn post(&self, event: KeyboardEvent) -> usize {
        let mut reg = self.registry.borrow_mut();
        reg.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
        reg.subscribers.len()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

/// Live registration with a [`KeyboardCenter`]; dropping it unsubscribes.
pub struct KeyboardSubscription {
    id: u64,
    rx: mpsc::Receiver<KeyboardEvent>,
    registry: Weak<RefCell<Registry>>,
}

impl std::fmt::Debug for KeyboardSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl KeyboardSubscription {
    /// Take every event posted since the last drain, oldest first.
    pub fn drain(&self) -> Vec<KeyboardEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .subscribers
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// New vertical viewport offset after `event`.
///
/// Only a focused bottom caption moves the viewport: up by the keyboard height when the
/// viewport is at rest, and back to rest when the keyboard hides.
pub fn shift_viewport(offset_y: f64, bottom_focused: bool, event: KeyboardEvent) -> f64 {
    if !bottom_focused {
        return offset_y;
    }
    match event {
        KeyboardEvent::WillShow { height } if offset_y == 0.0 => -height,
        KeyboardEvent::WillHide if offset_y != 0.0 => 0.0,
        _ => offset_y,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adapters/keyboard.rs"]
mod tests;
