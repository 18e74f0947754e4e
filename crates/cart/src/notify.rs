//! User-facing confirmation notifications.
//!
//! Mutations confirm their outcome to the visitor ("1 x Keyboard added to
//! cart. Cart total items: 3"). The channel that shows the message is a
//! page concern, so it sits behind the [`Notifier`] port; the engine only
//! decides the wording.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

/// Delivery channel for user-facing confirmation messages.
pub trait Notifier {
    /// Show `message` to the visitor.
    fn notify(&self, message: &str);
}

/// Default notifier: emits the message to the log.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(message, "cart notification");
    }
}

/// Notifier that drops every message.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}

/// Notifier that captures messages in memory, for tests.
///
/// Clones share the same buffer, so a clone can be handed to the store
/// while the original stays available for assertions.
#[derive(Debug, Clone, Default)]
pub struct BufferNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl BufferNotifier {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages delivered so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for BufferNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_notifier_captures_in_order() {
        let notifier = BufferNotifier::new();
        let handle = notifier.clone();
        handle.notify("first");
        handle.notify("second");
        assert_eq!(notifier.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_null_notifier_is_silent() {
        NullNotifier.notify("ignored");
    }
}
