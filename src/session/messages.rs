//! Error message stack.
//!
//! Tracks the messages currently on screen so the same text is never shown
//! twice at once on the same surface. Entries are released by dropping the guard returned from
//! [`ErrorMessageStack::try_push`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// What kind of surface currently shows a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Toast,
    LogoutModal,
}

/// Set of displayed messages keyed by surface and text.
#[derive(Debug, Clone, Default)]
pub struct ErrorMessageStack {
    entries: Arc<DashMap<(MessageKind, String), u64>>,
    next_id: Arc<AtomicU64>,
}

impl ErrorMessageStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a message. Returns `None` if the same text is already shown
    /// on a surface of the same kind.
    pub fn try_push(&self, message: &str, kind: MessageKind) -> Option<MessageGuard> {
        match self.entries.entry((kind, message.to_string())) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(id);
                Some(MessageGuard {
                    stack: self.clone(),
                    kind,
                    message: message.to_string(),
                    id,
                })
            }
        }
    }

    pub fn contains(&self, message: &str, kind: MessageKind) -> bool {
        self.entries.contains_key(&(kind, message.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True while any logout modal is displayed.
    pub fn has_logout_modal(&self) -> bool {
        self.entries.iter().any(|e| e.key().0 == MessageKind::LogoutModal)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// A RAII guard that removes its message from the stack when dropped.
#[derive(Debug)]
pub struct MessageGuard {
    stack: ErrorMessageStack,
    kind: MessageKind,
    message: String,
    id: u64,
}

impl MessageGuard {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Drop for MessageGuard {
    fn drop(&mut self) {
        // a cleared-and-reused slot belongs to a newer guard
        let key = (self.kind, std::mem::take(&mut self.message));
        self.stack.entries.remove_if(&key, |_, id| *id == self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_push_is_rejected() {
        let stack = ErrorMessageStack::new();
        let first = stack.try_push("Signed in elsewhere", MessageKind::LogoutModal);
        assert!(first.is_some());
        assert!(stack.try_push("Signed in elsewhere", MessageKind::LogoutModal).is_none());
        assert_eq!(stack.len(), 1);
        assert!(stack.has_logout_modal());

        drop(first);
        assert!(stack.is_empty());
        assert!(stack.try_push("Signed in elsewhere", MessageKind::LogoutModal).is_some());
    }

    #[test]
    fn test_kinds_are_independent_of_text() {
        let stack = ErrorMessageStack::new();
        let _a = stack.try_push("timeout", MessageKind::Toast).unwrap();
        let _b = stack.try_push("forbidden", MessageKind::Toast).unwrap();
        assert_eq!(stack.len(), 2);
        assert!(!stack.has_logout_modal());
        assert!(stack.contains("timeout", MessageKind::Toast));
    }

    #[test]
    fn test_stale_guard_keeps_newer_entry() {
        let stack = ErrorMessageStack::new();
        let stale = stack.try_push("expired", MessageKind::Toast).unwrap();
        stack.clear();
        let _fresh = stack.try_push("expired", MessageKind::Toast).unwrap();

        drop(stale);
        assert!(stack.contains("expired", MessageKind::Toast));
    }

    #[test]
    fn test_toast_does_not_block_modal_with_same_text() {
        let stack = ErrorMessageStack::new();
        let _toast = stack.try_push("Account disabled", MessageKind::Toast).unwrap();
        let modal = stack.try_push("Account disabled", MessageKind::LogoutModal);

        assert!(modal.is_some());
        assert_eq!(stack.len(), 2);
        assert!(stack.has_logout_modal());

        drop(modal);
        assert!(stack.contains("Account disabled", MessageKind::Toast));
        assert!(!stack.has_logout_modal());
    }
}
