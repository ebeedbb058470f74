//! Toast notifications
//!
//! Every user-facing success or failure of a screen action is queued here
//! and logged at the same time. The front-end drains the queue to render it.

use std::fmt;

use uuid::Uuid;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            ToastLevel::Success => "ok",
            ToastLevel::Error => "error",
        };
        write!(f, "[{}] {}", tag, self.message)
    }
}

/// Ordered toast queue
#[derive(Debug, Default)]
pub struct Toaster {
    queue: Vec<Toast>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        let message = message.into();
        tracing::info!(%message, "Toast");
        self.push(ToastLevel::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> Uuid {
        let message = message.into();
        tracing::warn!(%message, "Toast");
        self.push(ToastLevel::Error, message)
    }

    /// Error toast for a failed action, e.g. "Could not save Member: ..."
    pub fn failure(&mut self, action: &str, err: &ClientError) -> Uuid {
        self.error(format!("{}: {}", action, err.user_message()))
    }

    fn push(&mut self, level: ToastLevel, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.queue.push(Toast { id, level, message });
        id
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.queue.last()
    }

    /// Remove one toast, as when the user dismisses it
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.queue.len();
        self.queue.retain(|t| t.id != id);
        self.queue.len() != before
    }

    /// Take every queued toast, oldest first
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_order_and_dismiss() {
        let mut toaster = Toaster::new();
        toaster.success("Member created");
        let err = toaster.failure(
            "Could not delete Member",
            &ClientError::NotFound("Member not found".into()),
        );
        assert_eq!(toaster.len(), 2);
        assert_eq!(
            toaster.latest().map(|t| t.message.as_str()),
            Some("Could not delete Member: Member not found")
        );

        assert!(toaster.dismiss(err));
        assert!(!toaster.dismiss(err));
        let drained = toaster.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, ToastLevel::Success);
        assert!(toaster.is_empty());
    }
}
