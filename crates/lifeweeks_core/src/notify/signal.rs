//! One-shot navigation trigger raised by notification taps.

use crate::notify::plan::DAILY_REFLECTION_PAYLOAD;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pending request to open the reflection entry screen.
///
/// Raised from the notification callback, consumed once by the UI.
#[derive(Debug, Default)]
pub struct NavigationSignal {
    pending: AtomicBool,
}

impl NavigationSignal {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Handles a tapped notification. Only daily reflection taps raise the
    /// signal; returns whether it was raised.
    pub fn handle_notification_tap(&self, payload_type: Option<&str>) -> bool {
        if payload_type == Some(DAILY_REFLECTION_PAYLOAD) {
            self.pending.store(true, Ordering::Release);
            return true;
        }
        false
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consumes the signal: `true` at most once per raise.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}
