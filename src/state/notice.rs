//! Transient status messages.

/// A status message stamped with the frame it was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    set_at: u64,
}

impl Notice {
    /// Notice raised on `frame`.
    pub fn new(message: impl Into<String>, frame: u64) -> Self {
        Self {
            message: message.into(),
            set_at: frame,
        }
    }

    /// Text to show.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether `ticks` frames have passed since the notice was raised.
    pub fn is_expired(&self, frame: u64, ticks: u64) -> bool {
        frame.saturating_sub(self.set_at) >= ticks
    }
}
