// ABOUTME: Attempt ordinal for a single logical API call.
// ABOUTME: Starts at #1 and only ever moves forward.

use std::fmt;

/// Ordinal of one transport invocation within a logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attempt(u32);

impl Attempt {
    pub const FIRST: Attempt = Attempt(1);

    /// Build an attempt from its ordinal. Returns None for 0.
    pub fn new(ordinal: u32) -> Option<Self> {
        (ordinal > 0).then_some(Self(ordinal))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The attempt that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Attempt {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
