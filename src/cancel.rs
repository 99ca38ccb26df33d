//! Checked cancellation, as an alternative to unwinding on interrupt.
//!
//! A scanner checks this at each loop head and after each blocking receive; a CLI binary sets it
//! from a SIGINT handler. No scanner unwinds on cancellation — each returns whatever findings it
//! has accumulated so far.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable, checked cancellation flag.
///
/// Cloning shares the same underlying flag; setting it from any clone is visible to all others.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark this token (and every clone of it) cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancellation_is_visible_across_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
