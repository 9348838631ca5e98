//! Parse configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default bound on grammar nesting (parentheses, braces, right-nested operands).
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parse configuration
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Maximum nonterminal nesting before the current subtree is abandoned with a `StackDepthExceeded` diagnostic
    pub max_depth: usize,
    /// Cooperative cancellation flag, checked at nonterminal entry
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cancel: None,
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Install a cancellation flag; setting it to `true` from another thread stops the parse at the next
    /// nonterminal boundary.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Return `true` once the cancellation flag has been raised.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.cancel.is_none());
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ParseConfig::new().max_depth, ParseConfig::default().max_depth);
    }

    #[test]
    fn test_with_max_depth() {
        let config = ParseConfig::new().with_max_depth(8);
        assert_eq!(config.max_depth, 8);
        assert!(config.cancel.is_none());
    }

    #[test]
    fn test_with_cancellation() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = ParseConfig::new().with_cancellation(Arc::clone(&flag));
        assert!(!config.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(config.is_cancelled());
    }

    #[test]
    fn test_builder_chain() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = ParseConfig::new().with_max_depth(3).with_cancellation(flag);
        assert_eq!(config.max_depth, 3);
        assert!(config.is_cancelled());
    }
}
