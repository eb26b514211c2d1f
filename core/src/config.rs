//! Lexer configuration.
//!
//! [`LexerConfig`] controls how tokens are buffered between the driver loop
//! and the consumer, and how the background worker is named.
//!
//! # Example
//!
//! ```ignore
//! use runelex_core::LexerConfig;
//!
//! // Size the token buffer from the source (half its byte length, at least 1)
//! let config = LexerConfig::default();
//!
//! // Keep at most 16 tokens in flight in asynchronous mode
//! let config = LexerConfig::new()
//!     .with_capacity(16)
//!     .with_thread_name("lexer-worker");
//! ```

/// Configuration for token buffering.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `capacity` | `None` | derived from the source: `max(1, len / 2)` |
/// | `thread_name` | `"runelex"` | identifies the worker in panics and profilers |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Token buffer capacity.
    ///
    /// In asynchronous mode this is the bound of the channel: the worker
    /// blocks once this many tokens are waiting. In synchronous mode it is
    /// only the initial allocation. `None` derives it from the source length.
    pub capacity: Option<usize>,

    /// Name given to the worker thread spawned by `Lexer::start`.
    pub thread_name: &'static str,
}

impl Default for LexerConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LexerConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        capacity: None,
        thread_name: "runelex",
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets a fixed buffer capacity. Zero is raised to one.
    #[inline]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(if capacity == 0 { 1 } else { capacity });
        self
    }

    #[inline]
    pub const fn with_thread_name(mut self, name: &'static str) -> Self {
        self.thread_name = name;
        self
    }

    /// Resolves the buffer capacity for a source of `source_len` bytes.
    #[inline]
    pub const fn capacity_for(&self, source_len: usize) -> usize {
        match self.capacity {
            Some(capacity) => capacity,
            None if source_len / 2 == 0 => 1,
            None => source_len / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_lexer_config_defaults() {
        let config = LexerConfig::default();
        assert_eq!(config.capacity, None);
        assert_eq!(config.thread_name, "runelex");
    }

    #[test_case(0, 1; "empty source")]
    #[test_case(1, 1; "single byte")]
    #[test_case(2, 1; "two bytes")]
    #[test_case(9, 4; "odd length")]
    #[test_case(1000, 500; "large")]
    fn test_capacity_derived_from_source(len: usize, expected: usize) {
        assert_eq!(LexerConfig::new().capacity_for(len), expected);
    }

    #[test]
    fn test_lexer_config_builder() {
        let config = LexerConfig::new()
            .with_capacity(8)
            .with_thread_name("scan");

        assert_eq!(config.capacity_for(10_000), 8);
        assert_eq!(config.thread_name, "scan");
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let config = LexerConfig::new().with_capacity(0);
        assert_eq!(config.capacity_for(100), 1);
    }
}
