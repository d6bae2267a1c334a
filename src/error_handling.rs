use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::SetLoggerError;
use strum::IntoEnumIterator;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML for the settings schema.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },

    /// A field failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Structural enumeration failures.
///
/// Per-candidate resolution failures are absorbed and never surface here;
/// only problems that prevent the enumeration machinery from running at all
/// are reported as errors.
#[derive(Error, Debug)]
pub enum EnumerationError {
    /// The worker pool was configured with zero workers.
    #[error("Worker pool requires at least one worker")]
    EmptyPool,
}

/// Classification of a single lookup against one authority, plus the
/// cross-verification diagnostic.
///
/// All failure kinds collapse to an empty address list at the resolver
/// boundary; they differ only in the logged diagnostic and in these counters.
/// `VerificationMismatch` is not a failure: the two authorities answered
/// but disagreed, and the primary answer was used anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupOutcome {
    /// Authoritative negative answer (NXDOMAIN or no records).
    NotFound,
    /// No answer within the configured deadline.
    Timeout,
    /// Any other transport or protocol failure.
    Unclassified,
    /// Primary and secondary authorities returned different answer sets.
    VerificationMismatch,
}

impl LookupOutcome {
    /// Human-readable label for summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupOutcome::NotFound => "Domain not found",
            LookupOutcome::Timeout => "DNS timeout",
            LookupOutcome::Unclassified => "DNS resolution error",
            LookupOutcome::VerificationMismatch => "DNS verification mismatch",
        }
    }
}

/// Thread-safe lookup statistics tracker.
///
/// Tracks the count of each [`LookupOutcome`] using atomic counters, allowing
/// concurrent access from enumeration workers. All outcomes are initialized
/// to zero on creation.
pub struct LookupStats {
    counters: HashMap<LookupOutcome, AtomicUsize>,
}

impl LookupStats {
    /// Creates a tracker with every outcome at zero.
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for outcome in LookupOutcome::iter() {
            counters.insert(outcome, AtomicUsize::new(0));
        }
        LookupStats { counters }
    }

    /// Adds one to the given outcome.
    pub fn increment(&self, outcome: LookupOutcome) {
        // All LookupOutcome variants are initialized in new(), so unwrap() is safe
        self.counters
            .get(&outcome)
            .unwrap()
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current count for the given outcome.
    pub fn get_count(&self, outcome: LookupOutcome) -> usize {
        // All LookupOutcome variants are initialized in new(), so unwrap() is safe
        self.counters.get(&outcome).unwrap().load(Ordering::SeqCst)
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_stats_start_at_zero() {
        let stats = LookupStats::new();
        for outcome in LookupOutcome::iter() {
            assert_eq!(stats.get_count(outcome), 0);
        }
    }

    #[test]
    fn lookup_stats_increment() {
        let stats = LookupStats::new();
        stats.increment(LookupOutcome::Timeout);
        stats.increment(LookupOutcome::Timeout);
        stats.increment(LookupOutcome::NotFound);
        assert_eq!(stats.get_count(LookupOutcome::Timeout), 2);
        assert_eq!(stats.get_count(LookupOutcome::NotFound), 1);
        assert_eq!(stats.get_count(LookupOutcome::Unclassified), 0);
    }
}
