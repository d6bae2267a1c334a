use serde::Serialize;

/// Outcome of one resolution attempt, as handed to collaborators.
///
/// `from_cache` is set by the caller that interposed a cache, never by the
/// resolver itself.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionResult {
    /// Hostname that was queried.
    pub hostname: String,
    /// DNS record type that was queried.
    pub record_type: String,
    /// Resolved values, in authority order. Possibly empty.
    pub addresses: Vec<String>,
    /// Whether the answer came from a cache rather than a live query.
    pub from_cache: bool,
}

/// One positive enumeration hit: a candidate that resolved to at least one
/// address. Candidates that did not resolve are dropped, not reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumerationResult {
    /// Candidate hostname, TLD suffix included.
    pub hostname: String,
    /// Resolved addresses.
    pub addresses: Vec<String>,
}

/// Single-authority resolution with protocol metadata.
///
/// On failure `error` carries the reason as a string and `addresses` is
/// empty; this shape never signals failure through an error type.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveMetadata {
    /// Hostname that was queried.
    pub hostname: String,
    /// DNS record type that was queried.
    pub record_type: String,
    /// Resolved values. Empty on failure.
    pub addresses: Vec<String>,
    /// Smallest TTL across the answer records, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// CNAME target when the answer chain includes one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_name: Option<String>,
    /// Failure reason, when the query did not produce an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of cache occupancy, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently stored, valid or not.
    pub total_entries: usize,
    /// Entries still within their TTL at the time of the call.
    pub valid_entries: usize,
    /// Entries past their TTL but not yet lazily removed.
    pub expired_entries: usize,
    /// Configured capacity.
    pub max_size: usize,
}
