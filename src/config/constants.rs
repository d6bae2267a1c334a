use std::net::{IpAddr, Ipv4Addr};

// IPv9 DNS servers (official Chinese IPv9 DNS infrastructure, used as defaults)
/// Default primary authority.
pub const IPV9_DNS_PRIMARY: IpAddr = IpAddr::V4(Ipv4Addr::new(202, 170, 218, 93));
/// Default secondary authority, consulted for cross-verification.
pub const IPV9_DNS_SECONDARY: IpAddr = IpAddr::V4(Ipv4Addr::new(61, 244, 5, 162));

/// Standard DNS port used for both authorities.
pub const DNS_PORT: u16 = 53;

// Cache defaults
/// Maximum number of cached resolution results before LRU eviction starts.
pub const DEFAULT_CACHE_SIZE: usize = 1000;
/// Lifetime of a cached entry when the query supplied no TTL.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

// Resolution defaults
/// Per-query timeout in seconds. Each query is attempted twice, so the
/// lifetime of a single resolution is roughly double this value.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
/// Number of attempts per authority before a query is reported as failed.
pub const DNS_QUERY_ATTEMPTS: usize = 2;

// Enumeration defaults
/// Maximum number of concurrently outstanding resolutions during enumeration.
pub const DEFAULT_MAX_THREADS: usize = 10;
/// Wordlists at or below this size are resolved sequentially even when
/// parallel resolution was requested.
pub const PARALLEL_THRESHOLD: usize = 10;

/// Reserved top-level label of the decimal network.
pub const CHN_SUFFIX: &str = ".chn";
/// Default TLD appended to every generated enumeration candidate.
pub const DEFAULT_TLD: &str = "chn";
/// Country code prefixed to phone-number-derived hostnames.
pub const COUNTRY_CODE: &str = "86";

/// Pattern characters that stand for "any decimal digit".
pub const PATTERN_WILDCARDS: [char; 2] = ['N', 'X'];
