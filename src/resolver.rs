//! Dual-authority resolver for IPv9 decimal-network hostnames.
//!
//! Every resolution queries the primary authority; when cross-verification is
//! enabled the secondary authority is consulted as well and disagreements are
//! logged. The secondary never overrides the primary: a mismatch is an
//! advisory signal, not a failure. All per-hostname failures are absorbed
//! here and surface as an empty address list plus a log line.

use std::collections::HashSet;
use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use log::{debug, error, info, warn};

use crate::config::{Settings, CHN_SUFFIX, DNS_PORT, DNS_QUERY_ATTEMPTS};
use crate::error_handling::{LookupOutcome, LookupStats};
use crate::models::ResolveMetadata;

/// The seam between the enumerator and the resolver.
///
/// Implemented by [`Ipv9Resolver`] for live queries and by stubs in tests.
/// Failures are absorbed by implementations; an empty list means "no address
/// available" whether the name does not exist or the lookup failed.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolves a hostname, returning an empty list on any failure.
    async fn resolve_host(&self, hostname: &str, record_type: &str) -> Vec<String>;
}

/// Returns true for hostnames that belong to the decimal network: either the
/// reserved `.chn` top-level label, or an all-numeric leading label.
pub fn is_ipv9_domain(hostname: &str) -> bool {
    let hostname = hostname.trim().to_ascii_lowercase();

    if hostname.ends_with(CHN_SUFFIX) {
        return true;
    }

    let label = hostname.split('.').next().unwrap_or("");
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// DNS resolver bound to the two configured IPv9 authorities.
///
/// Both authority clients are read-only after construction, so the resolver
/// is safely shared across enumeration workers via `Arc`.
pub struct Ipv9Resolver {
    primary: TokioAsyncResolver,
    secondary: TokioAsyncResolver,
    primary_addr: IpAddr,
    secondary_addr: IpAddr,
    verify_dns: bool,
    stats: LookupStats,
}

impl Ipv9Resolver {
    /// Builds primary and secondary authority clients from the settings.
    pub fn new(settings: &Settings) -> Self {
        let timeout = settings.scanner.query_timeout();
        info!(
            "IPv9 resolver initialized with DNS servers: {}, {} (verification {})",
            settings.dns.primary,
            settings.dns.secondary,
            if settings.security.verify_dns {
                "enabled"
            } else {
                "disabled"
            }
        );
        Ipv9Resolver {
            primary: build_authority_client(settings.dns.primary, timeout),
            secondary: build_authority_client(settings.dns.secondary, timeout),
            primary_addr: settings.dns.primary,
            secondary_addr: settings.dns.secondary,
            verify_dns: settings.security.verify_dns,
            stats: LookupStats::new(),
        }
    }

    /// The configured authority addresses, primary first.
    pub fn authorities(&self) -> [IpAddr; 2] {
        [self.primary_addr, self.secondary_addr]
    }

    /// Lookup outcome counters accumulated since construction.
    pub fn stats(&self) -> &LookupStats {
        &self.stats
    }

    /// Resolves a hostname to record-value strings.
    ///
    /// Queries the primary authority; failures are logged and yield an empty
    /// list. With verification enabled the secondary authority is also
    /// queried, its failure treated as "no secondary data", and a differing
    /// answer set logged as a discrepancy. The primary answer is returned in
    /// every case.
    pub async fn resolve(&self, hostname: &str, record_type: &str) -> Vec<String> {
        let rtype = match parse_record_type(record_type) {
            Ok(rtype) => rtype,
            Err(e) => {
                error!("Unsupported record type {record_type:?} for {hostname}: {e}");
                self.stats.increment(LookupOutcome::Unclassified);
                return Vec::new();
            }
        };

        debug!("Querying primary authority {} for {hostname}", self.primary_addr);
        let primary_results = match query_authority(&self.primary, hostname, rtype).await {
            Ok(results) => results,
            Err(e) => {
                self.log_failure(hostname, &e);
                return Vec::new();
            }
        };

        if self.verify_dns {
            match query_authority(&self.secondary, hostname, rtype).await {
                Ok(secondary_results) => {
                    self.cross_verify(hostname, &primary_results, &secondary_results);
                }
                Err(e) => {
                    debug!("No secondary data for {hostname}: {e}");
                }
            }
        }

        info!("Resolved {hostname} to {primary_results:?}");
        primary_results
    }

    /// Compares the two authority answers as unordered sets and logs a
    /// discrepancy when they differ. The comparison never changes what the
    /// caller receives; the mismatch is advisory only.
    fn cross_verify(&self, hostname: &str, primary: &[String], secondary: &[String]) {
        if answers_match(primary, secondary) {
            debug!("DNS verification passed for {hostname}");
            return;
        }
        warn!("DNS verification mismatch for {hostname}:");
        warn!("  primary:   {primary:?}");
        warn!("  secondary: {secondary:?}");
        warn!("  using primary DNS results");
        self.stats.increment(LookupOutcome::VerificationMismatch);
    }

    fn log_failure(&self, hostname: &str, err: &ResolveError) {
        let outcome = classify_failure(err);
        match outcome {
            LookupOutcome::NotFound => warn!("Domain not found: {hostname}"),
            LookupOutcome::Timeout => error!("DNS timeout for {hostname}"),
            _ => error!("DNS resolution error for {hostname}: {err}"),
        }
        self.stats.increment(outcome);
    }

    /// Resolves against the primary authority only and returns protocol
    /// metadata. Failures come back as the `error` field, never as an `Err`.
    pub async fn resolve_with_metadata(
        &self,
        hostname: &str,
        record_type: &str,
    ) -> ResolveMetadata {
        let failure = |reason: String| ResolveMetadata {
            hostname: hostname.to_string(),
            record_type: record_type.to_string(),
            addresses: Vec::new(),
            ttl: None,
            canonical_name: None,
            error: Some(reason),
        };

        let rtype = match parse_record_type(record_type) {
            Ok(rtype) => rtype,
            Err(e) => return failure(format!("unsupported record type: {e}")),
        };

        match self.primary.lookup(hostname, rtype).await {
            Ok(lookup) => {
                let addresses = lookup.iter().map(|rdata| rdata.to_string()).collect();
                let ttl = lookup.record_iter().map(|record| record.ttl()).min();
                let canonical_name = lookup.record_iter().find_map(|record| {
                    match record.data() {
                        Some(RData::CNAME(cname)) => Some(cname.to_utf8()),
                        _ => None,
                    }
                });
                ResolveMetadata {
                    hostname: hostname.to_string(),
                    record_type: record_type.to_string(),
                    addresses,
                    ttl,
                    canonical_name,
                    error: None,
                }
            }
            Err(e) => {
                error!("Failed to resolve {hostname} with metadata: {e}");
                failure(e.to_string())
            }
        }
    }

    /// Best-effort reverse (PTR) lookup. Failures yield `None`.
    pub async fn reverse_lookup(&self, address: &str) -> Option<String> {
        let ip: IpAddr = match address.parse() {
            Ok(ip) => ip,
            Err(e) => {
                debug!("Reverse lookup skipped, {address} is not an IP address: {e}");
                return None;
            }
        };

        match self.primary.reverse_lookup(ip).await {
            Ok(response) => {
                let hostname = response.iter().next().map(|name| name.to_utf8());
                if let Some(hostname) = &hostname {
                    info!("Reverse lookup: {address} -> {hostname}");
                }
                hostname
            }
            Err(e) => {
                debug!("Reverse lookup failed for {address}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl HostResolver for Ipv9Resolver {
    async fn resolve_host(&self, hostname: &str, record_type: &str) -> Vec<String> {
        self.resolve(hostname, record_type).await
    }
}

fn build_authority_client(addr: IpAddr, timeout: Duration) -> TokioAsyncResolver {
    let config = ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(&[addr], DNS_PORT, true),
    );

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_QUERY_ATTEMPTS;
    // Never append search domains; queried names are already fully qualified.
    opts.ndots = 0;

    TokioAsyncResolver::tokio(config, opts)
}

async fn query_authority(
    resolver: &TokioAsyncResolver,
    hostname: &str,
    rtype: RecordType,
) -> Result<Vec<String>, ResolveError> {
    let lookup = resolver.lookup(hostname, rtype).await?;
    Ok(lookup.iter().map(|rdata| rdata.to_string()).collect())
}

fn parse_record_type(record_type: &str) -> Result<RecordType, hickory_resolver::proto::error::ProtoError> {
    RecordType::from_str(record_type.trim().to_ascii_uppercase().as_str())
}

/// Unordered comparison of two authority answer sets.
fn answers_match(primary: &[String], secondary: &[String]) -> bool {
    let a: HashSet<&str> = primary.iter().map(String::as_str).collect();
    let b: HashSet<&str> = secondary.iter().map(String::as_str).collect();
    a == b
}

fn classify_failure(err: &ResolveError) -> LookupOutcome {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupOutcome::NotFound,
        ResolveErrorKind::Timeout => LookupOutcome::Timeout,
        _ => LookupOutcome::Unclassified,
    }
}
