//! Candidate generation and concurrent enumeration of IPv9 hostnames.
//!
//! The enumerator turns compact specifications (wildcard patterns, numeric
//! ranges, phone-number prefixes, wordlists) into candidate hostnames and
//! resolves them through a bounded worker pool, keeping only the positives.
//! Individual candidate failures are absorbed by the resolver; enumeration
//! itself fails only when the pool cannot be constructed.

pub mod pattern;
mod pool;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{
    NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::config::{Settings, COUNTRY_CODE, DNS_PORT, PARALLEL_THRESHOLD};
use crate::error_handling::EnumerationError;
use crate::models::EnumerationResult;
use crate::resolver::{HostResolver, Ipv9Resolver};
use pool::WorkerPool;

/// Chinese mobile-phone prefixes commonly seen in decimal-network hostnames.
pub const MOBILE_PREFIXES: &[&str] = &[
    "130", "131", "132", "133", "134", "135", "136", "137", "138", "139", // China Telecom
    "145", "147", "148", "149", //
    "150", "151", "152", "153", "155", "156", "157", "158", "159", // China Mobile
    "162", "165", "166", "167", //
    "170", "171", "172", "173", "174", "175", "176", "177", "178", //
    "180", "181", "182", "183", "184", "185", "186", "187", "188", "189", // China Unicom
    "190", "191", "192", "193", "195", "196", "197", "198", "199",
];

/// DNS enumerator for the IPv9 decimal network.
///
/// Generic over the resolver seam so enumeration logic is testable against a
/// stub; production code uses [`Ipv9Resolver`].
pub struct DnsEnumerator<R: HostResolver + 'static> {
    resolver: Arc<R>,
    pool: WorkerPool,
    transfer_timeout: Duration,
}

impl<R: HostResolver + 'static> DnsEnumerator<R> {
    /// Builds the enumerator and its worker pool (`scanner.max_threads`
    /// workers). Must be called within a tokio runtime.
    pub fn new(resolver: Arc<R>, settings: &Settings) -> Result<Self, EnumerationError> {
        let pool = WorkerPool::new(Arc::clone(&resolver), settings.scanner.max_threads)?;
        Ok(DnsEnumerator {
            resolver,
            pool,
            transfer_timeout: settings.scanner.query_timeout() * 2,
        })
    }

    /// Brute forces a wildcard pattern: generates up to `max_combinations`
    /// candidates (see [`pattern::generate_combinations`]), suffixes each
    /// with `.` + `tld`, and resolves them in parallel. Returns positives in
    /// completion order.
    pub async fn brute_force_pattern(
        &self,
        pattern: &str,
        tld: &str,
        max_combinations: usize,
    ) -> Vec<EnumerationResult> {
        info!("Brute forcing pattern: {pattern}");

        let combinations = pattern::generate_combinations(pattern, max_combinations);
        info!("Generated {} combinations", combinations.len());

        self.enumerate_wordlist(&combinations, tld, true).await
    }

    /// Resolves `prefix + number + "." + tld` for every number in
    /// `[start, end]`, sequentially. Positives keep input order. Meant for
    /// narrow, already-bounded ranges where parallelism buys nothing.
    pub async fn enumerate_numeric_range(
        &self,
        prefix: &str,
        start: u32,
        end: u32,
        tld: &str,
    ) -> Vec<EnumerationResult> {
        info!("Enumerating {prefix}[{start}-{end}].{tld}");

        let mut results = Vec::new();
        for num in start..=end {
            let hostname = format!("{prefix}{num}.{tld}");
            let addresses = self.resolver.resolve_host(&hostname, "A").await;
            if !addresses.is_empty() {
                info!("Found: {hostname} -> {addresses:?}");
                results.push(EnumerationResult { hostname, addresses });
            }
        }

        info!("Enumeration complete: found {} hosts", results.len());
        results
    }

    /// Enumerates phone-number hostnames. Chinese numbers are country code
    /// `86` + area/prefix + exchange + a four-digit suffix; the fixed part
    /// becomes the prefix of a numeric-range enumeration.
    pub async fn enumerate_phone_numbers(
        &self,
        area_code: &str,
        exchange: &str,
        start: u32,
        end: u32,
        tld: &str,
    ) -> Vec<EnumerationResult> {
        let prefix = format!("{COUNTRY_CODE}{area_code}{exchange}");
        info!("Enumerating phone numbers: +{COUNTRY_CODE}-{area_code}-{exchange}-[{start:04}-{end:04}]");

        self.enumerate_numeric_range(&prefix, start, end, tld).await
    }

    /// Sweeps the common mobile prefixes, trying `count` numbers per prefix.
    pub async fn enumerate_common_mobile_prefixes(
        &self,
        exchange: &str,
        count: usize,
        tld: &str,
    ) -> Vec<EnumerationResult> {
        info!("Enumerating {} mobile prefixes", MOBILE_PREFIXES.len());

        let end = count.saturating_sub(1).min(9999) as u32;
        let mut all_results = Vec::new();
        for prefix in MOBILE_PREFIXES {
            debug!("Trying prefix {prefix}");
            let results = self.enumerate_phone_numbers(prefix, exchange, 0, end, tld).await;
            all_results.extend(results);
        }

        info!("Mobile enumeration complete: found {} hosts", all_results.len());
        all_results
    }

    /// Resolves an explicit candidate list. Parallel resolution goes through
    /// the worker pool and returns positives in completion order; sequential
    /// resolution preserves input order. Small lists are always resolved
    /// sequentially.
    pub async fn enumerate_wordlist(
        &self,
        words: &[String],
        tld: &str,
        parallel: bool,
    ) -> Vec<EnumerationResult> {
        info!("Enumerating {} candidates", words.len());

        if parallel && words.len() > PARALLEL_THRESHOLD {
            self.enumerate_parallel(words, tld).await
        } else {
            self.enumerate_sequential(words, tld).await
        }
    }

    async fn enumerate_sequential(&self, words: &[String], tld: &str) -> Vec<EnumerationResult> {
        let mut results = Vec::new();
        for word in words {
            let hostname = format!("{word}.{tld}");
            let addresses = self.resolver.resolve_host(&hostname, "A").await;
            if !addresses.is_empty() {
                info!("Found: {hostname} -> {addresses:?}");
                results.push(EnumerationResult { hostname, addresses });
            }
        }
        results
    }

    async fn enumerate_parallel(&self, words: &[String], tld: &str) -> Vec<EnumerationResult> {
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();

        for word in words {
            self.pool
                .submit(format!("{word}.{tld}"), reply_tx.clone())
                .await;
        }
        // Workers hold only their in-flight clones; once the last one is
        // dropped the reply channel closes and collection ends.
        drop(reply_tx);

        let mut results = Vec::new();
        while let Some(found) = reply_rx.recv().await {
            info!("Found: {} -> {:?}", found.hostname, found.addresses);
            results.push(found);
        }
        results
    }
}

impl DnsEnumerator<Ipv9Resolver> {
    /// Attempts a full-zone transfer (AXFR) against each configured
    /// authority in turn, over TCP. Returns the record names from the first
    /// authority that permits the transfer, or `None` when all refuse.
    pub async fn zone_transfer_attempt(&self, domain: &str) -> Option<Vec<String>> {
        info!("Attempting zone transfer for {domain}");

        for server in self.resolver.authorities() {
            let transfer = build_transfer_client(server, self.transfer_timeout);
            match transfer.lookup(domain, RecordType::AXFR).await {
                Ok(lookup) => {
                    let records: Vec<String> = lookup
                        .record_iter()
                        .map(|record| record.name().to_utf8())
                        .collect();
                    if !records.is_empty() {
                        info!(
                            "Zone transfer successful from {server}: {} records",
                            records.len()
                        );
                        return Some(records);
                    }
                }
                Err(e) => {
                    debug!("Zone transfer failed from {server}: {e}");
                }
            }
        }

        warn!("Zone transfer not allowed");
        None
    }
}

// AXFR needs TCP; the regular authority clients prefer UDP.
fn build_transfer_client(server: std::net::IpAddr, timeout: Duration) -> TokioAsyncResolver {
    let ns = NameServerConfig::new(SocketAddr::new(server, DNS_PORT), Protocol::Tcp);
    let config = ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::from(vec![ns]));

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.ndots = 0;

    TokioAsyncResolver::tokio(config, opts)
}
