//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ipv9_recon` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use ipv9_recon::initialization::init_logger_with;
use ipv9_recon::{
    is_ipv9_domain, Command, DnsCache, DnsEnumerator, EnumerationResult, Ipv9Resolver, Opt,
    ResolutionResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();

    let log_level = opt.log_level.clone();
    let log_format = opt.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let settings = opt.settings().context("Failed to load configuration")?;
    let resolver = Arc::new(Ipv9Resolver::new(&settings));
    let cache = DnsCache::with_settings(&settings);

    match opt.command {
        Command::Resolve {
            hostname,
            record_type,
            metadata,
        } => {
            if !is_ipv9_domain(&hostname) {
                warn!("{hostname} does not look like an IPv9 name; resolving anyway");
            }

            if metadata {
                let result = resolver.resolve_with_metadata(&hostname, &record_type).await;
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                // The cache sits between the caller and the resolver; the
                // resolver itself never consults it.
                let (addresses, from_cache) = match cache.get(&hostname, &record_type) {
                    Some(addresses) => (addresses, true),
                    None => {
                        let addresses = resolver.resolve(&hostname, &record_type).await;
                        if !addresses.is_empty() {
                            cache.set(&hostname, addresses.clone(), &record_type, None);
                        }
                        (addresses, false)
                    }
                };
                let result = ResolutionResult {
                    hostname,
                    record_type,
                    addresses,
                    from_cache,
                };
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }

        Command::Reverse { address } => match resolver.reverse_lookup(&address).await {
            Some(hostname) => println!("{address} -> {hostname}"),
            None => println!("{address} has no PTR record"),
        },

        Command::Pattern {
            pattern,
            tld,
            max_combinations,
        } => {
            let enumerator = DnsEnumerator::new(Arc::clone(&resolver), &settings)
                .context("Failed to build enumerator")?;
            let results = enumerator
                .brute_force_pattern(&pattern, &tld, max_combinations)
                .await;
            print_enumeration(&results)?;
        }

        Command::Range {
            prefix,
            start,
            end,
            tld,
        } => {
            let enumerator = DnsEnumerator::new(Arc::clone(&resolver), &settings)
                .context("Failed to build enumerator")?;
            let results = enumerator
                .enumerate_numeric_range(&prefix, start, end, &tld)
                .await;
            print_enumeration(&results)?;
        }

        Command::Phones {
            area_code,
            exchange,
            start,
            end,
            tld,
        } => {
            let enumerator = DnsEnumerator::new(Arc::clone(&resolver), &settings)
                .context("Failed to build enumerator")?;
            let results = enumerator
                .enumerate_phone_numbers(&area_code, &exchange, start, end, &tld)
                .await;
            print_enumeration(&results)?;
        }

        Command::Wordlist {
            file,
            tld,
            sequential,
        } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read wordlist {}", file.display()))?;
            let words: Vec<String> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect();

            let enumerator = DnsEnumerator::new(Arc::clone(&resolver), &settings)
                .context("Failed to build enumerator")?;
            let results = enumerator.enumerate_wordlist(&words, &tld, !sequential).await;
            print_enumeration(&results)?;
        }

        Command::ZoneTransfer { domain } => {
            let enumerator = DnsEnumerator::new(Arc::clone(&resolver), &settings)
                .context("Failed to build enumerator")?;
            match enumerator.zone_transfer_attempt(&domain).await {
                Some(records) => {
                    println!("Zone transfer for {domain} returned {} records:", records.len());
                    for record in records {
                        println!("{record}");
                    }
                }
                None => println!("Zone transfer not allowed for {domain}"),
            }
        }
    }

    Ok(())
}

fn print_enumeration(results: &[EnumerationResult]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    eprintln!("Found {} host{}", results.len(), if results.len() == 1 { "" } else { "s" });
    Ok(())
}
