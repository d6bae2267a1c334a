//! ipv9_recon library: resolution, caching, and enumeration for China's IPv9
//! decimal network.
//!
//! The decimal network is an overlay naming scheme whose hostnames carry the
//! reserved `.chn` top-level label or an all-numeric leading label (typically
//! a phone number). This library resolves such names through two
//! independently configured authorities with optional cross-verification,
//! caches results under an LRU + TTL policy, and discovers unknown hostnames
//! by generating and resolving large candidate sets concurrently.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ipv9_recon::{DnsEnumerator, Ipv9Resolver, Settings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::default();
//! let resolver = Arc::new(Ipv9Resolver::new(&settings));
//!
//! let addresses = resolver.resolve("5000.chn", "A").await;
//! println!("5000.chn -> {addresses:?}");
//!
//! let enumerator = DnsEnumerator::new(resolver, &settings)?;
//! let found = enumerator.brute_force_pattern("861381234NNNN", "chn", 10_000).await;
//! for hit in found {
//!     println!("{} -> {:?}", hit.hostname, hit.addresses);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod enumerator;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod resolver;

// Re-export public API
pub use cache::DnsCache;
pub use config::{Command, LogFormat, LogLevel, Opt, Settings};
pub use enumerator::{DnsEnumerator, MOBILE_PREFIXES};
pub use models::{CacheStats, EnumerationResult, ResolutionResult, ResolveMetadata};
pub use resolver::{is_ipv9_domain, HostResolver, Ipv9Resolver};
