use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_CACHE_SIZE, DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_THREADS, DEFAULT_QUERY_TIMEOUT_SECS,
    DEFAULT_TLD, IPV9_DNS_PRIMARY, IPV9_DNS_SECONDARY,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// DNS authority and cache configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DnsSettings {
    /// Primary authority address (IPv4/IPv6 literal).
    pub primary: IpAddr,
    /// Secondary authority address, consulted for cross-verification.
    pub secondary: IpAddr,
    /// Maximum number of cached resolution results.
    pub cache_size: usize,
    /// Default cache TTL in seconds.
    pub ttl: u64,
}

impl Default for DnsSettings {
    fn default() -> Self {
        DnsSettings {
            primary: IPV9_DNS_PRIMARY,
            secondary: IPV9_DNS_SECONDARY,
            cache_size: DEFAULT_CACHE_SIZE,
            ttl: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl DnsSettings {
    /// Default entry lifetime as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

/// Scanner-side limits shared by the resolver and enumerator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerSettings {
    /// Per-query timeout in seconds.
    pub timeout: u64,
    /// Enumeration concurrency bound (worker count).
    pub max_threads: usize,
}

impl Default for ScannerSettings {
    fn default() -> Self {
        ScannerSettings {
            timeout: DEFAULT_QUERY_TIMEOUT_SECS,
            max_threads: DEFAULT_MAX_THREADS,
        }
    }
}

impl ScannerSettings {
    /// Per-query timeout as a `Duration`.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Security-related toggles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Whether every resolution is cross-checked against the secondary authority.
    pub verify_dns: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        SecuritySettings { verify_dns: true }
    }
}

/// Validated application configuration.
///
/// Built once at startup, either from defaults, from a YAML file, or from
/// CLI overrides (see [`Opt::settings`]). All consumers read named fields;
/// nothing probes a loosely-typed mapping at use sites.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// DNS authority and cache configuration.
    pub dns: DnsSettings,
    /// Scanner-side limits.
    pub scanner: ScannerSettings,
    /// Security-related toggles.
    pub security: SecuritySettings,
}

impl Settings {
    /// Loads settings from a YAML file, filling unspecified fields with
    /// defaults, and validates the result.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks that every field is usable. Run once at startup so the rest of
    /// the code can rely on the values without re-checking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dns.cache_size == 0 {
            return Err(ConfigError::Invalid(
                "dns.cache_size must be greater than zero".into(),
            ));
        }
        if self.scanner.timeout == 0 {
            return Err(ConfigError::Invalid(
                "scanner.timeout must be greater than zero".into(),
            ));
        }
        if self.scanner.max_threads == 0 {
            return Err(ConfigError::Invalid(
                "scanner.max_threads must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Command-line options.
///
/// Global flags override the corresponding values from the config file
/// (or the built-in defaults when no file is given).
#[derive(Debug, Parser)]
#[command(
    name = "ipv9_recon",
    about = "Resolves and enumerates IPv9 decimal-network (.chn) hostnames."
)]
pub struct Opt {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML configuration file
    #[arg(long, value_parser)]
    pub config: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Primary IPv9 DNS server address
    #[arg(long)]
    pub primary_dns: Option<IpAddr>,

    /// Secondary IPv9 DNS server address
    #[arg(long)]
    pub secondary_dns: Option<IpAddr>,

    /// Per-query timeout in seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Maximum concurrent resolutions during enumeration
    #[arg(long)]
    pub max_threads: Option<usize>,

    /// Disable cross-verification against the secondary DNS server
    #[arg(long)]
    pub no_verify_dns: bool,
}

impl Opt {
    /// Builds the validated [`Settings`] for this invocation: config file
    /// (or defaults) with CLI flags applied on top.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_yaml_file(path)?,
            None => Settings::default(),
        };

        if let Some(ip) = self.primary_dns {
            settings.dns.primary = ip;
        }
        if let Some(ip) = self.secondary_dns {
            settings.dns.secondary = ip;
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.scanner.timeout = timeout;
        }
        if let Some(max_threads) = self.max_threads {
            settings.scanner.max_threads = max_threads;
        }
        if self.no_verify_dns {
            settings.security.verify_dns = false;
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a single hostname
    Resolve {
        /// Hostname to resolve
        hostname: String,
        /// DNS record type (A, AAAA, CNAME, ...)
        #[arg(long, default_value = "A")]
        record_type: String,
        /// Query the primary authority only and print protocol metadata
        #[arg(long)]
        metadata: bool,
    },
    /// Reverse-resolve an IP address to a hostname
    Reverse {
        /// IP address to look up
        address: String,
    },
    /// Brute force a wildcard pattern (N or X stand for any digit)
    Pattern {
        /// Pattern, e.g. "861381234NNNN"
        pattern: String,
        /// TLD appended to every candidate
        #[arg(long, default_value = DEFAULT_TLD)]
        tld: String,
        /// Maximum combinations to try
        #[arg(long, default_value_t = 1000)]
        max_combinations: usize,
    },
    /// Enumerate a numeric suffix range sequentially
    Range {
        /// Numeric prefix, e.g. "861381234"
        prefix: String,
        /// First suffix value
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Last suffix value (inclusive)
        #[arg(long, default_value_t = 9999)]
        end: u32,
        /// TLD appended to every candidate
        #[arg(long, default_value = DEFAULT_TLD)]
        tld: String,
    },
    /// Enumerate phone-number hostnames (86 + area code + exchange + NNNN)
    Phones {
        /// Area code or mobile prefix, e.g. "138"
        area_code: String,
        /// Exchange digits, e.g. "1234"
        exchange: String,
        /// First suffix value
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Last suffix value (inclusive)
        #[arg(long, default_value_t = 9999)]
        end: u32,
        /// TLD appended to every candidate
        #[arg(long, default_value = DEFAULT_TLD)]
        tld: String,
    },
    /// Resolve every candidate from a wordlist file (one per line)
    Wordlist {
        /// File with one candidate label per line
        file: PathBuf,
        /// TLD appended to every candidate
        #[arg(long, default_value = DEFAULT_TLD)]
        tld: String,
        /// Resolve candidates one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Attempt a full-zone transfer (AXFR) against each authority
    ZoneTransfer {
        /// Zone to transfer
        #[arg(default_value = DEFAULT_TLD)]
        domain: String,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use clap::Parser;

    #[test]
    fn default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.dns.cache_size, 1000);
        assert_eq!(settings.dns.ttl, 300);
        assert_eq!(settings.scanner.timeout, 5);
        assert_eq!(settings.scanner.max_threads, 10);
        assert!(settings.security.verify_dns);
    }

    #[test]
    fn validate_rejects_zero_cache_size() {
        let mut settings = Settings::default();
        settings.dns.cache_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.scanner.timeout = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_threads() {
        let mut settings = Settings::default();
        settings.scanner.max_threads = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_yaml_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "dns:\n  primary: 10.0.0.1\nscanner:\n  timeout: 2").expect("write yaml");

        let settings = Settings::from_yaml_file(file.path()).expect("parse settings");
        assert_eq!(settings.dns.primary.to_string(), "10.0.0.1");
        assert_eq!(settings.dns.secondary, IPV9_DNS_SECONDARY);
        assert_eq!(settings.scanner.timeout, 2);
        assert_eq!(settings.scanner.max_threads, 10);
    }

    #[test]
    fn invalid_yaml_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "dns: [not, a, mapping").expect("write yaml");

        let err = Settings::from_yaml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_yaml_file_is_an_io_error() {
        let err = Settings::from_yaml_file(Path::new("/nonexistent/ipv9.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn cli_flags_override_defaults() {
        let opt = Opt::parse_from([
            "ipv9_recon",
            "--primary-dns",
            "192.0.2.1",
            "--timeout-seconds",
            "3",
            "--no-verify-dns",
            "resolve",
            "5000.chn",
        ]);
        let settings = opt.settings().expect("settings");
        assert_eq!(settings.dns.primary.to_string(), "192.0.2.1");
        assert_eq!(settings.scanner.timeout, 3);
        assert!(!settings.security.verify_dns);
    }

    #[test]
    fn pattern_subcommand_parses() {
        let opt = Opt::parse_from([
            "ipv9_recon",
            "pattern",
            "861381234NNNN",
            "--max-combinations",
            "500",
        ]);
        match opt.command {
            Command::Pattern {
                pattern,
                tld,
                max_combinations,
            } => {
                assert_eq!(pattern, "861381234NNNN");
                assert_eq!(tld, "chn");
                assert_eq!(max_combinations, 500);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
