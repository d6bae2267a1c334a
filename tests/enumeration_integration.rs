// End-to-end enumeration tests against a stub resolver.
//
// The stub implements the resolver seam directly, so these tests exercise
// candidate generation, the worker pool, and result aggregation without any
// network traffic.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ipv9_recon::{DnsEnumerator, EnumerationResult, HostResolver, Settings, MOBILE_PREFIXES};

struct StubResolver {
    answers: HashMap<String, Vec<String>>,
    queried: Mutex<Vec<String>>,
}

impl StubResolver {
    fn with_answers(answers: &[(&str, &[&str])]) -> Self {
        StubResolver {
            answers: answers
                .iter()
                .map(|(host, addrs)| {
                    (
                        host.to_string(),
                        addrs.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
            queried: Mutex::new(Vec::new()),
        }
    }

    fn from_map(answers: HashMap<String, Vec<String>>) -> Self {
        StubResolver {
            answers,
            queried: Mutex::new(Vec::new()),
        }
    }

    fn queried(&self) -> Vec<String> {
        self.queried.lock().expect("queried lock").clone()
    }
}

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve_host(&self, hostname: &str, _record_type: &str) -> Vec<String> {
        self.queried
            .lock()
            .expect("queried lock")
            .push(hostname.to_string());
        self.answers.get(hostname).cloned().unwrap_or_default()
    }
}

fn settings_with_workers(max_threads: usize) -> Settings {
    let mut settings = Settings::default();
    settings.scanner.max_threads = max_threads;
    settings
}

#[tokio::test]
async fn pattern_enumeration_returns_exactly_the_answering_hosts() {
    // the full 10^4 combination space fits the budget, so every candidate is
    // tried regardless of worker-pool size
    for workers in [1, 10] {
        let stub = Arc::new(StubResolver::with_answers(&[
            ("8613812340007.chn", &["192.0.2.7"]),
            ("8613812349999.chn", &["192.0.2.99"]),
        ]));
        let enumerator =
            DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(workers)).expect("pool");

        let mut results = enumerator
            .brute_force_pattern("861381234NNNN", "chn", 10_000)
            .await;
        results.sort_by(|a, b| a.hostname.cmp(&b.hostname));

        assert_eq!(
            results,
            vec![
                EnumerationResult {
                    hostname: "8613812340007.chn".into(),
                    addresses: vec!["192.0.2.7".into()],
                },
                EnumerationResult {
                    hostname: "8613812349999.chn".into(),
                    addresses: vec!["192.0.2.99".into()],
                },
            ],
            "workers={workers}"
        );
        assert_eq!(stub.queried().len(), 10_000, "workers={workers}");
    }
}

#[tokio::test]
async fn parallel_wordlist_collects_every_positive() {
    let words: Vec<String> = (0..50).map(|i| format!("77{i:02}")).collect();
    // every even candidate answers
    let answers: Vec<(String, Vec<String>)> = (0..50)
        .step_by(2)
        .map(|i| (format!("77{i:02}.chn"), vec![format!("192.0.2.{i}")]))
        .collect();
    let stub = Arc::new(StubResolver::from_map(answers.into_iter().collect()));

    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");
    let results = enumerator.enumerate_wordlist(&words, "chn", true).await;

    let found: HashSet<String> = results.into_iter().map(|r| r.hostname).collect();
    let expected: HashSet<String> = (0..50).step_by(2).map(|i| format!("77{i:02}.chn")).collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn small_wordlists_resolve_sequentially_in_input_order() {
    let stub = Arc::new(StubResolver::with_answers(&[
        ("c.chn", &["192.0.2.3"]),
        ("a.chn", &["192.0.2.1"]),
    ]));
    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");

    let words = vec!["c".to_string(), "b".to_string(), "a".to_string()];
    // parallel requested, but the list is at the sequential threshold
    let results = enumerator.enumerate_wordlist(&words, "chn", true).await;

    let hostnames: Vec<&str> = results.iter().map(|r| r.hostname.as_str()).collect();
    assert_eq!(hostnames, vec!["c.chn", "a.chn"]);
    assert_eq!(stub.queried(), vec!["c.chn", "b.chn", "a.chn"]);
}

#[tokio::test]
async fn numeric_range_is_sequential_and_ordered() {
    let stub = Arc::new(StubResolver::with_answers(&[
        ("774.chn", &["192.0.2.4"]),
        ("772.chn", &["192.0.2.2"]),
    ]));
    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");

    let results = enumerator.enumerate_numeric_range("77", 0, 5, "chn").await;

    let hostnames: Vec<&str> = results.iter().map(|r| r.hostname.as_str()).collect();
    assert_eq!(hostnames, vec!["772.chn", "774.chn"]);
    assert_eq!(
        stub.queried(),
        vec![
            "770.chn", "771.chn", "772.chn", "773.chn", "774.chn", "775.chn"
        ]
    );
}

#[tokio::test]
async fn phone_numbers_compose_the_country_code_prefix() {
    let stub = Arc::new(StubResolver::with_answers(&[(
        "8613812342.chn",
        &["192.0.2.42"],
    )]));
    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");

    let results = enumerator
        .enumerate_phone_numbers("138", "1234", 0, 3, "chn")
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].hostname, "8613812342.chn");
    assert_eq!(
        stub.queried(),
        vec![
            "8613812340.chn",
            "8613812341.chn",
            "8613812342.chn",
            "8613812343.chn"
        ]
    );
}

#[tokio::test]
async fn mobile_prefix_sweep_tries_every_prefix() {
    let stub = Arc::new(StubResolver::with_answers(&[]));
    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");

    let results = enumerator
        .enumerate_common_mobile_prefixes("5678", 1, "chn")
        .await;

    assert!(results.is_empty());
    let queried = stub.queried();
    assert_eq!(queried.len(), MOBILE_PREFIXES.len());
    assert!(queried.contains(&"8613856780.chn".to_string()));
    assert!(queried.contains(&"8619956780.chn".to_string()));
}

#[tokio::test]
async fn degenerate_pattern_is_a_single_candidate() {
    let stub = Arc::new(StubResolver::with_answers(&[(
        "5000.chn",
        &["192.0.2.50"],
    )]));
    let enumerator =
        DnsEnumerator::new(Arc::clone(&stub), &settings_with_workers(10)).expect("pool");

    let results = enumerator.brute_force_pattern("5000", "chn", 1000).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].hostname, "5000.chn");
    assert_eq!(stub.queried(), vec!["5000.chn"]);
}

#[tokio::test]
async fn zero_worker_pool_is_a_structural_error() {
    let stub = Arc::new(StubResolver::with_answers(&[]));
    assert!(DnsEnumerator::new(stub, &settings_with_workers(0)).is_err());
}
