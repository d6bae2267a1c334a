// The cache is the only state shared across concurrent enumeration callers,
// so it has to stay consistent under parallel get/set traffic.

use std::sync::Arc;
use std::time::Duration;

use ipv9_recon::DnsCache;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_readers_and_writers_stay_within_capacity() {
    let cache = Arc::new(DnsCache::new(50, Duration::from_secs(300)));

    let mut handles = Vec::new();
    for task in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            for i in 0..200 {
                let hostname = format!("86138{task}{i}.chn");
                cache.set(&hostname, vec![format!("192.0.2.{task}")], "A", None);
                let _ = cache.get(&hostname, "A");
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task");
    }

    let stats = cache.stats();
    assert!(stats.total_entries <= 50);
    assert_eq!(stats.max_size, 50);
}

#[tokio::test]
async fn clones_share_one_store() {
    let cache = DnsCache::new(10, Duration::from_secs(300));
    let clone = cache.clone();

    cache.set("5000.chn", vec!["192.0.2.1".into()], "A", None);
    assert_eq!(clone.get("5000.chn", "A"), Some(vec!["192.0.2.1".into()]));

    clone.clear();
    assert_eq!(cache.stats().total_entries, 0);
}
