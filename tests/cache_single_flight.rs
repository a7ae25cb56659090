// tests/cache_single_flight.rs
//! The response cache contract: memoization, single-flight execution
//! and capture/replay persistence.

mod common;

use async_trait::async_trait;
use common::{page, video_json, ScriptedFetcher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use ytmeta::{
    Error, MemoryCache, NoopCache, PageFetcher, RawPage, ReplayCache, RequestDescriptor,
    RequestKind, ResponseCache,
};

/// A fetcher slow enough that concurrent callers overlap in flight.
struct SlowFetcher {
    calls: AtomicU32,
}

#[async_trait]
impl PageFetcher for SlowFetcher {
    async fn fetch_page(&self, _descriptor: &RequestDescriptor) -> Result<RawPage, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(page(vec![video_json("aaa", "slow")], None, Some("etag-1")))
    }
}

fn descriptor() -> RequestDescriptor {
    let mut descriptor = RequestDescriptor::new(RequestKind::Videos);
    descriptor.set("part", "snippet");
    descriptor
}

#[tokio::test]
async fn concurrent_identical_keys_fetch_once() {
    let cache = Arc::new(MemoryCache::new(16));
    let fetcher = Arc::new(SlowFetcher {
        calls: AtomicU32::new(0),
    });
    let descriptor = descriptor();

    let (first, second) = tokio::join!(
        cache.get_or_fetch("key-1", &descriptor, fetcher.as_ref()),
        cache.get_or_fetch("key-1", &descriptor, fetcher.as_ref()),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert_eq!(first.items.len(), 1);
    assert_eq!(second.items.len(), 1);
    assert_eq!(first.etag, second.etag);
    // Exactly one vendor call despite two concurrent callers.
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn many_concurrent_callers_share_one_flight() {
    let cache = Arc::new(MemoryCache::new(16));
    let fetcher = Arc::new(SlowFetcher {
        calls: AtomicU32::new(0),
    });
    let descriptor = Arc::new(descriptor());

    let results = futures::future::join_all((0..8).map(|_| {
        let cache = Arc::clone(&cache);
        let fetcher = Arc::clone(&fetcher);
        let descriptor = Arc::clone(&descriptor);
        async move {
            cache
                .get_or_fetch("key-n", &descriptor, fetcher.as_ref())
                .await
        }
    }))
    .await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn distinct_keys_fetch_independently() {
    let cache = MemoryCache::new(16);
    let fetcher = SlowFetcher {
        calls: AtomicU32::new(0),
    };
    let descriptor = descriptor();

    cache.get_or_fetch("key-a", &descriptor, &fetcher).await.unwrap();
    cache.get_or_fetch("key-b", &descriptor, &fetcher).await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn sequential_hit_skips_the_fetcher() {
    let cache = MemoryCache::new(16);
    let fetcher = ScriptedFetcher::new(vec![Ok(page(vec![video_json("aaa", "1")], None, None))]);
    let descriptor = descriptor();

    let miss = cache.get_or_fetch("key-1", &descriptor, &fetcher).await.unwrap();
    let hit = cache.get_or_fetch("key-1", &descriptor, &fetcher).await.unwrap();
    assert_eq!(miss.items, hit.items);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn failures_are_not_memoized() {
    let cache = MemoryCache::new(16);
    let fetcher = ScriptedFetcher::new(vec![
        Err(common::vendor_failure(403, "youtube.quota", "quotaExceeded")),
        Ok(page(vec![video_json("aaa", "recovered")], None, None)),
    ]);
    let descriptor = descriptor();

    assert!(cache
        .get_or_fetch("key-1", &descriptor, &fetcher)
        .await
        .is_err());
    // A later identical request gets a fresh attempt.
    let retried = cache.get_or_fetch("key-1", &descriptor, &fetcher).await.unwrap();
    assert_eq!(retried.items.len(), 1);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn noop_cache_always_fetches() {
    let cache = NoopCache;
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(vec![video_json("aaa", "1")], None, None)),
        Ok(page(vec![video_json("bbb", "2")], None, None)),
    ]);
    let descriptor = descriptor();

    cache.get_or_fetch("key-1", &descriptor, &fetcher).await.unwrap();
    cache.get_or_fetch("key-1", &descriptor, &fetcher).await.unwrap();
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn replay_cache_persists_pages_across_instances() {
    let dir = std::env::temp_dir().join(format!(
        "ytmeta_replay_test_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default()
    ));
    let descriptor = descriptor();

    let capture = ReplayCache::new(dir.clone(), 300).await.unwrap();
    let fetcher = ScriptedFetcher::new(vec![Ok(page(
        vec![video_json("aaa", "captured")],
        Some("NEXT"),
        Some("etag-7"),
    ))]);
    let recorded = capture
        .get_or_fetch("key-1", &descriptor, &fetcher)
        .await
        .unwrap();
    assert_eq!(fetcher.calls(), 1);

    // A fresh instance over the same directory replays without any
    // vendor traffic.
    let replay = ReplayCache::new(dir.clone(), 300).await.unwrap();
    let empty_fetcher = ScriptedFetcher::new(vec![]);
    let replayed = replay
        .get_or_fetch("key-1", &descriptor, &empty_fetcher)
        .await
        .unwrap();
    assert_eq!(empty_fetcher.calls(), 0);
    assert_eq!(replayed.items, recorded.items);
    assert_eq!(replayed.next_page_token, recorded.next_page_token);
    assert_eq!(replayed.etag, recorded.etag);

    let _ = tokio::fs::remove_dir_all(&dir).await;
}
