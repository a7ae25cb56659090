// tests/engine_pagination.rs
//! End-to-end behavior of the pagination engine against a scripted
//! vendor: termination, quota ceiling, error triage and capability
//! propagation.

mod common;

use common::{caption_json, page, vendor_failure, video_json, ScriptedFetcher};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use ytmeta::{
    builtin_registry, convert, Caption, CaptionListRequest, ClientState, Error, NoopCache,
    PagedRequest, Video, VideoId, VideoListRequest,
};

fn video_request(fetcher: Arc<ScriptedFetcher>, hl: Option<&str>, ceiling: u32)
    -> PagedRequest<VideoListRequest, Video>
{
    let registry = builtin_registry();
    let binding = registry.binding_for::<VideoListRequest>();
    let mut request = VideoListRequest::by_ids(&[VideoId::new("dQw4w9WgXcQ").unwrap()]);
    request.hl = hl.map(str::to_owned);
    let state = ClientState::new(
        request,
        binding,
        Arc::new(convert::video_from_raw),
        Arc::new(NoopCache),
        fetcher,
    );
    PagedRequest::new(state, ceiling)
}

fn caption_request(fetcher: Arc<ScriptedFetcher>) -> PagedRequest<CaptionListRequest, Caption> {
    let registry = builtin_registry();
    let binding = registry.binding_for::<CaptionListRequest>();
    let request = CaptionListRequest::by_video(VideoId::new("dQw4w9WgXcQ").unwrap());
    let state = ClientState::new(
        request,
        binding,
        Arc::new(convert::caption_from_raw),
        Arc::new(NoopCache),
        fetcher,
    );
    PagedRequest::new(state, 3)
}

#[tokio::test]
async fn single_page_yields_items_then_finishes() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(
        vec![
            video_json("aaa", "one"),
            video_json("bbb", "two"),
            video_json("ccc", "three"),
        ],
        None,
        None,
    ))]));
    let mut request = video_request(Arc::clone(&fetcher), None, 3);

    assert!(request.has_next());
    let items = request.next_page().await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].title, "one");
    assert!(!request.has_next());
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn quota_ceiling_truncates_endless_pagination() {
    // The vendor always promises another page; the engine must not
    // believe it past the ceiling.
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Ok(page(vec![video_json("aaa", "1")], Some("T"), None)),
        Ok(page(vec![video_json("bbb", "2")], Some("T"), None)),
        Ok(page(vec![video_json("ccc", "3")], Some("T"), None)),
    ]));
    let mut request = video_request(Arc::clone(&fetcher), None, 2);

    assert_eq!(request.next_page().await.unwrap().len(), 1);
    assert!(request.has_next());
    assert_eq!(request.next_page().await.unwrap().len(), 1);
    assert!(request.has_next());

    // Third call hits the ceiling: empty result, exhausted, no fetch.
    let truncated = request.next_page().await.unwrap();
    assert!(truncated.is_empty());
    assert!(!request.has_next());
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(request.pages_fetched(), 2);
}

#[tokio::test]
async fn blank_next_page_token_is_terminal() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(
        vec![video_json("aaa", "1")],
        Some("   "),
        None,
    ))]));
    let mut request = video_request(fetcher, None, 3);

    assert_eq!(request.next_page().await.unwrap().len(), 1);
    assert!(!request.has_next());
}

#[tokio::test]
async fn multi_page_collects_until_token_runs_out() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        Ok(page(vec![video_json("aaa", "1")], Some("NEXT"), None)),
        Ok(page(vec![video_json("bbb", "2"), video_json("ccc", "3")], None, None)),
    ]));
    let request = video_request(Arc::clone(&fetcher), None, 5);

    let all = request.collect_all().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn empty_item_list_is_terminal() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(vec![], Some("T"), None))]));
    let mut request = video_request(fetcher, None, 3);

    assert!(request.next_page().await.unwrap().is_empty());
    assert!(!request.has_next());
}

#[tokio::test]
async fn not_found_recovers_as_empty_result() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(vendor_failure(
        404,
        "youtube.video",
        "videoNotFound",
    ))]));
    let mut request = video_request(fetcher, None, 3);

    let items = request.next_page().await.unwrap();
    assert!(items.is_empty());
    assert!(!request.has_next());
}

#[tokio::test]
async fn quota_exhaustion_is_fatal_and_typed() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(vendor_failure(
        403,
        "youtube.quota",
        "quotaExceeded",
    ))]));
    let mut request = video_request(Arc::clone(&fetcher), None, 3);

    match request.next_page().await {
        Err(Error::QuotaExceeded { status, domain, reason, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(domain, "youtube.quota");
            assert_eq!(reason, "quotaExceeded");
        }
        other => panic!("expected QuotaExceeded, got {:?}", other),
    }
    assert!(!request.has_next());

    // Once failed, the request is permanently exhausted: further calls
    // are misuse, answered with an empty vec and no vendor traffic.
    assert!(request.next_page().await.unwrap().is_empty());
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn forbidden_and_authentication_failures_are_distinguished() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(vendor_failure(
        403,
        "youtube.caption",
        "forbidden",
    ))]));
    let mut request = video_request(fetcher, None, 3);
    assert!(matches!(
        request.next_page().await,
        Err(Error::AccessForbidden { .. })
    ));

    let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(vendor_failure(
        400,
        "usageLimits",
        "keyInvalid",
    ))]));
    let mut request = video_request(fetcher, None, 3);
    assert!(matches!(
        request.next_page().await,
        Err(Error::Authentication { .. })
    ));
}

#[tokio::test]
async fn transport_failure_is_fatal() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Err(Error::Transport(
        "connection refused".to_string(),
    ))]));
    let mut request = video_request(fetcher, None, 3);

    assert!(matches!(
        request.next_page().await,
        Err(Error::Transport(_))
    ));
    assert!(!request.has_next());
}

#[tokio::test]
async fn malformed_item_fails_the_request() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(
        vec![serde_json::json!({ "snippet": { "title": "no id" } })],
        None,
        None,
    ))]));
    let mut request = video_request(fetcher, None, 3);

    assert!(matches!(
        request.next_page().await,
        Err(Error::MalformedResponse(_))
    ));
    assert!(!request.has_next());
}

#[tokio::test]
async fn etag_and_language_hint_propagate_onto_items() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(
        vec![video_json("aaa", "1"), video_json("bbb", "2")],
        None,
        Some("etag-123"),
    ))]));
    let mut request = video_request(fetcher, Some("fi"), 3);

    let items = request.next_page().await.unwrap();
    for video in &items {
        assert_eq!(video.etag.as_deref(), Some("etag-123"));
        assert_eq!(video.language_hint.as_deref(), Some("fi"));
    }
}

#[tokio::test]
async fn caption_listing_never_pages() {
    // captions.list has no page cursor; even a vendor response claiming
    // a next page must terminate after the first.
    let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(page(
        vec![caption_json("cap1", "en"), caption_json("cap2", "fi")],
        Some("UNEXPECTED"),
        Some("etag-cap"),
    ))]));
    let mut request = caption_request(Arc::clone(&fetcher));

    let items = request.next_page().await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].etag.as_deref(), Some("etag-cap"));
    assert!(!request.has_next());

    assert!(request.next_page().await.unwrap().is_empty());
    assert_eq!(fetcher.calls(), 1);
}
