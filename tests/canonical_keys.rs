// tests/canonical_keys.rs
//! Key determinism over real request shapes: equal logical requests
//! must produce equal cache keys however they were assembled.

use pretty_assertions::assert_eq;
use ytmeta::{
    build_key, ChannelListRequest, ListRequest, RequestDescriptor, RequestKind, VideoId,
    VideoListRequest,
};

#[test]
fn id_list_order_does_not_change_the_key() {
    let a = VideoId::new("aaaaaaaaaaa").unwrap();
    let b = VideoId::new("bbbbbbbbbbb").unwrap();

    let forward = VideoListRequest::by_ids(&[a.clone(), b.clone()]);
    let backward = VideoListRequest::by_ids(&[b, a]);

    assert_eq!(
        build_key(&forward.descriptor()),
        build_key(&backward.descriptor())
    );
}

#[test]
fn every_key_order_permutation_yields_the_same_key() {
    let pairs = [("part", "snippet"), ("hl", "fi"), ("maxResults", "50"), ("q", "rust")];

    // All rotations of the insertion order; the canonical form must not
    // notice.
    let mut keys = Vec::new();
    for rotation in 0..pairs.len() {
        let mut descriptor = RequestDescriptor::new(RequestKind::Search);
        for offset in 0..pairs.len() {
            let (name, value) = pairs[(rotation + offset) % pairs.len()];
            descriptor.set(name, value);
        }
        keys.push(build_key(&descriptor));
    }
    for key in &keys {
        assert_eq!(key, &keys[0]);
    }
}

#[test]
fn language_hint_changes_the_key() {
    let video = VideoId::new("dQw4w9WgXcQ").unwrap();
    let plain = VideoListRequest::by_ids(&[video.clone()]);
    let mut localized = VideoListRequest::by_ids(&[video]);
    localized.hl = Some("fi".to_string());

    assert_ne!(
        build_key(&plain.descriptor()),
        build_key(&localized.descriptor())
    );
}

#[test]
fn page_cursor_separates_pages_of_one_logical_request() {
    let video = VideoId::new("dQw4w9WgXcQ").unwrap();
    let first = VideoListRequest::by_ids(&[video.clone()]);
    let mut second = VideoListRequest::by_ids(&[video]);
    second.page_token = Some("CAUQAA".to_string());

    let first_key = build_key(&first.descriptor());
    let second_key = build_key(&second.descriptor());
    assert_ne!(first_key, second_key);
    // Same logical request: the keys agree on everything but the cursor.
    assert!(second_key.starts_with(&first_key));
}

#[test]
fn secrets_never_reach_the_key() {
    let mut descriptor = RequestDescriptor::new(RequestKind::Channels);
    descriptor.set("part", "snippet");
    descriptor.set("key", "AIzaVerySecretKey000000000000000000000");
    descriptor.set("access_token", "ya29.token");
    descriptor.set("quotaUser", "caller-55");
    descriptor.set("onBehalfOfContentOwner", "owner-1");

    let key = build_key(&descriptor);
    assert!(!key.contains("AIzaVerySecretKey"));
    assert!(!key.contains("ya29"));
    assert!(!key.contains("caller-55"));
    assert!(!key.contains("owner-1"));

    let mut clean = RequestDescriptor::new(RequestKind::Channels);
    clean.set("part", "snippet");
    assert_eq!(key, build_key(&clean));
}

#[test]
fn different_endpoints_never_collide() {
    let channel_request =
        ChannelListRequest::by_ids(&[ytmeta::ChannelId::new("UC_x5XG1OV2P6uZZ5FSM9Ttw").unwrap()]);
    let mut lookalike = RequestDescriptor::new(RequestKind::Videos);
    for (name, value) in channel_request.descriptor().params() {
        match value {
            ytmeta::ParamValue::Single(v) => lookalike.set(name, v),
            ytmeta::ParamValue::Many(vs) => lookalike.set_list(name, vs.clone()),
        }
    }

    assert_ne!(
        build_key(&channel_request.descriptor()),
        build_key(&lookalike)
    );
}
