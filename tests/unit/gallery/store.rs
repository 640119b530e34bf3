use std::path::PathBuf;

use super::*;
use crate::{
    foundation::time::from_unix_seconds, mint::decode::DecodedMintInfo, theme::rarity::classify,
};

fn record(token_id: u64, svg: &str, saved_at: u64) -> GalleryRecord {
    let asset = XenftAsset::new(
        token_id,
        12,
        DecodedMintInfo {
            term: 90,
            ..DecodedMintInfo::zeroed()
        },
        5_000,
    );
    GalleryRecord::from_render(&asset, &classify(&asset), svg, from_unix_seconds(saved_at))
        .unwrap()
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("gallery_store_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn record_json_shape() {
    let r = record(7, "<svg/>", 1_700_000_000);
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["tokenId"], 7);
    assert_eq!(v["vmuCount"], 12);
    assert_eq!(v["term"], 90);
    assert!(v["xenBurned"].is_number());
    assert_eq!(v["xenBurned"], 5000);
    assert_eq!(v["svg"], "<svg/>");
    assert_eq!(v["category"], "Common");
    assert_eq!(v["rarity"], "Basic");
    assert_eq!(v["savedAt"], "2023-11-14T22:13:20Z");
}

#[test]
fn xen_burned_loads_from_integer_or_string() {
    let base = serde_json::to_value(record(3, "<svg/>", 0)).unwrap();

    let mut as_string = base.clone();
    as_string["xenBurned"] = serde_json::json!("5000");
    let r: GalleryRecord = serde_json::from_value(as_string).unwrap();
    assert_eq!(r.xen_burned, 5_000);

    let r: GalleryRecord = serde_json::from_value(base).unwrap();
    assert_eq!(r.xen_burned, 5_000);
}

#[test]
fn xen_burned_beyond_u64_stays_exact_in_file() {
    let path = scratch("wide_burn.json");
    let mut r = record(9, "<svg/>", 0);
    r.xen_burned = u128::from(u64::MAX) + 1;

    let mut store = JsonFileGallery::open(&path);
    store.save(r.clone()).unwrap();
    assert_eq!(store.get(9).unwrap(), Some(r));
}

#[test]
fn from_render_requires_token_id() {
    let mut asset = XenftAsset::new(1, 0, DecodedMintInfo::zeroed(), 0);
    asset.token_id = None;
    let rarity = classify(&asset);
    assert!(GalleryRecord::from_render(&asset, &rarity, "", from_unix_seconds(0)).is_err());
}

#[test]
fn memory_store_last_write_wins() {
    let mut store = MemoryGallery::new();
    store.save(record(2, "first", 10)).unwrap();
    store.save(record(1, "other", 10)).unwrap();
    store.save(record(2, "second", 20)).unwrap();

    let got = store.get(2).unwrap().unwrap();
    assert_eq!(got.svg, "second");
    let ids: Vec<u64> = store.list().unwrap().iter().map(|r| r.token_id).collect();
    assert_eq!(ids, vec![1, 2]);

    assert!(store.remove(1).unwrap());
    assert!(!store.remove(1).unwrap());
    assert!(store.get(1).unwrap().is_none());
}

#[test]
fn json_file_store_persists_across_handles() {
    let path = scratch("persist.json");
    let mut store = JsonFileGallery::open(&path);
    assert!(store.list().unwrap().is_empty());

    store.save(record(5, "a", 1)).unwrap();
    store.save(record(5, "b", 2)).unwrap();
    store.save(record(3, "c", 3)).unwrap();

    let reopened = JsonFileGallery::open(&path);
    let all = reopened.list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].token_id, 3);
    assert_eq!(reopened.get(5).unwrap().unwrap().svg, "b");

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert!(raw.get("5").is_some());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_file_store_reports_corruption() {
    let path = scratch("corrupt.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = JsonFileGallery::open(&path);
    assert!(matches!(store.list(), Err(crate::XenftError::Serde(_))));
}
