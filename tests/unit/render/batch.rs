use super::*;
use crate::{
    foundation::time::from_unix_seconds, mint::decode::DecodedMintInfo, theme::rarity::Category,
};

fn assets() -> Vec<XenftAsset> {
    let mut out: Vec<XenftAsset> = (1..=6)
        .map(|id| XenftAsset::new(id, id * 3, DecodedMintInfo::zeroed(), 0))
        .collect();
    out[2].token_id = None;
    out[4].mint_info.class_flags = None;
    out
}

#[test]
fn one_broken_asset_does_not_abort_the_batch() {
    let now = from_unix_seconds(1_760_000_000);
    let rendered = render_gallery(&assets(), now, &BatchSettings::default()).unwrap();
    assert_eq!(rendered.len(), 6);
    assert!(rendered[2].image.layer("error").is_some());
    assert_eq!(rendered[4].rarity.category, Category::Unknown);
    assert!(rendered[4].image.layer("circles").is_some());
    assert!(rendered[0].svg().contains("XENFT #1"));
}

#[test]
fn parallel_matches_sequential() {
    let now = from_unix_seconds(1_760_000_000);
    let seq = render_gallery(&assets(), now, &BatchSettings::default()).unwrap();
    let par = render_gallery(
        &assets(),
        now,
        &BatchSettings {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), par.len());
    for (a, b) in seq.iter().zip(&par) {
        assert_eq!(a.token_id, b.token_id);
        assert_eq!(a.rarity, b.rarity);
        assert_eq!(
            a.image.deterministic_fingerprint(),
            b.image.deterministic_fingerprint()
        );
    }
}

#[test]
fn zero_threads_is_rejected() {
    let settings = BatchSettings {
        parallel: true,
        threads: Some(0),
    };
    assert!(render_gallery(&assets(), from_unix_seconds(0), &settings).is_err());
}
