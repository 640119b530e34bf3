use super::*;
use crate::mint::decode::ClassFlags;

fn chain(packed: &str, burned: &str, is_apex: bool) -> ChainTokenData {
    ChainTokenData {
        vmu_count: 42,
        packed_mint_info: packed.to_string(),
        xen_burned: burned.to_string(),
        is_apex,
    }
}

#[test]
fn from_chain_decodes_packed_record() {
    // power group 5, amp 100
    let packed = ((5u64 << 1) | (100u64 << 25)).to_string();
    let asset = XenftAsset::from_chain(7, &chain(&packed, "1234", false));
    assert_eq!(asset.token_id, Some(7));
    assert_eq!(asset.vmu_count, 42);
    assert_eq!(asset.xen_burned, 1234);
    assert_eq!(asset.mint_info.class_flags.unwrap().power_group_index, 5);
    assert_eq!(asset.mint_info.amp, 100);
}

#[test]
fn from_chain_merges_apex_flag() {
    let asset = XenftAsset::from_chain(1, &chain("0", "0", true));
    assert_eq!(
        asset.mint_info.class_flags,
        Some(ClassFlags {
            is_apex: true,
            ..ClassFlags::default()
        })
    );
}

#[test]
fn from_chain_degrades_bad_fields_to_zero() {
    let asset = XenftAsset::from_chain(3, &chain("garbage", "-5", false));
    assert_eq!(asset.mint_info, DecodedMintInfo::zeroed());
    assert_eq!(asset.xen_burned, 0);
    assert_eq!(asset.token_id, Some(3));
}

#[test]
fn token_id_must_be_present_and_positive() {
    let mut asset = XenftAsset::new(5, 0, DecodedMintInfo::zeroed(), 0);
    assert_eq!(asset.require_token_id().unwrap(), 5);

    asset.token_id = Some(0);
    assert!(matches!(
        asset.require_token_id(),
        Err(XenftError::Composition(_))
    ));

    asset.token_id = None;
    assert!(matches!(
        asset.require_token_id(),
        Err(XenftError::Composition(_))
    ));
}

#[test]
fn input_accepts_chain_and_decoded_shapes() {
    let chain_json = r#"{"tokenId":9,"vmuCount":3,"packedMintInfo":"0x1","xenBurned":"77","isApex":false}"#;
    let asset = serde_json::from_str::<AssetInput>(chain_json)
        .unwrap()
        .into_asset();
    assert_eq!(asset.token_id, Some(9));
    assert!(asset.mint_info.redeemed);
    assert_eq!(asset.xen_burned, 77);

    let decoded_json = r#"{
        "vmuCount": 3,
        "mintInfo": {
            "redeemed": false,
            "classFlags": {"isApex": false, "isLimited": false, "powerGroupIndex": 0},
            "eaa": 0,
            "amp": 0,
            "rank": "0",
            "maturityTimestamp": 0,
            "term": 0
        },
        "xenBurned": "15000000"
    }"#;
    let asset = serde_json::from_str::<AssetInput>(decoded_json)
        .unwrap()
        .into_asset();
    assert_eq!(asset.token_id, None);
    assert_eq!(asset.xen_burned, 15_000_000);
    assert_eq!(asset.mint_info, DecodedMintInfo::zeroed());
}

#[test]
fn chain_read_accepts_integer_fields() {
    let json = r#"{"tokenId":7,"vmuCount":10,"packedMintInfo":257,"xenBurned":15000000,"isApex":true}"#;
    let asset = serde_json::from_str::<AssetInput>(json)
        .unwrap()
        .into_asset();
    assert_eq!(asset.token_id, Some(7));
    assert_eq!(asset.vmu_count, 10);
    assert!(asset.mint_info.redeemed);
    assert!(asset.mint_info.class_flags.unwrap().is_apex);
    assert_eq!(asset.xen_burned, 15_000_000);

    let rarity = crate::theme::rarity::classify(&asset);
    assert_eq!(rarity.category, crate::theme::rarity::Category::Apex);
    assert_eq!(rarity.rarity, crate::theme::rarity::Rarity::Xunicorn);
}

#[test]
fn chain_read_integer_fields_match_string_fields() {
    let numbers: ChainTokenData = serde_json::from_str(
        r#"{"vmuCount":1,"packedMintInfo":33554442,"xenBurned":0}"#,
    )
    .unwrap();
    let strings: ChainTokenData = serde_json::from_str(
        r#"{"vmuCount":1,"packedMintInfo":"33554442","xenBurned":"0"}"#,
    )
    .unwrap();
    assert_eq!(numbers, strings);
    assert!(!numbers.is_apex);
}

#[test]
fn chain_read_unrepresentable_numbers_degrade_to_zero() {
    // wider than a JSON double can hold exactly
    let json = r#"{"tokenId":4,"vmuCount":2,"packedMintInfo":1e77,"xenBurned":-3}"#;
    let asset = serde_json::from_str::<AssetInput>(json)
        .unwrap()
        .into_asset();
    assert_eq!(asset.token_id, Some(4));
    assert_eq!(asset.mint_info, DecodedMintInfo::zeroed());
    assert_eq!(asset.xen_burned, 0);
}

#[test]
fn chain_shaped_input_never_passes_as_decoded() {
    // missing tokenId: not a valid chain read, and packedMintInfo is not a decoded field
    let json = r#"{"vmuCount":10,"packedMintInfo":257,"xenBurned":0}"#;
    assert!(serde_json::from_str::<AssetInput>(json).is_err());

    assert!(serde_json::from_str::<AssetInput>("{}").is_err());
    assert!(serde_json::from_str::<XenftAsset>(r#"{"vmuCount":1}"#).is_err());
}
