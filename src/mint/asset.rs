use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{XenftError, XenftResult},
    mint::decode::{self, DecodedMintInfo, decimal},
};

/// Everything the composer needs to know about one token.
///
/// `token_id` is optional so that loosely typed inputs can be represented; composition refuses
/// assets without a positive id. Unknown keys are rejected so a raw chain read never passes for a
/// decoded asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct XenftAsset {
    /// Token id (positive).
    #[serde(default)]
    pub token_id: Option<u64>,
    /// Virtual mining unit count.
    pub vmu_count: u64,
    /// Decoded mint record.
    pub mint_info: DecodedMintInfo,
    /// XEN burned at mint time.
    #[serde(default, with = "decimal")]
    pub xen_burned: u128,
}

impl XenftAsset {
    /// Build an asset with a known token id.
    pub fn new(token_id: u64, vmu_count: u64, mint_info: DecodedMintInfo, xen_burned: u128) -> Self {
        Self {
            token_id: Some(token_id),
            vmu_count,
            mint_info,
            xen_burned,
        }
    }

    /// Build an asset from a raw chain read.
    ///
    /// An unreadable packed record decodes as all-zero, an unreadable burn amount as 0. The
    /// chain's own apex flag is merged into the decoded class flags.
    pub fn from_chain(token_id: u64, data: &ChainTokenData) -> Self {
        let mut mint_info = decode::decode_or_default(&data.packed_mint_info);
        if data.is_apex {
            let flags = mint_info.class_flags.get_or_insert_with(Default::default);
            flags.is_apex = true;
        }

        let xen_burned = data
            .xen_burned
            .trim()
            .parse::<u128>()
            .unwrap_or_else(|err| {
                tracing::warn!(token_id, error = %err, raw = %data.xen_burned, "xenBurned unreadable, using 0");
                0
            });

        Self::new(token_id, data.vmu_count, mint_info, xen_burned)
    }

    /// The token id, if it is present and positive.
    pub fn require_token_id(&self) -> XenftResult<u64> {
        match self.token_id {
            Some(id) if id > 0 => Ok(id),
            Some(_) => Err(XenftError::composition("token id must be positive")),
            None => Err(XenftError::composition("asset is missing a token id")),
        }
    }
}

/// Raw token data as returned by the chain read call.
///
/// The integer fields are kept as text and only parsed by [`XenftAsset::from_chain`], so an
/// unreadable value degrades there instead of failing the whole read. In JSON they may be numbers
/// or strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTokenData {
    /// Virtual mining unit count.
    pub vmu_count: u64,
    /// Packed mint record, decimal or `0x` hex.
    #[serde(deserialize_with = "integer_text::deserialize")]
    pub packed_mint_info: String,
    /// XEN burned, decimal.
    #[serde(deserialize_with = "integer_text::deserialize")]
    pub xen_burned: String,
    /// Apex flag reported by the contract.
    #[serde(default)]
    pub is_apex: bool,
}

/// A token description as accepted from JSON: either a raw chain read or an already decoded asset.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AssetInput {
    /// Raw chain read plus its token id.
    Chain {
        /// Token id the read was made for.
        #[serde(rename = "tokenId")]
        token_id: u64,
        /// Chain payload.
        #[serde(flatten)]
        data: ChainTokenData,
    },
    /// Already decoded asset.
    Decoded(XenftAsset),
}

impl AssetInput {
    /// Resolve into the typed asset.
    pub fn into_asset(self) -> XenftAsset {
        match self {
            AssetInput::Chain { token_id, data } => XenftAsset::from_chain(token_id, &data),
            AssetInput::Decoded(asset) => asset,
        }
    }
}

// Integers wider than a JSON double arrive as floats; `{:e}` keeps them unparseable rather than
// silently rounded.
mod integer_text {
    use std::fmt;

    use serde::{
        Deserializer,
        de::{self, Visitor},
    };

    struct IntegerText;

    impl Visitor<'_> for IntegerText {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or an integer string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(format!("{v:e}"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IntegerText)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mint/asset.rs"]
mod tests;
