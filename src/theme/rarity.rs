use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::Color,
        error::{XenftError, XenftResult},
    },
    mint::{asset::XenftAsset, decode::ClassFlags},
};

/// Mutually exclusive token class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Apex class.
    Apex,
    /// Limited class.
    Limited,
    /// Neither apex nor limited.
    Common,
    /// Class flags could not be read.
    Unknown,
}

impl Category {
    /// Stable display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Apex => "Apex",
            Category::Limited => "Limited",
            Category::Common => "Common",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rarity tier within a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    /// Apex, more than 10M XEN burned.
    Xunicorn,
    /// Apex, more than 1M XEN burned.
    Exotic,
    /// Apex, more than 100k XEN burned.
    Legendary,
    /// Apex, more than 10k XEN burned.
    Epic,
    /// Apex, anything below.
    Rare,
    /// Limited class.
    Limited,
    /// Common, power group above 6.
    Uncommon,
    /// Common, power group above 3.
    Standard,
    /// Common, anything below.
    Basic,
    /// Class flags could not be read.
    Unknown,
}

impl Rarity {
    /// Stable display label.
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Xunicorn => "Xunicorn",
            Rarity::Exotic => "Exotic",
            Rarity::Legendary => "Legendary",
            Rarity::Epic => "Epic",
            Rarity::Rare => "Rare",
            Rarity::Limited => "Limited",
            Rarity::Uncommon => "Uncommon",
            Rarity::Standard => "Standard",
            Rarity::Basic => "Basic",
            Rarity::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification result for one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityInfo {
    /// Token class.
    pub category: Category,
    /// Tier within the class.
    pub rarity: Rarity,
    /// Fill used for the central diamond.
    pub rarity_color: Color,
}

impl RarityInfo {
    /// Result used when classification fails.
    pub const UNKNOWN: RarityInfo = RarityInfo {
        category: Category::Unknown,
        rarity: Rarity::Unknown,
        rarity_color: Color::NEUTRAL_GRAY,
    };
}

// Highest first; strictly greater than.
const APEX_BURN_TIERS: [(u128, Rarity); 4] = [
    (10_000_000, Rarity::Xunicorn),
    (1_000_000, Rarity::Exotic),
    (100_000, Rarity::Legendary),
    (10_000, Rarity::Epic),
];

/// Classify an asset, reporting unreadable class flags as an error.
pub fn try_classify(asset: &XenftAsset) -> XenftResult<RarityInfo> {
    let flags = asset
        .mint_info
        .class_flags
        .ok_or_else(|| XenftError::classification("class flags are missing"))?;
    if flags.power_group_index > ClassFlags::MAX_POWER_GROUP {
        return Err(XenftError::classification(format!(
            "power group index {} does not fit in 6 bits",
            flags.power_group_index
        )));
    }
    Ok(classify_flags(flags, asset.xen_burned))
}

/// Classify an asset. Never fails: unreadable class flags yield [`RarityInfo::UNKNOWN`].
pub fn classify(asset: &XenftAsset) -> RarityInfo {
    try_classify(asset).unwrap_or_else(|err| {
        tracing::warn!(token_id = ?asset.token_id, error = %err, "classification failed");
        RarityInfo::UNKNOWN
    })
}

fn classify_flags(flags: ClassFlags, xen_burned: u128) -> RarityInfo {
    if flags.is_apex {
        let rarity = APEX_BURN_TIERS
            .iter()
            .find(|(threshold, _)| xen_burned > *threshold)
            .map_or(Rarity::Rare, |(_, rarity)| *rarity);
        return RarityInfo {
            category: Category::Apex,
            rarity,
            rarity_color: Color::GOLD,
        };
    }

    if flags.is_limited {
        return RarityInfo {
            category: Category::Limited,
            rarity: Rarity::Limited,
            rarity_color: Color::SILVER,
        };
    }

    let rarity = match flags.power_group_index {
        g if g > 6 => Rarity::Uncommon,
        g if g > 3 => Rarity::Standard,
        _ => Rarity::Basic,
    };
    RarityInfo {
        category: Category::Common,
        rarity,
        rarity_color: Color::BRONZE,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/rarity.rs"]
mod tests;
