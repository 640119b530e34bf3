use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{XenftError, XenftResult};

/// A contiguous bit range inside the packed mint record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField {
    /// Field name as used in diagnostics.
    pub name: &'static str,
    /// Offset of the least significant bit.
    pub offset: usize,
    /// Width in bits.
    pub width: usize,
}

impl BitField {
    const fn new(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
        }
    }

    /// One past the most significant bit.
    pub const fn end(self) -> usize {
        self.offset + self.width
    }

    /// `(value >> offset) & ((1 << width) - 1)`, computed in 256-bit arithmetic.
    pub fn extract(self, value: U256) -> U256 {
        (value >> self.offset) & mask(self.width)
    }
}

/// Bit 0.
pub const REDEEMED: BitField = BitField::new("redeemed", 0, 1);
/// Bits 1..=8: power group index (low 6), limited (bit 7), apex (bit 8).
pub const CLASS: BitField = BitField::new("class", 1, 8);
/// Bits 9..=24.
pub const EAA: BitField = BitField::new("eaa", 9, 16);
/// Bits 25..=40.
pub const AMP: BitField = BitField::new("amp", 25, 16);
/// Bits 41..=168.
pub const RANK: BitField = BitField::new("rank", 41, 128);
/// Bits 169..=232.
pub const MATURITY_TS: BitField = BitField::new("maturityTs", 169, 64);
/// Bits 233..=248.
pub const TERM: BitField = BitField::new("term", 233, 16);

/// All fields in ascending bit order.
pub const LAYOUT: [BitField; 7] = [REDEEMED, CLASS, EAA, AMP, RANK, MATURITY_TS, TERM];

/// Total number of low bits the layout reads. Anything above is ignored.
pub const CONSUMED_BITS: usize = TERM.end();

const CLASS_POWER_GROUP_MASK: u8 = 0b0011_1111;
const CLASS_LIMITED_BIT: u8 = 1 << 6;
const CLASS_APEX_BIT: u8 = 1 << 7;

/// Class byte of the packed record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFlags {
    /// Apex class (record bit 8).
    pub is_apex: bool,
    /// Limited class (record bit 7).
    pub is_limited: bool,
    /// Power group in `0..64` (record bits 1..=6).
    pub power_group_index: u8,
}

impl ClassFlags {
    /// Largest valid power group index (6 bits).
    pub const MAX_POWER_GROUP: u8 = CLASS_POWER_GROUP_MASK;

    /// Split the class byte into its flags.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            is_apex: byte & CLASS_APEX_BIT != 0,
            is_limited: byte & CLASS_LIMITED_BIT != 0,
            power_group_index: byte & CLASS_POWER_GROUP_MASK,
        }
    }

    /// Reassemble the class byte. Fails if the power group does not fit in 6 bits.
    pub fn to_byte(self) -> XenftResult<u8> {
        if self.power_group_index > Self::MAX_POWER_GROUP {
            return Err(XenftError::validation(format!(
                "power group index {} exceeds {}",
                self.power_group_index,
                Self::MAX_POWER_GROUP
            )));
        }
        let mut byte = self.power_group_index;
        if self.is_limited {
            byte |= CLASS_LIMITED_BIT;
        }
        if self.is_apex {
            byte |= CLASS_APEX_BIT;
        }
        Ok(byte)
    }
}

/// Named fields of a packed mint record.
///
/// `rank` and `maturity_ts` are serialized as decimal strings so JSON consumers never round them
/// through a double.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMintInfo {
    /// Whether the token has been redeemed.
    pub redeemed: bool,
    /// Class byte. `None` only for records that entered through a loosely typed boundary.
    #[serde(default)]
    pub class_flags: Option<ClassFlags>,
    /// EAA mint modifier.
    pub eaa: u16,
    /// AMP mint modifier.
    pub amp: u16,
    /// Global rank at mint time (128-bit).
    #[serde(with = "decimal")]
    pub rank: u128,
    /// Maturity instant in seconds since the Unix epoch.
    #[serde(rename = "maturityTimestamp", with = "decimal")]
    pub maturity_ts: u64,
    /// Mint term in days.
    pub term: u16,
}

impl DecodedMintInfo {
    /// The all-zero record (every flag false, every number zero).
    pub fn zeroed() -> Self {
        Self {
            redeemed: false,
            class_flags: Some(ClassFlags::default()),
            eaa: 0,
            amp: 0,
            rank: 0,
            maturity_ts: 0,
            term: 0,
        }
    }
}

impl Default for DecodedMintInfo {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Decode a packed record. Total: bits above [`CONSUMED_BITS`] are ignored.
pub fn decode(value: U256) -> DecodedMintInfo {
    DecodedMintInfo {
        redeemed: low_u128(REDEEMED.extract(value)) == 1,
        class_flags: Some(ClassFlags::from_byte(low_u128(CLASS.extract(value)) as u8)),
        eaa: low_u128(EAA.extract(value)) as u16,
        amp: low_u128(AMP.extract(value)) as u16,
        rank: low_u128(RANK.extract(value)),
        maturity_ts: low_u128(MATURITY_TS.extract(value)) as u64,
        term: low_u128(TERM.extract(value)) as u16,
    }
}

/// Parse a textual packed record and decode it.
pub fn try_decode_str(s: &str) -> XenftResult<DecodedMintInfo> {
    parse_packed(s).map(decode)
}

/// Like [`try_decode_str`], substituting the all-zero record on failure.
pub fn decode_or_default(s: &str) -> DecodedMintInfo {
    match try_decode_str(s) {
        Ok(info) => info,
        Err(err) => {
            tracing::warn!(error = %err, "packed mint record unreadable, using zeroed record");
            DecodedMintInfo::zeroed()
        }
    }
}

/// Pack decoded fields back into the record layout.
///
/// A missing class byte packs as zero.
pub fn encode(info: &DecodedMintInfo) -> XenftResult<U256> {
    let class = match info.class_flags {
        Some(flags) => flags.to_byte()?,
        None => 0,
    };
    let value = (U256::from(u8::from(info.redeemed)) << REDEEMED.offset)
        | (U256::from(class) << CLASS.offset)
        | (U256::from(info.eaa) << EAA.offset)
        | (U256::from(info.amp) << AMP.offset)
        | (U256::from(info.rank) << RANK.offset)
        | (U256::from(info.maturity_ts) << MATURITY_TS.offset)
        | (U256::from(info.term) << TERM.offset);
    Ok(value)
}

/// Parse a non-negative integer written in decimal or `0x` hex.
///
/// Values wider than 256 bits keep their low 256 bits.
pub fn parse_packed(s: &str) -> XenftResult<U256> {
    let s = s.trim();
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16u32),
        None => (s, 10u32),
    };
    if digits.is_empty() {
        return Err(XenftError::decode(format!(
            "packed mint record \"{s}\" has no digits"
        )));
    }

    let radix_u256 = U256::from(radix);
    let mut acc = U256::ZERO;
    for ch in digits.chars() {
        let d = ch.to_digit(radix).ok_or_else(|| {
            XenftError::decode(format!(
                "packed mint record \"{s}\" contains invalid digit '{ch}'"
            ))
        })?;
        acc = acc.wrapping_mul(radix_u256).wrapping_add(U256::from(d));
    }
    Ok(acc)
}

fn mask(width: usize) -> U256 {
    (U256::from(1u8) << width) - U256::from(1u8)
}

// Callers mask to at most 128 bits first.
fn low_u128(v: U256) -> u128 {
    let limbs = v.as_limbs();
    u128::from(limbs[0]) | (u128::from(limbs[1]) << 64)
}

/// Decimal-string serde for integers wider than a JSON double can carry.
pub(crate) mod decimal {
    use std::{fmt::Display, str::FromStr};

    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    pub(crate) fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Plain JSON integer while it fits in `u64`, decimal string beyond that.
    pub(crate) fn serialize_int<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match u64::try_from(*value) {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.collect_str(value),
        }
    }

    pub(crate) fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + TryFrom<u64>,
        <T as FromStr>::Err: Display,
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Num(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => s.trim().parse::<T>().map_err(D::Error::custom),
            Repr::Num(n) => {
                T::try_from(n).map_err(|_| D::Error::custom(format!("{n} is out of range")))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mint/decode.rs"]
mod tests;
