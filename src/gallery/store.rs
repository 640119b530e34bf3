use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::XenftResult,
    mint::{asset::XenftAsset, decode::decimal},
    theme::rarity::{Category, Rarity, RarityInfo},
};

/// Saved snapshot of one rendered token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryRecord {
    /// Token id; the store key.
    pub token_id: u64,
    /// VMU count at render time.
    pub vmu_count: u64,
    /// Mint term in days.
    pub term: u16,
    /// XEN burned. Written as an integer; loads from an integer or a decimal string.
    #[serde(
        serialize_with = "decimal::serialize_int",
        deserialize_with = "decimal::deserialize"
    )]
    pub xen_burned: u128,
    /// Rendered SVG document.
    pub svg: String,
    /// Token class.
    pub category: Category,
    /// Rarity tier.
    pub rarity: Rarity,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl GalleryRecord {
    /// Snapshot a rendered asset. Fails if the asset has no usable token id.
    pub fn from_render(
        asset: &XenftAsset,
        rarity: &RarityInfo,
        svg: impl Into<String>,
        now: DateTime<Utc>,
    ) -> XenftResult<Self> {
        Ok(Self {
            token_id: asset.require_token_id()?,
            vmu_count: asset.vmu_count,
            term: asset.mint_info.term,
            xen_burned: asset.xen_burned,
            svg: svg.into(),
            category: rarity.category,
            rarity: rarity.rarity,
            saved_at: now,
        })
    }
}

/// Key-value store of gallery records keyed by token id. Saving an existing id overwrites it.
pub trait GalleryStore {
    /// Insert or replace the record for `record.token_id`.
    fn save(&mut self, record: GalleryRecord) -> XenftResult<()>;
    /// Record for `token_id`, if any.
    fn get(&self, token_id: u64) -> XenftResult<Option<GalleryRecord>>;
    /// Every record, ascending by token id.
    fn list(&self) -> XenftResult<Vec<GalleryRecord>>;
    /// Delete the record for `token_id`; returns whether one existed.
    fn remove(&mut self, token_id: u64) -> XenftResult<bool>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryGallery {
    records: BTreeMap<u64, GalleryRecord>,
}

impl MemoryGallery {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl GalleryStore for MemoryGallery {
    fn save(&mut self, record: GalleryRecord) -> XenftResult<()> {
        self.records.insert(record.token_id, record);
        Ok(())
    }

    fn get(&self, token_id: u64) -> XenftResult<Option<GalleryRecord>> {
        Ok(self.records.get(&token_id).cloned())
    }

    fn list(&self) -> XenftResult<Vec<GalleryRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn remove(&mut self, token_id: u64) -> XenftResult<bool> {
        Ok(self.records.remove(&token_id).is_some())
    }
}

/// Store backed by one JSON object file (`{"<tokenId>": record, ...}`).
///
/// Every mutation rewrites the file through a temporary sibling and a rename.
#[derive(Clone, Debug)]
pub struct JsonFileGallery {
    path: PathBuf,
}

impl JsonFileGallery {
    /// Store at `path`. The file is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> XenftResult<BTreeMap<u64, GalleryRecord>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read gallery '{}'", self.path.display()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn store(&self, records: &BTreeMap<u64, GalleryRecord>) -> XenftResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create gallery dir '{}'", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(records)?;
        fs::write(&tmp, json).with_context(|| format!("write '{}'", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replace gallery '{}'", self.path.display()))?;
        Ok(())
    }
}

impl GalleryStore for JsonFileGallery {
    fn save(&mut self, record: GalleryRecord) -> XenftResult<()> {
        let mut records = self.load()?;
        tracing::debug!(token_id = record.token_id, path = %self.path.display(), "saving gallery record");
        records.insert(record.token_id, record);
        self.store(&records)
    }

    fn get(&self, token_id: u64) -> XenftResult<Option<GalleryRecord>> {
        Ok(self.load()?.remove(&token_id))
    }

    fn list(&self) -> XenftResult<Vec<GalleryRecord>> {
        Ok(self.load()?.into_values().collect())
    }

    fn remove(&mut self, token_id: u64) -> XenftResult<bool> {
        let mut records = self.load()?;
        let existed = records.remove(&token_id).is_some();
        if existed {
            self.store(&records)?;
        }
        Ok(existed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/store.rs"]
mod tests;
