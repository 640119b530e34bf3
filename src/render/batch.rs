use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    compose::{composer::compose, model::ImageDescription},
    foundation::error::{XenftError, XenftResult},
    mint::asset::XenftAsset,
    theme::rarity::{RarityInfo, classify},
};

/// Threading options for [`render_gallery`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSettings {
    /// Render on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Pool size; rayon's default when `None`.
    pub threads: Option<usize>,
}

/// One rendered gallery entry.
#[derive(Clone, Debug)]
pub struct RenderedToken {
    /// Token id, if the asset had one.
    pub token_id: Option<u64>,
    /// Classification used for the image.
    pub rarity: RarityInfo,
    /// Composed image; the error image if the asset could not be drawn.
    pub image: ImageDescription,
}

impl RenderedToken {
    /// SVG document for this entry.
    pub fn svg(&self) -> String {
        self.image.to_svg()
    }
}

/// Render every asset independently at `now`.
///
/// A broken asset produces an error image in its slot and never aborts the batch. Output order
/// matches input order.
#[tracing::instrument(skip(assets), fields(count = assets.len()))]
pub fn render_gallery(
    assets: &[XenftAsset],
    now: DateTime<Utc>,
    settings: &BatchSettings,
) -> XenftResult<Vec<RenderedToken>> {
    if !settings.parallel {
        return Ok(assets.iter().map(|a| render_one(a, now)).collect());
    }

    let pool = build_thread_pool(settings.threads)?;
    Ok(pool.install(|| assets.par_iter().map(|a| render_one(a, now)).collect()))
}

fn render_one(asset: &XenftAsset, now: DateTime<Utc>) -> RenderedToken {
    RenderedToken {
        token_id: asset.token_id,
        rarity: classify(asset),
        image: compose(asset, now),
    }
}

fn build_thread_pool(threads: Option<usize>) -> XenftResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        if n == 0 {
            return Err(XenftError::validation("thread count must be > 0"));
        }
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| XenftError::validation(format!("failed to build rayon pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
