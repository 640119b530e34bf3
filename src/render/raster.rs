use std::sync::{Arc, OnceLock};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::Color,
    error::{XenftError, XenftResult},
};

const MAX_DIM: u32 = 8_192;

/// PNG output options.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSettings {
    /// Pixels per canvas unit.
    pub scale: f32,
    /// Color painted under the SVG; transparent when `None`.
    pub background: Option<Color>,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// Rasterized image in straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels.
    pub rgba8: Vec<u8>,
}

/// Parse and rasterize an SVG document.
pub fn rasterize_svg(svg: &str, settings: &RasterSettings) -> XenftResult<RasterImage> {
    if !settings.scale.is_finite() || settings.scale <= 0.0 {
        return Err(XenftError::validation("raster scale must be a positive number"));
    }

    let opts = usvg::Options {
        fontdb: system_fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = to_px(size.width() * settings.scale)?;
    let height = to_px(size.height() * settings.scale)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| XenftError::validation("failed to allocate svg pixmap"))?;
    if let Some(bg) = settings.background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    }

    let xform = resvg::tiny_skia::Transform::from_scale(settings.scale, settings.scale);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let rgba8 = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Ok(RasterImage {
        width,
        height,
        rgba8,
    })
}

/// Rasterize an SVG document and encode it as PNG bytes.
pub fn rasterize_png(svg: &str, settings: &RasterSettings) -> XenftResult<Vec<u8>> {
    let img = rasterize_svg(svg, settings)?;
    let buf = image::RgbaImage::from_raw(img.width, img.height, img.rgba8)
        .ok_or_else(|| XenftError::validation("raster buffer size mismatch"))?;

    let mut out = std::io::Cursor::new(Vec::new());
    buf.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out.into_inner())
}

fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    static FONTDB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTDB
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

fn to_px(v: f32) -> XenftResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(XenftError::validation("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(XenftError::validation(format!(
            "raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
