//! Decode packed XENFT mint records and render them as images.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: packed 256-bit record -> [`DecodedMintInfo`] ([`decode`])
//! 2. **Theme**: wall-clock time -> [`ColorScheme`] ([`current_scheme`]), asset -> [`RarityInfo`]
//!    ([`classify`])
//! 3. **Compose**: asset + scheme + rarity -> [`ImageDescription`] ([`compose`]), serialized
//!    with [`ImageDescription::to_svg`]
//! 4. **Rasterize** (optional): SVG -> PNG ([`rasterize_png`])
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Total core**: decode, classify and compose never fail from the caller's point of view.
//!   Bad input degrades to an all-zero record, an `Unknown` rarity or an error image. The
//!   `try_*` functions expose the underlying [`XenftError`].
//! - **Explicit time**: every time-dependent function takes `now`; only the `*_now` helpers read
//!   the clock.
//! - **Deterministic layers**: apart from the decoration layer, an image is a pure function of
//!   asset and time ([`ImageDescription::deterministic_fingerprint`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chain;
mod compose;
mod foundation;
mod gallery;
mod mint;
mod render;
mod theme;

pub use alloy_primitives::U256;

pub use chain::session::{ChainSource, FixtureChain, Session, SessionState};
pub use compose::composer::{
    ComposeSettings, ELLIPSE_RX, ELLIPSE_RY, MaturityStatus, VisualParams, compose, compose_now,
    compose_with, try_compose_with,
};
pub use compose::error_image::compose_error;
pub use compose::fingerprint::ImageFingerprint;
pub use compose::model::{Element, ImageDescription, Layer, LayerKind, Style, TextAnchor};
pub use foundation::core::{Canvas, Color, Point};
pub use foundation::error::{XenftError, XenftResult};
pub use foundation::time::{
    SECONDS_PER_DAY, days_since_epoch, from_unix_seconds, iso8601, unix_seconds,
};
pub use gallery::store::{GalleryRecord, GalleryStore, JsonFileGallery, MemoryGallery};
pub use mint::asset::{AssetInput, ChainTokenData, XenftAsset};
pub use mint::decode::{
    AMP, BitField, CLASS, CONSUMED_BITS, ClassFlags, DecodedMintInfo, EAA, LAYOUT, MATURITY_TS,
    RANK, REDEEMED, TERM, decode, decode_or_default, encode, parse_packed, try_decode_str,
};
pub use render::batch::{BatchSettings, RenderedToken, render_gallery};
pub use render::raster::{RasterImage, RasterSettings, rasterize_png, rasterize_svg};
pub use theme::cycle::{
    CYCLE_COUNT, CYCLE_DAYS, ColorScheme, PALETTES, Palette, current_scheme, current_scheme_now,
};
pub use theme::rarity::{Category, Rarity, RarityInfo, classify, try_classify};
