use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    compose::{
        error_image::compose_error,
        model::{Element, ImageDescription, Layer, Style, TextAnchor},
    },
    foundation::{
        core::{Canvas, Color, Point},
        error::XenftResult,
        time::{self, SECONDS_PER_DAY},
    },
    mint::{asset::XenftAsset, decode::DecodedMintInfo},
    theme::{
        cycle::{self, CYCLE_COUNT, ColorScheme},
        rarity::{self, RarityInfo},
    },
};

/// Horizontal radius of the circle ellipse.
pub const ELLIPSE_RX: f64 = 300.0;
/// Vertical radius of the circle ellipse.
pub const ELLIPSE_RY: f64 = 150.0;

const DECORATION_OPACITY: f64 = 0.15;
const DECORATION_MIN_LEN: f64 = 20.0;
const DECORATION_MAX_LEN: f64 = 100.0;
const RING_RADIUS: f64 = 60.0;
const DIAMOND_HALF_W: f64 = 40.0;
const DIAMOND_HALF_H: f64 = 50.0;

/// Knobs for [`compose_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeSettings {
    /// Draw the random decoration layer.
    pub decorations: bool,
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self { decorations: true }
    }
}

/// Layout parameters derived from the VMU count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualParams {
    /// Base circle radius, `min(30 + vmu/10, 100)`.
    pub circle_radius: f64,
    /// Number of circles, `min(vmu, 20)`.
    pub circle_count: usize,
    /// Decoration density, `min(1 + vmu/50, 5)`.
    pub pattern_density: f64,
    /// Decoration line count, `ceil(density * 20)`.
    pub line_count: usize,
}

impl VisualParams {
    /// Parameters for `vmu_count` VMUs.
    pub fn for_vmu(vmu_count: u64) -> Self {
        let vmu = vmu_count as f64;
        let pattern_density = (1.0 + vmu / 50.0).min(5.0);
        Self {
            circle_radius: (30.0 + vmu / 10.0).min(100.0),
            circle_count: vmu_count.min(20) as usize,
            pattern_density,
            line_count: (pattern_density * 20.0).ceil() as usize,
        }
    }
}

/// Whether the token can be claimed yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaturityStatus {
    /// `now` is past the maturity instant.
    Matured,
    /// Whole days left, floored.
    Maturing {
        /// Days until maturity.
        days_to_maturity: u64,
    },
}

impl MaturityStatus {
    /// Status of a token maturing at `maturity_ts` (seconds) as seen at `now`.
    pub fn at(maturity_ts: u64, now: DateTime<Utc>) -> Self {
        let now_s = time::unix_seconds(now);
        if now_s > maturity_ts {
            MaturityStatus::Matured
        } else {
            MaturityStatus::Maturing {
                days_to_maturity: (maturity_ts - now_s) / SECONDS_PER_DAY,
            }
        }
    }

    /// Text shown on the image.
    pub fn label(self) -> String {
        match self {
            MaturityStatus::Matured => "Matured".to_owned(),
            MaturityStatus::Maturing { days_to_maturity } => {
                format!("Maturing: {days_to_maturity} days")
            }
        }
    }
}

/// Compose an image, failing if the asset has no usable token id.
pub fn try_compose_with<R: Rng>(
    asset: &XenftAsset,
    now: DateTime<Utc>,
    settings: &ComposeSettings,
    rng: &mut R,
) -> XenftResult<ImageDescription> {
    let token_id = asset.require_token_id()?;
    let scheme = cycle::current_scheme(now);
    let rarity = rarity::classify(asset);
    let params = VisualParams::for_vmu(asset.vmu_count);
    let canvas = Canvas::TOKEN;

    tracing::debug!(
        token_id,
        vmu_count = asset.vmu_count,
        circle_count = params.circle_count,
        circle_radius = params.circle_radius,
        rarity = %rarity.rarity,
        "composing token image"
    );

    let mut image = ImageDescription::new(canvas, scheme.background);
    if settings.decorations {
        image
            .layers
            .push(decoration_layer(canvas, &params, &scheme, rng));
    }
    image.layers.push(circle_layer(canvas, &params, &scheme));
    image.layers.push(motif_layer(canvas, &scheme, &rarity));
    image.layers.push(text_layer(
        token_id,
        asset,
        &rarity,
        &scheme,
        MaturityStatus::at(asset.mint_info.maturity_ts, now),
    ));
    Ok(image)
}

/// Compose an image. Never fails: an unusable asset yields the error image.
pub fn compose_with<R: Rng>(
    asset: &XenftAsset,
    now: DateTime<Utc>,
    settings: &ComposeSettings,
    rng: &mut R,
) -> ImageDescription {
    match try_compose_with(asset, now, settings, rng) {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(error = %err, "composition failed, rendering error image");
            compose_error(&err.to_string(), now)
        }
    }
}

/// [`compose_with`] using default settings and the thread-local random source.
pub fn compose(asset: &XenftAsset, now: DateTime<Utc>) -> ImageDescription {
    compose_with(asset, now, &ComposeSettings::default(), &mut rand::rng())
}

/// [`compose`] at the wall-clock time.
pub fn compose_now(asset: &XenftAsset) -> ImageDescription {
    compose(asset, Utc::now())
}

fn decoration_layer<R: Rng>(
    canvas: Canvas,
    params: &VisualParams,
    scheme: &ColorScheme,
    rng: &mut R,
) -> Layer {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let style = Style::stroke(scheme.tertiary, 1.0).with_opacity(DECORATION_OPACITY);

    let mut layer = Layer::decoration("decorations");
    for _ in 0..params.line_count {
        let from = Point::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
        let len = rng.random_range(DECORATION_MIN_LEN..=DECORATION_MAX_LEN);
        let angle = rng.random_range(0.0..TAU);
        let to = Point::new(from.x + len * angle.cos(), from.y + len * angle.sin());
        layer.push(Element::Line { from, to, style });
    }
    layer
}

fn circle_layer(canvas: Canvas, params: &VisualParams, scheme: &ColorScheme) -> Layer {
    let mut layer = Layer::deterministic("circles");
    let count = params.circle_count;
    if count == 0 {
        return layer;
    }

    let center = canvas.center();
    let n = count as f64;
    let opacity_steps = count.saturating_sub(1).max(1) as f64;
    for i in 0..count {
        let t = i as f64;
        let angle = t * TAU / n;
        let radius = params.circle_radius * (0.5 + 0.5 * (t / n * PI).sin());
        let opacity = 0.3 + 0.7 * (t / opacity_steps);
        layer.push(Element::Circle {
            center: Point::new(
                center.x + ELLIPSE_RX * angle.cos(),
                center.y + ELLIPSE_RY * angle.sin(),
            ),
            radius,
            style: Style::fill(scheme.primary).with_opacity(opacity),
        });
    }
    layer
}

fn motif_layer(canvas: Canvas, scheme: &ColorScheme, rarity: &RarityInfo) -> Layer {
    let c = canvas.center();
    let mut layer = Layer::deterministic("motif");
    layer.push(Element::Circle {
        center: c,
        radius: RING_RADIUS,
        style: Style::stroke(scheme.secondary, 3.0),
    });
    layer.push(Element::Polygon {
        points: vec![
            Point::new(c.x, c.y - DIAMOND_HALF_H),
            Point::new(c.x + DIAMOND_HALF_W, c.y),
            Point::new(c.x, c.y + DIAMOND_HALF_H),
            Point::new(c.x - DIAMOND_HALF_W, c.y),
        ],
        style: Style::fill(rarity.rarity_color).with_opacity(0.9),
    });
    layer
}

fn text_layer(
    token_id: u64,
    asset: &XenftAsset,
    rarity: &RarityInfo,
    scheme: &ColorScheme,
    maturity: MaturityStatus,
) -> Layer {
    let info: &DecodedMintInfo = &asset.mint_info;
    let left = |y: f64, content: String| label(20.0, y, TextAnchor::Start, content);
    let right = |y: f64, content: String| label(380.0, y, TextAnchor::End, content);

    let mut layer = Layer::deterministic("text");
    layer.elements = vec![
        Element::Text {
            position: Point::new(20.0, 36.0),
            content: format!("XENFT #{token_id}"),
            font_size: 20.0,
            bold: true,
            anchor: TextAnchor::Start,
            style: Style::fill(Color::WHITE),
        },
        Element::Text {
            position: Point::new(380.0, 36.0),
            content: format!("{} {}", rarity.category, rarity.rarity),
            font_size: 14.0,
            bold: true,
            anchor: TextAnchor::End,
            style: Style::fill(rarity.rarity_color),
        },
        left(320.0, format!("VMUs: {}", asset.vmu_count)),
        left(340.0, format!("Term: {} days", info.term)),
        left(360.0, format!("Rank: {}", info.rank)),
        left(380.0, format!("AMP: {}  EAA: {}", info.amp, info.eaa)),
        right(340.0, maturity.label()),
        right(
            360.0,
            format!("Cycle {}/{CYCLE_COUNT}", scheme.cycle_number()),
        ),
        right(
            380.0,
            format!("Next cycle in {} days", scheme.days_until_next_cycle),
        ),
    ];
    layer
}

fn label(x: f64, y: f64, anchor: TextAnchor, content: String) -> Element {
    Element::Text {
        position: Point::new(x, y),
        content,
        font_size: 12.0,
        bold: false,
        anchor,
        style: Style::fill(Color::WHITE),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
