use xxhash_rust::xxh3::Xxh3;

use crate::{
    compose::model::{Element, ImageDescription, Layer, Style, TextAnchor},
    foundation::core::{Color, Point},
};

const XXH3_SEED: u64 = 0x5845_4e46_545f_4650; // "XENFT_FP"

/// Stable 128-bit hash of an image's deterministic layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl ImageDescription {
    /// Fingerprint of the canvas, background and every deterministic layer.
    ///
    /// Decoration layers are skipped, so two renders of the same asset at the same instant
    /// always fingerprint equal.
    pub fn deterministic_fingerprint(&self) -> ImageFingerprint {
        let mut h = StableHasher::new();
        h.write_u32(self.canvas.width);
        h.write_u32(self.canvas.height);
        h.write_color(self.background);
        let layers: Vec<&Layer> = self.deterministic_layers().collect();
        h.write_usize(layers.len());
        for layer in layers {
            h.write_str(&layer.id);
            h.write_usize(layer.elements.len());
            for element in &layer.elements {
                h.write_element(element);
            }
        }
        h.finish()
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_usize(s.len());
        self.write_bytes(s.as_bytes());
    }

    fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    fn write_color(&mut self, c: Color) {
        self.write_bytes(&[c.r, c.g, c.b]);
    }

    fn write_opt_color(&mut self, c: Option<Color>) {
        match c {
            Some(c) => {
                self.write_u8(1);
                self.write_color(c);
            }
            None => self.write_u8(0),
        }
    }

    fn write_style(&mut self, s: &Style) {
        self.write_opt_color(s.fill);
        self.write_opt_color(s.stroke);
        self.write_f64(s.stroke_width);
        self.write_f64(s.opacity);
    }

    fn write_element(&mut self, e: &Element) {
        match e {
            Element::Circle {
                center,
                radius,
                style,
            } => {
                self.write_u8(0);
                self.write_point(*center);
                self.write_f64(*radius);
                self.write_style(style);
            }
            Element::Line { from, to, style } => {
                self.write_u8(1);
                self.write_point(*from);
                self.write_point(*to);
                self.write_style(style);
            }
            Element::Polygon { points, style } => {
                self.write_u8(2);
                self.write_usize(points.len());
                for p in points {
                    self.write_point(*p);
                }
                self.write_style(style);
            }
            Element::Text {
                position,
                content,
                font_size,
                bold,
                anchor,
                style,
            } => {
                self.write_u8(3);
                self.write_point(*position);
                self.write_str(content);
                self.write_f64(*font_size);
                self.write_bool(*bold);
                self.write_u8(match anchor {
                    TextAnchor::Start => 0,
                    TextAnchor::Middle => 1,
                    TextAnchor::End => 2,
                });
                self.write_style(style);
            }
        }
    }

    fn finish(self) -> ImageFingerprint {
        let v = self.inner.digest128();
        ImageFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fingerprint.rs"]
mod tests;
