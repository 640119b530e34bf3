use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Color, Point};

/// Fill, stroke and opacity of one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Fill color; `None` leaves the shape unfilled.
    pub fill: Option<Color>,
    /// Stroke color; `None` draws no outline.
    pub stroke: Option<Color>,
    /// Stroke width in canvas units.
    pub stroke_width: f64,
    /// Element opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Style {
    /// Solid fill, no outline.
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
            opacity: 1.0,
        }
    }

    /// Outline only.
    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            opacity: 1.0,
        }
    }

    /// Same style at another opacity (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    /// Text starts at the anchor.
    #[default]
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

/// One drawable primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Element {
    /// Circle.
    Circle {
        /// Center point.
        center: Point,
        /// Radius.
        radius: f64,
        /// Paint.
        style: Style,
    },
    /// Straight line segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Paint (stroke only).
        style: Style,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Paint.
        style: Style,
    },
    /// Single line of literal text.
    Text {
        /// Baseline anchor point.
        position: Point,
        /// Literal content.
        content: String,
        /// Font size in canvas units.
        font_size: f64,
        /// Bold weight.
        bold: bool,
        /// Alignment.
        anchor: TextAnchor,
        /// Paint (fill only).
        style: Style,
    },
}

/// Whether a layer is reproducible from its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    /// Pure function of asset, scheme and time.
    Deterministic,
    /// Drawn from a random source; differs between calls.
    Decoration,
}

/// Named group of elements, painted in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Group id, written as the SVG `<g id>`.
    pub id: String,
    /// Reproducibility of this layer.
    pub kind: LayerKind,
    /// Elements in painter's order.
    pub elements: Vec<Element>,
}

impl Layer {
    /// Empty deterministic layer.
    pub fn deterministic(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Deterministic,
            elements: Vec::new(),
        }
    }

    /// Empty decoration layer.
    pub fn decoration(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Decoration,
            elements: Vec::new(),
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }
}

/// Vector image: a canvas, a background and an ordered stack of layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescription {
    /// Logical canvas size.
    pub canvas: Canvas,
    /// Solid background painted under every layer.
    pub background: Color,
    /// Layers, bottom first.
    pub layers: Vec<Layer>,
}

impl ImageDescription {
    /// Empty image on `canvas`.
    pub fn new(canvas: Canvas, background: Color) -> Self {
        Self {
            canvas,
            background,
            layers: Vec::new(),
        }
    }

    /// Layer with the given id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers that are reproducible from inputs alone.
    pub fn deterministic_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers
            .iter()
            .filter(|l| l.kind == LayerKind::Deterministic)
    }

    /// Copy of this image with every decoration layer removed.
    pub fn without_decorations(&self) -> Self {
        Self {
            canvas: self.canvas,
            background: self.background,
            layers: self.deterministic_layers().cloned().collect(),
        }
    }

    /// Every text element's content, in painter's order.
    pub fn texts(&self) -> Vec<&str> {
        self.layers
            .iter()
            .flat_map(|l| l.elements.iter())
            .filter_map(|e| match e {
                Element::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}
