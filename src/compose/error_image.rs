use chrono::{DateTime, Utc};

use crate::{
    compose::model::{Element, ImageDescription, Layer, Style, TextAnchor},
    foundation::{
        core::{Canvas, Color, Point},
        time,
    },
};

const MESSAGE_WIDTH_CHARS: usize = 40;
const MESSAGE_MAX_LINES: usize = 6;
const FOOTER_GRAY: Color = Color::rgb(0x99, 0x99, 0x99);

/// Fixed-layout image shown when a token cannot be rendered.
///
/// Dark background, red title, the wrapped white message and a timestamp footer. Total.
pub fn compose_error(message: &str, now: DateTime<Utc>) -> ImageDescription {
    let canvas = Canvas::TOKEN;
    let c = canvas.center();

    let mut layer = Layer::deterministic("error");
    layer.push(Element::Text {
        position: Point::new(c.x, 140.0),
        content: "Error".to_owned(),
        font_size: 28.0,
        bold: true,
        anchor: TextAnchor::Middle,
        style: Style::fill(Color::ERROR_RED),
    });

    for (i, line) in wrap(message).into_iter().enumerate() {
        layer.push(Element::Text {
            position: Point::new(c.x, 190.0 + 20.0 * i as f64),
            content: line,
            font_size: 14.0,
            bold: false,
            anchor: TextAnchor::Middle,
            style: Style::fill(Color::WHITE),
        });
    }

    layer.push(Element::Text {
        position: Point::new(c.x, 380.0),
        content: time::iso8601(now),
        font_size: 10.0,
        bold: false,
        anchor: TextAnchor::Middle,
        style: Style::fill(FOOTER_GRAY),
    });

    let mut image = ImageDescription::new(canvas, Color::ERROR_BACKGROUND);
    image.layers.push(layer);
    image
}

// Greedy word wrap; overlong words are split, overflow ends in "...".
fn wrap(message: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > MESSAGE_WIDTH_CHARS {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..MESSAGE_WIDTH_CHARS).collect());
        }
        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > MESSAGE_WIDTH_CHARS && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push("Unknown error".to_owned());
    }

    if lines.len() > MESSAGE_MAX_LINES {
        lines.truncate(MESSAGE_MAX_LINES);
        if let Some(last) = lines.last_mut() {
            last.push_str("...");
        }
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/compose/error_image.rs"]
mod tests;
