use std::fmt::{self, Write as _};

use crate::compose::model::{Element, ImageDescription, Style, TextAnchor};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

impl ImageDescription {
    /// Serialize as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(4096);
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    /// Write the SVG document into `out`.
    pub fn write_svg(&self, out: &mut impl fmt::Write) -> fmt::Result {
        let (w, h) = (self.canvas.width, self.canvas.height);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(
            out,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
            self.background
        )?;
        for layer in &self.layers {
            writeln!(out, r#"<g id="{}">"#, escape(&layer.id))?;
            for element in &layer.elements {
                write_element(out, element)?;
            }
            writeln!(out, "</g>")?;
        }
        writeln!(out, "</svg>")
    }
}

fn write_element(out: &mut impl fmt::Write, element: &Element) -> fmt::Result {
    match element {
        Element::Circle {
            center,
            radius,
            style,
        } => writeln!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            paint(style)
        ),
        Element::Line { from, to, style } => writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            paint(style)
        ),
        Element::Polygon { points, style } => {
            let pts = points
                .iter()
                .map(|p| format!("{},{}", num(p.x), num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, r#"<polygon points="{pts}"{}/>"#, paint(style))
        }
        Element::Text {
            position,
            content,
            font_size,
            bold,
            anchor,
            style,
        } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let weight = if *bold { "bold" } else { "normal" };
            writeln!(
                out,
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" font-weight="{weight}" text-anchor="{anchor}"{}>{}</text>"#,
                num(position.x),
                num(position.y),
                num(*font_size),
                paint(style),
                escape(content)
            )
        }
    }
}

fn paint(style: &Style) -> String {
    let mut attrs = String::new();
    match style.fill {
        Some(c) => {
            let _ = write!(attrs, r#" fill="{c}""#);
        }
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(c) = style.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{c}" stroke-width="{}""#,
            num(style.stroke_width)
        );
    }
    if style.opacity < 1.0 {
        let _ = write!(attrs, r#" opacity="{}""#, num(style.opacity));
    }
    attrs
}

/// At most two decimals, trailing zeros trimmed, no negative zero.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        s => s.to_owned(),
    }
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/svg.rs"]
mod tests;
