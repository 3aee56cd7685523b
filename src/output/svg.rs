//! SVG output encoder.
//!
//! Vector output for rendered plots. Elements are collected into labeled
//! groups and serialized in insertion order.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::color::Rgba;
use crate::error::Result;

/// SVG encoder for vector output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color
    background: Rgba,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Circle; a missing fill renders as `fill="none"`
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Option<Rgba>,
        stroke: Option<Rgba>,
        stroke_width: f32,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    },
    /// Group of elements, labeled for accessibility and lookup
    Group {
        label: String,
        elements: Vec<SvgElement>,
    },
}

impl SvgElement {
    /// Create a labeled group.
    #[must_use]
    pub fn group(label: impl Into<String>, elements: Vec<SvgElement>) -> Self {
        SvgElement::Group { label: label.into(), elements }
    }

    /// Number of leaf elements, counting through groups.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            SvgElement::Group { elements, .. } => elements.iter().map(SvgElement::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(640, 400)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Rgba::WHITE, elements: Vec::new() }
    }

    /// Add an element, groups included.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" "#,
                r#"viewBox="0 0 {} {}" font-family="sans-serif" font-size="10">"#
            ),
            self.width, self.height, self.width, self.height
        );

        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.background.to_css()
        );

        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn stroke_attr(stroke: Option<Rgba>, stroke_width: f32) -> String {
    stroke
        .map(|s| format!(r#" stroke="{}" stroke-width="{stroke_width}""#, s.to_css()))
        .unwrap_or_default()
}

fn write_element(svg: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Group { label, elements } => {
            let _ = writeln!(svg, r#"{indent}<g aria-label="{}">"#, escape_xml(label));
            for child in elements {
                write_element(svg, child, depth + 1);
            }
            let _ = writeln!(svg, "{indent}</g>");
        }
        leaf => {
            let _ = writeln!(svg, "{indent}{}", element_to_svg(leaf));
        }
    }
}

/// Convert a leaf element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke, stroke_width } => {
            format!(
                r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"{}/>"#,
                fill.to_css(),
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Circle { cx, cy, r, fill, stroke, stroke_width } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), |f| f.to_css());
            format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill_attr}"{}/>"#,
                stroke_attr(*stroke, *stroke_width)
            )
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            format!(
                concat!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" "#,
                    r#"stroke="{}" stroke-width="{}"/>"#
                ),
                x1,
                y1,
                x2,
                y2,
                stroke.to_css(),
                stroke_width
            )
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                concat!(
                    r#"<text x="{}" y="{}" font-size="{}" fill="{}" "#,
                    r#"text-anchor="{}">{}</text>"#
                ),
                x,
                y,
                font_size,
                fill.to_css(),
                anchor_str,
                escape_xml(text)
            )
        }
        SvgElement::Group { label, .. } => format!(r#"<g aria-label="{}"/>"#, escape_xml(label)),
    }
}
