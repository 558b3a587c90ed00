// SVG generation
//
// Serializes a `Scene` into a standalone SVG document whose size and viewBox
// equal the canvas bounds.

use super::{Drawable, Scene};
use crate::common::error::{Error, Result};
use crate::pwi::{Point, Rgb, Size};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Escape XML special characters in text content and attribute values.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_points(out: &mut impl Write, points: &[Point]) -> fmt::Result {
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.write_char(' ')?;
        }
        write!(out, "{},{}", point.x, point.y)?;
    }
    Ok(())
}

/// Polyline or polygon element
#[derive(Debug, Clone)]
pub struct SvgLines<'a> {
    pub points: &'a [Point],
    pub stroke: Rgb,
    pub stroke_width: u32,
    /// Closed and filled when set
    pub fill: Option<Rgb>,
}

impl fmt::Display for SvgLines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.fill.is_some() { "polygon" } else { "polyline" };
        write!(f, r#"<{} points=""#, tag)?;
        write_points(f, self.points)?;
        match self.fill {
            Some(fill) => write!(f, r#"" fill="{}""#, fill)?,
            None => f.write_str(r#"" fill="none""#)?,
        }
        write!(
            f,
            r#" stroke="{}" stroke-width="{}" />"#,
            self.stroke, self.stroke_width
        )
    }
}

/// Outline-only rectangle element
#[derive(Debug, Clone)]
pub struct SvgRect {
    pub origin: Point,
    pub size: Size,
    pub stroke: Rgb,
    pub stroke_width: u32,
}

impl fmt::Display for SvgRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}" />"#,
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
            self.stroke,
            self.stroke_width
        )
    }
}

/// Text element
#[derive(Debug, Clone)]
pub struct SvgText<'a> {
    pub position: Point,
    pub text: &'a str,
    pub fill: Rgb,
    pub font_size: u32,
}

impl fmt::Display for SvgText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
            self.position.x,
            self.position.y,
            self.font_size,
            self.fill,
            escape(self.text)
        )
    }
}

/// SVG document writer over any [`fmt::Write`] sink
#[derive(Debug)]
pub struct SvgBuilder<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> SvgBuilder<W> {
    /// Start a document of the given canvas size.
    pub fn new(mut out: W, canvas: Size) -> std::result::Result<Self, fmt::Error> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = canvas.width,
            h = canvas.height
        )?;
        Ok(Self { out, depth: 1 })
    }

    fn line(&mut self, element: impl fmt::Display) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str(INDENT)?;
        }
        writeln!(self.out, "{}", element)
    }

    /// Append a drawable, recursing into groups.
    pub fn add(&mut self, drawable: &Drawable) -> fmt::Result {
        match drawable {
            Drawable::Polyline {
                points,
                stroke,
                stroke_width,
            } => self.line(SvgLines {
                points,
                stroke: *stroke,
                stroke_width: *stroke_width,
                fill: None,
            }),
            Drawable::Polygon {
                points,
                stroke,
                fill,
                stroke_width,
            } => self.line(SvgLines {
                points,
                stroke: *stroke,
                stroke_width: *stroke_width,
                fill: Some(*fill),
            }),
            Drawable::Rect {
                origin,
                size,
                stroke,
                stroke_width,
            } => self.line(SvgRect {
                origin: *origin,
                size: *size,
                stroke: *stroke,
                stroke_width: *stroke_width,
            }),
            Drawable::Label {
                position,
                text,
                color,
                font_size,
            } => self.line(SvgText {
                position: *position,
                text,
                fill: *color,
                font_size: *font_size,
            }),
            Drawable::Group { name, children } => {
                self.line(format_args!(r#"<g id="{}">"#, escape(name)))?;
                self.depth += 1;
                for child in children {
                    self.add(child)?;
                }
                self.depth -= 1;
                self.line("</g>")
            },
        }
    }

    /// Close the document and return the sink.
    pub fn finish(mut self) -> std::result::Result<W, fmt::Error> {
        self.out.write_str("</svg>\n")?;
        Ok(self.out)
    }
}

/// Serialize a scene as an SVG document.
///
/// # Examples
///
/// ```rust
/// use pocketword::pwi::Size;
/// use pocketword::render::{Scene, svg};
///
/// let scene = Scene {
///     canvas: Size::new(100, 100),
///     drawables: Vec::new(),
/// };
/// let text = svg::render(&scene)?;
/// assert!(text.contains(r#"viewBox="0 0 100 100""#));
/// # Ok::<(), pocketword::common::Error>(())
/// ```
pub fn render(scene: &Scene) -> Result<String> {
    write_scene(String::new(), scene)
        .map_err(|e| Error::Other(format!("Failed to write SVG: {}", e)))
}

/// Stream a scene as an SVG document into `out`, returning the sink.
pub fn write_scene<W: Write>(out: W, scene: &Scene) -> std::result::Result<W, fmt::Error> {
    let mut builder = SvgBuilder::new(out, scene.canvas)?;
    for drawable in &scene.drawables {
        builder.add(drawable)?;
    }
    builder.finish()
}
