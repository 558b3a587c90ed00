//! Renderer input model.
//!
//! A [`Scene`] is what a vector renderer needs from a decoded document: the
//! canvas size and a flat list of top-level drawables with absolute
//! coordinates and resolved colors. Building it involves no further decoding.
//!
//! Inline picture strokes come first, in paragraph order, followed by the
//! drawings in table order. A drawing with a single shape is emitted as that
//! shape; a drawing with several becomes a group named `drawing-<id>`.
//!
//! # Example
//!
//! ```rust,no_run
//! use pocketword::pwi::Document;
//! use pocketword::render::{RenderOptions, Scene};
//!
//! let doc = Document::open("sketch.pwi")?;
//! let scene = Scene::from_document(&doc, &RenderOptions::new().with_debug_overlay(true));
//! println!("{}x{}", scene.canvas.width, scene.canvas.height);
//! # Ok::<(), pocketword::common::Error>(())
//! ```

#[cfg(feature = "svg")]
pub mod svg;

use crate::pwi::{Document, Drawing, Point, Polyline, Rgb, Size, Stroke};
use serde::Serialize;

/// Font size of debug overlay labels
pub const DEBUG_LABEL_SIZE: u32 = 20;

/// A renderable element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Drawable {
    /// Open line through `points`, never filled
    Polyline {
        points: Vec<Point>,
        stroke: Rgb,
        stroke_width: u32,
    },
    /// Closed filled outline
    Polygon {
        points: Vec<Point>,
        stroke: Rgb,
        fill: Rgb,
        stroke_width: u32,
    },
    /// Unfilled rectangle outline
    Rect {
        origin: Point,
        size: Size,
        stroke: Rgb,
        stroke_width: u32,
    },
    /// Text anchored at its baseline start
    Label {
        position: Point,
        text: String,
        color: Rgb,
        font_size: u32,
    },
    /// Named group of drawables
    Group { name: String, children: Vec<Drawable> },
}

impl Drawable {
    /// Drawable for a decoded polyline; filled shapes become polygons.
    pub fn from_polyline(shape: &Polyline) -> Self {
        let stroke_width = shape.stroke_width as u32;
        match shape.fill_color() {
            Some(fill) => Drawable::Polygon {
                points: shape.points.clone(),
                stroke: shape.stroke,
                fill,
                stroke_width,
            },
            None => Drawable::Polyline {
                points: shape.points.clone(),
                stroke: shape.stroke,
                stroke_width,
            },
        }
    }

    fn from_stroke(stroke: &Stroke) -> Self {
        Drawable::Polyline {
            points: stroke.points.clone(),
            stroke: stroke.color,
            stroke_width: stroke.width as u32,
        }
    }
}

/// Canvas size plus top-level drawables, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub canvas: Size,
    pub drawables: Vec<Drawable>,
}

/// Options for building a [`Scene`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Outline and label every drawing frame
    pub debug_overlay: bool,
}

impl RenderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.debug_overlay = enabled;
        self
    }
}

impl Scene {
    /// Build the scene for `doc`.
    ///
    /// With `options.debug_overlay` set, every drawing frame is preceded by
    /// a red outline and a label giving its origin, size and anchor line.
    pub fn from_document(doc: &Document, options: &RenderOptions) -> Self {
        let mut drawables = Vec::new();

        for paragraph in &doc.paragraphs {
            for picture in &paragraph.pictures {
                drawables.extend(picture.strokes.iter().map(Drawable::from_stroke));
            }
        }

        for drawing in &doc.drawings {
            if options.debug_overlay {
                drawables.extend(debug_overlay(drawing));
            }
            if let Some(drawable) = drawing_drawable(drawing) {
                drawables.push(drawable);
            }
        }

        Scene {
            canvas: doc.canvas.size(),
            drawables,
        }
    }
}

fn drawing_drawable(drawing: &Drawing) -> Option<Drawable> {
    match drawing.shapes.as_slice() {
        [] => None,
        [shape] => Some(Drawable::from_polyline(shape)),
        shapes => Some(Drawable::Group {
            name: format!("drawing-{}", drawing.id),
            children: shapes.iter().map(Drawable::from_polyline).collect(),
        }),
    }
}

fn debug_overlay(drawing: &Drawing) -> [Drawable; 2] {
    let Drawing {
        origin, size, line, ..
    } = drawing;
    [
        Drawable::Rect {
            origin: *origin,
            size: *size,
            stroke: Rgb::RED,
            stroke_width: 1,
        },
        Drawable::Label {
            position: *origin,
            text: format!(
                "({}, {}) {}x{} line {}",
                origin.x, origin.y, size.width, size.height, line
            ),
            color: Rgb::RED,
            font_size: DEBUG_LABEL_SIZE,
        },
    ]
}
