//! Pocket Word (psw/pwi) document decoding.
//!
//! A psw/pwi file is a 14-byte header followed by a flat stream of chunks,
//! each keyed by a 16-bit id. Two well-known table chunks drive decoding:
//! the paragraph table (text flow, inline pictures) and the drawing table
//! (framed vector drawings made of polylines).
//!
//! # Architecture
//!
//! - `chunk`: container parsing into an id → chunk map
//! - `bits`: LSB-first bitstream and escape-coded compressed integers
//! - `points`: point list headers and delta streams
//! - `shape`: polyline and inline picture payloads
//! - `paragraph`: paragraph table and command streams
//! - `drawing`: drawing table, frames and canvas bounds
//! - `document`: header validation and the two-phase pipeline
//!
//! # Example
//!
//! ```rust,no_run
//! use pocketword::pwi::{DecodeOptions, Document};
//!
//! let options = DecodeOptions::new().with_parallel(true);
//! let doc = Document::open_with_options("sketch.pwi", &options)?;
//!
//! for drawing in &doc.drawings {
//!     println!("drawing 0x{:04X}: {} shapes", drawing.id, drawing.shapes.len());
//! }
//! # Ok::<(), pocketword::common::Error>(())
//! ```

pub mod bits;
pub mod chunk;
pub mod config;
pub mod consts;
pub mod diagnostics;
pub mod document;
pub mod drawing;
pub mod paragraph;
pub mod points;
pub mod shape;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use chunk::{Chunk, ChunkKind, ChunkMap};
pub use config::DecodeOptions;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use document::Document;
pub use drawing::Drawing;
pub use paragraph::{Paragraph, ParagraphCommand};
pub use shape::{InlinePicture, Polyline, Stroke};
pub use types::{CanvasBounds, Point, Rgb, Size};
