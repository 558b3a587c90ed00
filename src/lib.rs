//! Pocketword - A Rust library for decoding Pocket Word (psw/pwi) documents
//!
//! Pocket Word files store handwritten drawings and inline sketches as
//! chunked binary records with escape-coded point streams. This library
//! recovers their geometry and layout and turns it into a renderable scene.
//!
//! # Features
//!
//! - **Chunk container**: Zero-copy split of the file into id-keyed records
//! - **Point streams**: Bit-exact decoding of compact and extended point lists
//! - **Layout**: Paragraph text cursor walk with inline pictures, drawing
//!   frames anchored to text lines, and global canvas bounds
//! - **Diagnostics**: Unsupported or broken parts are reported, not guessed
//! - **Rendering**: A renderer-neutral scene model and an SVG writer
//!
//! # Example - Converting a document to SVG
//!
//! ```no_run
//! use pocketword::pwi::DecodeOptions;
//! use pocketword::render::{RenderOptions, Scene, svg};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = DecodeOptions::default();
//! let doc = pocketword::decode(std::fs::read("sketch.pwi")?, &options)?;
//!
//! for diagnostic in &doc.diagnostics {
//!     eprintln!("warning: {}", diagnostic);
//! }
//!
//! let scene = Scene::from_document(&doc, &RenderOptions::default());
//! std::fs::write("sketch.svg", svg::render(&scene)?)?;
//! # Ok(())
//! # }
//! ```

/// Low-level byte reading and the unified error type
pub mod common;

/// psw/pwi container and content decoding
pub mod pwi;

/// Renderer input model and output writers
pub mod render;

pub use common::{Error, Result};
pub use pwi::{DecodeOptions, Document};
pub use render::{Drawable, RenderOptions, Scene};

/// Decode an in-memory psw/pwi file.
///
/// Shorthand for [`Document::from_bytes_with_options`].
pub fn decode(data: impl Into<bytes::Bytes>, options: &DecodeOptions) -> Result<Document> {
    Document::from_bytes_with_options(data, options)
}
