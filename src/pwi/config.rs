//! Configuration types for decoding.
//!
//! This module defines the options that control how strictly a document is
//! decoded and where the well-known tables are found.

use super::consts::{DRAWING_TABLE_ID, MIN_CANVAS_EDGE, PARAGRAPH_TABLE_ID};
use super::types::Size;

/// Options for decoding a psw/pwi document.
///
/// # Examples
///
/// ```rust
/// use pocketword::pwi::DecodeOptions;
///
/// // Create with defaults
/// let options = DecodeOptions::default();
///
/// // Or customize
/// let options = DecodeOptions::new()
///     .with_strict(true)
///     .with_parallel(true);
/// ```
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Abort instead of skipping a paragraph, picture, drawing or shape that
    /// cannot be decoded
    pub strict: bool,
    /// Id of the paragraph table chunk
    pub paragraph_table_id: u16,
    /// Id of the drawing table chunk
    pub drawing_table_id: u16,
    /// Resolve drawings on the rayon thread pool
    pub parallel: bool,
    /// Smallest canvas the bounds may report
    pub min_canvas: Size,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            paragraph_table_id: PARAGRAPH_TABLE_ID,
            drawing_table_id: DRAWING_TABLE_ID,
            parallel: false,
            min_canvas: Size::new(MIN_CANVAS_EDGE, MIN_CANVAS_EDGE),
        }
    }
}

impl DecodeOptions {
    /// Create a new `DecodeOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether undecodable units abort the whole decode.
    ///
    /// Diagnostics that do not drop any content, such as an unsupported
    /// version or transform, are never escalated.
    #[inline]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[inline]
    pub fn with_paragraph_table_id(mut self, id: u16) -> Self {
        self.paragraph_table_id = id;
        self
    }

    #[inline]
    pub fn with_drawing_table_id(mut self, id: u16) -> Self {
        self.drawing_table_id = id;
        self
    }

    /// Set whether drawings are resolved in parallel.
    ///
    /// Output and diagnostic order are the same either way.
    #[inline]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline]
    pub fn with_min_canvas(mut self, size: Size) -> Self {
        self.min_canvas = size;
        self
    }
}
