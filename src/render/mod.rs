//! Rendering module for converting extracted ALTO data to output formats.

mod json;
mod overlay;
mod text;

pub use json::{to_json, JsonFormat};
pub use overlay::{overlay_shapes, render_overlay_svg, to_svg, OverlayOptions, OverlayShape};
pub use text::{assemble_document_text, document_text, to_text, PageText, UNAVAILABLE_MARKER};
