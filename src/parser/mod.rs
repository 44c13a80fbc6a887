//! ALTO parsing module.

mod alto_parser;
mod confidence;
mod ocr_info;
mod options;
mod xml;

pub use alto_parser::AltoParser;
pub use options::{ErrorMode, ParseOptions};
