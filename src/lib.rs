//! Unicode (Mangal) Devanagari to Kruti Dev 010 conversion.
//!
//! Kruti Dev is a legacy font that draws Devanagari glyphs at Latin-1 code
//! points, so converting means re-encoding text in visual order: pre-base
//! matras move in front of their cluster, reph moves to the end, conjuncts
//! collapse to single glyphs where the font has one.
//!
//! ```
//! assert_eq!(kruti_engine::convert_text("धर्म"), "/keZ");
//! ```

pub mod batch;
pub mod conjunct;
pub mod converter;
pub mod docx;
pub mod normalizer;
pub mod position;
pub mod settings;
pub mod syllable;
pub mod tables;
pub mod tokenizer;
pub mod trace_init;
pub mod unicode;

pub use batch::convert_batch;
pub use converter::{
    convert_text, ConvertOptions, Converted, Converter, Explanation, Segment, UnmappedChar,
};
pub use docx::{DocxConverter, DocxError, DocxReport};
pub use tables::Tables;
