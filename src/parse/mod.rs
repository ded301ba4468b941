pub mod line;
pub mod map_builder;
pub mod translation;
pub mod translation_map;

pub use line::{
    parse_line, parse_line_bytes, parse_lines, split_lines, LineKind, LineRecord, MalformedReason,
    ParseWarning, BOM,
};
pub use map_builder::{extract_entries, Extraction, MapBuilder};
pub use translation::TranslationEntry;
pub use translation_map::TranslationMap;
