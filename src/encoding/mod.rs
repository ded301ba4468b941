pub mod classifier;
pub mod scanner;

pub use classifier::{
    big5_pair_count, gbk_pair_count, has_double_byte_range, EncodingClassifier, EncodingVerdict,
    UTF8_BOM,
};
pub use scanner::{
    decode_big5, decode_gbk, is_cjk, scan_byte_pairs, FlaggedChar, Findings, ScanReport,
    SuspectPair, VariantScanner,
};
