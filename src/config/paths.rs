use std::path::PathBuf;

/// File locations used when the CLI is run without explicit paths.
///
/// The layout assumes the tools run from a sibling directory of `source/`
/// and `init/`, with `output/` and `bak/` next to the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    /// Untranslated INI file, the input of `extract` and `scan`
    pub source: PathBuf,
    /// Where `extract` writes the map
    pub extracted_map: PathBuf,
    /// Map consumed by `apply`
    pub translation_map: PathBuf,
    /// File rewritten by `apply`
    pub output: PathBuf,
    /// Where the previous output is moved before a refresh
    pub backup: PathBuf,
}

impl Default for DefaultPaths {
    fn default() -> Self {
        Self {
            source: PathBuf::from("../source/global.ini"),
            extracted_map: PathBuf::from("translation_map.json"),
            translation_map: PathBuf::from("../init/translation_map_tc.json"),
            output: PathBuf::from("output/global.ini"),
            backup: PathBuf::from("bak/global_bak.ini"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let paths = DefaultPaths::default();
        assert_eq!(paths.source, PathBuf::from("../source/global.ini"));
        assert_eq!(paths.output, PathBuf::from("output/global.ini"));
        assert_eq!(paths.backup, PathBuf::from("bak/global_bak.ini"));
        assert!(paths.translation_map.ends_with("translation_map_tc.json"));
    }
}
