//! Loads a `Catalog`'s strings files from a directory on disk.
//!
//! Behind the `fs` feature, since most embedders either bundle their
//! strings at compile time or fetch them from somewhere other than a
//! plain directory (spec.md §6). Each `<tag>.json` file in the directory
//! becomes one locale's `TranslationSet`; `<tag>` is taken verbatim as
//! the locale tag, so `en-GB.json` and `zh-Hant.json` both work.

use crate::error::{EngineError, Result};
use crate::model::{self, TranslationSet};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Walk `dir` (non-recursively into subdirectories containing their own
/// strings files is not supported; everything is expected at the top
/// level) and parse every `*.json` file found into a `TranslationSet`
/// keyed by its file stem.
pub fn load_strings_dir(dir: impl AsRef<Path>) -> Result<HashMap<String, TranslationSet>> {
    let dir = dir.as_ref();
    let mut sets = HashMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| EngineError::MalformedStructure {
            path: dir.display().to_string(),
            reason: format!("could not read directory entry: {err}"),
        })?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let locale_tag = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| EngineError::MalformedStructure {
                path: path.display().to_string(),
                reason: "file stem is not valid UTF-8".to_string(),
            })?;

        let contents = fs::read_to_string(path).map_err(|err| EngineError::MalformedStructure {
            path: path.display().to_string(),
            reason: format!("could not read file: {err}"),
        })?;
        log::debug!("loading strings file {:?} as locale {:?}", path, locale_tag);
        let set = model::parse_strings_file(locale_tag, &contents)?;
        sets.insert(locale_tag.to_string(), set);
    }
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_one_set_per_json_file() {
        let dir = tempdir();
        write_file(&dir, "en.json", r#"{"hi": "Hello"}"#);
        write_file(&dir, "fr.json", r#"{"hi": "Bonjour"}"#);
        write_file(&dir, "README.md", "not a strings file");

        let sets = load_strings_dir(&dir).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets["en"].get("hi").unwrap().translation.as_deref(), Some("Hello"));
        assert_eq!(sets["fr"].get("hi").unwrap().translation.as_deref(), Some("Bonjour"));
    }

    #[test]
    fn malformed_file_is_reported_with_its_path() {
        let dir = tempdir();
        write_file(&dir, "en.json", "not json");
        assert!(matches!(load_strings_dir(&dir), Err(EngineError::MalformedFile { .. })));
    }

    fn tempdir() -> std::path::PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("lokalize-loader-test-{}-{unique}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }
}
