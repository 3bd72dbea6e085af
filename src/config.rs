//! Layered loading of [`SearchOptions`] from JSON files.
//!
//! The tracked `search.json` is applied over the defaults, then the untracked
//! `search.local.json` is applied over that.  Both are optional.

use crate::error::ConfigError;
use crate::models::SearchOptions;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "search.json";
pub const LOCAL_CONFIG_FILE_NAME: &str = "search.local.json";

/// Load options from `dir`, applying [`CONFIG_FILE_NAME`] and then
/// [`LOCAL_CONFIG_FILE_NAME`] over the defaults.  Keys of a later layer
/// replace the same keys of an earlier one; absent files are skipped.
pub fn load_options(dir: &Path) -> Result<SearchOptions, ConfigError> {
    let mut merged = Map::new();
    for file_name in [CONFIG_FILE_NAME, LOCAL_CONFIG_FILE_NAME] {
        if let Some(layer) = read_layer(&dir.join(file_name))? {
            merged.extend(layer);
        }
    }
    let options: SearchOptions =
        serde_json::from_value(Value::Object(merged)).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
    options.validate()?;
    Ok(options)
}

fn read_layer(path: &Path) -> Result<Option<Map<String, Value>>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let parsed: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: Some(path.to_path_buf()),
        source,
    })?;
    match parsed {
        Value::Object(map) => {
            d!({
                eprintln!("Loaded search configuration from: {}", path.display());
            });
            Ok(Some(map))
        }
        _ => Err(ConfigError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_options(dir.path()).unwrap(), SearchOptions::default());
    }

    #[test]
    fn local_file_overrides_tracked_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"debounce_ms": 500, "highlight_class": "hit"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE_NAME),
            r#"{"debounce_ms": 100}"#,
        )
        .unwrap();

        let options = load_options(dir.path()).unwrap();
        assert_eq!(options.debounce_ms, 100);
        assert_eq!(options.highlight_class, "hit");
        assert_eq!(options.min_query_chars, 2);
    }

    #[test]
    fn malformed_layer_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        match load_options(dir.path()) {
            Err(ConfigError::Parse { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn non_object_layer_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[1, 2]").unwrap();
        assert!(matches!(
            load_options(dir.path()),
            Err(ConfigError::NotAnObject { .. })
        ));
    }

    #[test]
    fn merged_values_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"highlight_tag": "mark"}"#).unwrap();
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE_NAME),
            r#"{"highlight_tag": "<b>"}"#,
        )
        .unwrap();
        assert!(matches!(
            load_options(dir.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
