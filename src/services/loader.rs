use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading an export file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Export file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected export layout: {0}")]
    Shape(String),
}

/// Read and parse a `matches.json` export
///
/// The whole file must parse; there is no partial load.
pub fn load_export<P: AsRef<Path>>(path: P) -> Result<Vec<Value>, LoadError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound { path: path.to_path_buf() }
        } else {
            LoadError::Io { path: path.to_path_buf(), source }
        }
    })?;

    tracing::debug!("Read {} bytes from {}", contents.len(), path.display());

    let entries = parse_document(&contents).map_err(|e| match e {
        ParseFailure::Json(source) => LoadError::Parse { path: path.to_path_buf(), source },
        ParseFailure::Shape(msg) => LoadError::Shape(msg),
    })?;

    tracing::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse an export document already held in memory
pub fn parse_export(contents: &str) -> Result<Vec<Value>, LoadError> {
    parse_document(contents).map_err(|e| match e {
        ParseFailure::Json(source) => LoadError::Parse { path: PathBuf::from("<memory>"), source },
        ParseFailure::Shape(msg) => LoadError::Shape(msg),
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    Shape(String),
}

fn parse_document(contents: &str) -> Result<Vec<Value>, ParseFailure> {
    let document: Value = serde_json::from_str(contents).map_err(ParseFailure::Json)?;

    let Value::Array(entries) = document else {
        return Err(ParseFailure::Shape(format!(
            "expected a top-level array of entries, found {}",
            json_kind(&document)
        )));
    };

    if let Some((index, entry)) = entries.iter().enumerate().find(|(_, e)| !e.is_object()) {
        return Err(ParseFailure::Shape(format!(
            "entry {} is {}, expected an object",
            index,
            json_kind(entry)
        )));
    }

    Ok(entries)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_export(dir.path().join("matches.json"));

        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"like": [{{"timestamp": "2024-01-01 10:00:00"}}]}}, {{}}]"#).unwrap();

        let entries = load_export(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"like\": ").unwrap();

        let result = load_export(file.path());
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_top_level_must_be_array() {
        let result = parse_export(r#"{"like": true}"#);
        assert!(matches!(result, Err(LoadError::Shape(_))));
    }

    #[test]
    fn test_entries_must_be_objects() {
        let result = parse_export(r#"[{}, 42]"#);
        match result {
            Err(LoadError::Shape(msg)) => assert!(msg.contains("entry 1")),
            other => panic!("expected shape error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_export("[]").unwrap().is_empty());
    }
}
