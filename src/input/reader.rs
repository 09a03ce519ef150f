use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::InspectError;

/// Path argument that selects stdin
pub const STDIN_ARG: &str = "-";

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Resolve the input from an optional `--path` argument
    ///
    /// Without an argument, `default_file` is looked up in the directory of
    /// the running executable rather than the working directory.
    pub fn resolve(path: Option<&Path>, default_file: &str) -> Self {
        match path {
            Some(p) if p.as_os_str() == STDIN_ARG => InputSource::Stdin,
            Some(p) => InputSource::File(p.to_path_buf()),
            None => InputSource::File(exe_dir().join(default_file)),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Directory containing the running executable, `.` when unknown
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read a JSON document from stdin or a file
pub struct InputReader;

impl InputReader {
    /// Load and parse the whole document
    ///
    /// # Returns
    /// * `Ok(Value)` - The parsed document
    /// * `Err(InspectError::InputNotFound)` - The file does not exist
    /// * `Err(InspectError::InvalidJson)` - The text is not valid JSON
    /// * `Err(InspectError::Io)` - Reading failed
    pub fn read_document(source: &InputSource) -> Result<Value, InspectError> {
        let text = match source {
            InputSource::File(path) => {
                if !path.is_file() {
                    return Err(InspectError::InputNotFound {
                        path: path.clone(),
                        cwd: std::env::current_dir().unwrap_or_default(),
                    });
                }
                fs::read_to_string(path)?
            }
            InputSource::Stdin => {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        debug!("Read {} bytes from {}", text.len(), source);

        Self::parse(&text)
    }

    /// Parse document text, rejecting anything that is not valid JSON
    ///
    /// Nesting depth is unlimited. The stack grows on demand while parsing
    /// instead of failing at serde_json's default recursion limit.
    pub fn parse(text: &str) -> Result<Value, InspectError> {
        let invalid = |e: serde_json::Error| InspectError::InvalidJson(e.to_string());

        let mut deserializer = serde_json::Deserializer::from_str(text);
        deserializer.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
            .map_err(invalid)?;
        deserializer.end().map_err(invalid)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    fn create_temp_json_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("world.json");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (temp_dir, file_path)
    }

    #[test]
    fn test_read_fixture_document() {
        let source = InputSource::File(fixture_path("dynmap_world.json"));
        let document = InputReader::read_document(&source).unwrap();
        assert!(document.get("players").unwrap().is_array());
        assert!(document.get("updates").unwrap().is_array());
    }

    #[test]
    fn test_read_temp_document() {
        let (_dir, path) = create_temp_json_file(r#"{"players": []}"#);
        let document = InputReader::read_document(&InputSource::File(path)).unwrap();
        assert_eq!(document, serde_json::json!({"players": []}));
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let path = fixture_path("nonexistent.json");
        match InputReader::read_document(&InputSource::File(path.clone())) {
            Err(InspectError::InputNotFound { path: reported, .. }) => {
                assert_eq!(reported, path);
            }
            other => panic!("Expected InputNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_input_not_found() {
        let dir = TempDir::new().unwrap();
        let result = InputReader::read_document(&InputSource::File(dir.path().to_path_buf()));
        assert!(matches!(result, Err(InspectError::InputNotFound { .. })));
    }

    #[test]
    fn test_invalid_json_returns_error() {
        let source = InputSource::File(fixture_path("invalid.json"));
        match InputReader::read_document(&source) {
            Err(InspectError::InvalidJson(_)) => {}
            other => panic!("Expected InvalidJson error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_and_invalid() {
        assert!(InputReader::parse("{}").is_ok());
        assert!(InputReader::parse("[]").is_ok());
        assert!(InputReader::parse("42").is_ok());
        assert!(matches!(
            InputReader::parse(r#"{"name": "Test", invalid}"#),
            Err(InspectError::InvalidJson(_))
        ));
        assert!(matches!(
            InputReader::parse(""),
            Err(InspectError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_deeply_nested_arrays() {
        let depth = 2_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let mut value = &InputReader::parse(&text).unwrap();
        let mut levels = 1;
        while let Some(inner) = value.as_array().and_then(|items| items.first()) {
            value = inner;
            levels += 1;
        }
        assert_eq!(levels, depth);
    }

    #[test]
    fn test_parse_deeply_nested_objects() {
        let depth = 1_000;
        let text = format!("{}1{}", r#"{"a":"#.repeat(depth), "}".repeat(depth));
        let document = InputReader::parse(&text).unwrap();
        assert!(document.get("a").unwrap().is_object());
    }

    #[test]
    fn test_parse_rejects_trailing_characters() {
        assert!(matches!(
            InputReader::parse("{} extra"),
            Err(InspectError::InvalidJson(_))
        ));
        assert!(InputReader::parse("{}  \n").is_ok());
    }

    #[test]
    fn test_resolve_explicit_path() {
        let source = InputSource::resolve(Some(Path::new("data/world.json")), "ignored.json");
        assert_eq!(source, InputSource::File(PathBuf::from("data/world.json")));
    }

    #[test]
    fn test_resolve_stdin() {
        let source = InputSource::resolve(Some(Path::new("-")), "ignored.json");
        assert_eq!(source, InputSource::Stdin);
        assert_eq!(source.to_string(), "<stdin>");
    }

    #[test]
    fn test_resolve_default_next_to_executable() {
        let source = InputSource::resolve(None, "dynmap_world.json");
        assert_eq!(
            source,
            InputSource::File(exe_dir().join("dynmap_world.json"))
        );
    }
}
