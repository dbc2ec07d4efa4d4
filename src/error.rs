//! Error types for jshape.
//!
//! Parse errors are the only failures that can happen before the core
//! algorithms run; given a well-formed `JsonValue` the diff, inspect, and
//! graph operations are total and have no error conditions of their own.

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect input format for {path}")]
    UnknownFormat { path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize result to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum JshapeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_display() {
        let err = ParseError::file_not_found("data.json");
        assert_eq!(err.to_string(), "File not found: data.json");
    }

    #[test]
    fn test_unknown_format_display() {
        let err = ParseError::unknown_format("/path/to/file.bin");
        assert!(err.to_string().contains("Could not detect input format"));
        assert!(err.to_string().contains("/path/to/file.bin"));
    }

    #[test]
    fn test_jshape_error_from_parse_error() {
        let parse_err = ParseError::file_not_found("data.json");
        let err: JshapeError = parse_err.into();
        assert!(matches!(err, JshapeError::Parse(_)));
    }

    #[test]
    fn test_json_error_carries_message() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ParseError::json_error("<stdin>", source);
        assert!(err.to_string().starts_with("Invalid JSON in <stdin>"));
    }
}
