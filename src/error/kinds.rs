use std::{fmt, io};

/// Crate-wide `Result` type using [`QueryshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, QueryshError>;

/// Top-level error type for querysh operations.
///
/// The completion engine itself never fails: lexical problems become
/// `unknown` tokens, syntactic problems become incomplete AST nodes, and
/// invalid chain methods are no-op transitions. This type covers only the
/// outer shell around the engine: configuration, schema files, and the
/// interactive console.
#[derive(Debug)]
pub enum QueryshError {
    /// Configuration errors.
    Config(ConfigError),

    /// Schema file errors.
    Schema(SchemaError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/// Schema-loading errors.
#[derive(Debug)]
pub enum SchemaError {
    /// Schema file not found.
    FileNotFound(String),

    /// Schema file is not valid JSON or has the wrong shape.
    InvalidFormat(String),

    /// A table reference points at nothing in the schema.
    UnknownTable(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for QueryshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryshError::Config(e) => write!(f, "Configuration error: {e}"),
            QueryshError::Schema(e) => write!(f, "Schema error: {e}"),
            QueryshError::Io(e) => write!(f, "I/O error: {e}"),
            QueryshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::FileNotFound(path) => write!(f, "Schema file not found: {path}"),
            SchemaError::InvalidFormat(msg) => write!(f, "Invalid schema format: {msg}"),
            SchemaError::UnknownTable(name) => write!(f, "Unknown table: {name}"),
        }
    }
}

impl std::error::Error for QueryshError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for SchemaError {}

/* ========================= Conversions to QueryshError ========================= */

impl From<io::Error> for QueryshError {
    fn from(err: io::Error) -> Self {
        QueryshError::Io(err)
    }
}

impl From<ConfigError> for QueryshError {
    fn from(err: ConfigError) -> Self {
        QueryshError::Config(err)
    }
}

impl From<SchemaError> for QueryshError {
    fn from(err: SchemaError) -> Self {
        QueryshError::Schema(err)
    }
}

impl From<String> for QueryshError {
    fn from(msg: String) -> Self {
        QueryshError::Generic(msg)
    }
}

impl From<&str> for QueryshError {
    fn from(msg: &str) -> Self {
        QueryshError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_config_error() {
        let err = QueryshError::Config(ConfigError::InvalidValue {
            field: "suggestions.limit".to_string(),
            value: "lots".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value 'lots' for field 'suggestions.limit'"
        );
    }

    #[test]
    fn test_display_schema_error() {
        let err = QueryshError::Schema(SchemaError::UnknownTable("orders".to_string()));
        assert_eq!(err.to_string(), "Schema error: Unknown table: orders");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: QueryshError = io_err.into();
        assert!(matches!(err, QueryshError::Io(_)));
    }

    #[test]
    fn test_from_str() {
        let err: QueryshError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
