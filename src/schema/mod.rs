//! Database schema model.
//!
//! The schema is supplied from outside the engine (the console loads it from
//! a JSON file; an embedding editor would pass its own). The engine treats it
//! as read-only reference data for table, column, and value suggestions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// A database schema: the set of tables the builder DSL can reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    /// Tables in the schema.
    pub tables: Vec<SchemaTable>,
}

/// A single table with its columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaTable {
    /// Table name as referenced in the DSL.
    pub name: String,

    /// Columns in declaration order.
    pub columns: Vec<SchemaColumn>,
}

/// A single column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaColumn {
    /// Column name.
    pub name: String,

    /// SQL type name, e.g. `integer`, `varchar(255)`, `timestamp`.
    #[serde(rename = "type")]
    pub column_type: String,

    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,

    /// Whether the column is part of the primary key.
    #[serde(default, rename = "primaryKey")]
    pub primary_key: bool,

    /// Default value expression, if any.
    #[serde(default, rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Broad value category of a SQL column type.
///
/// Drives typed value suggestions: a numeric column gets numeric literal
/// candidates, a boolean column gets `true`/`false`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Number,
    String,
    Boolean,
    Date,
    Unknown,
}

impl TypeKind {
    /// Classify a SQL type name into a value category.
    pub fn from_sql_type(column_type: &str) -> Self {
        let ty = column_type.to_ascii_lowercase();

        if ["int", "serial", "decimal", "double", "float", "numeric", "real"]
            .iter()
            .any(|k| ty.contains(k))
        {
            return TypeKind::Number;
        }
        if ["char", "text", "uuid", "json", "enum"].iter().any(|k| ty.contains(k)) {
            return TypeKind::String;
        }
        if ty.contains("bool") {
            return TypeKind::Boolean;
        }
        if ["timestamp", "date", "time"].iter().any(|k| ty.contains(k)) {
            return TypeKind::Date;
        }

        TypeKind::Unknown
    }

    /// Neutral placeholder literal for this category, used in snippets.
    pub fn placeholder(&self) -> &'static str {
        match self {
            TypeKind::Number => "0",
            TypeKind::String => "\"\"",
            TypeKind::Boolean => "false",
            TypeKind::Date => "now()",
            TypeKind::Unknown => "null",
        }
    }
}

impl Schema {
    /// Load a schema from a JSON file.
    ///
    /// Expected shape: `{ "tables": [{ "name": ..., "columns": [...] }] }`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SchemaError::FileNotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let schema: Schema = serde_json::from_str(&contents)
            .map_err(|e| SchemaError::InvalidFormat(e.to_string()))?;

        Ok(schema)
    }

    /// Small built-in schema used when no schema file is supplied.
    pub fn demo() -> Self {
        fn col(name: &str, ty: &str) -> SchemaColumn {
            SchemaColumn {
                name: name.to_string(),
                column_type: ty.to_string(),
                nullable: false,
                primary_key: false,
                default_value: None,
            }
        }
        fn pk() -> SchemaColumn {
            SchemaColumn {
                primary_key: true,
                ..col("id", "serial")
            }
        }
        fn nullable(name: &str, ty: &str) -> SchemaColumn {
            SchemaColumn {
                nullable: true,
                ..col(name, ty)
            }
        }
        fn table(name: &str, columns: Vec<SchemaColumn>) -> SchemaTable {
            SchemaTable {
                name: name.to_string(),
                columns,
            }
        }

        Schema {
            tables: vec![
                table(
                    "users",
                    vec![
                        pk(),
                        col("email", "varchar(255)"),
                        nullable("name", "text"),
                        col("active", "boolean"),
                        col("created_at", "timestamp"),
                    ],
                ),
                table(
                    "posts",
                    vec![
                        pk(),
                        col("author_id", "integer"),
                        col("title", "text"),
                        nullable("body", "text"),
                        nullable("published_at", "timestamp"),
                    ],
                ),
                table(
                    "comments",
                    vec![
                        pk(),
                        col("post_id", "integer"),
                        col("author_id", "integer"),
                        col("body", "text"),
                    ],
                ),
            ],
        }
    }

    /// Find a table by name.
    pub fn table(&self, name: &str) -> Option<&SchemaTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Find a column by `table` and `column` name.
    pub fn column(&self, table: &str, column: &str) -> Option<&SchemaColumn> {
        self.table(table).and_then(|t| t.column(column))
    }

    /// All table names in declaration order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

impl SchemaTable {
    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl SchemaColumn {
    /// The broad value category of this column's type.
    pub fn type_kind(&self) -> TypeKind {
        TypeKind::from_sql_type(&self.column_type)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two-table schema shared across the crate's tests.
    pub(crate) fn sample_schema() -> Schema {
        Schema {
            tables: vec![
                SchemaTable {
                    name: "users".to_string(),
                    columns: vec![
                        SchemaColumn {
                            name: "id".to_string(),
                            column_type: "serial".to_string(),
                            nullable: false,
                            primary_key: true,
                            default_value: None,
                        },
                        SchemaColumn {
                            name: "email".to_string(),
                            column_type: "varchar(255)".to_string(),
                            nullable: false,
                            primary_key: false,
                            default_value: None,
                        },
                        SchemaColumn {
                            name: "active".to_string(),
                            column_type: "boolean".to_string(),
                            nullable: true,
                            primary_key: false,
                            default_value: Some("true".to_string()),
                        },
                    ],
                },
                SchemaTable {
                    name: "posts".to_string(),
                    columns: vec![
                        SchemaColumn {
                            name: "id".to_string(),
                            column_type: "serial".to_string(),
                            nullable: false,
                            primary_key: true,
                            default_value: None,
                        },
                        SchemaColumn {
                            name: "author_id".to_string(),
                            column_type: "integer".to_string(),
                            nullable: false,
                            primary_key: false,
                            default_value: None,
                        },
                        SchemaColumn {
                            name: "published_at".to_string(),
                            column_type: "timestamp".to_string(),
                            nullable: true,
                            primary_key: false,
                            default_value: None,
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_type_kind_classification() {
        assert_eq!(TypeKind::from_sql_type("integer"), TypeKind::Number);
        assert_eq!(TypeKind::from_sql_type("serial"), TypeKind::Number);
        assert_eq!(TypeKind::from_sql_type("double precision"), TypeKind::Number);
        assert_eq!(TypeKind::from_sql_type("varchar(255)"), TypeKind::String);
        assert_eq!(TypeKind::from_sql_type("text"), TypeKind::String);
        assert_eq!(TypeKind::from_sql_type("uuid"), TypeKind::String);
        assert_eq!(TypeKind::from_sql_type("boolean"), TypeKind::Boolean);
        assert_eq!(TypeKind::from_sql_type("timestamptz"), TypeKind::Date);
        assert_eq!(TypeKind::from_sql_type("bytea"), TypeKind::Unknown);
    }

    #[test]
    fn test_find_table_and_column() {
        let schema = sample_schema();

        assert!(schema.table("users").is_some());
        assert!(schema.table("missing").is_none());

        let col = schema.column("users", "email").unwrap();
        assert_eq!(col.column_type, "varchar(255)");
        assert!(schema.column("users", "missing").is_none());
        assert!(schema.column("missing", "id").is_none());
    }

    #[test]
    fn test_table_names() {
        let schema = sample_schema();
        assert_eq!(schema.table_names(), vec!["users", "posts"]);
    }

    #[test]
    fn test_deserialize_schema_json() {
        let json = r#"{
            "tables": [
                {
                    "name": "users",
                    "columns": [
                        { "name": "id", "type": "serial", "primaryKey": true },
                        { "name": "email", "type": "text", "nullable": false }
                    ]
                }
            ]
        }"#;

        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.tables.len(), 1);
        let users = schema.table("users").unwrap();
        assert!(users.column("id").unwrap().primary_key);
        assert!(!users.column("email").unwrap().nullable);
    }

    #[test]
    fn test_demo_schema_shape() {
        let schema = Schema::demo();
        assert_eq!(schema.tables.len(), 3);
        assert!(schema.column("users", "email").is_some());
        assert!(schema.column("comments", "post_id").is_some());
        assert!(schema.column("users", "id").unwrap().primary_key);
    }

    #[test]
    fn test_column_type_kind() {
        let schema = sample_schema();
        assert_eq!(schema.column("users", "id").unwrap().type_kind(), TypeKind::Number);
        assert_eq!(schema.column("users", "active").unwrap().type_kind(), TypeKind::Boolean);
        assert_eq!(
            schema.column("posts", "published_at").unwrap().type_kind(),
            TypeKind::Date
        );
    }
}
