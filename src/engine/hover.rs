//! Hover documentation: word + schema → markdown-ish text blocks.

use crate::schema::Schema;
use crate::state::METHOD_GRAPH;
use crate::suggest::{find_helper, helper_category, HelperCategory};

/// Documentation for a hovered word, as ordered content blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverDoc {
    pub contents: Vec<String>,
}

/// Documentation for `word`: the `db` root, a schema table, a schema
/// column, a chain method, or a helper. `None` when the word means nothing
/// here.
pub fn hover(word: &str, schema: &Schema) -> Option<HoverDoc> {
    if word == "db" {
        return Some(HoverDoc {
            contents: vec![
                "**db** - query builder database instance".to_string(),
                "Use `db.select()`, `db.insert()`, `db.update()`, `db.delete()`".to_string(),
            ],
        });
    }

    if let Some(table) = schema.table(word) {
        let cols: Vec<String> = table
            .columns
            .iter()
            .map(|c| {
                let nullable = if c.nullable { " (nullable)" } else { "" };
                format!("- {}: {}{}", c.name, c.column_type, nullable)
            })
            .collect();

        return Some(HoverDoc {
            contents: vec![format!("**Table: {}**", table.name), cols.join("\n")],
        });
    }

    for table in &schema.tables {
        if let Some(col) = table.column(word) {
            let nullable = if col.nullable { " (nullable)" } else { "" };
            return Some(HoverDoc {
                contents: vec![
                    format!("**Column: {}.{}**", table.name, col.name),
                    format!("Type: {}{}", col.column_type, nullable),
                ],
            });
        }
    }

    if let Some(def) = METHOD_GRAPH.find_method_anywhere(word) {
        return Some(HoverDoc {
            contents: vec![format!("**{}**{}", def.name, def.detail()), def.doc.to_string()],
        });
    }

    if let Some(helper) = find_helper(word) {
        let category = match helper_category(word) {
            Some(HelperCategory::Comparison) => "comparison",
            Some(HelperCategory::Logical) => "logical",
            Some(HelperCategory::Null) => "null",
            Some(HelperCategory::Array) => "array",
            Some(HelperCategory::Sort) => "sort",
            Some(HelperCategory::Aggregate) => "aggregate",
            Some(HelperCategory::Sql) => "sql",
            None => "helper",
        };

        return Some(HoverDoc {
            contents: vec![
                format!("**{}** ({} helper)", helper.name, category),
                helper.doc.to_string(),
            ],
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_schema;

    #[test]
    fn test_hover_db() {
        let schema = sample_schema();
        let doc = hover("db", &schema).unwrap();
        assert!(doc.contents[0].contains("**db**"));
    }

    #[test]
    fn test_hover_table_lists_columns() {
        let schema = sample_schema();
        let doc = hover("users", &schema).unwrap();
        assert_eq!(doc.contents[0], "**Table: users**");
        assert!(doc.contents[1].contains("- email: varchar(255)"));
    }

    #[test]
    fn test_hover_column() {
        let schema = sample_schema();
        let doc = hover("author_id", &schema).unwrap();
        assert_eq!(doc.contents[0], "**Column: posts.author_id**");
        assert!(doc.contents[1].contains("integer"));
    }

    #[test]
    fn test_hover_column_nullable_flag() {
        let schema = sample_schema();
        let doc = hover("active", &schema).unwrap();
        assert!(doc.contents[1].contains("(nullable)"));
    }

    #[test]
    fn test_hover_method_from_graph() {
        let schema = sample_schema();
        let doc = hover("orderBy", &schema).unwrap();
        assert!(doc.contents[0].contains("**orderBy**"));
        assert!(doc.contents[0].contains("(columns)"));
        assert_eq!(doc.contents[1], "Order results by columns");
    }

    #[test]
    fn test_hover_helper_with_category() {
        let schema = sample_schema();
        let doc = hover("eq", &schema).unwrap();
        assert_eq!(doc.contents[0], "**eq** (comparison helper)");
        assert_eq!(doc.contents[1], "Equal: column = value");
    }

    #[test]
    fn test_hover_unknown_word() {
        let schema = sample_schema();
        assert!(hover("nonsense", &schema).is_none());
    }

    #[test]
    fn test_hover_table_shadows_method() {
        // A table named like a helper resolves as the table.
        let mut schema = sample_schema();
        schema.tables[0].name = "desc".to_string();
        let doc = hover("desc", &schema).unwrap();
        assert!(doc.contents[0].contains("Table"));
    }
}
