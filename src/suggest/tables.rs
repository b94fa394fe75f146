//! Table and column suggestions from the schema.

use crate::cursor::CursorIntent;
use crate::schema::{Schema, SchemaColumn, SchemaTable};

use super::{pad_sort, Suggestion, SuggestionKind};

/// Suggest every schema table.
///
/// With `close_after`, the insertion closes the argument parenthesis and
/// chains into the next dot; picking a table from `from(` lands the user
/// directly in method completion for the next stage.
pub fn suggest_tables(schema: &Schema, close_after: bool) -> Vec<Suggestion> {
    let mut suggestions = Vec::with_capacity(schema.tables.len());

    for (i, table) in schema.tables.iter().enumerate() {
        let insert = if close_after {
            format!("{})", table.name)
        } else {
            table.name.clone()
        };
        let cursor = crate::cursor::table_intent(close_after);

        let mut s = Suggestion::new(&table.name, SuggestionKind::Table, insert, cursor);
        s.detail = format!("{} columns", table.columns.len());
        s.doc = table_doc(table);
        s.sort = pad_sort(i);
        suggestions.push(s);
    }

    suggestions
}

/// Suggest `table.column` for every column of the named tables.
pub fn suggest_columns(schema: &Schema, table_names: &[String]) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut index = 0;

    for name in table_names {
        let Some(table) = schema.table(name) else {
            continue;
        };
        for col in &table.columns {
            suggestions.push(column_suggestion(table, col, index));
            index += 1;
        }
    }

    suggestions
}

/// Suggest `table.column` across the whole schema. Used where no table has
/// been bound yet, e.g. inside `select(` before `from`.
pub fn suggest_all_columns(schema: &Schema) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let mut index = 0;

    for table in &schema.tables {
        for col in &table.columns {
            suggestions.push(column_suggestion(table, col, index));
            index += 1;
        }
    }

    suggestions
}

/// Suggest the columns of one table, labeled by bare column name but
/// inserting the qualified reference.
pub fn suggest_table_columns(schema: &Schema, table_name: &str) -> Vec<Suggestion> {
    let Some(table) = schema.table(table_name) else {
        return Vec::new();
    };

    let mut suggestions = Vec::with_capacity(table.columns.len());

    for (i, col) in table.columns.iter().enumerate() {
        let mut s = Suggestion::new(
            &col.name,
            SuggestionKind::Column,
            format!("{}.{}", table.name, col.name),
            CursorIntent::None,
        );
        s.detail = column_detail(col);
        s.doc = column_doc(col);
        s.sort = pad_sort(i);
        suggestions.push(s);
    }

    suggestions
}

fn column_suggestion(table: &SchemaTable, col: &SchemaColumn, index: usize) -> Suggestion {
    let label = format!("{}.{}", table.name, col.name);
    let mut s = Suggestion::new(&label, SuggestionKind::Column, label.clone(), CursorIntent::None);
    s.detail = column_detail(col);
    s.doc = column_doc(col);
    s.sort = pad_sort(index);
    s
}

fn column_detail(col: &SchemaColumn) -> String {
    if col.nullable {
        format!("{} (nullable)", col.column_type)
    } else {
        col.column_type.clone()
    }
}

fn table_doc(table: &SchemaTable) -> String {
    let cols: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{}: {}", c.name, c.column_type))
        .collect();
    format!("Columns: {}", cols.join(", "))
}

fn column_doc(col: &SchemaColumn) -> String {
    let mut doc = format!("Type: {}", col.column_type);
    if col.primary_key {
        doc.push_str(" (PRIMARY KEY)");
    }
    if col.nullable {
        doc.push_str(" (nullable)");
    }
    if let Some(default) = &col.default_value {
        doc.push_str(&format!(" default={default}"));
    }
    doc
}
