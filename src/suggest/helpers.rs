//! The static catalog of DSL helper functions.
//!
//! Helpers are part of the DSL vocabulary itself, not the connected
//! database, so the catalog is a fixed table rather than schema-derived.

use crate::cursor::CursorIntent;

use super::{pad_sort, Suggestion, SuggestionKind};

/// Category of a helper, used to select which helpers fit a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperCategory {
    Comparison,
    Logical,
    Null,
    Array,
    Sort,
    Aggregate,
    Sql,
}

/// One helper function: name, human-readable signature, doc, category.
#[derive(Debug, Clone, Copy)]
pub struct HelperDef {
    pub name: &'static str,
    pub args: &'static str,
    pub doc: &'static str,
    pub category: HelperCategory,
}

const fn helper(
    name: &'static str,
    args: &'static str,
    doc: &'static str,
    category: HelperCategory,
) -> HelperDef {
    HelperDef {
        name,
        args,
        doc,
        category,
    }
}

/// The full helper catalog, in presentation order.
pub static HELPERS: [HelperDef; 24] = [
    helper("eq", "(column, value)", "Equal: column = value", HelperCategory::Comparison),
    helper("ne", "(column, value)", "Not equal: column != value", HelperCategory::Comparison),
    helper("gt", "(column, value)", "Greater than: column > value", HelperCategory::Comparison),
    helper("gte", "(column, value)", "Greater or equal: column >= value", HelperCategory::Comparison),
    helper("lt", "(column, value)", "Less than: column < value", HelperCategory::Comparison),
    helper("lte", "(column, value)", "Less or equal: column <= value", HelperCategory::Comparison),
    helper("like", "(column, pattern)", "LIKE pattern match", HelperCategory::Comparison),
    helper("ilike", "(column, pattern)", "Case-insensitive LIKE", HelperCategory::Comparison),
    helper("between", "(column, min, max)", "Between two values", HelperCategory::Comparison),
    helper("and", "(...conditions)", "Combine conditions with AND", HelperCategory::Logical),
    helper("or", "(...conditions)", "Combine conditions with OR", HelperCategory::Logical),
    helper("not", "(condition)", "Negate a condition", HelperCategory::Logical),
    helper("isNull", "(column)", "Check if NULL", HelperCategory::Null),
    helper("isNotNull", "(column)", "Check if NOT NULL", HelperCategory::Null),
    helper("inArray", "(column, values)", "Check if in array", HelperCategory::Array),
    helper("notInArray", "(column, values)", "Check if not in array", HelperCategory::Array),
    helper("asc", "(column)", "Sort ascending", HelperCategory::Sort),
    helper("desc", "(column)", "Sort descending", HelperCategory::Sort),
    helper("count", "(column?)", "Count rows", HelperCategory::Aggregate),
    helper("sum", "(column)", "Sum values", HelperCategory::Aggregate),
    helper("avg", "(column)", "Average value", HelperCategory::Aggregate),
    helper("min", "(column)", "Minimum value", HelperCategory::Aggregate),
    helper("max", "(column)", "Maximum value", HelperCategory::Aggregate),
    helper("sql", "`query`", "Raw SQL expression", HelperCategory::Sql),
];

/// Suggest helpers, optionally restricted to one category. Sort keys keep
/// catalog order.
pub fn suggest_helpers(category: Option<HelperCategory>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for (i, h) in HELPERS.iter().enumerate() {
        if let Some(cat) = category {
            if h.category != cat {
                continue;
            }
        }
        suggestions.push(helper_suggestion(h, i));
    }

    suggestions
}

/// Helpers valid inside `where(` / `having(`: comparison, logical, null,
/// and array categories.
pub fn suggest_condition_helpers() -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    for (i, h) in HELPERS.iter().enumerate() {
        if matches!(
            h.category,
            HelperCategory::Comparison
                | HelperCategory::Logical
                | HelperCategory::Null
                | HelperCategory::Array
        ) {
            suggestions.push(helper_suggestion(h, i));
        }
    }

    suggestions
}

/// Helpers valid inside `orderBy(`.
pub fn suggest_sort_helpers() -> Vec<Suggestion> {
    suggest_helpers(Some(HelperCategory::Sort))
}

/// Aggregate helpers for select lists and `having(`.
pub fn suggest_aggregate_helpers() -> Vec<Suggestion> {
    suggest_helpers(Some(HelperCategory::Aggregate))
}

fn helper_suggestion(h: &HelperDef, index: usize) -> Suggestion {
    let mut s = Suggestion::new(
        h.name,
        SuggestionKind::Helper,
        format!("{}(", h.name),
        CursorIntent::StayInside,
    );
    s.detail = h.args.to_string();
    s.doc = h.doc.to_string();
    s.sort = pad_sort(index);
    s
}

/// All helper names, in catalog order.
pub fn helper_names() -> Vec<&'static str> {
    HELPERS.iter().map(|h| h.name).collect()
}

/// Whether `name` is a known helper.
pub fn is_helper(name: &str) -> bool {
    HELPERS.iter().any(|h| h.name == name)
}

/// Look up a helper by name.
pub fn find_helper(name: &str) -> Option<&'static HelperDef> {
    HELPERS.iter().find(|h| h.name == name)
}

/// Category of a helper, if known.
pub fn helper_category(name: &str) -> Option<HelperCategory> {
    find_helper(name).map(|h| h.category)
}
