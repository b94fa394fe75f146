//! Signature help: resolve the call enclosing the cursor and report its
//! parameter list plus the parameter being typed.

use crate::schema::Schema;
use crate::state::graph::ArgKind;
use crate::state::{count_top_level_commas, find_enclosing_call, METHOD_GRAPH};
use crate::suggest::find_helper;

/// One parameter of a signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    pub label: String,
    pub documentation: String,
}

/// An active signature with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureInfo {
    pub label: String,
    pub documentation: String,
    pub parameters: Vec<ParameterInfo>,
    /// Index of the parameter under the cursor, clamped to the last one.
    pub active_parameter: usize,
}

/// Signature help for the text before the cursor, or `None` when the
/// cursor is not inside a known call.
pub fn signature_help(text_before: &str, schema: &Schema) -> Option<SignatureInfo> {
    let method = find_enclosing_call(text_before)?;
    let mut info = method_signature(&method, schema).or_else(|| helper_signature(&method))?;

    let active = count_top_level_commas(text_before);
    if !info.parameters.is_empty() {
        info.active_parameter = active.min(info.parameters.len() - 1);
    }

    Some(info)
}

fn method_signature(name: &str, schema: &Schema) -> Option<SignatureInfo> {
    let def = METHOD_GRAPH.find_method_anywhere(name)?;

    let parameters: Vec<ParameterInfo> = if def.has_args() {
        def.args
            .iter()
            .map(|arg| ParameterInfo {
                label: arg.label().to_string(),
                documentation: arg_documentation(*arg, schema),
            })
            .collect()
    } else {
        Vec::new()
    };

    Some(SignatureInfo {
        label: format!("{}{}", def.name, def.detail()),
        documentation: def.doc.to_string(),
        parameters,
        active_parameter: 0,
    })
}

fn helper_signature(name: &str) -> Option<SignatureInfo> {
    let helper = find_helper(name)?;

    // Helper signatures are recorded as display text like
    // "(column, value)"; split it into parameters.
    let parameters: Vec<ParameterInfo> = helper
        .args
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| ParameterInfo {
            label: p.to_string(),
            documentation: String::new(),
        })
        .collect();

    Some(SignatureInfo {
        label: format!("{}{}", helper.name, helper.args),
        documentation: helper.doc.to_string(),
        parameters,
        active_parameter: 0,
    })
}

fn arg_documentation(arg: ArgKind, schema: &Schema) -> String {
    match arg {
        ArgKind::Table => {
            let names: Vec<&str> = schema.table_names();
            format!("Tables: {}", names.join(", "))
        }
        ArgKind::Condition => "Use eq(), gt(), and(), or(), etc.".to_string(),
        ArgKind::Columns => "Column references".to_string(),
        ArgKind::Column => "Column reference".to_string(),
        ArgKind::Number => "Number of rows".to_string(),
        ArgKind::Value => "Value to use".to_string(),
        ArgKind::Values => "Object or array of objects".to_string(),
        ArgKind::Expression => "Expression".to_string(),
        ArgKind::Sql => "Raw SQL template".to_string(),
        ArgKind::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::sample_schema;

    #[test]
    fn test_signature_for_from() {
        let schema = sample_schema();
        let sig = signature_help("db.select().from(", &schema).unwrap();

        assert_eq!(sig.label, "from(table)");
        assert_eq!(sig.parameters.len(), 1);
        assert_eq!(sig.parameters[0].label, "table");
        assert!(sig.parameters[0].documentation.contains("users, posts"));
        assert_eq!(sig.active_parameter, 0);
    }

    #[test]
    fn test_signature_active_parameter_advances() {
        let schema = sample_schema();
        let sig = signature_help("db.select().from(users).leftJoin(posts, ", &schema).unwrap();

        assert_eq!(sig.label, "leftJoin(table, condition)");
        assert_eq!(sig.parameters.len(), 2);
        assert_eq!(sig.active_parameter, 1);
    }

    #[test]
    fn test_signature_active_parameter_clamped() {
        let schema = sample_schema();
        let sig = signature_help("limit(1, 2, ", &schema).unwrap();
        // limit has one parameter; extra commas clamp to it.
        assert_eq!(sig.active_parameter, 0);
    }

    #[test]
    fn test_signature_for_helper() {
        let schema = sample_schema();
        let sig = signature_help("where(eq(users.id, ", &schema).unwrap();

        assert_eq!(sig.label, "eq(column, value)");
        assert_eq!(sig.parameters.len(), 2);
        assert_eq!(sig.parameters[1].label, "value");
        assert_eq!(sig.active_parameter, 1);
    }

    #[test]
    fn test_signature_nested_call_resolves_inner() {
        let schema = sample_schema();
        let sig = signature_help("where(between(users.id, 1, ", &schema).unwrap();
        assert_eq!(sig.label, "between(column, min, max)");
        assert_eq!(sig.active_parameter, 2);
    }

    #[test]
    fn test_signature_closed_inner_call_resolves_outer() {
        let schema = sample_schema();
        let sig = signature_help("where(eq(users.id, 1), ", &schema).unwrap();
        assert_eq!(sig.label, "where(condition)");
    }

    #[test]
    fn test_no_signature_outside_call() {
        let schema = sample_schema();
        assert!(signature_help("db.select()", &schema).is_none());
        assert!(signature_help("", &schema).is_none());
    }

    #[test]
    fn test_no_signature_for_unknown_call() {
        let schema = sample_schema();
        assert!(signature_help("frobnicate(", &schema).is_none());
    }
}
