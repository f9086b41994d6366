//! # Schemas Command
//!
//! Prints each marker, its target and its fields.

use auto_swagger_core::builtin_schemas;
use auto_swagger_core::schema::FieldDef;

/// Prints every built-in marker schema to stdout.
pub fn execute() {
    for (descriptor, target, fields) in builtin_schemas() {
        println!(
            "@{} ({}) -> @{}",
            descriptor.qualified_name, descriptor.level, target
        );
        for field in fields {
            println!("  {}", describe(field));
        }
    }
}

fn describe(field: &FieldDef) -> String {
    let mut line = format!("{}: {} = {}", field.name, field.ty, field.default);
    if field.minimal {
        line.push_str(" [minimal]");
    }
    if !field.forwarded() {
        line.push_str(" [not forwarded]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_swagger_core::{AutoApiModelProperty, MarkerSchema};

    #[test]
    fn test_describe_marks_minimal_and_dropped_fields() {
        let fields = AutoApiModelProperty::fields();
        let value = fields.iter().find(|f| f.name == "value").unwrap();
        assert!(describe(value).ends_with("[minimal]"));
        let extensions = fields.iter().find(|f| f.name == "extensions").unwrap();
        assert!(describe(extensions).ends_with("[not forwarded]"));
    }
}
