//! Target Annotation Specs: what the replacement annotation will look like.

use crate::context::ProcessingContext;
use crate::schema::{Contract, MarkerSchema};
use crate::tree::{AnnotationId, EnumRef, Literal, QualifiedName, Symbol};
use indexmap::IndexMap;

/// The annotation to materialize in place of a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetAnnotationSpec {
    /// Fully-qualified name of the target annotation.
    pub qualified_name: QualifiedName,
    /// Arguments in schema order.
    pub arguments: IndexMap<&'static str, Literal>,
}

impl TargetAnnotationSpec {
    /// Derives the spec from a bound marker.
    ///
    /// `Contract::Minimal` keeps the schema's minimal fields; `Contract::Full`
    /// keeps every field that has a literal form. Enum values are re-owned by
    /// the target (`AccessMode` becomes `ApiModelProperty.AccessMode`).
    pub fn from_marker<M: MarkerSchema>(
        marker: &M,
        contract: Contract,
        target: &QualifiedName,
    ) -> Self {
        let arguments = M::fields()
            .iter()
            .filter(|field| field.forwarded())
            .filter(|field| contract == Contract::Full || field.minimal)
            .filter_map(|field| {
                let value = marker.value_of(field.name)?;
                Some((field.name, retarget(value, target)))
            })
            .collect();

        Self {
            qualified_name: target.clone(),
            arguments,
        }
    }

    /// Allocates the annotation node under the target's simple name.
    /// Names are interned; values stay literals.
    pub fn materialize(&self, ctx: &mut ProcessingContext) -> AnnotationId {
        self.materialize_as(ctx, self.qualified_name.simple_name())
    }

    /// Like `materialize`, but writes the fully-qualified target name.
    pub fn materialize_qualified(&self, ctx: &mut ProcessingContext) -> AnnotationId {
        let written = self.qualified_name.to_string();
        self.materialize_as(ctx, &written)
    }

    fn materialize_as(&self, ctx: &mut ProcessingContext, written: &str) -> AnnotationId {
        let name = ctx.intern(written);
        let arguments: IndexMap<Symbol, Literal> = self
            .arguments
            .iter()
            .map(|(key, value)| (ctx.intern(key), value.clone()))
            .collect();
        ctx.maker().annotation(name, arguments)
    }
}

fn retarget(literal: Literal, target: &QualifiedName) -> Literal {
    match literal {
        Literal::Enum(e) => {
            let enum_name = e.owner.rsplit('.').next().unwrap_or(&e.owner);
            Literal::Enum(EnumRef {
                owner: format!("{}.{}", target.simple_name(), enum_name),
                constant: e.constant,
            })
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AccessMode, AutoApiModel, AutoApiModelProperty};
    use pretty_assertions::assert_eq;

    fn property_target() -> QualifiedName {
        QualifiedName::parse("io.swagger.annotations.ApiModelProperty").unwrap()
    }

    #[test]
    fn test_minimal_contract_forwards_value_then_example() {
        let marker = AutoApiModelProperty {
            value: "desc".into(),
            example: "42".into(),
            required: true,
            ..Default::default()
        };
        let spec =
            TargetAnnotationSpec::from_marker(&marker, Contract::Minimal, &property_target());
        let pairs: Vec<_> = spec.arguments.into_iter().collect();
        assert_eq!(
            pairs,
            vec![("value", Literal::from("desc")), ("example", Literal::from("42"))]
        );
    }

    #[test]
    fn test_full_contract_forwards_every_literal_field_in_order() {
        let marker = AutoApiModelProperty {
            value: "player score".into(),
            required: true,
            access_mode: AccessMode::ReadOnly,
            ..Default::default()
        };
        let spec = TargetAnnotationSpec::from_marker(&marker, Contract::Full, &property_target());
        let keys: Vec<_> = spec.arguments.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                "value",
                "name",
                "allowableValues",
                "access",
                "notes",
                "dataType",
                "required",
                "position",
                "hidden",
                "example",
                "readOnly",
                "accessMode",
                "reference",
                "allowEmptyValue",
            ]
        );
        assert_eq!(spec.arguments["required"], Literal::Bool(true));
        assert_eq!(
            spec.arguments["accessMode"],
            Literal::Enum(EnumRef {
                owner: "ApiModelProperty.AccessMode".into(),
                constant: "READ_ONLY".into(),
            })
        );
    }

    #[test]
    fn test_type_marker_minimal() {
        let marker = AutoApiModel {
            value: "Player".into(),
            description: "a player".into(),
            ..Default::default()
        };
        let target = QualifiedName::parse("io.swagger.annotations.ApiModel").unwrap();
        let spec = TargetAnnotationSpec::from_marker(&marker, Contract::Minimal, &target);
        assert_eq!(spec.arguments.len(), 1);
        assert_eq!(spec.arguments["value"], Literal::from("Player"));
        assert_eq!(spec.qualified_name, target);
    }

    #[test]
    fn test_materialize_uses_simple_name() {
        let mut ctx = ProcessingContext::new();
        let marker = AutoApiModelProperty {
            value: "desc".into(),
            ..Default::default()
        };
        let spec =
            TargetAnnotationSpec::from_marker(&marker, Contract::Minimal, &property_target());
        let id = spec.materialize(&mut ctx);
        let node = ctx.annotation(id).unwrap();
        assert_eq!(
            node.display(ctx.names()).to_string(),
            r#"@ApiModelProperty(value = "desc", example = "")"#
        );
    }

    #[test]
    fn test_materialize_qualified_writes_full_name() {
        let mut ctx = ProcessingContext::new();
        let spec = TargetAnnotationSpec::from_marker(
            &AutoApiModelProperty::default(),
            Contract::Minimal,
            &property_target(),
        );
        let id = spec.materialize_qualified(&mut ctx);
        assert_eq!(
            ctx.resolve(ctx.annotation(id).unwrap().name),
            "io.swagger.annotations.ApiModelProperty"
        );
    }
}
