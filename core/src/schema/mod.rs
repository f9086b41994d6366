#![deny(missing_docs)]

//! # Marker Schemas
//!
//! Declarative descriptions of the marker annotations and typed instances of them.
//!
//! - **binding**: reading a marker's arguments with schema defaults.
//! - **api** / **api_model** / **api_model_property**: the three markers.

use crate::error::AppResult;
use crate::tree::Literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Argument binding against a schema.
pub mod binding;

/// `AutoApi`, the class-level API marker.
pub mod api;

/// `AutoApiModel`, the class-level model marker.
pub mod api_model;

/// `AutoApiModelProperty`, the field-level property marker.
pub mod api_model_property;

pub use api::AutoApi;
pub use api_model::AutoApiModel;
pub use api_model_property::{AccessMode, AutoApiModelProperty};
pub use binding::ArgumentReader;

/// Which declarations a marker may be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLevel {
    /// Type declarations (classes, interfaces, enums, records).
    Type,
    /// Field declarations.
    Field,
}

impl fmt::Display for MarkerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Field => f.write_str("field"),
        }
    }
}

/// Identity of a marker annotation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerDescriptor {
    /// Simple name, e.g. `AutoApiModelProperty`.
    pub name: &'static str,
    /// Fully-qualified name.
    pub qualified_name: &'static str,
    /// Allowed declaration level.
    pub level: MarkerLevel,
}

impl MarkerDescriptor {
    /// True when an annotation written as `written` is this marker.
    pub fn matches(&self, written: &str) -> bool {
        written == self.name || written == self.qualified_name
    }
}

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// String literal.
    String,
    /// Boolean literal.
    Boolean,
    /// Integer literal within the host's 32-bit `int` range.
    Integer,
    /// Enum constant of `owner`, one of `constants`.
    Enum {
        /// Simple name of the enum type.
        owner: &'static str,
        /// Allowed constant names.
        constants: &'static [&'static str],
    },
    /// Vendor extensions (nested annotations). Cannot be expressed as a literal.
    Extensions,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Enum { owner, .. } => write!(f, "enum {}", owner),
            Self::Extensions => f.write_str("extensions"),
        }
    }
}

/// Default of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// String default.
    Str(&'static str),
    /// Boolean default.
    Bool(bool),
    /// Integer default.
    Int(i32),
    /// Enum constant default.
    Constant(&'static str),
    /// No literal default (extensions).
    Empty,
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Constant(c) => f.write_str(c),
            Self::Empty => f.write_str("{}"),
        }
    }
}

/// One recognized field of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Argument name.
    pub name: &'static str,
    /// Declared literal type.
    pub ty: FieldType,
    /// Value used when the argument is absent.
    pub default: DefaultValue,
    /// Forwarded under `Contract::Minimal`.
    pub minimal: bool,
}

impl FieldDef {
    /// False for fields the target can never receive as a literal.
    pub fn forwarded(&self) -> bool {
        self.ty != FieldType::Extensions
    }
}

/// How many marker fields are carried over to the target annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// Only the schema's minimal fields (`value`, plus `example` for properties).
    #[default]
    Minimal,
    /// Every forwardable field, in schema order.
    Full,
}

/// A marker annotation type known at compile time of the tool.
///
/// Implementors are the Marker Instances: `bind` realizes one from an
/// annotation node, `value_of` exposes each field as a literal.
pub trait MarkerSchema: Sized {
    /// Identity of the marker.
    const DESCRIPTOR: MarkerDescriptor;

    /// Fully-qualified name of the target annotation used when none is configured.
    const DEFAULT_TARGET: &'static str;

    /// Recognized fields, in emission order.
    fn fields() -> &'static [FieldDef];

    /// Builds an instance from the marker's arguments.
    fn bind(reader: &ArgumentReader<'_>) -> AppResult<Self>;

    /// Realized value of `field`, or `None` for fields that have no literal form.
    ///
    /// Enum values carry the marker-side owner (e.g. `AccessMode`).
    fn value_of(&self, field: &str) -> Option<Literal>;
}

/// Descriptors and field tables of every built-in marker, in registration order.
pub fn builtin_schemas() -> [(MarkerDescriptor, &'static str, &'static [FieldDef]); 3] {
    [
        (AutoApi::DESCRIPTOR, AutoApi::DEFAULT_TARGET, AutoApi::fields()),
        (
            AutoApiModel::DESCRIPTOR,
            AutoApiModel::DEFAULT_TARGET,
            AutoApiModel::fields(),
        ),
        (
            AutoApiModelProperty::DESCRIPTOR,
            AutoApiModelProperty::DEFAULT_TARGET,
            AutoApiModelProperty::fields(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_matches_simple_and_qualified() {
        let d = AutoApiModelProperty::DESCRIPTOR;
        assert!(d.matches("AutoApiModelProperty"));
        assert!(d.matches(
            "io.github.photowey.auto.swagger.annotation.AutoApiModelProperty"
        ));
        assert!(!d.matches("ApiModelProperty"));
    }

    #[test]
    fn test_builtin_field_names_are_unique() {
        for (descriptor, _, fields) in builtin_schemas() {
            let mut names: Vec<_> = fields.iter().map(|f| f.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), fields.len(), "{}", descriptor.name);
        }
    }

    #[test]
    fn test_every_schema_has_a_minimal_value_field() {
        for (descriptor, _, fields) in builtin_schemas() {
            let value = fields.iter().find(|f| f.name == "value");
            assert!(
                value.is_some_and(|f| f.minimal),
                "{} must forward value",
                descriptor.name
            );
        }
    }

    #[test]
    fn test_contract_serde() {
        let c: Contract = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(c, Contract::Full);
        assert_eq!(Contract::default(), Contract::Minimal);
    }
}
