use crate::error::AppResult;
use crate::schema::{
    ArgumentReader, DefaultValue, FieldDef, FieldType, MarkerDescriptor, MarkerLevel,
    MarkerSchema,
};
use crate::tree::Literal;

const FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "value",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: true,
    },
    FieldDef {
        name: "description",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "basePath",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "position",
        ty: FieldType::Integer,
        default: DefaultValue::Int(0),
        minimal: false,
    },
    FieldDef {
        name: "produces",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "consumes",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "protocols",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "hidden",
        ty: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        minimal: false,
    },
];

/// Type-level marker mirroring `io.swagger.annotations.Api`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoApi {
    /// Implicitly sets a tag for the operations.
    pub value: String,
    /// Deprecated longer description.
    pub description: String,
    /// Deprecated base path.
    pub base_path: String,
    /// Deprecated ordering.
    pub position: i32,
    /// Comma-separated content types produced.
    pub produces: String,
    /// Comma-separated content types consumed.
    pub consumes: String,
    /// Comma-separated protocols.
    pub protocols: String,
    /// Hides the resource.
    pub hidden: bool,
}

impl MarkerSchema for AutoApi {
    const DESCRIPTOR: MarkerDescriptor = MarkerDescriptor {
        name: "AutoApi",
        qualified_name: "io.github.photowey.auto.swagger.annotation.AutoApi",
        level: MarkerLevel::Type,
    };

    const DEFAULT_TARGET: &'static str = "io.swagger.annotations.Api";

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn bind(reader: &ArgumentReader<'_>) -> AppResult<Self> {
        Ok(Self {
            value: reader.string("value")?,
            description: reader.string("description")?,
            base_path: reader.string("basePath")?,
            position: reader.integer("position")?,
            produces: reader.string("produces")?,
            consumes: reader.string("consumes")?,
            protocols: reader.string("protocols")?,
            hidden: reader.boolean("hidden")?,
        })
    }

    fn value_of(&self, field: &str) -> Option<Literal> {
        let literal: Literal = match field {
            "value" => self.value.as_str().into(),
            "description" => self.description.as_str().into(),
            "basePath" => self.base_path.as_str().into(),
            "position" => i64::from(self.position).into(),
            "produces" => self.produces.as_str().into(),
            "consumes" => self.consumes.as_str().into(),
            "protocols" => self.protocols.as_str().into(),
            "hidden" => self.hidden.into(),
            _ => return None,
        };
        Some(literal)
    }
}
