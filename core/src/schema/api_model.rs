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
        name: "discriminator",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "reference",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
];

/// Type-level marker mirroring `io.swagger.annotations.ApiModel`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoApiModel {
    /// Alternative name for the model.
    pub value: String,
    /// Longer description of the model.
    pub description: String,
    /// Property used as the polymorphism discriminator.
    pub discriminator: String,
    /// Reference to a type definition.
    pub reference: String,
}

impl MarkerSchema for AutoApiModel {
    const DESCRIPTOR: MarkerDescriptor = MarkerDescriptor {
        name: "AutoApiModel",
        qualified_name: "io.github.photowey.auto.swagger.annotation.AutoApiModel",
        level: MarkerLevel::Type,
    };

    const DEFAULT_TARGET: &'static str = "io.swagger.annotations.ApiModel";

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn bind(reader: &ArgumentReader<'_>) -> AppResult<Self> {
        Ok(Self {
            value: reader.string("value")?,
            description: reader.string("description")?,
            discriminator: reader.string("discriminator")?,
            reference: reader.string("reference")?,
        })
    }

    fn value_of(&self, field: &str) -> Option<Literal> {
        match field {
            "value" => Some(self.value.as_str().into()),
            "description" => Some(self.description.as_str().into()),
            "discriminator" => Some(self.discriminator.as_str().into()),
            "reference" => Some(self.reference.as_str().into()),
            _ => None,
        }
    }
}
