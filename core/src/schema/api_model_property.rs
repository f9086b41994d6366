use crate::error::{AppError, AppResult};
use crate::schema::{
    ArgumentReader, DefaultValue, FieldDef, FieldType, MarkerDescriptor, MarkerLevel,
    MarkerSchema,
};
use crate::tree::{EnumRef, Literal};
use std::fmt;
use std::str::FromStr;

const ACCESS_MODES: &[&str] = &["AUTO", "READ_ONLY", "READ_WRITE"];

/// Access mode of a model property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Derived from the property.
    #[default]
    Auto,
    /// Only present in responses.
    ReadOnly,
    /// Present in requests and responses.
    ReadWrite,
}

impl AccessMode {
    /// The constant name as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::ReadOnly => "READ_ONLY",
            Self::ReadWrite => "READ_WRITE",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "AUTO" => Ok(Self::Auto),
            "READ_ONLY" => Ok(Self::ReadOnly),
            "READ_WRITE" => Ok(Self::ReadWrite),
            other => Err(AppError::Binding(format!("unknown AccessMode '{}'", other))),
        }
    }
}

const FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "value",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: true,
    },
    FieldDef {
        name: "name",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "allowableValues",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "access",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "notes",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "dataType",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "required",
        ty: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        minimal: false,
    },
    FieldDef {
        name: "position",
        ty: FieldType::Integer,
        default: DefaultValue::Int(0),
        minimal: false,
    },
    FieldDef {
        name: "hidden",
        ty: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        minimal: false,
    },
    FieldDef {
        name: "example",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: true,
    },
    FieldDef {
        name: "readOnly",
        ty: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        minimal: false,
    },
    FieldDef {
        name: "accessMode",
        ty: FieldType::Enum {
            owner: "AccessMode",
            constants: ACCESS_MODES,
        },
        default: DefaultValue::Constant("AUTO"),
        minimal: false,
    },
    FieldDef {
        name: "reference",
        ty: FieldType::String,
        default: DefaultValue::Str(""),
        minimal: false,
    },
    FieldDef {
        name: "allowEmptyValue",
        ty: FieldType::Boolean,
        default: DefaultValue::Bool(false),
        minimal: false,
    },
    FieldDef {
        name: "extensions",
        ty: FieldType::Extensions,
        default: DefaultValue::Empty,
        minimal: false,
    },
];

/// Field-level marker mirroring `io.swagger.annotations.ApiModelProperty`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoApiModelProperty {
    /// Brief description of the property.
    pub value: String,
    /// Overrides the property name.
    pub name: String,
    /// Allowed values: a list, a `range[..]`, or an open range.
    pub allowable_values: String,
    /// Filter key for hiding the property from documentation.
    pub access: String,
    /// Unused by the target, carried for completeness.
    pub notes: String,
    /// Overrides the data type read from the property.
    pub data_type: String,
    /// Whether the property is required.
    pub required: bool,
    /// Explicit ordering within the model.
    pub position: i32,
    /// Hides the property from the model definition.
    pub hidden: bool,
    /// Sample value.
    pub example: String,
    /// Deprecated in favour of `access_mode`.
    pub read_only: bool,
    /// Read/write access mode.
    pub access_mode: AccessMode,
    /// Reference to a type definition overriding other metadata.
    pub reference: String,
    /// Allows passing an empty value.
    pub allow_empty_value: bool,
}

impl MarkerSchema for AutoApiModelProperty {
    const DESCRIPTOR: MarkerDescriptor = MarkerDescriptor {
        name: "AutoApiModelProperty",
        qualified_name: "io.github.photowey.auto.swagger.annotation.AutoApiModelProperty",
        level: MarkerLevel::Field,
    };

    const DEFAULT_TARGET: &'static str = "io.swagger.annotations.ApiModelProperty";

    fn fields() -> &'static [FieldDef] {
        FIELDS
    }

    fn bind(reader: &ArgumentReader<'_>) -> AppResult<Self> {
        Ok(Self {
            value: reader.string("value")?,
            name: reader.string("name")?,
            allowable_values: reader.string("allowableValues")?,
            access: reader.string("access")?,
            notes: reader.string("notes")?,
            data_type: reader.string("dataType")?,
            required: reader.boolean("required")?,
            position: reader.integer("position")?,
            hidden: reader.boolean("hidden")?,
            example: reader.string("example")?,
            read_only: reader.boolean("readOnly")?,
            access_mode: reader.constant("accessMode")?.parse()?,
            reference: reader.string("reference")?,
            allow_empty_value: reader.boolean("allowEmptyValue")?,
        })
    }

    fn value_of(&self, field: &str) -> Option<Literal> {
        let literal: Literal = match field {
            "value" => self.value.as_str().into(),
            "name" => self.name.as_str().into(),
            "allowableValues" => self.allowable_values.as_str().into(),
            "access" => self.access.as_str().into(),
            "notes" => self.notes.as_str().into(),
            "dataType" => self.data_type.as_str().into(),
            "required" => self.required.into(),
            "position" => i64::from(self.position).into(),
            "hidden" => self.hidden.into(),
            "example" => self.example.as_str().into(),
            "readOnly" => self.read_only.into(),
            "accessMode" => Literal::Enum(EnumRef {
                owner: "AccessMode".into(),
                constant: self.access_mode.as_str().into(),
            }),
            "reference" => self.reference.as_str().into(),
            "allowEmptyValue" => self.allow_empty_value.into(),
            _ => return None,
        };
        Some(literal)
    }
}
