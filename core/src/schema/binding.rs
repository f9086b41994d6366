//! Reading a marker annotation's arguments against its schema.

use crate::error::{AppError, AppResult};
use crate::schema::{DefaultValue, FieldDef, FieldType, MarkerDescriptor};
use crate::tree::{AnnotationNode, Literal, Names};

/// Typed view over one marker annotation node.
///
/// Construction checks every explicit argument against the schema; the typed
/// accessors then fall back to field defaults for absent arguments.
pub struct ArgumentReader<'a> {
    descriptor: MarkerDescriptor,
    fields: &'static [FieldDef],
    node: &'a AnnotationNode,
    names: &'a Names,
}

impl<'a> ArgumentReader<'a> {
    /// Checks `node` against `fields` and returns a reader over it.
    pub fn new(
        descriptor: MarkerDescriptor,
        fields: &'static [FieldDef],
        node: &'a AnnotationNode,
        names: &'a Names,
    ) -> AppResult<Self> {
        let reader = Self {
            descriptor,
            fields,
            node,
            names,
        };
        for (symbol, literal) in &node.arguments {
            let name = names.resolve(*symbol);
            let field = reader.field(name)?;
            reader.check(field, literal)?;
        }
        Ok(reader)
    }

    fn field(&self, name: &str) -> AppResult<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name).ok_or_else(|| {
            AppError::Binding(format!(
                "@{} has no field named '{}'",
                self.descriptor.name, name
            ))
        })
    }

    fn check(&self, field: &FieldDef, literal: &Literal) -> AppResult<()> {
        let ok = match (field.ty, literal) {
            (FieldType::String, Literal::Str(_)) => true,
            (FieldType::Boolean, Literal::Bool(_)) => true,
            (FieldType::Integer, Literal::Int(i)) => i32::try_from(*i).is_ok(),
            (FieldType::Enum { owner, constants }, Literal::Enum(e)) => {
                e.owner.rsplit('.').next() == Some(owner)
                    && constants.contains(&e.constant.as_str())
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(AppError::Binding(format!(
                "@{}.{} expects {}, found {}",
                self.descriptor.name, field.name, field.ty, literal
            )))
        }
    }

    fn explicit(&self, name: &str) -> Option<&'a Literal> {
        let symbol = self.names.lookup(name)?;
        self.node.arguments.get(&symbol)
    }

    fn mismatch(&self, field: &FieldDef) -> AppError {
        AppError::Binding(format!(
            "@{}.{} is not a {} field",
            self.descriptor.name, field.name, field.ty
        ))
    }

    /// Reads a string field.
    pub fn string(&self, name: &str) -> AppResult<String> {
        let field = self.field(name)?;
        match (self.explicit(name), field.default) {
            (Some(Literal::Str(s)), _) => Ok(s.clone()),
            (None, DefaultValue::Str(s)) => Ok(s.to_string()),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Reads a boolean field.
    pub fn boolean(&self, name: &str) -> AppResult<bool> {
        let field = self.field(name)?;
        match (self.explicit(name), field.default) {
            (Some(Literal::Bool(b)), _) => Ok(*b),
            (None, DefaultValue::Bool(b)) => Ok(b),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Reads an integer field.
    pub fn integer(&self, name: &str) -> AppResult<i32> {
        let field = self.field(name)?;
        match (self.explicit(name), field.default) {
            (Some(Literal::Int(i)), _) => i32::try_from(*i).map_err(|_| self.mismatch(field)),
            (None, DefaultValue::Int(i)) => Ok(i),
            _ => Err(self.mismatch(field)),
        }
    }

    /// Reads an enum field, returning the constant name.
    pub fn constant(&self, name: &str) -> AppResult<String> {
        let field = self.field(name)?;
        match (self.explicit(name), field.default) {
            (Some(Literal::Enum(e)), _) => Ok(e.constant.clone()),
            (None, DefaultValue::Constant(c)) => Ok(c.to_string()),
            _ => Err(self.mismatch(field)),
        }
    }
}
