//! # Nodes
//!
//! Node types stored in the `Trees` arena, and the typed indices that address them.

use crate::tree::names::{Names, Symbol};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position inside the owning arena vector.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a compilation unit.
    UnitId
);
arena_id!(
    /// Index of a declaration.
    DeclId
);
arena_id!(
    /// Index of an annotation node.
    AnnotationId
);
arena_id!(
    /// Index of an import node.
    ImportId
);

/// Kind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// A class.
    Class,
    /// An interface.
    Interface,
    /// An enum type.
    Enum,
    /// A record type.
    Record,
    /// An annotation type.
    Annotation,
    /// A field of a type.
    Field,
    /// A method. Neither a type nor a field.
    Method,
    /// A method parameter. Neither a type nor a field.
    Parameter,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Record => "record",
            Self::Annotation => "annotation",
            Self::Field => "field",
            Self::Method => "method",
            Self::Parameter => "parameter",
        };
        f.write_str(text)
    }
}

impl DeclKind {
    /// True for every kind that declares a type.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Record | Self::Annotation
        )
    }

    /// True for field declarations.
    pub fn is_field(self) -> bool {
        self == Self::Field
    }
}

/// Reference to an enum constant, e.g. `ApiModelProperty.AccessMode.READ_ONLY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumRef {
    /// The enum type as it should be written (simple or nested name).
    #[serde(rename = "enum")]
    pub owner: String,
    /// The constant name.
    pub constant: String,
}

/// A literal annotation argument.
///
/// Serialized untagged: `true`, `42`, `"text"`, or `{"enum": .., "constant": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
    /// Enum constant reference.
    Enum(EnumRef),
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Enum(e) => write!(f, "{}.{}", e.owner, e.constant),
        }
    }
}

/// An annotation on a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationNode {
    /// The annotation type as written (simple or qualified).
    pub name: Symbol,
    /// Named arguments in source order. Names are unique.
    pub arguments: IndexMap<Symbol, Literal>,
}

impl AnnotationNode {
    /// Renders the node as `@Name(arg = literal, ..)`.
    pub fn display<'a>(&'a self, names: &'a Names) -> AnnotationDisplay<'a> {
        AnnotationDisplay { node: self, names }
    }
}

/// Display adapter returned by [`AnnotationNode::display`].
pub struct AnnotationDisplay<'a> {
    node: &'a AnnotationNode,
    names: &'a Names,
}

impl fmt::Display for AnnotationDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.names.resolve(self.node.name))?;
        if self.node.arguments.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in self.node.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", self.names.resolve(*name), value)?;
        }
        f.write_str(")")
    }
}

/// An import declaration: `package.name` where `name` may be `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportNode {
    /// Package segments, joined.
    pub package: Symbol,
    /// Imported simple name, or `*`.
    pub name: Symbol,
}

impl ImportNode {
    /// The dotted path of the import.
    pub fn path(&self, names: &Names) -> String {
        format!("{}.{}", names.resolve(self.package), names.resolve(self.name))
    }

    /// True for on-demand (`*`) imports.
    pub fn is_wildcard(&self, names: &Names) -> bool {
        names.resolve(self.name) == "*"
    }
}

/// A type or field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared name.
    pub name: Symbol,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Annotations in source order.
    pub annotations: Vec<AnnotationId>,
    /// The unit this declaration lives in.
    pub unit: UnitId,
    /// The enclosing declaration, if any.
    pub owner: Option<DeclId>,
    /// Nested declarations in source order.
    pub members: Vec<DeclId>,
}

/// One source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Path of the source file, as reported by the host.
    pub path: String,
    /// Package the unit declares.
    pub package: Option<Symbol>,
    /// Import list in source order.
    pub imports: Vec<ImportId>,
    /// Top-level declarations in source order.
    pub declarations: Vec<DeclId>,
}
