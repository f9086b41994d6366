#![deny(missing_docs)]

//! # Syntax Tree
//!
//! In-memory model of the host compiler's trees.
//!
//! - **names**: symbol interning and qualified names.
//! - **nodes**: units, declarations, annotations, imports, literals.
//! - **arena**: the `Trees` arena and its `TreeMaker`.

/// The node arena and node-construction facility.
pub mod arena;

/// Symbol interning and dotted names.
pub mod names;

/// Node definitions.
pub mod nodes;

pub use arena::{TreeMaker, Trees};
pub use names::{split_import_path, Names, QualifiedName, Symbol};
pub use nodes::{
    AnnotationId, AnnotationNode, CompilationUnit, DeclId, DeclKind, Declaration, EnumRef,
    ImportId, ImportNode, Literal, UnitId,
};
