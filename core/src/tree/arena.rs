//! # Arena
//!
//! The `Trees` arena owns every node of a processing session. Nodes refer to
//! each other through typed indices, so replacing an annotation is an
//! index-list edit and no node is ever freed mid-session.

use crate::error::{AppError, AppResult};
use crate::tree::names::Symbol;
use crate::tree::nodes::{
    AnnotationId, AnnotationNode, CompilationUnit, DeclId, DeclKind, Declaration, ImportId,
    ImportNode, Literal, UnitId,
};
use indexmap::IndexMap;

/// Arena of compilation units, declarations, annotations and imports.
#[derive(Debug, Default, Clone)]
pub struct Trees {
    units: Vec<CompilationUnit>,
    declarations: Vec<Declaration>,
    annotations: Vec<AnnotationNode>,
    imports: Vec<ImportNode>,
}

impl Trees {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node-construction facility.
    pub fn maker(&mut self) -> TreeMaker<'_> {
        TreeMaker { trees: self }
    }

    /// Looks up a compilation unit.
    pub fn unit(&self, id: UnitId) -> AppResult<&CompilationUnit> {
        self.units
            .get(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} does not exist", id)))
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> AppResult<&mut CompilationUnit> {
        self.units
            .get_mut(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} does not exist", id)))
    }

    /// Looks up a declaration.
    pub fn declaration(&self, id: DeclId) -> AppResult<&Declaration> {
        self.declarations
            .get(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} has no source tree", id)))
    }

    pub(crate) fn declaration_mut(&mut self, id: DeclId) -> AppResult<&mut Declaration> {
        self.declarations
            .get_mut(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} has no source tree", id)))
    }

    /// Looks up an annotation node.
    pub fn annotation(&self, id: AnnotationId) -> AppResult<&AnnotationNode> {
        self.annotations
            .get(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} does not exist", id)))
    }

    /// Looks up an import node.
    pub fn import(&self, id: ImportId) -> AppResult<&ImportNode> {
        self.imports
            .get(id.index())
            .ok_or_else(|| AppError::MissingTree(format!("{} does not exist", id)))
    }

    /// Iterates over every declaration with its index, in creation order.
    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }
}

/// Node-construction facility over a `Trees` arena.
///
/// Allocation only; attaching a new annotation or import to the tree is the
/// caller's job (see `ProcessingContext`).
pub struct TreeMaker<'a> {
    trees: &'a mut Trees,
}

impl TreeMaker<'_> {
    /// Adds an empty compilation unit.
    pub fn unit(&mut self, path: impl Into<String>, package: Option<Symbol>) -> UnitId {
        let id = UnitId(self.trees.units.len() as u32);
        self.trees.units.push(CompilationUnit {
            path: path.into(),
            package,
            imports: Vec::new(),
            declarations: Vec::new(),
        });
        id
    }

    /// Adds a declaration at the end of `owner`'s members, or of the unit's
    /// top-level declarations when `owner` is `None`.
    pub fn declaration(
        &mut self,
        unit: UnitId,
        owner: Option<DeclId>,
        name: Symbol,
        kind: DeclKind,
    ) -> AppResult<DeclId> {
        let id = DeclId(self.trees.declarations.len() as u32);
        match owner {
            Some(parent) => {
                let parent_decl = self.trees.declaration_mut(parent)?;
                if parent_decl.unit != unit {
                    return Err(AppError::InvariantViolation(format!(
                        "{} belongs to {}, not {}",
                        parent, parent_decl.unit, unit
                    )));
                }
                parent_decl.members.push(id);
            }
            None => self.trees.unit_mut(unit)?.declarations.push(id),
        }
        self.trees.declarations.push(Declaration {
            name,
            kind,
            annotations: Vec::new(),
            unit,
            owner,
            members: Vec::new(),
        });
        Ok(id)
    }

    /// Allocates an annotation node.
    pub fn annotation(
        &mut self,
        name: Symbol,
        arguments: IndexMap<Symbol, Literal>,
    ) -> AnnotationId {
        let id = AnnotationId(self.trees.annotations.len() as u32);
        self.trees
            .annotations
            .push(AnnotationNode { name, arguments });
        id
    }

    /// Allocates an import node.
    pub fn import(&mut self, package: Symbol, name: Symbol) -> ImportId {
        let id = ImportId(self.trees.imports.len() as u32);
        self.trees.imports.push(ImportNode { package, name });
        id
    }

    /// Appends an allocated annotation to a declaration.
    pub fn annotate(&mut self, decl: DeclId, annotation: AnnotationId) -> AppResult<()> {
        self.trees.annotation(annotation)?;
        self.trees.declaration_mut(decl)?.annotations.push(annotation);
        Ok(())
    }
}
