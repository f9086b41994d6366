//! # Processing Context
//!
//! The capabilities the engine borrows from the host: tree lookup by
//! declaration, node construction and symbol interning. The host owns the
//! context for the whole session and lends it out `&mut` per call.

use crate::error::{AppError, AppResult};
use crate::schema::{ArgumentReader, MarkerDescriptor, MarkerSchema};
use crate::tree::{
    AnnotationId, AnnotationNode, DeclId, Declaration, ImportId, Names, Symbol, TreeMaker, Trees,
    UnitId,
};

/// Trees plus the name table they were built with.
#[derive(Debug, Default, Clone)]
pub struct ProcessingContext {
    trees: Trees,
    names: Names,
}

impl ProcessingContext {
    /// Creates a context with empty trees.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the arena.
    pub fn trees(&self) -> &Trees {
        &self.trees
    }

    /// Node-construction facility.
    pub fn maker(&mut self) -> TreeMaker<'_> {
        self.trees.maker()
    }

    /// Read access to the name table.
    pub fn names(&self) -> &Names {
        &self.names
    }

    /// Interns a name.
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.names.intern(text)
    }

    /// Resolves an interned name.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.names.resolve(symbol)
    }

    /// Looks up a declaration.
    pub fn declaration(&self, decl: DeclId) -> AppResult<&Declaration> {
        self.trees.declaration(decl)
    }

    /// The declaration's current annotation list.
    pub fn annotations(&self, decl: DeclId) -> AppResult<&[AnnotationId]> {
        Ok(&self.trees.declaration(decl)?.annotations)
    }

    /// Looks up one annotation node.
    pub fn annotation(&self, id: AnnotationId) -> AppResult<&AnnotationNode> {
        self.trees.annotation(id)
    }

    /// Replaces the declaration's annotation list wholesale.
    pub fn set_annotations(
        &mut self,
        decl: DeclId,
        annotations: Vec<AnnotationId>,
    ) -> AppResult<()> {
        for id in &annotations {
            self.trees.annotation(*id)?;
        }
        self.trees.declaration_mut(decl)?.annotations = annotations;
        Ok(())
    }

    /// Positions in the annotation list of `decl` that hold the given marker.
    pub fn marker_positions(
        &self,
        decl: DeclId,
        marker: &MarkerDescriptor,
    ) -> AppResult<Vec<usize>> {
        let mut positions = Vec::new();
        for (index, id) in self.annotations(decl)?.iter().enumerate() {
            let node = self.trees.annotation(*id)?;
            if marker.matches(self.names.resolve(node.name)) {
                positions.push(index);
            }
        }
        Ok(positions)
    }

    /// Reads the first `M` marker on `decl` as a Marker Instance.
    pub fn bind<M: MarkerSchema>(&self, decl: DeclId) -> AppResult<M> {
        let positions = self.marker_positions(decl, &M::DESCRIPTOR)?;
        let first = positions.first().ok_or_else(|| {
            AppError::InvariantViolation(format!(
                "{} does not carry @{}",
                self.describe(decl),
                M::DESCRIPTOR.name
            ))
        })?;
        let id = self.annotations(decl)?[*first];
        let node = self.trees.annotation(id)?;
        let reader = ArgumentReader::new(M::DESCRIPTOR, M::fields(), node, &self.names)?;
        M::bind(&reader)
    }

    /// The unit a declaration belongs to.
    pub fn enclosing_unit(&self, decl: DeclId) -> AppResult<UnitId> {
        let unit = self.trees.declaration(decl)?.unit;
        self.trees.unit(unit).map_err(|_| {
            AppError::MissingTree(format!("{} has no enclosing unit", self.describe(decl)))
        })?;
        Ok(unit)
    }

    /// Imports currently attached to a unit.
    pub fn imports(&self, unit: UnitId) -> AppResult<&[ImportId]> {
        Ok(&self.trees.unit(unit)?.imports)
    }

    /// Appends an allocated import node to a unit's import list.
    pub fn append_import(&mut self, unit: UnitId, import: ImportId) -> AppResult<()> {
        self.trees.import(import)?;
        self.trees.unit_mut(unit)?.imports.push(import);
        Ok(())
    }

    /// Human-readable label for log and error messages: `Player.score (field)`.
    pub fn describe(&self, decl: DeclId) -> String {
        let Ok(d) = self.trees.declaration(decl) else {
            return decl.to_string();
        };
        let mut path = vec![self.names.resolve(d.name)];
        let mut owner = d.owner;
        while let Some(o) = owner.and_then(|o| self.trees.declaration(o).ok()) {
            path.push(self.names.resolve(o.name));
            owner = o.owner;
        }
        path.reverse();
        format!("{} ({})", path.join("."), d.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AutoApiModelProperty;
    use crate::tree::{DeclKind, Literal};
    use indexmap::IndexMap;

    fn player(ctx: &mut ProcessingContext) -> (UnitId, DeclId, DeclId) {
        let player = ctx.intern("Player");
        let score = ctx.intern("score");
        let mut maker = ctx.maker();
        let unit = maker.unit("Player.java", None);
        let class = maker
            .declaration(unit, None, player, DeclKind::Class)
            .unwrap();
        let field = maker
            .declaration(unit, Some(class), score, DeclKind::Field)
            .unwrap();
        (unit, class, field)
    }

    #[test]
    fn test_describe_walks_owners() {
        let mut ctx = ProcessingContext::new();
        let (_, _, field) = player(&mut ctx);
        assert_eq!(ctx.describe(field), "Player.score (field)");
    }

    #[test]
    fn test_bind_without_marker_is_invariant_violation() {
        let mut ctx = ProcessingContext::new();
        let (_, _, field) = player(&mut ctx);
        let res = ctx.bind::<AutoApiModelProperty>(field);
        assert!(matches!(res, Err(AppError::InvariantViolation(_))));
    }

    #[test]
    fn test_bind_reads_marker() {
        let mut ctx = ProcessingContext::new();
        let (_, _, field) = player(&mut ctx);
        let name = ctx.intern("AutoApiModelProperty");
        let value = ctx.intern("value");
        let mut arguments = IndexMap::new();
        arguments.insert(value, Literal::from("player score"));
        let id = ctx.maker().annotation(name, arguments);
        ctx.maker().annotate(field, id).unwrap();

        let marker: AutoApiModelProperty = ctx.bind(field).unwrap();
        assert_eq!(marker.value, "player score");
        assert_eq!(
            ctx.marker_positions(field, &AutoApiModelProperty::DESCRIPTOR)
                .unwrap(),
            vec![0]
        );
    }

    #[test]
    fn test_set_annotations_rejects_unknown_nodes() {
        let mut ctx = ProcessingContext::new();
        let (_, class, _) = player(&mut ctx);
        let res = ctx.set_annotations(class, vec![AnnotationId(99)]);
        assert!(matches!(res, Err(AppError::MissingTree(_))));
    }

    #[test]
    fn test_append_import() {
        let mut ctx = ProcessingContext::new();
        let (unit, _, _) = player(&mut ctx);
        let pkg = ctx.intern("io.swagger.annotations");
        let name = ctx.intern("ApiModel");
        let import = ctx.maker().import(pkg, name);
        ctx.append_import(unit, import).unwrap();
        assert_eq!(ctx.imports(unit).unwrap(), &[import]);
    }
}
