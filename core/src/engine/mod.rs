#![deny(missing_docs)]

//! # Rewrite Engine
//!
//! Replaces a marker annotation with its target annotation (`apply`), or
//! strips it (`revert`).
//!
//! - **spec**: building the replacement from a bound marker.
//! - **imports**: patching the enclosing unit's import list.

use crate::context::ProcessingContext;
use crate::error::{AppError, AppResult};
use crate::schema::{Contract, MarkerLevel, MarkerSchema};
use crate::tree::{AnnotationId, DeclId, QualifiedName};
use std::marker::PhantomData;

/// Import-list patching.
pub mod imports;

/// Target annotation specs.
pub mod spec;

pub use imports::{patch_imports, ImportPatch, ImportPolicy};
pub use spec::TargetAnnotationSpec;

/// Rewrites one marker type `M` into one target annotation.
#[derive(Debug, Clone)]
pub struct RewriteEngine<M> {
    target: QualifiedName,
    contract: Contract,
    import_policy: ImportPolicy,
    marker: PhantomData<fn() -> M>,
}

impl<M: MarkerSchema> RewriteEngine<M> {
    /// Creates an engine emitting `target`.
    pub fn new(target: QualifiedName, contract: Contract, import_policy: ImportPolicy) -> Self {
        Self {
            target,
            contract,
            import_policy,
            marker: PhantomData,
        }
    }

    /// Replaces the marker on `decl` with the target annotation and imports it.
    ///
    /// The replacement takes the marker's position; every other annotation
    /// keeps its relative order. If the marker appears more than once, the
    /// first occurrence supplies the values and the rest are dropped.
    pub fn apply(&self, ctx: &mut ProcessingContext, decl: DeclId) -> AppResult<()> {
        let descriptor = M::DESCRIPTOR;
        let kind = ctx.declaration(decl)?.kind;
        let kind_ok = match descriptor.level {
            MarkerLevel::Type => kind.is_type(),
            MarkerLevel::Field => kind.is_field(),
        };
        if !kind_ok {
            return Err(AppError::InvariantViolation(format!(
                "@{} expects a {} declaration, found {}",
                descriptor.name,
                descriptor.level,
                ctx.describe(decl)
            )));
        }

        let positions = ctx.marker_positions(decl, &descriptor)?;
        let marker: M = ctx.bind(decl)?;
        if positions.len() > 1 {
            tracing::warn!(
                declaration = %ctx.describe(decl),
                occurrences = positions.len(),
                "@{} repeated; keeping the first occurrence",
                descriptor.name
            );
        }

        let unit = ctx.enclosing_unit(decl)?;
        let import = patch_imports(ctx, unit, &self.target, self.import_policy)?;

        let spec = TargetAnnotationSpec::from_marker(&marker, self.contract, &self.target);
        let replacement = if import.needs_qualified_name() {
            spec.materialize_qualified(ctx)
        } else {
            spec.materialize(ctx)
        };
        let annotations = splice(ctx.annotations(decl)?, &positions, replacement);
        ctx.set_annotations(decl, annotations)?;

        let node = ctx.annotation(replacement)?;
        tracing::debug!(
            declaration = %ctx.describe(decl),
            annotation = %node.display(ctx.names()),
            ?import,
            "applied @{}",
            descriptor.name
        );
        Ok(())
    }

    /// Removes every `M` marker from `decl`. Imports are left alone.
    ///
    /// Idempotent; a declaration without the marker is left unchanged.
    pub fn revert(&self, ctx: &mut ProcessingContext, decl: DeclId) -> AppResult<()> {
        let descriptor = M::DESCRIPTOR;
        let positions = ctx.marker_positions(decl, &descriptor)?;
        if positions.is_empty() {
            return Ok(());
        }
        let kept: Vec<AnnotationId> = ctx
            .annotations(decl)?
            .iter()
            .enumerate()
            .filter(|(index, _)| !positions.contains(index))
            .map(|(_, id)| *id)
            .collect();
        ctx.set_annotations(decl, kept)?;

        tracing::debug!(
            declaration = %ctx.describe(decl),
            removed = positions.len(),
            "reverted @{}",
            descriptor.name
        );
        Ok(())
    }
}

/// Puts `replacement` at `positions[0]` and drops the other marker positions.
fn splice(
    current: &[AnnotationId],
    positions: &[usize],
    replacement: AnnotationId,
) -> Vec<AnnotationId> {
    let first = positions.first().copied();
    current
        .iter()
        .enumerate()
        .filter_map(|(index, id)| {
            if Some(index) == first {
                Some(replacement)
            } else if positions.contains(&index) {
                None
            } else {
                Some(*id)
            }
        })
        .collect()
}
