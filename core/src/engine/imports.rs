//! Import-list patching.

use crate::context::ProcessingContext;
use crate::error::AppResult;
use crate::tree::{QualifiedName, UnitId};
use serde::{Deserialize, Serialize};

/// What `apply` does when the target is already importable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportPolicy {
    /// Append only when nothing in the unit already resolves the target name.
    #[default]
    Deduplicate,
    /// Append on every call, even if an equal import exists.
    Append,
}

/// Outcome of `patch_imports`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPatch {
    /// An import node was appended.
    Appended,
    /// The target already resolved; nothing changed.
    Present,
    /// A single-type import of another type with the same simple name exists.
    /// Nothing was appended, so the target must be written fully qualified.
    Shadowed,
}

impl ImportPatch {
    /// True when the simple name cannot be used for the target.
    pub fn needs_qualified_name(self) -> bool {
        self == Self::Shadowed
    }
}

/// True when `target` already resolves inside `unit`: an equal single-type
/// import, a wildcard import of its package, or the unit's own package.
pub fn resolves(
    ctx: &ProcessingContext,
    unit: UnitId,
    target: &QualifiedName,
) -> AppResult<bool> {
    let names = ctx.names();
    let compilation_unit = ctx.trees().unit(unit)?;
    if compilation_unit
        .package
        .is_some_and(|p| names.resolve(p) == target.package())
    {
        return Ok(true);
    }
    for id in &compilation_unit.imports {
        let import = ctx.trees().import(*id)?;
        if names.resolve(import.package) != target.package() {
            continue;
        }
        if import.is_wildcard(names) || names.resolve(import.name) == target.simple_name() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Path of a single-type import in `unit` that binds `target`'s simple name
/// to a different package, if any.
pub fn shadowing_import(
    ctx: &ProcessingContext,
    unit: UnitId,
    target: &QualifiedName,
) -> AppResult<Option<String>> {
    let names = ctx.names();
    for id in ctx.imports(unit)? {
        let import = ctx.trees().import(*id)?;
        if names.resolve(import.name) == target.simple_name()
            && names.resolve(import.package) != target.package()
        {
            return Ok(Some(import.path(names)));
        }
    }
    Ok(None)
}

/// Appends an import for `target` to `unit` according to `policy`.
///
/// Under `Deduplicate` nothing is appended when the target already resolves,
/// or when another import owns its simple name (`Shadowed`).
pub fn patch_imports(
    ctx: &mut ProcessingContext,
    unit: UnitId,
    target: &QualifiedName,
    policy: ImportPolicy,
) -> AppResult<ImportPatch> {
    if policy == ImportPolicy::Deduplicate {
        if resolves(ctx, unit, target)? {
            return Ok(ImportPatch::Present);
        }
        if let Some(existing) = shadowing_import(ctx, unit, target)? {
            let path = &ctx.trees().unit(unit)?.path;
            tracing::warn!(
                unit = %path,
                existing = %existing,
                "import of {} would clash; writing the annotation fully qualified",
                target
            );
            return Ok(ImportPatch::Shadowed);
        }
    }
    let package = ctx.intern(target.package());
    let name = ctx.intern(target.simple_name());
    let import = ctx.maker().import(package, name);
    ctx.append_import(unit, import)?;
    Ok(ImportPatch::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_with(
        ctx: &mut ProcessingContext,
        package: Option<&str>,
        imports: &[(&str, &str)],
    ) -> UnitId {
        let package = package.map(|p| ctx.intern(p));
        let unit = ctx.maker().unit("Player.java", package);
        for (pkg, name) in imports {
            let pkg = ctx.intern(pkg);
            let name = ctx.intern(name);
            let id = ctx.maker().import(pkg, name);
            ctx.append_import(unit, id).unwrap();
        }
        unit
    }

    fn target() -> QualifiedName {
        QualifiedName::parse("io.swagger.annotations.ApiModel").unwrap()
    }

    #[test]
    fn test_appends_to_end_of_existing_block() {
        let mut ctx = ProcessingContext::new();
        let unit = unit_with(&mut ctx, Some("com.example"), &[("java.util", "List")]);
        assert_eq!(
            patch_imports(&mut ctx, unit, &target(), ImportPolicy::Deduplicate).unwrap(),
            ImportPatch::Appended
        );
        let paths: Vec<_> = ctx
            .imports(unit)
            .unwrap()
            .iter()
            .map(|id| ctx.trees().import(*id).unwrap().path(ctx.names()))
            .collect();
        assert_eq!(paths, vec!["java.util.List", "io.swagger.annotations.ApiModel"]);
    }

    #[test]
    fn test_deduplicate_skips_existing_import() {
        let mut ctx = ProcessingContext::new();
        let unit = unit_with(&mut ctx, None, &[("io.swagger.annotations", "ApiModel")]);
        assert_eq!(
            patch_imports(&mut ctx, unit, &target(), ImportPolicy::Deduplicate).unwrap(),
            ImportPatch::Present
        );
        assert_eq!(ctx.imports(unit).unwrap().len(), 1);
    }

    #[test]
    fn test_deduplicate_honours_wildcard_and_same_package() {
        let mut ctx = ProcessingContext::new();
        let wildcard = unit_with(&mut ctx, None, &[("io.swagger.annotations", "*")]);
        assert!(resolves(&ctx, wildcard, &target()).unwrap());

        let same_package = unit_with(&mut ctx, Some("io.swagger.annotations"), &[]);
        assert!(resolves(&ctx, same_package, &target()).unwrap());

        let other = unit_with(&mut ctx, None, &[("io.swagger.models", "*")]);
        assert!(!resolves(&ctx, other, &target()).unwrap());
    }

    #[test]
    fn test_append_policy_always_grows() {
        let mut ctx = ProcessingContext::new();
        let unit = unit_with(&mut ctx, None, &[("io.swagger.annotations", "ApiModel")]);
        for _ in 0..2 {
            assert_eq!(
                patch_imports(&mut ctx, unit, &target(), ImportPolicy::Append).unwrap(),
                ImportPatch::Appended
            );
        }
        assert_eq!(ctx.imports(unit).unwrap().len(), 3);
    }

    #[test]
    fn test_same_simple_name_from_other_package_is_shadowed() {
        let mut ctx = ProcessingContext::new();
        let unit = unit_with(&mut ctx, None, &[("com.acme", "ApiModel")]);
        assert_eq!(
            shadowing_import(&ctx, unit, &target()).unwrap().as_deref(),
            Some("com.acme.ApiModel")
        );
        let patch = patch_imports(&mut ctx, unit, &target(), ImportPolicy::Deduplicate).unwrap();
        assert_eq!(patch, ImportPatch::Shadowed);
        assert!(patch.needs_qualified_name());
        assert_eq!(ctx.imports(unit).unwrap().len(), 1);
    }

    #[test]
    fn test_policy_serde() {
        let p: ImportPolicy = serde_json::from_str("\"append\"").unwrap();
        assert_eq!(p, ImportPolicy::Append);
        assert_eq!(
            serde_json::to_string(&ImportPolicy::Deduplicate).unwrap(),
            "\"deduplicate\""
        );
    }
}
