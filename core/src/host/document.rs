//! Unit documents: the serialized form of one compilation unit.

use crate::context::ProcessingContext;
use crate::error::{AppError, AppResult};
use crate::tree::{split_import_path, DeclId, DeclKind, Literal, UnitId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One compilation unit as exchanged with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDocument {
    /// Source path of the unit.
    pub path: String,
    /// Declared package.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Import paths in source order (`a.b.C` or `a.b.*`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    /// Top-level declarations.
    #[serde(default)]
    pub declarations: Vec<DeclarationDocument>,
}

/// A declaration and its nested members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationDocument {
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: DeclKind,
    /// Annotations in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDocument>,
    /// Nested declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<DeclarationDocument>,
}

/// An annotation with named literal arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationDocument {
    /// Annotation type as written.
    pub name: String,
    /// Arguments in source order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub arguments: IndexMap<String, Literal>,
}

/// Serialization format of a unit document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl UnitDocument {
    /// Parses a document in the given format.
    pub fn parse(text: &str, format: DocumentFormat) -> AppResult<Self> {
        Ok(match format {
            DocumentFormat::Json => serde_json::from_str(text)?,
            DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }

    /// Serializes the document in the given format.
    pub fn render(&self, format: DocumentFormat) -> AppResult<String> {
        Ok(match format {
            DocumentFormat::Json => {
                let mut text = serde_json::to_string_pretty(self)?;
                text.push('\n');
                text
            }
            DocumentFormat::Yaml => serde_yaml::to_string(self)?,
        })
    }

    /// Reads a document, choosing the format by extension.
    pub fn read(path: &Path) -> AppResult<Self> {
        let format = format_of(path)?;
        let text = fs::read_to_string(path)?;
        Self::parse(&text, format)
    }

    /// Writes a document, choosing the format by extension.
    pub fn write(&self, path: &Path) -> AppResult<()> {
        let format = format_of(path)?;
        fs::write(path, self.render(format)?)?;
        Ok(())
    }
}

fn format_of(path: &Path) -> AppResult<DocumentFormat> {
    DocumentFormat::from_path(path).ok_or_else(|| {
        AppError::General(format!("Unsupported unit document format: {:?}", path))
    })
}

/// Builds the arena nodes for `doc` inside `ctx`.
pub fn lower(ctx: &mut ProcessingContext, doc: &UnitDocument) -> AppResult<UnitId> {
    let package = doc.package.as_deref().map(|p| ctx.intern(p));
    let unit = ctx.maker().unit(doc.path.clone(), package);

    for path in &doc.imports {
        let (package, name) = split_import_path(path)?;
        let package = ctx.intern(package);
        let name = ctx.intern(name);
        let import = ctx.maker().import(package, name);
        ctx.append_import(unit, import)?;
    }

    for decl in &doc.declarations {
        lower_declaration(ctx, unit, None, decl)?;
    }
    Ok(unit)
}

fn lower_declaration(
    ctx: &mut ProcessingContext,
    unit: UnitId,
    owner: Option<DeclId>,
    doc: &DeclarationDocument,
) -> AppResult<DeclId> {
    let name = ctx.intern(&doc.name);
    let decl = ctx.maker().declaration(unit, owner, name, doc.kind)?;

    for annotation in &doc.annotations {
        let name = ctx.intern(&annotation.name);
        let arguments: IndexMap<_, _> = annotation
            .arguments
            .iter()
            .map(|(key, value)| (ctx.intern(key), value.clone()))
            .collect();
        let id = ctx.maker().annotation(name, arguments);
        ctx.maker().annotate(decl, id)?;
    }

    for member in &doc.members {
        lower_declaration(ctx, unit, Some(decl), member)?;
    }
    Ok(decl)
}

/// Reads `unit` back out of the arena.
pub fn raise(ctx: &ProcessingContext, unit: UnitId) -> AppResult<UnitDocument> {
    let compilation_unit = ctx.trees().unit(unit)?;
    let imports = compilation_unit
        .imports
        .iter()
        .map(|id| Ok(ctx.trees().import(*id)?.path(ctx.names())))
        .collect::<AppResult<Vec<_>>>()?;
    let declarations = compilation_unit
        .declarations
        .iter()
        .map(|id| raise_declaration(ctx, *id))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(UnitDocument {
        path: compilation_unit.path.clone(),
        package: compilation_unit
            .package
            .map(|p| ctx.resolve(p).to_string()),
        imports,
        declarations,
    })
}

fn raise_declaration(ctx: &ProcessingContext, decl: DeclId) -> AppResult<DeclarationDocument> {
    let d = ctx.declaration(decl)?;
    let mut annotations = Vec::with_capacity(d.annotations.len());
    for id in &d.annotations {
        let node = ctx.annotation(*id)?;
        annotations.push(AnnotationDocument {
            name: ctx.resolve(node.name).to_string(),
            arguments: node
                .arguments
                .iter()
                .map(|(key, value)| (ctx.resolve(*key).to_string(), value.clone()))
                .collect(),
        });
    }
    let members = d
        .members
        .iter()
        .map(|m| raise_declaration(ctx, *m))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(DeclarationDocument {
        name: ctx.resolve(d.name).to_string(),
        kind: d.kind,
        annotations,
        members,
    })
}
