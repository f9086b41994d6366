//! # Names
//!
//! Symbol interning and dotted-name handling.

use crate::error::{AppError, AppResult};
use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// An interned name. Only meaningful for the `Names` table that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// Position of the symbol inside its interning table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The symbol-interning facility.
///
/// Every name that ends up inside a syntax node (annotation names, argument
/// names, import segments) goes through here first.
#[derive(Debug, Default, Clone)]
pub struct Names {
    symbols: IndexSet<String>,
}

impl Names {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning the existing symbol if it was seen before.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(index) = self.symbols.get_index_of(text) {
            return Symbol(index as u32);
        }
        let (index, _) = self.symbols.insert_full(text.to_string());
        Symbol(index as u32)
    }

    /// Looks up `text` without interning it.
    pub fn lookup(&self, text: &str) -> Option<Symbol> {
        self.symbols.get_index_of(text).map(|i| Symbol(i as u32))
    }

    /// Returns the text of a symbol.
    ///
    /// Symbols from a different table resolve to `"<unknown>"`.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        self.symbols
            .get_index(symbol.index())
            .map_or("<unknown>", String::as_str)
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

const SEGMENT: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

fn qualified_re() -> &'static Regex {
    static QUALIFIED_RE: OnceLock<Regex> = OnceLock::new();
    QUALIFIED_RE.get_or_init(|| {
        Regex::new(&format!(r"^{SEGMENT}(?:\.{SEGMENT})+$")).expect("Invalid regex")
    })
}

fn import_re() -> &'static Regex {
    static IMPORT_RE: OnceLock<Regex> = OnceLock::new();
    IMPORT_RE.get_or_init(|| {
        Regex::new(&format!(r"^{SEGMENT}(?:\.{SEGMENT})*\.(?:\*|{SEGMENT})$"))
            .expect("Invalid regex")
    })
}

/// A validated fully-qualified type name such as `io.swagger.annotations.Api`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName {
    package: String,
    simple: String,
}

impl QualifiedName {
    /// Parses a dotted name. A name without a package is rejected.
    pub fn parse(text: &str) -> AppResult<Self> {
        if !qualified_re().is_match(text) {
            return Err(AppError::InvalidName(format!(
                "'{}' is not a fully-qualified type name",
                text
            )));
        }
        let (package, simple) = split_last(text)?;
        Ok(Self {
            package: package.to_string(),
            simple: simple.to_string(),
        })
    }

    /// Everything before the last dot.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The last segment.
    pub fn simple_name(&self) -> &str {
        &self.simple
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.simple)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::parse(&value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.to_string()
    }
}

/// Splits an import path (`a.b.C` or `a.b.*`) into package and last segment.
pub fn split_import_path(text: &str) -> AppResult<(&str, &str)> {
    if !import_re().is_match(text) {
        return Err(AppError::InvalidName(format!(
            "'{}' is not a valid import path",
            text
        )));
    }
    split_last(text)
}

fn split_last(text: &str) -> AppResult<(&str, &str)> {
    text.rsplit_once('.')
        .ok_or_else(|| AppError::InvalidName(format!("'{}' has no package", text)))
}
