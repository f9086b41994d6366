//! A `RoundEnvironment` that discovers markers by scanning the arena.

use crate::context::ProcessingContext;
use crate::error::AppResult;
use crate::round::RoundEnvironment;
use crate::schema::MarkerDescriptor;
use crate::tree::DeclId;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Snapshot of which declarations carry which annotation names, taken at round start.
#[derive(Debug, Default, Clone)]
pub struct ScanRound {
    index: HashMap<String, Vec<DeclId>>,
}

impl ScanRound {
    /// Indexes every annotation of every declaration in `ctx`.
    pub fn scan(ctx: &ProcessingContext) -> AppResult<Self> {
        let mut index: HashMap<String, Vec<DeclId>> = HashMap::new();
        for (id, decl) in ctx.trees().declarations() {
            for annotation in &decl.annotations {
                let name = ctx.resolve(ctx.annotation(*annotation)?.name);
                index.entry(name.to_string()).or_default().push(id);
            }
        }
        Ok(Self { index })
    }
}

impl RoundEnvironment for ScanRound {
    fn elements_annotated_with(&self, marker: &MarkerDescriptor) -> Vec<DeclId> {
        let mut found: IndexSet<DeclId> = IndexSet::new();
        for key in [marker.name, marker.qualified_name] {
            if let Some(ids) = self.index.get(key) {
                found.extend(ids.iter().copied());
            }
        }
        let mut ids: Vec<DeclId> = found.into_iter().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::document::{lower, DocumentFormat, UnitDocument};
    use crate::schema::{AutoApiModel, AutoApiModelProperty, MarkerSchema};

    #[test]
    fn test_scan_finds_simple_and_qualified_once() {
        let doc = UnitDocument::parse(
            r#"
path: Player.java
declarations:
  - name: Player
    kind: class
    annotations:
      - name: AutoApiModel
      - name: io.github.photowey.auto.swagger.annotation.AutoApiModel
    members:
      - name: score
        kind: field
        annotations:
          - name: AutoApiModelProperty
  - name: Team
    kind: class
    annotations:
      - name: io.github.photowey.auto.swagger.annotation.AutoApiModel
"#,
            DocumentFormat::Yaml,
        )
        .unwrap();
        let mut ctx = ProcessingContext::new();
        lower(&mut ctx, &doc).unwrap();
        let round = ScanRound::scan(&ctx).unwrap();

        let models = round.elements_annotated_with(&AutoApiModel::DESCRIPTOR);
        let names: Vec<_> = models
            .iter()
            .map(|d| ctx.resolve(ctx.declaration(*d).unwrap().name))
            .collect();
        assert_eq!(names, vec!["Player", "Team"]);

        let props = round.elements_annotated_with(&AutoApiModelProperty::DESCRIPTOR);
        assert_eq!(props.len(), 1);
    }
}
