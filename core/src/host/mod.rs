//! # Host Adapter
//!
//! Stands in for the compiler host: unit documents are lowered into a
//! `ProcessingContext`, a `ScanRound` reports where the markers sit, the
//! `RoundCoordinator` rewrites the trees, and the result is raised back.

/// Serialized units and their conversion to and from the arena.
pub mod document;

/// Marker discovery over the arena.
pub mod scan;

pub use document::{
    lower, raise, AnnotationDocument, DeclarationDocument, DocumentFormat, UnitDocument,
};
pub use scan::ScanRound;

use crate::context::ProcessingContext;
use crate::error::{AppError, AppResult};
use crate::round::{RoundCoordinator, RoundReport};
use crate::toggle::Toggle;

/// Runs one round over a batch of units and returns them rewritten, in input order.
pub fn process_documents(
    docs: &[UnitDocument],
    coordinator: &RoundCoordinator,
    toggle: Toggle,
) -> AppResult<(Vec<UnitDocument>, RoundReport)> {
    let mut ctx = ProcessingContext::new();
    let units = docs
        .iter()
        .map(|doc| lower(&mut ctx, doc))
        .collect::<AppResult<Vec<_>>>()?;

    let round = ScanRound::scan(&ctx)?;
    let report = coordinator.run(&round, &mut ctx, toggle)?;

    let rewritten = units
        .into_iter()
        .map(|unit| raise(&ctx, unit))
        .collect::<AppResult<Vec<_>>>()?;
    Ok((rewritten, report))
}

/// Single-unit form of [`process_documents`].
pub fn process_document(
    doc: &UnitDocument,
    coordinator: &RoundCoordinator,
    toggle: Toggle,
) -> AppResult<(UnitDocument, RoundReport)> {
    let (mut docs, report) = process_documents(std::slice::from_ref(doc), coordinator, toggle)?;
    let doc = docs
        .pop()
        .ok_or_else(|| AppError::InvariantViolation("round dropped its only unit".into()))?;
    Ok((doc, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::schema::Contract;
    use crate::tree::Literal;
    use pretty_assertions::assert_eq;

    const SCORE: &str = r#"
path: Player.java
package: com.example
imports:
  - java.util.List
declarations:
  - name: Player
    kind: class
    annotations:
      - name: AutoApiModel
        arguments: { value: Player }
    members:
      - name: score
        kind: field
        annotations:
          - name: NotNull
          - name: AutoApiModelProperty
            arguments: { value: player score, required: true }
          - name: Min
            arguments: { value: 0 }
"#;

    fn score() -> UnitDocument {
        UnitDocument::parse(SCORE, DocumentFormat::Yaml).unwrap()
    }

    #[test]
    fn test_enabled_full_contract_rewrites_in_place() {
        let config = EngineConfig {
            contract: Contract::Full,
            ..EngineConfig::default()
        };
        let coordinator = RoundCoordinator::from_config(&config);
        let (out, report) = process_document(&score(), &coordinator, Toggle::Enabled).unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(
            out.imports,
            vec![
                "java.util.List".to_string(),
                "io.swagger.annotations.ApiModel".to_string(),
                "io.swagger.annotations.ApiModelProperty".to_string(),
            ]
        );

        let field = &out.declarations[0].members[0];
        let names: Vec<_> = field.annotations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["NotNull", "ApiModelProperty", "Min"]);
        let property = &field.annotations[1];
        assert_eq!(property.arguments["value"], Literal::from("player score"));
        assert_eq!(property.arguments["required"], Literal::Bool(true));
    }

    #[test]
    fn test_disabled_strips_markers_only() {
        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        let (out, report) = process_document(&score(), &coordinator, Toggle::Disabled).unwrap();

        assert_eq!(report.reverted, 2);
        assert_eq!(out.imports, vec!["java.util.List".to_string()]);
        assert!(out.declarations[0].annotations.is_empty());
        let names: Vec<_> = out.declarations[0].members[0]
            .annotations
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["NotNull", "Min"]);
    }

    #[test]
    fn test_unit_without_markers_is_unchanged() {
        let doc = UnitDocument::parse(
            "path: Plain.java\ndeclarations:\n  - name: Plain\n    kind: class\n",
            DocumentFormat::Yaml,
        )
        .unwrap();
        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        let (out, report) = process_document(&doc, &coordinator, Toggle::Enabled).unwrap();
        assert_eq!(out, doc);
        assert!(!report.changed());
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let plain = UnitDocument::parse("path: A.java\n", DocumentFormat::Yaml).unwrap();
        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        let (out, report) =
            process_documents(&[plain.clone(), score()], &coordinator, Toggle::Enabled).unwrap();
        assert_eq!(out[0], plain);
        assert_eq!(out[1].path, "Player.java");
        assert_eq!(report.applied, 2);
    }
}
