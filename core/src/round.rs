//! # Round Coordinator
//!
//! Wires marker types to the host's processing rounds.
//!
//! The host reports, per marker type, the declarations carrying that marker
//! (`RoundEnvironment`). Each registered `Processor` filters them by kind and
//! hands each match to its `RewriteEngine`: `apply` when the toggle is enabled,
//! `revert` otherwise.

use crate::config::EngineConfig;
use crate::context::ProcessingContext;
use crate::engine::RewriteEngine;
use crate::error::AppResult;
use crate::schema::{
    AutoApi, AutoApiModel, AutoApiModelProperty, MarkerDescriptor, MarkerLevel, MarkerSchema,
};
use crate::toggle::Toggle;
use crate::tree::{DeclId, QualifiedName};

/// What the host knows about the current round.
pub trait RoundEnvironment {
    /// Declarations carrying `marker` in this round, in a stable order.
    fn elements_annotated_with(&self, marker: &MarkerDescriptor) -> Vec<DeclId>;
}

/// Counts produced by one processor in one round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Whether the marker type was fully handled. Always `true`: processors never defer.
    pub claimed: bool,
    /// Declarations rewritten with `apply`.
    pub applied: usize,
    /// Declarations stripped with `revert`.
    pub reverted: usize,
    /// Declarations of the wrong kind, left untouched.
    pub skipped: usize,
}

/// One marker type's hook into a round.
pub trait Processor {
    /// The marker this processor handles.
    fn descriptor(&self) -> MarkerDescriptor;

    /// Fully-qualified name of the supported marker type.
    fn supported_annotation_type(&self) -> &'static str {
        self.descriptor().qualified_name
    }

    /// Handles every declaration the round reports for this marker.
    fn process(
        &self,
        round: &dyn RoundEnvironment,
        ctx: &mut ProcessingContext,
        toggle: Toggle,
    ) -> AppResult<ProcessOutcome>;
}

/// Generic processor for marker `M`.
#[derive(Debug, Clone)]
pub struct MarkerProcessor<M> {
    engine: RewriteEngine<M>,
}

impl<M: MarkerSchema> MarkerProcessor<M> {
    /// Wraps an engine.
    pub fn new(engine: RewriteEngine<M>) -> Self {
        Self { engine }
    }

    /// Builds the processor for `M` from shared settings and `M`'s target.
    pub fn from_config(config: &EngineConfig, target: QualifiedName) -> Self {
        Self::new(RewriteEngine::new(
            target,
            config.contract,
            config.import_policy,
        ))
    }
}

impl<M: MarkerSchema> Processor for MarkerProcessor<M> {
    fn descriptor(&self) -> MarkerDescriptor {
        M::DESCRIPTOR
    }

    fn process(
        &self,
        round: &dyn RoundEnvironment,
        ctx: &mut ProcessingContext,
        toggle: Toggle,
    ) -> AppResult<ProcessOutcome> {
        let descriptor = M::DESCRIPTOR;
        let mut outcome = ProcessOutcome {
            claimed: true,
            ..ProcessOutcome::default()
        };

        for decl in round.elements_annotated_with(&descriptor) {
            let kind = ctx.declaration(decl)?.kind;
            let expected = match descriptor.level {
                MarkerLevel::Type => kind.is_type(),
                MarkerLevel::Field => kind.is_field(),
            };
            if !expected {
                tracing::debug!(
                    declaration = %ctx.describe(decl),
                    "skipping @{} on a non-{} declaration",
                    descriptor.name,
                    descriptor.level
                );
                outcome.skipped += 1;
                continue;
            }

            if toggle.is_enabled() {
                self.engine.apply(ctx, decl)?;
                outcome.applied += 1;
            } else {
                self.engine.revert(ctx, decl)?;
                outcome.reverted += 1;
            }
        }

        Ok(outcome)
    }
}

/// Totals over every processor of a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Declarations rewritten.
    pub applied: usize,
    /// Declarations stripped.
    pub reverted: usize,
    /// Declarations skipped for their kind.
    pub skipped: usize,
}

impl RoundReport {
    fn absorb(&mut self, outcome: ProcessOutcome) {
        self.applied += outcome.applied;
        self.reverted += outcome.reverted;
        self.skipped += outcome.skipped;
    }

    /// True if any declaration was modified.
    pub fn changed(&self) -> bool {
        self.applied + self.reverted > 0
    }
}

/// Runs every registered processor once per round.
pub struct RoundCoordinator {
    processors: Vec<Box<dyn Processor>>,
}

impl RoundCoordinator {
    /// A coordinator with no processors.
    pub fn empty() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    /// The built-in processors (`AutoApi`, `AutoApiModel`, `AutoApiModelProperty`).
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut coordinator = Self::empty();
        coordinator.register(MarkerProcessor::<AutoApi>::from_config(
            config,
            config.targets.api.clone(),
        ));
        coordinator.register(MarkerProcessor::<AutoApiModel>::from_config(
            config,
            config.targets.api_model.clone(),
        ));
        coordinator.register(MarkerProcessor::<AutoApiModelProperty>::from_config(
            config,
            config.targets.api_model_property.clone(),
        ));
        coordinator
    }

    /// Adds a processor; processors run in registration order.
    pub fn register(&mut self, processor: impl Processor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// Qualified names of every supported marker type.
    pub fn supported_annotation_types(&self) -> Vec<&'static str> {
        self.processors
            .iter()
            .map(|p| p.supported_annotation_type())
            .collect()
    }

    /// Runs one round. `toggle` is read by the caller once, before the round starts.
    pub fn run(
        &self,
        round: &dyn RoundEnvironment,
        ctx: &mut ProcessingContext,
        toggle: Toggle,
    ) -> AppResult<RoundReport> {
        let mut report = RoundReport::default();
        for processor in &self.processors {
            let outcome = processor.process(round, ctx, toggle)?;
            debug_assert!(outcome.claimed);
            report.absorb(outcome);
        }
        tracing::info!(
            %toggle,
            applied = report.applied,
            reverted = report.reverted,
            skipped = report.skipped,
            "round complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ImportPolicy;
    use crate::schema::Contract;
    use crate::tree::{DeclKind, Literal};
    use indexmap::IndexMap;
    use std::collections::HashMap;

    /// Round that reports exactly what the test registered.
    #[derive(Default)]
    struct FixedRound {
        elements: HashMap<&'static str, Vec<DeclId>>,
    }

    impl RoundEnvironment for FixedRound {
        fn elements_annotated_with(&self, marker: &MarkerDescriptor) -> Vec<DeclId> {
            self.elements.get(marker.name).cloned().unwrap_or_default()
        }
    }

    fn annotate(ctx: &mut ProcessingContext, decl: DeclId, name: &str, args: &[(&str, Literal)]) {
        let name = ctx.intern(name);
        let arguments: IndexMap<_, _> = args
            .iter()
            .map(|(k, v)| (ctx.intern(k), v.clone()))
            .collect();
        let id = ctx.maker().annotation(name, arguments);
        ctx.maker().annotate(decl, id).unwrap();
    }

    fn setup() -> (ProcessingContext, DeclId, DeclId) {
        let mut ctx = ProcessingContext::new();
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
        (ctx, class, field)
    }

    fn marker_names(ctx: &ProcessingContext, decl: DeclId) -> Vec<String> {
        ctx.annotations(decl)
            .unwrap()
            .iter()
            .map(|id| ctx.resolve(ctx.annotation(*id).unwrap().name).to_string())
            .collect()
    }

    #[test]
    fn test_only_expected_kind_is_rewritten() {
        let (mut ctx, class, field) = setup();
        annotate(&mut ctx, class, "AutoApiModel", &[]);
        annotate(&mut ctx, field, "AutoApiModel", &[]);
        let mut round = FixedRound::default();
        round.elements.insert("AutoApiModel", vec![class, field]);

        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        let report = coordinator.run(&round, &mut ctx, Toggle::Enabled).unwrap();

        assert_eq!(report.applied, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(marker_names(&ctx, class), vec!["ApiModel"]);
        assert_eq!(marker_names(&ctx, field), vec!["AutoApiModel"]);
    }

    #[test]
    fn test_absent_toggle_reverts_both_levels() {
        let (mut ctx, class, field) = setup();
        annotate(&mut ctx, class, "AutoApiModel", &[]);
        annotate(&mut ctx, field, "AutoApiModelProperty", &[("value", "x".into())]);
        let mut round = FixedRound::default();
        round.elements.insert("AutoApiModel", vec![class]);
        round.elements.insert("AutoApiModelProperty", vec![field]);

        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        let report = coordinator.run(&round, &mut ctx, Toggle::Absent).unwrap();

        assert_eq!(report.reverted, 2);
        assert!(ctx.annotations(class).unwrap().is_empty());
        assert!(ctx.annotations(field).unwrap().is_empty());
    }

    #[test]
    fn test_processor_always_claims() {
        let (mut ctx, _, _) = setup();
        let processor = MarkerProcessor::<AutoApi>::new(RewriteEngine::new(
            QualifiedName::parse(AutoApi::DEFAULT_TARGET).unwrap(),
            Contract::Minimal,
            ImportPolicy::Deduplicate,
        ));
        let outcome = processor
            .process(&FixedRound::default(), &mut ctx, Toggle::Disabled)
            .unwrap();
        assert!(outcome.claimed);
        assert_eq!(outcome.reverted, 0);
    }

    #[test]
    fn test_supported_annotation_types() {
        let coordinator = RoundCoordinator::from_config(&EngineConfig::default());
        assert_eq!(
            coordinator.supported_annotation_types(),
            vec![
                "io.github.photowey.auto.swagger.annotation.AutoApi",
                "io.github.photowey.auto.swagger.annotation.AutoApiModel",
                "io.github.photowey.auto.swagger.annotation.AutoApiModelProperty",
            ]
        );
        assert!(RoundCoordinator::empty()
            .supported_annotation_types()
            .is_empty());
    }
}
