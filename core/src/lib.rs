#![deny(missing_docs)]

//! # Auto Swagger Core
//!
//! Compile-time rewriting of lightweight `Auto*` marker annotations into
//! Swagger 1.5 documentation annotations, and back out again.

/// Shared error types.
pub mod error;

/// In-memory syntax trees.
pub mod tree;

/// Marker schemas and argument binding.
pub mod schema;

/// Per-round processing context.
pub mod context;

/// Marker rewriting.
pub mod engine;

/// Enable/disable gate.
pub mod toggle;

/// Engine settings.
pub mod config;

/// Round coordination.
pub mod round;

/// Unit documents and the scanning round.
pub mod host;

pub use config::{EngineConfig, TargetNames};
pub use context::ProcessingContext;
pub use engine::{ImportPatch, ImportPolicy, RewriteEngine, TargetAnnotationSpec};
pub use error::{AppError, AppResult};
pub use host::{process_document, process_documents, DocumentFormat, ScanRound, UnitDocument};
pub use round::{
    MarkerProcessor, ProcessOutcome, Processor, RoundCoordinator, RoundEnvironment, RoundReport,
};
pub use schema::{
    builtin_schemas, AccessMode, AutoApi, AutoApiModel, AutoApiModelProperty, Contract,
    MarkerDescriptor, MarkerLevel, MarkerSchema,
};
pub use toggle::{Toggle, TOGGLE_ENV};
