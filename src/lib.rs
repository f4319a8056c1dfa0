pub mod audit;
pub mod config;
pub mod error;
pub mod ingest;
pub mod library;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod rationalize;
pub mod service;
pub mod studio;

// Re-export commonly used types for convenience.
pub use config::StudioConfig;
pub use error::{PipelineError, PipelineResult};
pub use ingest::DocumentSource;
pub use library::{RuleCategory, RuleItem, RuleLibrary, WorkflowSlot};
pub use models::{
    AuditFailure, AuditReport, AuditScore, BuildingMap, RenderKind, RenderRequest, RenderResult,
    RenderStatus, Room,
};
pub use pipeline::{RenderObserver, REFINEMENT_CEILING};
pub use service::{
    GeneratedContent, GenerativeService, ImageRequest, ServiceError, StructuredRequest,
};
pub use studio::Studio;
