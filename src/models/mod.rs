pub mod building;
pub mod render;

pub use building::{
    BuildingMap, FeatureKind, MaterialCategory, MaterialItem, RationalizedPlan, Room,
    StructuralFeature,
};
pub use render::{
    AuditFailure, AuditReport, AuditScore, AuditVerdict, FailureCategory, RenderKind,
    RenderRequest, RenderResult, RenderStatus,
};
