use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category of requested view. Determines which workflow template and
/// style directive the assembler selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderKind {
    #[serde(rename = "exterior_iso")]
    ExteriorIsometric,
    #[serde(rename = "exterior_elev")]
    ExteriorElevation,
    #[serde(rename = "interior_plan")]
    InteriorPlan,
    #[serde(rename = "interior_persp")]
    InteriorPerspective,
}

impl RenderKind {
    pub fn label(&self) -> &'static str {
        match self {
            RenderKind::ExteriorIsometric => "exterior isometric",
            RenderKind::ExteriorElevation => "exterior elevation",
            RenderKind::InteriorPlan => "interior plan",
            RenderKind::InteriorPerspective => "interior perspective",
        }
    }
}

/// A single render request. Immutable once issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub kind: RenderKind,
    /// Compass viewpoint or elevation label, e.g. "SE" or "South (Stairs)".
    pub viewpoint: String,
    #[serde(default)]
    pub target_room_id: Option<String>,
}

impl RenderRequest {
    pub fn new(kind: RenderKind, viewpoint: impl Into<String>) -> Self {
        Self {
            kind,
            viewpoint: viewpoint.into(),
            target_room_id: None,
        }
    }

    pub fn with_target_room(mut self, room_id: impl Into<String>) -> Self {
        self.target_room_id = Some(room_id.into());
        self
    }
}

/// Binary audit judgment, independent of the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditVerdict {
    Pass,
    Fail,
}

/// Six-axis conformance score. Each axis is judged on [0, 10]; the reported
/// total is trusted as-is and not re-validated against the parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditScore {
    #[serde(default)]
    pub structural_accuracy: u32,
    #[serde(default)]
    pub spatial_geometry: u32,
    #[serde(default)]
    pub staircase_fidelity: u32,
    #[serde(default)]
    pub deck_accuracy: u32,
    #[serde(default)]
    pub south_wall_solidity: u32,
    #[serde(default)]
    pub render_quality: u32,
    #[serde(default)]
    pub total: u32,
}

impl AuditScore {
    pub const MAX_TOTAL: u32 = 60;
    /// 70% of the maximum. Both a PASS verdict and a total at or above this
    /// threshold are required for a Verified status.
    pub const PASSING_TOTAL: u32 = 42;
}

/// Building regions an audit failure can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCategory {
    Roof,
    Staircase,
    SouthWall,
    EastWall,
    WestWall,
    NorthWall,
    Deck,
    Footprint,
}

impl FailureCategory {
    /// The wire-format tag, also used when quoting failures back to the
    /// service during refinement.
    pub fn tag(&self) -> &'static str {
        match self {
            FailureCategory::Roof => "ROOF",
            FailureCategory::Staircase => "STAIRCASE",
            FailureCategory::SouthWall => "SOUTH_WALL",
            FailureCategory::EastWall => "EAST_WALL",
            FailureCategory::WestWall => "WEST_WALL",
            FailureCategory::NorthWall => "NORTH_WALL",
            FailureCategory::Deck => "DECK",
            FailureCategory::Footprint => "FOOTPRINT",
        }
    }
}

/// One itemized rule violation from the audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditFailure {
    pub category: FailureCategory,
    pub description: String,
    /// The corrective instruction quoted back during refinement.
    #[serde(default)]
    pub axiom_correction: String,
}

/// Structured audit payload. Every field is defaulted so that a bare `{}`,
/// the fail-safe stand-in for an unparseable response, deserializes cleanly
/// with an undefined verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub verdict: Option<AuditVerdict>,
    #[serde(default)]
    pub failures: Vec<AuditFailure>,
    #[serde(default)]
    pub score: Option<AuditScore>,
}

/// Terminal conformance status of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderStatus {
    Verified,
    Violation,
    Pending,
}

/// Outcome of one pipeline pass. Immutable once returned; a refinement
/// produces a new result rather than mutating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    pub id: Uuid,
    /// PNG payload returned by the generate stage.
    pub image_png: Vec<u8>,
    /// Free text the model emitted alongside the image, if any.
    #[serde(default)]
    pub self_score_text: String,
    #[serde(default)]
    pub audit_narrative: String,
    #[serde(default)]
    pub audit_failures: Vec<AuditFailure>,
    #[serde(default)]
    pub audit_score: Option<AuditScore>,
    /// True once an audit has executed for this image. Says nothing about
    /// whether the audit passed.
    pub audited: bool,
    pub status: RenderStatus,
    pub request: RenderRequest,
    pub timestamp: DateTime<Utc>,
    /// 0 for a first-pass render; incremented by each refinement.
    #[serde(default)]
    pub refinement_pass: u32,
    /// Operator-facing annotation, e.g. the manual-review note appended
    /// when the refinement ceiling is hit.
    #[serde(default)]
    pub note: Option<String>,
}
