//! The audit engine: one structured-output request that judges a rendered
//! image against the active axioms, plus the verdict rule that turns the
//! report into a terminal status.
//!
//! Inability to confirm conformance must never read as success: a response
//! that fails to parse degrades to an empty report, and an empty report
//! always resolves to [`RenderStatus::Violation`].

use serde_json::json;

use crate::config::StudioConfig;
use crate::library::{RuleLibrary, WorkflowSlot};
use crate::models::{AuditReport, AuditScore, AuditVerdict, RenderStatus};
use crate::prompt;
use crate::service::parse::clean_json_response;
use crate::service::{GenerativeService, PromptPart, ServiceError, StructuredRequest};

const FALLBACK_AUDIT_INSTRUCTION: &str =
    "Audit this image against the cardinal wall axioms. Be extremely critical. \
     List every discrepancy.";

/// Strict response schema for the audit payload.
pub fn audit_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "narrative": { "type": "string" },
            "verdict": { "type": "string", "enum": ["PASS", "FAIL"] },
            "failures": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": [
                                "ROOF", "STAIRCASE", "SOUTH_WALL", "EAST_WALL",
                                "WEST_WALL", "NORTH_WALL", "DECK", "FOOTPRINT"
                            ]
                        },
                        "description": { "type": "string" },
                        "axiom_correction": { "type": "string" }
                    }
                }
            },
            "score": {
                "type": "object",
                "properties": {
                    "structural_accuracy": { "type": "number" },
                    "spatial_geometry": { "type": "number" },
                    "staircase_fidelity": { "type": "number" },
                    "deck_accuracy": { "type": "number" },
                    "south_wall_solidity": { "type": "number" },
                    "render_quality": { "type": "number" },
                    "total": { "type": "number" }
                }
            }
        }
    })
}

/// Computes the terminal status from an audit report. Verified requires
/// both an explicit PASS verdict and a passing total; neither alone
/// suffices, and an absent verdict or score resolves to Violation.
pub fn resolve_status(report: &AuditReport) -> RenderStatus {
    let passed = report.verdict == Some(AuditVerdict::Pass);
    let total = report.score.as_ref().map_or(0, |score| score.total);
    if passed && total >= AuditScore::PASSING_TOTAL {
        RenderStatus::Verified
    } else {
        RenderStatus::Violation
    }
}

pub struct AuditEngine<'a> {
    service: &'a dyn GenerativeService,
    config: &'a StudioConfig,
}

impl<'a> AuditEngine<'a> {
    pub fn new(service: &'a dyn GenerativeService, config: &'a StudioConfig) -> Self {
        Self { service, config }
    }

    /// Audits a rendered image under the supplied system framing. Service
    /// failures propagate; a malformed response does not.
    pub fn run(
        &self,
        image_png: &[u8],
        system_framing: &str,
        library: &RuleLibrary,
    ) -> Result<AuditReport, ServiceError> {
        let raw = self.service.generate_structured(StructuredRequest {
            model: self.config.generation.text_model.clone(),
            system_framing: system_framing.to_string(),
            parts: vec![
                PromptPart::inline("image/png", image_png.to_vec()),
                PromptPart::text(audit_instruction(library)),
            ],
            response_schema: audit_schema(),
        })?;
        Ok(parse_report(&raw))
    }
}

fn audit_instruction(library: &RuleLibrary) -> String {
    let body = prompt::workflow_body(library, WorkflowSlot::AxiomAudit);
    let body = if body.is_empty() {
        FALLBACK_AUDIT_INSTRUCTION.to_string()
    } else {
        body
    };
    format!(
        "{body}\n\nEnumerate every visible element wall by wall, compare each \
         against the framing rules, and return the structured verdict, \
         itemized failures, and score."
    )
}

fn parse_report(raw: &str) -> AuditReport {
    match serde_json::from_str(clean_json_response(raw)) {
        Ok(report) => report,
        Err(error) => {
            tracing::warn!(%error, "audit response failed to parse; treating as unverified");
            AuditReport::default()
        }
    }
}
