//! Bounded iterative refinement: re-enter generate → audit with the prior
//! image as a reference input and the prior failures as explicit
//! corrections. The pass counter travels by value on each result, so a
//! chain can never interfere with another.

use chrono::Utc;
use uuid::Uuid;

use crate::audit::{self, AuditEngine};
use crate::config::StudioConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::library::RuleLibrary;
use crate::models::{RenderRequest, RenderResult, RenderStatus, Room};
use crate::prompt;
use crate::service::{GenerativeService, ImageRequest, PromptPart};

use super::{RenderObserver, STAGE_AUDIT};

/// Maximum refinement passes per chain. Beyond this the operation
/// short-circuits without touching the service.
pub const REFINEMENT_CEILING: u32 = 3;

pub(crate) const STAGE_REFINE: &str = "STAGE 3: AUTO-REFINING RENDER...";

const MANUAL_REVIEW_NOTE: &str =
    "Refinement ceiling reached; further passes are unlikely to converge. Manual review required.";

/// Runs one refinement pass against `previous`, producing a new result
/// with a fresh id and `refinement_pass + 1`. The previous result is
/// never mutated; the caller decides whether to keep both.
pub fn refine(
    service: &dyn GenerativeService,
    config: &StudioConfig,
    library: &RuleLibrary,
    previous: &RenderResult,
    request: &RenderRequest,
    room: Option<&Room>,
    observer: &mut dyn RenderObserver,
) -> PipelineResult<RenderResult> {
    if previous.refinement_pass >= REFINEMENT_CEILING {
        tracing::warn!(
            pass = previous.refinement_pass,
            "refinement ceiling reached; short-circuiting"
        );
        let mut result = previous.clone();
        result.id = Uuid::new_v4();
        result.timestamp = Utc::now();
        result.status = RenderStatus::Violation;
        result.note = Some(MANUAL_REVIEW_NOTE.to_string());
        return Ok(result);
    }

    let framing = prompt::system_framing(library);
    tracing::info!(
        pass = previous.refinement_pass + 1,
        failures = previous.audit_failures.len(),
        "starting refinement pass"
    );

    observer.stage(STAGE_REFINE);
    let content = service.generate_image(ImageRequest {
        model: config.generation.image_model.clone(),
        system_framing: framing.clone(),
        parts: vec![
            PromptPart::inline("image/png", previous.image_png.clone()),
            PromptPart::text(correction_prompt(previous)),
        ],
        image: config.image.clone(),
    })?;
    let image_png = content.image.ok_or(PipelineError::MissingImage)?;
    let self_score_text = content.text.unwrap_or_default();

    observer.stage(STAGE_AUDIT);
    let report = AuditEngine::new(service, config).run(&image_png, &framing, library)?;
    let status = audit::resolve_status(&report);
    tracing::info!(?status, "refined render audited");

    Ok(RenderResult {
        id: Uuid::new_v4(),
        image_png,
        self_score_text,
        audit_narrative: report.narrative,
        audit_failures: report.failures,
        audit_score: report.score,
        audited: true,
        status,
        request: request.clone(),
        timestamp: Utc::now(),
        refinement_pass: previous.refinement_pass + 1,
        note: None,
    })
}

/// Itemizes every prior failure as a correction bullet. Elements outside
/// the failure list are explicitly pinned in place so the service treats
/// this as targeted correction rather than regeneration.
fn correction_prompt(previous: &RenderResult) -> String {
    let mut lines = vec![
        "The supplied render failed its conformity audit. Correct every violation listed below:"
            .to_string(),
    ];
    for failure in &previous.audit_failures {
        lines.push(format!(
            "- {}: {} (fix: {})",
            failure.category.tag(),
            failure.description,
            failure.axiom_correction
        ));
    }
    lines.push(String::new());
    lines.push(
        "Elements not mentioned in the failure list must remain unchanged. \
         Preserve the camera, framing, and style of the reference image."
            .to_string(),
    );
    lines.join("\n")
}
