//! The render pipeline: a single linear generate → audit → verdict pass
//! per invocation, plus the bounded refinement operation in [`refine`].
//!
//! Each invocation is one sequential chain with one outbound service call
//! per stage; there is no backtracking, no internal retry, and no
//! cancellation mid-chain.

mod refine;

pub use refine::{refine, REFINEMENT_CEILING};

use chrono::Utc;
use uuid::Uuid;

use crate::audit::{self, AuditEngine};
use crate::config::StudioConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::library::RuleLibrary;
use crate::models::{RenderRequest, RenderResult, Room};
use crate::prompt;
use crate::service::{GenerativeService, ImageRequest, PromptPart};

pub(crate) const STAGE_GENERATE: &str = "STAGE 1: GENERATING ARCHITECTURAL GEOMETRY...";
pub(crate) const STAGE_AUDIT: &str = "STAGE 2: RUNNING CONFORMITY AUDIT ON RENDER...";

/// Receives coarse human-readable stage labels before each outbound call.
/// Advisory only; not part of the success contract.
pub trait RenderObserver {
    fn stage(&mut self, label: &str);
}

impl<F: FnMut(&str)> RenderObserver for F {
    fn stage(&mut self, label: &str) {
        self(label)
    }
}

pub struct RenderPipeline<'a> {
    service: &'a dyn GenerativeService,
    config: &'a StudioConfig,
}

impl<'a> RenderPipeline<'a> {
    pub fn new(service: &'a dyn GenerativeService, config: &'a StudioConfig) -> Self {
        Self { service, config }
    }

    /// Drives one request through generate → audit → verdict and emits a
    /// first-pass result. A response without an image payload is fatal,
    /// distinct from a transport failure.
    pub fn execute(
        &self,
        request: &RenderRequest,
        library: &RuleLibrary,
        room: Option<&Room>,
        observer: &mut dyn RenderObserver,
    ) -> PipelineResult<RenderResult> {
        let framing = prompt::system_framing(library);
        let instruction = prompt::render_prompt(library, request, room);
        tracing::info!(
            kind = request.kind.label(),
            viewpoint = %request.viewpoint,
            "starting render pipeline"
        );

        observer.stage(STAGE_GENERATE);
        let content = self.service.generate_image(ImageRequest {
            model: self.config.generation.image_model.clone(),
            system_framing: framing.clone(),
            parts: vec![PromptPart::text(instruction)],
            image: self.config.image.clone(),
        })?;
        let image_png = content.image.ok_or(PipelineError::MissingImage)?;
        let self_score_text = content.text.unwrap_or_default();

        observer.stage(STAGE_AUDIT);
        let report = AuditEngine::new(self.service, self.config).run(&image_png, &framing, library)?;
        let status = audit::resolve_status(&report);
        tracing::info!(?status, failures = report.failures.len(), "render audited");

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
            refinement_pass: 0,
            note: None,
        })
    }
}
