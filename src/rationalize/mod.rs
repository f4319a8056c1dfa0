//! Spatial rationalization: one structured-output call that turns the
//! ingested building documents into a [`BuildingMap`] plus a material
//! inventory. Either the plan parses fully under the declared schema or
//! the operation fails; there is no partial recovery and no retry.

use serde_json::json;

use crate::config::StudioConfig;
use crate::error::PipelineResult;
use crate::ingest::DocumentSource;
use crate::library::{RuleLibrary, WorkflowSlot};
use crate::models::RationalizedPlan;
use crate::prompt;
use crate::service::parse::clean_json_response;
use crate::service::{GenerativeService, PromptPart, StructuredRequest};

const FALLBACK_INSTRUCTION: &str =
    "Perform a high-fidelity spatial audit of the supplied documents. Return JSON.";

/// Strict response schema for the `{map, inventory}` payload.
pub fn plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "map": {
                "type": "object",
                "properties": {
                    "totalLevels": { "type": "number" },
                    "globalFootprint": { "type": "string" },
                    "exteriorFeatures": { "type": "array", "items": { "type": "string" } },
                    "rooms": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "name": { "type": "string" },
                                "level": { "type": "number" },
                                "dimensions": { "type": "string" },
                                "sqFt": { "type": "number" },
                                "structuralFeatures": {
                                    "type": "array",
                                    "items": {
                                        "type": "object",
                                        "properties": {
                                            "type": { "type": "string" },
                                            "location": { "type": "string" },
                                            "details": { "type": "string" }
                                        }
                                    }
                                },
                                "adjacencies": { "type": "array", "items": { "type": "string" } }
                            }
                        }
                    }
                }
            },
            "inventory": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "room": { "type": "string" },
                        "category": { "type": "string" },
                        "type": { "type": "string" },
                        "quantity": { "type": "string" },
                        "notes": { "type": "string" }
                    }
                }
            }
        }
    })
}

pub struct SpatialRationalizer<'a> {
    service: &'a dyn GenerativeService,
    config: &'a StudioConfig,
}

impl<'a> SpatialRationalizer<'a> {
    pub fn new(service: &'a dyn GenerativeService, config: &'a StudioConfig) -> Self {
        Self { service, config }
    }

    /// Sends the documents with the audit workflow text (or the generic
    /// fallback instruction) and parses the structured plan.
    pub fn rationalize(
        &self,
        documents: &[DocumentSource],
        library: &RuleLibrary,
    ) -> PipelineResult<RationalizedPlan> {
        tracing::info!(documents = documents.len(), "rationalizing building documents");

        let mut parts: Vec<PromptPart> = documents
            .iter()
            .map(|document| PromptPart::inline(document.media_type.clone(), document.bytes.clone()))
            .collect();
        let instruction = prompt::workflow_body(library, WorkflowSlot::AxiomAudit);
        parts.push(PromptPart::text(if instruction.is_empty() {
            FALLBACK_INSTRUCTION.to_string()
        } else {
            instruction
        }));

        let raw = self.service.generate_structured(StructuredRequest {
            model: self.config.generation.text_model.clone(),
            system_framing: prompt::system_framing(library),
            parts,
            response_schema: plan_schema(),
        })?;

        let plan: RationalizedPlan = serde_json::from_str(clean_json_response(&raw))?;
        tracing::info!(
            rooms = plan.map.rooms.len(),
            inventory = plan.inventory.len(),
            "building map rationalized"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::library::default_library;
    use crate::service::testing::ScriptedService;
    use crate::service::ServiceError;

    fn sample_documents() -> Vec<DocumentSource> {
        vec![DocumentSource {
            name: "plan-a101.png".into(),
            media_type: "image/png".into(),
            bytes: b"sheet".to_vec(),
            fingerprint: "f".repeat(64),
        }]
    }

    fn plan_json() -> String {
        serde_json::json!({
            "map": {
                "totalLevels": 2,
                "globalFootprint": "30'-0\" x 34'-8\"",
                "exteriorFeatures": ["L-shaped deck", "exterior staircase"],
                "rooms": [
                    {
                        "id": "200",
                        "name": "Living Room 200",
                        "level": 2,
                        "dimensions": "15' x 20'",
                        "sqFt": 300.0,
                        "structuralFeatures": [
                            { "type": "Fireplace", "location": "north wall", "details": "masonry" }
                        ],
                        "adjacencies": ["201"]
                    },
                    {
                        "id": "201",
                        "name": "Kitchenette 201",
                        "level": 2,
                        "dimensions": "8' x 10'",
                        "sqFt": 80.0,
                        "structuralFeatures": [],
                        "adjacencies": ["200"]
                    }
                ]
            },
            "inventory": [
                {
                    "room": "200",
                    "category": "Finishes",
                    "type": "T&G ceiling planks",
                    "quantity": "320 sf",
                    "notes": "vaulted ceiling"
                }
            ]
        })
        .to_string()
    }

    #[test]
    fn fenced_response_parses_with_room_count_preserved() {
        let service = ScriptedService::new();
        service.push_structured(Ok(format!("```json\n{}\n```", plan_json())));
        let config = StudioConfig::default();
        let library = default_library();

        let plan = SpatialRationalizer::new(&service, &config)
            .rationalize(&sample_documents(), &library)
            .unwrap();
        assert_eq!(plan.map.rooms.len(), 2);
        assert_eq!(plan.inventory.len(), 1);
        assert_eq!(plan.map.room_by_id("201").unwrap().name, "Kitchenette 201");
    }

    #[test]
    fn request_carries_documents_framing_and_audit_instruction() {
        let service = ScriptedService::new();
        service.push_structured(Ok(plan_json()));
        let config = StudioConfig::default();
        let library = default_library();

        SpatialRationalizer::new(&service, &config)
            .rationalize(&sample_documents(), &library)
            .unwrap();

        let requests = service.structured_requests.borrow();
        let request = &requests[0];
        assert_eq!(request.model, config.generation.text_model);
        assert!(request.system_framing.contains("CORE CONSTITUTION"));
        assert_eq!(request.parts.len(), 2);
        assert!(matches!(&request.parts[0], PromptPart::InlineData { media_type, .. }
            if media_type == "image/png"));
        assert!(matches!(&request.parts[1], PromptPart::Text(text)
            if text.contains("cardinal wall axioms")));
    }

    #[test]
    fn missing_audit_workflow_falls_back_to_generic_instruction() {
        let service = ScriptedService::new();
        service.push_structured(Ok(plan_json()));
        let config = StudioConfig::default();
        let library = RuleLibrary::new();

        SpatialRationalizer::new(&service, &config)
            .rationalize(&sample_documents(), &library)
            .unwrap();

        let requests = service.structured_requests.borrow();
        assert!(matches!(&requests[0].parts[1], PromptPart::Text(text)
            if text.contains("high-fidelity spatial audit")));
    }

    #[test]
    fn malformed_plan_is_fatal() {
        let service = ScriptedService::new();
        service.push_structured(Ok("not even close to json".into()));
        let config = StudioConfig::default();
        let library = default_library();

        let err = SpatialRationalizer::new(&service, &config)
            .rationalize(&sample_documents(), &library)
            .unwrap_err();
        assert!(matches!(err, PipelineError::MalformedPlan(_)));
    }

    #[test]
    fn service_failures_propagate_verbatim() {
        let service = ScriptedService::new();
        service.push_structured(Err(ServiceError::Transport("timeout".into())));
        let config = StudioConfig::default();
        let library = default_library();

        let err = SpatialRationalizer::new(&service, &config)
            .rationalize(&sample_documents(), &library)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Service(ServiceError::Transport(_))
        ));
    }
}
